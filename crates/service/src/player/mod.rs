//! Player module: three-layer architecture (domain, repository, service).
//!
//! Handlers talk to [`PlayerService`], which owns every business rule and
//! reaches storage only through [`repository::PlayerRepository`].

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Player, PlayerFilter, PlayerInput, PlayerOrder};
pub use service::PlayerService;
