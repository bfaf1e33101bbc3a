//! Service layer for the player registry.
//! - Separates business rules (validation, filtering, paging, level math) from data access.
//! - Reuses field rules and the entity from the `models` crate.
//! - Persistence is reached only through [`player::repository::PlayerRepository`].

pub mod errors;
pub mod pagination;
pub mod player;
#[cfg(test)]
pub mod test_support;
