//! Persistence models: the `player` entity, its enums and the field
//! rules every write must satisfy.

pub mod errors;
pub mod db;
pub mod player;

#[cfg(test)]
mod tests;
