pub mod areas;
pub mod commands;
pub mod errors;
pub mod index;
pub mod objects;
