pub mod config;
pub mod migrate;
pub mod procedures;
pub mod token;
