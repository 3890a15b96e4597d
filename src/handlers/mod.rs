//! Procedure handlers. Each takes the shared state, a validated input where
//! it has one, and the acting user where the record is stamped with one.

pub mod admin;
pub mod complaints;
pub mod dashboard;
pub mod health;
pub mod housing;
pub mod infrastructure;
pub mod media;
pub mod publications;
pub mod users;
pub mod work_orders;
