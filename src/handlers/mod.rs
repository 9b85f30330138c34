// src/handlers/mod.rs

pub mod health;
pub mod policy;
pub mod sanitize;
