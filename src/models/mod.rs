// src/models/mod.rs

pub mod policy;
pub mod sanitize;
