// src/handlers/mod.rs
pub mod random;
pub mod status;
pub mod ui;
