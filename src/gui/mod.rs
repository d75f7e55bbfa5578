// src/gui/mod.rs
pub mod app;
mod actions;
mod components;
pub mod table_model;

pub use app::run;
