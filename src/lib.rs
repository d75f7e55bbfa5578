// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod data;
pub mod report;
pub mod specs;

pub mod export;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod store;

pub mod cli;
pub mod gui;
