// src/lib.rs

pub mod analysis;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod types;
