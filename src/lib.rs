// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod learning;
pub mod persistence;
pub use crate::core::engine::SlangEngine;
