// src/core/mod.rs

pub mod comments;
pub mod display;
pub mod engine;
pub mod gesture;
pub mod lexicon;
pub mod navigator;
pub mod timer;
pub mod tokenizer;
pub mod tooltip;
pub mod types;
