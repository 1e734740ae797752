// src/analysis/mod.rs
pub mod crossover;
pub mod indicators;
