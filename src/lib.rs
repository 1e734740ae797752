// src/lib.rs
// Main library module declarations

pub mod analysis;
pub mod config;
pub mod domain;
pub mod market_data;
pub mod notification;
pub mod schedule;
pub mod watcher;
pub mod watchlist;
