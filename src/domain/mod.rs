//! Core analytics types and logic.

pub mod series;
pub mod indicator;
pub mod analysis;
pub mod backtest;
pub mod fundamentals;
pub mod derive;
pub mod settings;
pub mod error;
