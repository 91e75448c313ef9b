//! stocklens — equity analytics engine.
//!
//! Hexagonal architecture: analytics logic in [`domain`], port traits in
//! [`ports`], concrete file-backed implementations in [`adapters`].
//!
//! The three engines — indicator analysis, crossover backtest, fundamentals
//! derivation — are pure functions over in-memory series. They never perform
//! I/O and never fail: missing or malformed inputs degrade field-by-field
//! into absent values or neutral defaults.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
