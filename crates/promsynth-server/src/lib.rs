//! promsynth server library entry.
//!
//! Wires configuration, the update scheduler, and the HTTP surface around the
//! core registry. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod scheduler;
