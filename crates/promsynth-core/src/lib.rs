//! promsynth core: synthetic instruments, the registry that owns them, the
//! sampling policy that perturbs them, and the exported views of their state.
//!
//! This crate carries no runtime or transport dependencies; the server crate
//! drives it from timers and HTTP handlers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Misconfiguration surfaces as `SynthError`/`Result` so the binary can fail
//! fast with a readable message.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod expo;
pub mod instrument;
pub mod kind;
pub mod naming;
pub mod registry;
pub mod sample;
pub mod snapshot;

/// Shared result type.
pub use error::{ErrorCode, Result, SynthError};
pub use kind::{KindSelection, MetricKind};
pub use naming::{InstrumentDesc, Labels, Naming};
pub use registry::{Registry, TickReport};
pub use snapshot::ExportedRow;
