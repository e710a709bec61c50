//! Top-level facade crate for promsynth.
//!
//! Re-exports the core registry and the server library so users can depend on a single crate.

pub mod core {
    pub use promsynth_core::*;
}

pub mod server {
    pub use promsynth_server::*;
}
