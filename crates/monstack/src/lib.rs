//! Top-level facade crate for monstack.
//!
//! Re-exports the core types, the demo app library and the checker library
//! so users can depend on a single crate.

pub mod core {
    pub use monstack_core::*;
}

pub mod app {
    pub use monstack_app::*;
}

pub mod check {
    pub use monstack_check::*;
}
