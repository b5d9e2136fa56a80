//! blockdrop (workspace facade crate).
//!
//! Re-exports the engine crates under `blockdrop::{core, input, types}` and
//! hosts the headless [`replay`] driver used by the CLI.

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_types as types;

pub mod replay;
