//! Infrastructure layer: everything that touches the outside world.
//!
//! Currently this is configuration persistence only.  The UI bridge that
//! renders the published board lives outside this crate.

pub mod storage;
