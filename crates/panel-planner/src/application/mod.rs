//! Application layer use cases for the planner.
//!
//! Use cases in this layer orchestrate the domain objects in `panel-core` to
//! fulfil a user goal, depend only on abstractions at the edges, and contain
//! no file system or UI framework calls.
//!
//! # Sub-modules
//!
//! - **`edit_board`** – Owns the live board and serialises every edit through
//!   a copy-on-write transaction, publishing the new state on commit.  This is
//!   the only path by which the board changes.
//!
//! - **`requests`** – Validates loosely-typed UI input (prefix codes as text,
//!   optional dimensions) into strict domain types before any edit runs.

pub mod edit_board;
pub mod requests;
