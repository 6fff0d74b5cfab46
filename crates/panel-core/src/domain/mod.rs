//! Domain entities for Panelboard.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: the board entity graph, the id-indexed registries, and the
//! placement engine.  Nothing in here touches the file system, the network,
//! or a UI framework, and everything can be unit-tested on any platform
//! without setup.
//!
//! # The entity graph (for beginners)
//!
//! A distribution board is a strict three-level nesting, each level
//! capacity-constrained along exactly one axis:
//!
//! ```text
//! Board        ── ordered row of ──►  Compartment        (consumes board WIDTH)
//! Compartment  ── ordered stack of ─► Module (DIN rail)  (consumes compartment HEIGHT)
//! Module       ── ordered row of ──►  Switch             (consumes module WIDTH)
//! ```
//!
//! Entities live in flat per-type registries owned by the board; containers
//! reference them by typed id only.  Parent links (switch → module,
//! module → compartment) are weak id back-references, never ownership.  This
//! arena layout is what makes a plain `Board::clone()` a complete deep copy
//! and therefore makes the copy-on-write transaction discipline of the
//! planner crate cheap and mechanical.

pub mod board;
pub mod compartment;
pub mod dimensions;
pub mod error;
pub mod id;
pub mod module;
pub mod placement;
pub mod registry;
pub mod switch;
