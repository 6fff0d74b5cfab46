//! # panel-planner
//!
//! Editing layer for Panelboard.  Wraps the `panel-core` board model in
//! copy-on-write transactions ([`BoardStore`]), validates UI input into
//! domain types, and persists planner settings as TOML.

pub mod application;
pub mod infrastructure;

pub use application::edit_board::{BoardStore, PublishListener};
pub use application::requests::{CompartmentRequest, RequestError, SwitchBatchRequest};
pub use infrastructure::storage::config::{
    load_config, save_config, BoardDefaults, CompartmentDefaults, ConfigError, PlannerConfig,
};
