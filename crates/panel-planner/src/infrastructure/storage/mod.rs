//! Persistent storage for planner settings.

pub mod config;
