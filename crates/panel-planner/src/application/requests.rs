//! Request types for edits arriving from the UI or from configuration.
//!
//! The UI speaks in loosely-typed values: a prefix is a text field, a
//! compartment size is three optional numbers falling back to configured
//! defaults.  The functions here turn those into the strict domain types
//! before anything touches the board, so a typo in a prefix code is reported
//! to the user instead of reaching the placement engine.

use panel_core::{Dimensions, PrefixError, SwitchBatch, SwitchPrefix};
use thiserror::Error;

use crate::infrastructure::storage::config::CompartmentDefaults;

/// Error type for request validation.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    /// The prefix code does not match `<size>X<rating>A`.
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    /// A batch of zero switches is meaningless.
    #[error("switch batch count must be at least 1")]
    EmptyBatch,

    /// A requested dimension must be a positive finite number.
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },
}

/// A batch of identical switches as described by the UI form.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBatchRequest {
    pub count: usize,
    /// Optional display-name override; defaults to the prefix code.
    pub name: Option<String>,
    pub description: String,
    /// Raw prefix code text, e.g. `"2X16A"`.
    pub prefix_code: String,
    pub feed: String,
}

impl SwitchBatchRequest {
    /// Validates the request into a domain [`SwitchBatch`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyBatch`] for a zero count and
    /// [`RequestError::Prefix`] when the prefix code does not parse.
    pub fn into_batch(self) -> Result<SwitchBatch, RequestError> {
        if self.count == 0 {
            return Err(RequestError::EmptyBatch);
        }
        let prefix: SwitchPrefix = self.prefix_code.parse()?;
        Ok(SwitchBatch {
            count: self.count,
            name: self.name,
            description: self.description,
            prefix,
            feed: self.feed,
        })
    }
}

/// A new compartment as described by the UI form.
///
/// Absent dimensions fall back to the configured compartment defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentRequest {
    pub name: String,
    pub feed: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl CompartmentRequest {
    /// Resolves the requested dimensions against the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NonPositiveDimension`] when an explicitly
    /// given dimension is zero, negative, or not finite.
    pub fn resolve_dimensions(
        &self,
        defaults: &CompartmentDefaults,
    ) -> Result<Dimensions, RequestError> {
        let width = resolve_axis("width", self.width, defaults.width)?;
        let height = resolve_axis("height", self.height, defaults.height)?;
        let depth = resolve_axis("depth", self.depth, defaults.depth)?;
        Ok(Dimensions::new(width, height, depth))
    }
}

fn resolve_axis(
    field: &'static str,
    requested: Option<f64>,
    default: f64,
) -> Result<f64, RequestError> {
    match requested {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        Some(value) => Err(RequestError::NonPositiveDimension { field, value }),
        None => Ok(default),
    }
}
