//! The switch — the smallest placeable unit on the board.
//!
//! A switch's footprint is driven by its *size class*, parsed from the
//! leading number of its prefix code: a `3X16A` breaker is three rail units
//! wide.  Height and depth default to fixed constants.  The switch itself
//! has no capacity logic; whether it fits somewhere is always the owning
//! module's decision.

use std::fmt;
use std::str::FromStr;

use crate::domain::dimensions::{
    Dimensions, DimensionsPatch, SWITCH_DEPTH, SWITCH_HEIGHT, SWITCH_UNIT_WIDTH,
};
use crate::domain::error::PrefixError;
use crate::domain::id::{ModuleId, SwitchId};
use crate::domain::registry::Keyed;

/// A parsed switch prefix code of the form `<size>X<rating>A`.
///
/// `size` is the number of rail units the switch occupies (1–99, leading
/// digit 1–9); `rating` is the nominal current in amperes with the same
/// shape.  The size class is immutable after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPrefix {
    code: String,
    size: u32,
    rating: u32,
}

impl SwitchPrefix {
    /// The original code, e.g. `"3X16A"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Number of rail units the switch occupies.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Nominal current rating in amperes.
    pub fn rating(&self) -> u32 {
        self.rating
    }

    /// The rail width implied by the size class.
    pub fn unit_width(&self) -> f64 {
        self.size as f64 * SWITCH_UNIT_WIDTH
    }
}

impl FromStr for SwitchPrefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PrefixError {
            code: s.to_string(),
        };

        let (size_part, rest) = s.split_once('X').ok_or_else(err)?;
        let rating_part = rest.strip_suffix('A').ok_or_else(err)?;

        let size = parse_code_number(size_part).ok_or_else(err)?;
        let rating = parse_code_number(rating_part).ok_or_else(err)?;

        Ok(Self {
            code: s.to_string(),
            size,
            rating,
        })
    }
}

impl fmt::Display for SwitchPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Parses a one- or two-digit number whose leading digit is 1–9.
fn parse_code_number(s: &str) -> Option<u32> {
    if !(1..=2).contains(&s.len()) {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_digit()) || s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

/// A single switch.
///
/// Created with a width derived from its size class unless explicitly
/// overridden.  The `owning_module` back-reference is maintained exclusively
/// by the module the switch sits in and never implies ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    id: SwitchId,
    pub name: String,
    pub description: String,
    pub feed: String,
    prefix: SwitchPrefix,
    dimensions: Dimensions,
    owning_module: Option<ModuleId>,
}

impl Switch {
    /// Creates a switch with the footprint implied by the prefix's size
    /// class and the default height/depth.
    pub fn new(
        id: SwitchId,
        name: impl Into<String>,
        description: impl Into<String>,
        prefix: SwitchPrefix,
        feed: impl Into<String>,
    ) -> Self {
        let dimensions = Dimensions::new(prefix.unit_width(), SWITCH_HEIGHT, SWITCH_DEPTH);
        Self {
            id,
            name: name.into(),
            description: description.into(),
            feed: feed.into(),
            prefix,
            dimensions,
            owning_module: None,
        }
    }

    pub fn id(&self) -> SwitchId {
        self.id
    }

    pub fn prefix(&self) -> &SwitchPrefix {
        &self.prefix
    }

    /// Number of rail units the switch occupies.
    pub fn size(&self) -> u32 {
        self.prefix.size()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Convenience accessor for the capacity-relevant axis.
    pub fn width(&self) -> f64 {
        self.dimensions.width
    }

    /// The module this switch currently sits in, if any.
    pub fn owning_module(&self) -> Option<ModuleId> {
        self.owning_module
    }

    /// Applies a partial dimension override.
    ///
    /// This is the raw setter used for *unplaced* switches.  Changing the
    /// width of a placed switch must go through
    /// [`Board::resize_switch`](crate::domain::board::Board::resize_switch),
    /// which re-checks the owning module's free width.
    pub(crate) fn apply_dimensions(&mut self, patch: DimensionsPatch) {
        self.dimensions = self.dimensions.patched(patch);
    }

    /// Back-reference maintenance; called only by the owning module.
    pub(crate) fn set_owning_module(&mut self, module: Option<ModuleId>) {
        self.owning_module = module;
    }
}

impl Keyed<SwitchId> for Switch {
    fn key(&self) -> SwitchId {
        self.id
    }
}
