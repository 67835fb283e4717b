//! # Builder Modes
//!
//! The closed set of interaction modes and the two ways of reading one from a
//! location.
//!
//! - [`parse_mode_strict`] is used when hydrating state from the location. An
//!   unknown value means the location was produced by an incompatible build
//!   (or tampered with) and is treated as a broken invariant.
//! - [`parse_mode_or_absent`] is used when merely comparing against the
//!   location. An unknown value reads as "no mode".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Interaction mode of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderMode {
    /// Default mode, never written to the location
    #[default]
    Design,
    Preview,
    Content,
}

impl BuilderMode {
    pub const ALL: [BuilderMode; 3] = [BuilderMode::Design, BuilderMode::Preview, BuilderMode::Content];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderMode::Design => "design",
            BuilderMode::Preview => "preview",
            BuilderMode::Content => "content",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == BuilderMode::default()
    }
}

impl fmt::Display for BuilderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuilderMode {
    type Err = InvalidModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BuilderMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| InvalidModeError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid search param mode: {0}")]
pub struct InvalidModeError(pub String);

/// Whether `value` names a builder mode
pub fn is_builder_mode(value: &str) -> bool {
    value.parse::<BuilderMode>().is_ok()
}

/// Parse an optional raw mode; `None` stays `None`
pub fn try_parse_mode(raw: Option<&str>) -> Result<Option<BuilderMode>, InvalidModeError> {
    raw.map(str::parse::<BuilderMode>).transpose()
}

/// Parse a raw mode read from the location during hydration.
///
/// # Panics
///
/// Panics when `raw` is present but not a builder mode. Such a location was
/// produced by an incompatible build (for example after a mode rename).
pub fn parse_mode_strict(raw: Option<&str>) -> Option<BuilderMode> {
    match try_parse_mode(raw) {
        Ok(mode) => mode,
        Err(err) => panic!("{err}"),
    }
}

/// Parse a raw mode for comparison purposes; unknown values read as absent
pub fn parse_mode_or_absent(raw: Option<&str>) -> Option<BuilderMode> {
    try_parse_mode(raw).ok().flatten()
}
