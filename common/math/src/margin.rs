use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::polyline::with_margin;

/// Multiplicative slack factor applied to a measured wire path.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct ManufacturingMargin(f64);

impl ManufacturingMargin {
    pub const DEFAULT: ManufacturingMargin = ManufacturingMargin(1.05);

    pub fn try_new(value: f64) -> Result<Self, MarginError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(MarginError::InvalidMargin(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn apply(&self, length: f64) -> f64 {
        with_margin(length, self.0)
    }
}

impl Default for ManufacturingMargin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for ManufacturingMargin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ManufacturingMargin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::try_new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarginError {
    #[error("Invalid manufacturing margin, must be greater than zero. value: {0}")]
    InvalidMargin(f64),
}
