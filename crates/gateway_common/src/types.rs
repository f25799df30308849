//! Amount types reported by gateway responses

use serde::{Deserialize, Serialize};

/// Amount expressed in the currency's major unit, as most gateways report it (`1.34`).
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    /// forms a new major unit from amount
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}
