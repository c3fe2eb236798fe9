use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly the store believes an atom, always within [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Clamp into [0.0, 1.0]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Reduced by `discount` once per hop of secondhand reporting.
    pub fn discounted(self, epistemic_distance: u32, discount: f64) -> Self {
        let hops = i32::try_from(epistemic_distance).unwrap_or(i32::MAX);
        Self::new(self.0 * (1.0 - discount.clamp(0.0, 1.0)).powi(hops))
    }

    /// Multiplied by `factor` but capped at `ceiling`. Never lowers the value,
    /// even when it already sits above `ceiling`.
    pub fn boosted(self, factor: f64, ceiling: f64) -> Self {
        Self::new((self.0 * factor).min(ceiling).max(self.0))
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(crate::constants::PROVISIONAL_CONFIDENCE)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_rejects_nan() {
        assert_eq!(Confidence::new(1.7).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn discount_halves_per_hop() {
        let c = Confidence::new(0.8);
        assert!((c.discounted(0, 0.5).value() - 0.8).abs() < 1e-12);
        assert!((c.discounted(1, 0.5).value() - 0.4).abs() < 1e-12);
        assert!((c.discounted(2, 0.5).value() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn boost_respects_ceiling_and_never_lowers() {
        assert!((Confidence::new(0.5).boosted(1.2, 0.95).value() - 0.6).abs() < 1e-12);
        assert_eq!(Confidence::new(0.9).boosted(1.2, 0.95).value(), 0.95);
        assert_eq!(Confidence::new(0.97).boosted(1.2, 0.95).value(), 0.97);
    }
}
