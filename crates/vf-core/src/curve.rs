//! Easing Curve Types
//!
//! Curves for value animation (reward rollup, ticker fades).

use serde::{Deserialize, Serialize};

/// Easing curve for animated value transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum EaseCurve {
    /// Linear interpolation (constant rate)
    #[default]
    Linear = 0,
    /// Cubic ease-out (fast start, slow end)
    CubicOut = 1,
    /// Cubic ease-in (slow start, fast end)
    CubicIn = 2,
    /// S-curve (slow start/end, fast middle)
    SCurve = 3,
}

impl EaseCurve {
    /// Convert from u8 index
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => EaseCurve::Linear,
            1 => EaseCurve::CubicOut,
            2 => EaseCurve::CubicIn,
            3 => EaseCurve::SCurve,
            _ => EaseCurve::Linear,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            EaseCurve::Linear => "Linear",
            EaseCurve::CubicOut => "CubicOut",
            EaseCurve::CubicIn => "CubicIn",
            EaseCurve::SCurve => "SCurve",
        }
    }

    /// Evaluate curve at position t (0.0 - 1.0)
    ///
    /// Returns value in range 0.0 - 1.0
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            // Linear: y = t
            EaseCurve::Linear => t,

            // Cubic ease-out: y = 1 - (1 - t)^3
            EaseCurve::CubicOut => 1.0 - (1.0 - t).powi(3),

            // Cubic ease-in: y = t^3
            EaseCurve::CubicIn => t * t * t,

            // S-curve: cubic at both ends
            EaseCurve::SCurve => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints() {
        for curve in [
            EaseCurve::Linear,
            EaseCurve::CubicOut,
            EaseCurve::CubicIn,
            EaseCurve::SCurve,
        ] {
            assert!(curve.evaluate(0.0).abs() < 1e-6, "{} at 0", curve.name());
            assert!(
                (curve.evaluate(1.0) - 1.0).abs() < 1e-6,
                "{} at 1",
                curve.name()
            );
        }
    }

    #[test]
    fn test_curve_monotonic() {
        for curve in [
            EaseCurve::Linear,
            EaseCurve::CubicOut,
            EaseCurve::CubicIn,
            EaseCurve::SCurve,
        ] {
            let mut prev = curve.evaluate(0.0);
            for i in 1..=100 {
                let v = curve.evaluate(i as f32 / 100.0);
                assert!(v >= prev, "{} not monotonic at {}", curve.name(), i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_out_matches_formula() {
        let t = 0.3_f32;
        let expected = 1.0 - (1.0 - t).powi(3);
        assert!((EaseCurve::CubicOut.evaluate(t) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_evaluate_clamps_input() {
        assert_eq!(EaseCurve::CubicOut.evaluate(-1.0), 0.0);
        assert_eq!(EaseCurve::CubicOut.evaluate(2.0), 1.0);
    }
}
