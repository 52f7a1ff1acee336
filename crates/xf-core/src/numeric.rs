use crate::XfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Relative band below which a negative exergy destruction is rounding noise.
pub const DESTRUCTION_NOISE_REL: Real = 1e-6;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, XfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(XfError::NonFinite { what, value: v })
    }
}

/// `num / den`, or `None` when either side is undefined or the denominator is zero.
///
/// Efficiencies and cost indicators go through here so that a zero or missing
/// denominator produces an explicit "undefined" instead of `inf`/`NaN`.
pub fn defined_ratio(num: Option<Real>, den: Option<Real>) -> Option<Real> {
    let (num, den) = (num?, den?);
    if !num.is_finite() || !den.is_finite() || den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Noise band for a destruction value computed from an inflow of `reference`.
///
/// `1e-6 * max(reference, 1)`. Callers decide whether `reference` is signed.
pub fn noise_band(reference: Real) -> Real {
    DESTRUCTION_NOISE_REL * reference.max(1.0)
}

/// `|a - b| / max(floor, |a|, |b|)`.
pub fn relative_divergence(a: Real, b: Real, floor: Real) -> Real {
    (a - b).abs() / floor.max(a.abs()).max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn defined_ratio_guards_denominator() {
        assert_eq!(defined_ratio(Some(3.0), Some(2.0)), Some(1.5));
        assert_eq!(defined_ratio(Some(3.0), Some(0.0)), None);
        assert_eq!(defined_ratio(None, Some(2.0)), None);
        assert_eq!(defined_ratio(Some(3.0), None), None);
        assert_eq!(defined_ratio(Some(Real::NAN), Some(2.0)), None);
    }

    #[test]
    fn noise_band_has_unit_floor() {
        assert_eq!(noise_band(0.0), 1e-6);
        assert_eq!(noise_band(-50.0), 1e-6);
        assert!((noise_band(100.0) - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn relative_divergence_matches_hand_value() {
        let d = relative_divergence(1000.0, 1200.0, 1.0);
        assert!((d - 200.0 / 1200.0).abs() < 1e-12);
        // Tiny values fall back to the floor.
        assert!((relative_divergence(0.1, 0.2, 1.0) - 0.1).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relative_divergence_is_symmetric(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            let ab = relative_divergence(a, b, 1.0);
            let ba = relative_divergence(b, a, 1.0);
            prop_assert!((ab - ba).abs() <= 1e-12);
            prop_assert!(ab >= 0.0);
        }
    }
}
