//! Stateless scalar predictor.

use crate::error::CoreError;

/// Predict a value in (0, 1) from a single input.
///
/// The formula is a fixed-weight two-stage squash:
///
/// ```text
/// predict(v) = σ(2.5 · tanh(v / 100) + 0.1)      σ(z) = 1 / (1 + e⁻ᶻ)
/// ```
///
/// tanh bounds the inner term to [−2.4, 2.6], so the exponential never
/// overflows for any finite input and the function is total and monotone
/// over the finite f64 domain. Non-finite input fails with
/// [`CoreError::InvalidInput`].
pub fn predict(value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "non-finite value {value}"
        )));
    }
    let z = 2.5 * (value / 100.0).tanh() + 0.1;
    Ok(1.0 / (1.0 + (-z).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_matches_documented_formula() {
        let expected = 1.0 / (1.0 + (-(2.5 * (42.0f64 / 100.0).tanh() + 0.1)).exp());
        assert_eq!(predict(42.0).unwrap(), expected);
    }

    #[test]
    fn test_predict_is_reproducible() {
        let first = predict(42.0).unwrap();
        for _ in 0..100 {
            assert_eq!(predict(42.0).unwrap(), first);
        }
    }

    #[test]
    fn test_output_bounded_over_extreme_inputs() {
        for v in [0.0, -0.0, 1e308, -1e308, f64::MIN_POSITIVE, 5e-324] {
            let y = predict(v).unwrap();
            assert!(y > 0.0 && y < 1.0, "predict({v}) = {y} out of (0, 1)");
        }
    }

    #[test]
    fn test_monotone_in_input() {
        let lo = predict(-10.0).unwrap();
        let mid = predict(0.0).unwrap();
        let hi = predict(10.0).unwrap();
        assert!(lo < mid && mid < hi);
    }

    #[test]
    fn test_non_finite_rejected() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(predict(v), Err(CoreError::InvalidInput(_))));
        }
    }
}
