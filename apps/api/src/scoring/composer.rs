//! Score composer — blends the deterministic score and the LLM judgment
//! into the final score. Pure function, no I/O.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for the final blend. Validated at construction: non-negative
/// and summing to 1, so `compose` never has to re-check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub deterministic: f64,
    pub llm: f64,
}

impl ScoreWeights {
    pub fn new(deterministic: f64, llm: f64) -> Result<Self> {
        if deterministic < 0.0 || llm < 0.0 {
            bail!("Score weights must be non-negative (got {deterministic} and {llm})");
        }
        let sum = deterministic + llm;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("Score weights must sum to 1 (got {sum})");
        }
        Ok(Self { deterministic, llm })
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            deterministic: 0.5,
            llm: 0.5,
        }
    }
}

/// `clamp(w_det * deterministic + w_llm * llm, 0, 1)`.
///
/// Inputs outside [0, 1] are clamped rather than rejected: by the time a
/// value reaches the composer it has already been validated or normalized
/// upstream, and a stray out-of-range judgment should not kill the request.
pub fn compose(weights: ScoreWeights, deterministic: f64, llm: f64) -> f64 {
    let deterministic = deterministic.clamp(0.0, 1.0);
    let llm = llm.clamp(0.0, 1.0);
    (weights.deterministic * deterministic + weights.llm * llm).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_weights_blend() {
        let weights = ScoreWeights::new(0.5, 0.5).unwrap();
        let cases = [
            (0.8, 0.4, 0.6),
            (1.0, 1.0, 1.0),
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.5),
            (0.0, 1.0, 0.5),
        ];
        for (det, llm, expected) in cases {
            let got = compose(weights, det, llm);
            assert!(
                (got - expected).abs() < 1e-9,
                "compose({det}, {llm}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_uneven_weights_blend() {
        let weights = ScoreWeights::new(0.3, 0.7).unwrap();
        let got = compose(weights, 1.0, 0.5);
        assert!((got - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_weights_pass_one_component_through() {
        let only_det = ScoreWeights::new(1.0, 0.0).unwrap();
        assert!((compose(only_det, 0.42, 0.99) - 0.42).abs() < 1e-9);

        let only_llm = ScoreWeights::new(0.0, 1.0).unwrap();
        assert!((compose(only_llm, 0.42, 0.99) - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let weights = ScoreWeights::default();
        assert_eq!(compose(weights, 1.5, 2.0), 1.0);
        assert_eq!(compose(weights, -0.5, -1.0), 0.0);
        // One garbage component must not drag the other out of range.
        assert_eq!(compose(weights, 1.7, 1.0), 1.0);
    }

    #[test]
    fn test_result_always_in_unit_interval() {
        let weights = ScoreWeights::new(0.25, 0.75).unwrap();
        for det in [0.0, 0.33, 0.5, 1.0] {
            for llm in [0.0, 0.5, 0.66, 1.0] {
                let got = compose(weights, det, llm);
                assert!((0.0..=1.0).contains(&got));
            }
        }
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(ScoreWeights::new(0.5, 0.4).is_err());
        assert!(ScoreWeights::new(0.7, 0.4).is_err());
        assert!(ScoreWeights::new(0.6, 0.4).is_ok());
    }

    #[test]
    fn test_weights_must_be_non_negative() {
        assert!(ScoreWeights::new(-0.2, 1.2).is_err());
        assert!(ScoreWeights::new(1.2, -0.2).is_err());
    }

    #[test]
    fn test_default_weights_are_valid() {
        let weights = ScoreWeights::default();
        assert!(ScoreWeights::new(weights.deterministic, weights.llm).is_ok());
    }
}
