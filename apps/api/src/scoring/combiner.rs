use std::fmt;

use serde::{Deserialize, Serialize};

/// Blend weights for the final relevance score. Not normalized: callers pick
/// weights whose scale keeps the result in 0 – 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub hard_match: f64,
    pub semantic_match: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hard_match: 0.4,
            semantic_match: 0.6,
        }
    }
}

/// Coarse relevance tier derived from the rounded final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    /// `> 80` → High, `> 60` → Medium, otherwise Low.
    pub fn classify(final_score: f64) -> Self {
        if final_score > 80.0 {
            Verdict::High
        } else if final_score > 60.0 {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted blend of hard and semantic percentages, rounded to 2 decimal places.
pub fn combine_scores(hard_percent: f64, semantic_percent: f64, weights: &ScoreWeights) -> f64 {
    round2(weights.hard_match * hard_percent + weights.semantic_match * semantic_percent)
}

/// Correctly rounded to 2 decimal places: the exact binary value is rounded,
/// so 80.005 (stored just below) stays 80.00.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = ScoreWeights::default();
        assert_eq!(w.hard_match, 0.4);
        assert_eq!(w.semantic_match, 0.6);
    }

    #[test]
    fn test_combine_50_90_is_74_medium() {
        let score = combine_scores(50.0, 90.0, &ScoreWeights::default());
        assert!((score - 74.0).abs() < 1e-9, "score was {score}");
        assert_eq!(Verdict::classify(score), Verdict::Medium);
    }

    #[test]
    fn test_combine_rounds_to_two_places() {
        // 0.4 * 33.333.. + 0.6 * 77.777.. = 60.0
        let score = combine_scores(100.0 / 3.0, 700.0 / 9.0, &ScoreWeights::default());
        assert_eq!(score, 60.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(66.666), 66.67);
    }

    #[test]
    fn test_verdict_boundaries_are_strict() {
        assert_eq!(Verdict::classify(80.0), Verdict::Medium);
        assert_eq!(Verdict::classify(80.01), Verdict::High);
        assert_eq!(Verdict::classify(60.0), Verdict::Low);
        assert_eq!(Verdict::classify(60.01), Verdict::Medium);
        assert_eq!(Verdict::classify(0.0), Verdict::Low);
    }

    #[test]
    fn test_round2_rounds_exact_binary_value() {
        assert_eq!(round2(80.005), 80.0);
        assert_eq!(round2(50.024999999999999), 50.02);
        assert_eq!(round2(-1.0 / 3.0), -0.33);
    }

    #[test]
    fn test_combined_80_005_stays_medium() {
        let w = ScoreWeights {
            hard_match: 1.0,
            semantic_match: 0.0,
        };
        let score = combine_scores(80.005, 0.0, &w);
        assert_eq!(score, 80.0);
        assert_eq!(Verdict::classify(score), Verdict::Medium);
    }

    #[test]
    fn test_rounded_80_is_medium() {
        let score = combine_scores(80.0, 80.0, &ScoreWeights::default());
        assert_eq!(score, 80.0);
        assert_eq!(Verdict::classify(score), Verdict::Medium);
    }

    #[test]
    fn test_combine_monotonic_in_both_inputs() {
        let w = ScoreWeights::default();
        let steps: Vec<f64> = (0..=20).map(|i| f64::from(i) * 5.0).collect();
        for &fixed in &steps {
            for pair in steps.windows(2) {
                assert!(combine_scores(pair[0], fixed, &w) <= combine_scores(pair[1], fixed, &w));
                assert!(combine_scores(fixed, pair[0], &w) <= combine_scores(fixed, pair[1], &w));
            }
        }
    }

    #[test]
    fn test_custom_weights_are_not_normalized() {
        let w = ScoreWeights {
            hard_match: 1.0,
            semantic_match: 1.0,
        };
        assert_eq!(combine_scores(50.0, 50.0, &w), 100.0);
    }

    #[test]
    fn test_verdict_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Verdict::High).unwrap(), "\"High\"");
        assert_eq!(Verdict::Low.to_string(), "Low");
    }
}
