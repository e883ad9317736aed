//! Aggregate "quantum intelligence" scoring over signal windows.
//!
//! Combines the window's summary statistics and structural features with an
//! entropy-derived perturbation into a single composite score. With an
//! explicit seed the aggregate is fully deterministic; without one the
//! perturbation comes from OS entropy and the aggregate is intentionally
//! non-reproducible. (This is the opposite convention from `generate`,
//! whose unseeded path uses the fixed default seed — the unauthenticated
//! entropy endpoint must stay testable, the intelligence score need not.)

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use serde::Serialize;

use crate::entropy::{EntropyStream, Seed};
use crate::signal::{SignalFeatures, SignalWindow, WindowStats, features};

/// Number of entropy draws folded into the perturbation weight.
const ENTROPY_DRAWS: usize = 32;

/// Composite intelligence summary for one window.
///
/// Recomputed per call; nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct IntelligenceSummary {
    pub stats: WindowStats,
    pub features: SignalFeatures,
    /// zlib compressibility of the quantized samples (0..=1, higher means
    /// less structure).
    pub structure_ratio: f64,
    /// Mean of the entropy draws folded into the score (0..=1).
    pub entropy_weight: f64,
    /// Composite score in [0, 100].
    pub composite_score: f64,
    /// Letter grade A–F over the composite score.
    pub grade: char,
    /// Seed the perturbation was drawn from, when one was supplied.
    pub seed: Option<u64>,
}

/// Compute the intelligence aggregate for a window.
///
/// The composite score is a documented weighted sum:
///
/// ```text
/// base      = 40·dispersion + 30·structure_ratio + 30·(1 − periodicity)
/// composite = base · (0.9 + 0.2·entropy_weight)        clamped to [0, 100]
/// ```
///
/// where `dispersion = cv / (1 + cv)` with `cv = std_dev / (|mean| + 1)`.
/// Deterministic given `(window, seed)`; non-deterministic only when no
/// seed is supplied.
pub fn aggregate(window: &SignalWindow, seed: Option<Seed>) -> IntelligenceSummary {
    let stats = WindowStats::from_samples(window.samples());
    let feats = features(window);
    let structure_ratio = structure_ratio(window.samples());

    let mut stream = match seed {
        Some(s) => EntropyStream::from_seed(s),
        None => EntropyStream::from_os_entropy(),
    };
    let entropy_weight = stream.floats(ENTROPY_DRAWS).iter().sum::<f64>() / ENTROPY_DRAWS as f64;

    let cv = stats.std_dev / (stats.mean.abs() + 1.0);
    let dispersion = cv / (1.0 + cv);
    let base =
        dispersion * 40.0 + structure_ratio * 30.0 + (1.0 - feats.periodicity) * 30.0;
    let composite_score = (base * (0.9 + 0.2 * entropy_weight)).clamp(0.0, 100.0);

    IntelligenceSummary {
        stats,
        features: feats,
        structure_ratio,
        entropy_weight,
        composite_score,
        grade: grade(composite_score),
        seed: seed.map(|s| s.value()),
    }
}

fn grade(score: f64) -> char {
    if score >= 80.0 {
        'A'
    } else if score >= 60.0 {
        'B'
    } else if score >= 40.0 {
        'C'
    } else if score >= 20.0 {
        'D'
    } else {
        'F'
    }
}

/// zlib level-9 compression ratio of the min/max-quantized samples.
///
/// Quantization maps the window's range onto u8 so the ratio reflects the
/// sample structure rather than the f64 bit patterns. Empty and constant
/// windows score 0 (fully structured).
fn structure_ratio(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let stats = WindowStats::from_samples(samples);
    let range = stats.max - stats.min;
    if range == 0.0 {
        return 0.0;
    }
    let quantized: Vec<u8> = samples
        .iter()
        .map(|&x| (((x - stats.min) / range) * 255.0).round() as u8)
        .collect();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&quantized).unwrap_or_default();
    let compressed = encoder.finish().unwrap_or_default();
    (compressed.len() as f64 / quantized.len() as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn window(samples: Vec<f64>) -> SignalWindow {
        SignalWindow::new(samples).unwrap()
    }

    #[test]
    fn test_seeded_aggregate_is_deterministic() {
        let w = window(vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0]);
        let a = aggregate(&w, Some(Seed::new(123)));
        let b = aggregate(&w, Some(Seed::new(123)));
        assert_eq!(a.composite_score, b.composite_score);
        assert_eq!(a.entropy_weight, b.entropy_weight);
        assert_eq!(a.seed, Some(123));
    }

    #[test]
    fn test_different_seeds_perturb_differently() {
        let w = window(vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0]);
        let a = aggregate(&w, Some(Seed::new(1)));
        let b = aggregate(&w, Some(Seed::new(2)));
        assert_ne!(a.entropy_weight, b.entropy_weight);
    }

    #[test]
    fn test_score_stays_in_range() {
        let windows = [
            vec![],
            vec![0.0],
            vec![5.0; 100],
            (0..200).map(|i| (i as f64).sin() * 1e6).collect(),
        ];
        for samples in windows {
            let summary = aggregate(&window(samples), Some(Seed::default()));
            assert!((0.0..=100.0).contains(&summary.composite_score));
            assert!("ABCDF".contains(summary.grade));
        }
    }

    #[test]
    fn test_constant_window_scores_low() {
        let summary = aggregate(&window(vec![3.0; 64]), Some(Seed::default()));
        assert_eq!(summary.structure_ratio, 0.0);
        assert_eq!(summary.stats.std_dev, 0.0);
        assert!(summary.composite_score < 40.0);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = aggregate(&window(vec![1.0, 2.0, 3.0]), Some(Seed::new(9)));
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("composite_score").is_some());
        assert_eq!(json["seed"], 9);
    }

    #[test]
    fn test_window_validation_still_guards_aggregate_inputs() {
        // aggregate takes a SignalWindow, so the non-finite guard runs first
        assert!(matches!(
            SignalWindow::new(vec![f64::NAN]),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
