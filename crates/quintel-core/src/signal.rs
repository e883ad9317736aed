//! Streaming signal statistics, anomaly scoring, and pre-processing.
//!
//! A [`SignalWindow`] is one caller-submitted sequence of samples plus an
//! optional anomaly threshold. Each window is consumed by exactly one
//! analysis call; nothing is learned or persisted across windows, so the
//! detector is a pure comparison against the window's own baseline.

use serde::Serialize;

use crate::error::CoreError;

/// Default anomaly threshold when the caller supplies none.
///
/// Samples whose deviation score strictly exceeds this are flagged.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// An ordered window of numeric samples with an optional threshold.
///
/// Immutable once constructed; construction rejects non-finite samples and
/// non-finite or negative thresholds with [`CoreError::InvalidInput`].
#[derive(Debug, Clone)]
pub struct SignalWindow {
    samples: Vec<f64>,
    threshold: Option<f64>,
}

impl SignalWindow {
    /// Window with the default threshold.
    pub fn new(samples: Vec<f64>) -> Result<Self, CoreError> {
        if let Some(pos) = samples.iter().position(|x| !x.is_finite()) {
            return Err(CoreError::InvalidInput(format!(
                "non-finite sample at index {pos}"
            )));
        }
        Ok(Self {
            samples,
            threshold: None,
        })
    }

    /// Window with an explicit threshold.
    pub fn with_threshold(samples: Vec<f64>, threshold: f64) -> Result<Self, CoreError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "threshold must be finite and non-negative, got {threshold}"
            )));
        }
        let mut window = Self::new(samples)?;
        window.threshold = Some(threshold);
        Ok(window)
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Effective threshold: the caller's, or [`DEFAULT_THRESHOLD`].
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }
}

/// Summary statistics for one window.
///
/// Population standard deviation; windows of size 0 or 1 have
/// `std_dev = 0`, and the empty window has `mean`, `min`, `max` = 0.
/// Never NaN.
#[derive(Debug, Clone, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl WindowStats {
    /// Compute statistics over a sample slice.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        let (mut min, mut max) = (samples[0], samples[0]);
        for &x in samples {
            if x < min {
                min = x;
            }
            if x > max {
                max = x;
            }
        }
        Self {
            count: samples.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Per-sample anomaly scores and flags plus the window summary.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyReport {
    /// Deviation score per sample: |x − mean| / std_dev (0 when std is 0).
    pub scores: Vec<f64>,
    /// Flag per sample: score strictly above the threshold.
    pub flags: Vec<bool>,
    /// Number of flagged samples.
    pub flagged: usize,
    /// Threshold the flags were computed against.
    pub threshold: f64,
    pub stats: WindowStats,
}

/// Score every sample in the window against the window's own baseline.
///
/// A constant window has zero deviation everywhere, so nothing is flagged
/// regardless of threshold; likewise windows of size 0 or 1.
pub fn analyze(window: &SignalWindow) -> AnomalyReport {
    let stats = WindowStats::from_samples(window.samples());
    let threshold = window.threshold();

    let scores: Vec<f64> = if stats.std_dev > 0.0 {
        window
            .samples()
            .iter()
            .map(|&x| (x - stats.mean).abs() / stats.std_dev)
            .collect()
    } else {
        vec![0.0; stats.count]
    };
    let flags: Vec<bool> = scores.iter().map(|&s| s > threshold).collect();
    let flagged = flags.iter().filter(|&&f| f).count();

    AnomalyReport {
        scores,
        flags,
        flagged,
        threshold,
        stats,
    }
}

/// Normalize the window to unit L2 norm.
///
/// Returns a sequence of the same length. The all-zero window maps to
/// itself, and a window that is already unit-norm maps to itself exactly,
/// so the transform is idempotent.
pub fn process(window: &SignalWindow) -> Vec<f64> {
    let samples = window.samples();
    let norm = samples.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 {
        return samples.to_vec();
    }
    samples.iter().map(|&x| x / norm).collect()
}

/// Structural features of one window, computed without any model state.
#[derive(Debug, Clone, Serialize)]
pub struct SignalFeatures {
    /// Fraction of spectral power in the dominant non-DC bin (0..=1).
    pub periodicity: f64,
    /// Population standard deviation of the samples.
    pub noise_level: f64,
    /// Total variation: sum of |x[i+1] − x[i]|.
    pub complexity: f64,
    /// Standard deviation of first differences.
    pub signal_entropy: f64,
}

/// Extract [`SignalFeatures`] from a window.
///
/// Total: windows too short to carry a feature yield 0 for it, never NaN.
pub fn features(window: &SignalWindow) -> SignalFeatures {
    let samples = window.samples();
    SignalFeatures {
        periodicity: periodicity(samples),
        noise_level: WindowStats::from_samples(samples).std_dev,
        complexity: samples.windows(2).map(|w| (w[1] - w[0]).abs()).sum(),
        signal_entropy: signal_entropy(samples),
    }
}

/// Dominant-bin share of the non-DC power spectrum.
///
/// Explicit DFT sum over bins 1..n/2. Windows here are short request
/// payloads, so the quadratic sum is cheaper than carrying an FFT.
fn periodicity(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 4 {
        return 0.0;
    }
    let mut max_power = 0.0f64;
    let mut total_power = 0.0f64;
    for k in 1..=n / 2 {
        let (mut re, mut im) = (0.0f64, 0.0f64);
        for (t, &x) in samples.iter().enumerate() {
            let angle = -2.0 * std::f64::consts::PI * (k as f64) * (t as f64) / (n as f64);
            re += x * angle.cos();
            im += x * angle.sin();
        }
        let power = re * re + im * im;
        total_power += power;
        if power > max_power {
            max_power = power;
        }
    }
    if total_power > 0.0 {
        max_power / total_power
    } else {
        0.0
    }
}

/// Dispersion of successive state differences.
fn signal_entropy(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let diffs: Vec<f64> = samples.windows(2).map(|w| w[1] - w[0]).collect();
    WindowStats::from_samples(&diffs).std_dev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_window_flags_nothing() {
        let window = SignalWindow::with_threshold(vec![5.0; 5], 0.0).unwrap();
        let report = analyze(&window);
        assert_eq!(report.flagged, 0);
        assert_eq!(report.stats.std_dev, 0.0);
        assert!(report.scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_clear_outlier_is_the_only_flag() {
        let window =
            SignalWindow::with_threshold(vec![1.0, 2.0, 3.0, 4.0, 100.0], 0.8).unwrap();
        let report = analyze(&window);
        assert_eq!(report.flags, vec![false, false, false, false, true]);
        assert_eq!(report.flagged, 1);
    }

    #[test]
    fn test_empty_window_yields_defined_report() {
        let report = analyze(&SignalWindow::new(vec![]).unwrap());
        assert_eq!(report.stats.count, 0);
        assert_eq!(report.stats.std_dev, 0.0);
        assert_eq!(report.flagged, 0);
        assert!(report.scores.is_empty());
    }

    #[test]
    fn test_single_sample_window_never_flags() {
        let report = analyze(&SignalWindow::with_threshold(vec![1e9], 0.0).unwrap());
        assert_eq!(report.flagged, 0);
        assert_eq!(report.stats.std_dev, 0.0);
    }

    #[test]
    fn test_default_threshold_applies() {
        let window = SignalWindow::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(analyze(&window).threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        assert!(matches!(
            SignalWindow::new(vec![1.0, f64::NAN]),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            SignalWindow::new(vec![f64::INFINITY]),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bad_threshold_rejected() {
        assert!(matches!(
            SignalWindow::with_threshold(vec![1.0], -0.5),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            SignalWindow::with_threshold(vec![1.0], f64::NAN),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_process_preserves_length_and_unit_norm() {
        let window = SignalWindow::new(vec![3.0, 4.0]).unwrap();
        let out = process(&window);
        assert_eq!(out, vec![0.6, 0.8]);
        let norm: f64 = out.iter().map(|&x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_process_is_idempotent() {
        let window = SignalWindow::new(vec![1.0, -2.0, 3.5, 0.25]).unwrap();
        let once = process(&window);
        let twice = process(&SignalWindow::new(once.clone()).unwrap());
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_process_zero_window_is_itself() {
        let window = SignalWindow::new(vec![0.0; 4]).unwrap();
        assert_eq!(process(&window), vec![0.0; 4]);
    }

    #[test]
    fn test_periodic_signal_scores_high_periodicity() {
        let sine: Vec<f64> = (0..64)
            .map(|t| (2.0 * std::f64::consts::PI * 4.0 * t as f64 / 64.0).sin())
            .collect();
        let periodic = features(&SignalWindow::new(sine).unwrap());
        assert!(periodic.periodicity > 0.9);

        let ramp: Vec<f64> = (0..64).map(|t| t as f64).collect();
        let aperiodic = features(&SignalWindow::new(ramp).unwrap());
        assert!(aperiodic.periodicity < periodic.periodicity);
    }

    #[test]
    fn test_features_total_on_short_windows() {
        for samples in [vec![], vec![1.0], vec![1.0, 2.0]] {
            let f = features(&SignalWindow::new(samples).unwrap());
            assert!(f.periodicity.is_finite());
            assert!(f.noise_level.is_finite());
            assert!(f.complexity.is_finite());
            assert!(f.signal_entropy.is_finite());
        }
    }

    #[test]
    fn test_complexity_is_total_variation() {
        let f = features(&SignalWindow::new(vec![0.0, 3.0, 1.0]).unwrap());
        assert!((f.complexity - 5.0).abs() < 1e-12);
    }
}
