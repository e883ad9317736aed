pub mod crypt;
pub mod entropy;
pub mod predict;
pub mod signal;

use quintel_core::{Seed, SignalWindow};

/// Parse an optional seed flag; absent means the documented default.
pub fn parse_seed(flag: Option<&str>) -> Result<Seed, String> {
    match flag {
        Some(text) => Seed::parse(text).map_err(|e| e.to_string()),
        None => Ok(Seed::default()),
    }
}

/// Parse comma-separated samples into a signal window.
pub fn parse_window(data: &str, threshold: Option<f64>) -> Result<SignalWindow, String> {
    let samples = parse_samples(data)?;
    let window = match threshold {
        Some(t) => SignalWindow::with_threshold(samples, t),
        None => SignalWindow::new(samples),
    };
    window.map_err(|e| e.to_string())
}

fn parse_samples(data: &str) -> Result<Vec<f64>, String> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("unparseable sample {:?}", part.trim()))
        })
        .collect()
}
