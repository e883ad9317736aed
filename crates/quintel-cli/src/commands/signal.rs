use quintel_core::aggregate;

pub fn analyze(data: &str, threshold: Option<f64>, json: bool) -> Result<(), String> {
    let window = super::parse_window(data, threshold)?;
    let report = quintel_core::analyze(&window);

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return Ok(());
    }

    println!(
        "Window: {} samples, mean {:.4}, std {:.4}, threshold {}\n",
        report.stats.count, report.stats.mean, report.stats.std_dev, report.threshold
    );
    println!("  {:>5} {:>14} {:>8} {}", "index", "sample", "score", "flag");
    println!("  {}", "-".repeat(40));
    for (i, ((&sample, &score), &flag)) in window
        .samples()
        .iter()
        .zip(&report.scores)
        .zip(&report.flags)
        .enumerate()
    {
        let marker = if flag { "ANOMALY" } else { "" };
        println!("  {i:>5} {sample:>14.4} {score:>8.4} {marker}");
    }
    println!("\n{} of {} samples flagged", report.flagged, report.stats.count);
    Ok(())
}

pub fn process(data: &str) -> Result<(), String> {
    let window = super::parse_window(data, None)?;
    let normalized = quintel_core::process(&window);
    let formatted: Vec<String> = normalized.iter().map(|x| format!("{x}")).collect();
    println!("{}", formatted.join(","));
    Ok(())
}

pub fn intelligence(data: &str, seed: Option<&str>, json: bool) -> Result<(), String> {
    let window = super::parse_window(data, None)?;
    let seed = match seed {
        Some(text) => Some(super::parse_seed(Some(text))?),
        None => None,
    };
    log::debug!("aggregating {} samples (seeded: {})", window.samples().len(), seed.is_some());
    let summary = aggregate(&window, seed);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        return Ok(());
    }

    println!("Intelligence summary ({} samples)\n", summary.stats.count);
    println!("  {:<18} {:>12.4}", "mean", summary.stats.mean);
    println!("  {:<18} {:>12.4}", "std_dev", summary.stats.std_dev);
    println!("  {:<18} {:>12.4}", "periodicity", summary.features.periodicity);
    println!("  {:<18} {:>12.4}", "complexity", summary.features.complexity);
    println!("  {:<18} {:>12.4}", "signal_entropy", summary.features.signal_entropy);
    println!("  {:<18} {:>12.4}", "structure_ratio", summary.structure_ratio);
    println!("  {:<18} {:>12.4}", "entropy_weight", summary.entropy_weight);
    println!("\nComposite score: {:.2} (grade {})", summary.composite_score, summary.grade);
    if let Some(seed) = summary.seed {
        println!("Reproducible with --seed {seed}");
    }
    Ok(())
}
