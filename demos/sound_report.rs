//! Analysis of a day of sound-level readings from a monitoring station.
//!
//! Run with: RUST_LOG=debug cargo run --example sound_report

use chrono::{Duration, TimeZone, Utc};
use sensor_analytics::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Sound level report ===\n");

    // 1. Two days of LAeq readings every 30 minutes
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap();
    let timestamps: Vec<_> = (0..96).map(|i| start + Duration::minutes(30 * i)).collect();
    let values: Vec<f64> = (0..96)
        .map(|i| {
            let hour = (i / 2) % 24;
            let base = if (7..22).contains(&hour) { 63.0 } else { 50.0 };
            base                                     // day/night level
            + 1.5 * (i as f64 * 0.9).sin()           // traffic variation
            + if i == 41 { 25.0 } else { 0.0 }       // one loud event
        })
        .collect();

    let series = Series::from_timestamps(&timestamps, values).unwrap();
    println!("Loaded {} readings", series.len());

    // 2. Analyze with a daily seasonal period
    let config = AnalysisConfig::default().with_seasonal_period(48);
    let report = analyze(&series, &config);

    println!("\n--- Summary ---");
    println!("Mean:     {:.2} dB", report.summary.mean.unwrap_or(f64::NAN));
    println!("Std:      {:.2} dB", report.summary.std.unwrap_or(f64::NAN));
    println!("Skewness: {:.3}", report.summary.skewness.unwrap_or(0.0));
    println!(
        "P50/P90/P95: {:.1} / {:.1} / {:.1}",
        report.percentiles.p50.unwrap_or(f64::NAN),
        report.percentiles.p90.unwrap_or(f64::NAN),
        report.percentiles.p95.unwrap_or(f64::NAN)
    );

    // 3. Control chart
    if let Some(chart) = &report.control_chart {
        println!("\n--- I-MR chart ---");
        if let Some(lambda) = chart.lambda {
            println!("Charted on Box-Cox scale, lambda = {lambda:.2}");
        }
        let limits = chart.limits_in_original_units();
        println!(
            "LCL {:.2}  CL {:.2}  UCL {:.2} (dB)",
            limits.lcl, limits.cl, limits.ucl
        );
        for &i in &chart.out_of_control {
            println!("  out of control: {} ({:.1} dB)", series.labels()[i], series.values()[i]);
        }
    }

    // 4. Shape diagnostics
    if let Some(qq) = &report.qq_plot {
        println!("\n--- Normality ---");
        println!("Q-Q correlation: {:.4}", qq.correlation.unwrap_or(f64::NAN));
    }
    if let Some(parts) = &report.decomposition {
        println!("\n--- Decomposition (period {}) ---", parts.period);
        println!("Seasonal strength: {:.3}", parts.seasonal_strength());
        println!("Trend strength:    {:.3}", parts.trend_strength());
    }

    println!("\n--- Histogram ---");
    for bin in &report.histogram {
        println!("  {:>15}  {}", bin.range_label, "#".repeat(bin.count));
    }

    if let Some(trend) = &report.trend {
        println!("\n--- Trend ---");
        println!(
            "slope {:.4} dB/reading, R² {:.3}, {:?}",
            trend.slope, trend.r_squared, trend.direction
        );
    }

    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.component, skipped.reason);
    }
}
