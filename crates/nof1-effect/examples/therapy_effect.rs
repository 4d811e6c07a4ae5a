//! Therapy effect walkthrough
//!
//! Simulates two months of daily pain and sleep logging with acupuncture
//! starting on day 30, then reports the change in each metric.
//!
//! Run with `RUST_LOG=nof1_effect=debug` to see the split diagnostics.

use chrono::{Duration, NaiveDate};
use nof1_effect::{
    EffectConfig, FieldSelectors, ObservationSeries, PrePostEstimator, Record, MIN_POST_DAYS,
    MIN_PRE_DAYS,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

const DAYS: i64 = 60;
const THERAPY_START_DAY: i64 = 30;

fn simulate_log() -> anyhow::Result<ObservationSeries> {
    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.8)?;
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or_else(|| anyhow::anyhow!("bad date"))?;

    let mut series = ObservationSeries::new();
    for day in 0..DAYS {
        let on = day >= THERAPY_START_DAY;
        let pain: f64 = if on { 4.5 } else { 6.5 } + noise.sample(&mut rng);
        let sleep: f64 = if on { 7.0 } else { 6.2 } + noise.sample(&mut rng) * 0.5;

        // roughly one day in ten the pain entry is skipped
        let pain = (!rng.gen_bool(0.1)).then(|| pain.clamp(0.0, 10.0));

        series.push(
            Record::new()
                .with("date", start + Duration::days(day))
                .with("therapy_on", on)
                .with("pain_score", pain)
                .with("sleep_hours", sleep),
        );
    }
    Ok(series)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Pre/Post Therapy Effect ===\n");

    let series = simulate_log()?;
    println!("Logged {} days, therapy started on day {}\n", series.len(), THERAPY_START_DAY + 1);

    let estimator = PrePostEstimator::new(EffectConfig::default());

    let split = estimator.split(&series, &FieldSelectors::default())?;
    let readiness = split.readiness(MIN_PRE_DAYS, MIN_POST_DAYS);
    if !readiness.is_ready() {
        println!("Pain log not ready: {readiness}");
        return Ok(());
    }
    println!("Pain effect size (Cohen's d): {:.2}\n", split.cohens_d());

    for (outcome, result) in estimator.estimate_outcomes(
        &series,
        "date",
        "therapy_on",
        &["pain_score", "sleep_hours", "mood_score"],
    ) {
        match result {
            Ok(effect) => {
                println!("{outcome}: {effect}");
                println!(
                    "  size: {}, interval excludes zero: {}",
                    effect.magnitude(),
                    effect.ci_excludes_zero()
                );
                if let Some(pct) = effect.percent_change() {
                    println!("  relative change: {pct:+.1}%");
                }
            }
            Err(e) if e.is_invalid_input() => println!("{outcome}: not enough data yet ({e})"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
