//! Smoke test for a reference bundle.
//!
//! Loads the engine from a config file (or straight from a dataset
//! directory) and scores one set of measurements.
//!
//! Usage:
//!   GROWTHCHART_CONFIG=~/.config/growthchart/config.json \
//!   cargo run -p growthchart-engine --example assess_smoke -- who male 12 9.6 75.7 45.9
//!
//!   GROWTHCHART_DATASET_DIR=./reference \
//!   cargo run -p growthchart-engine --example assess_smoke -- cdc_child female 60 18.2 109.5

use std::path::PathBuf;

use growthchart_core::models::age::PatientAge;
use growthchart_core::models::sex::Sex;
use growthchart_core::models::standard::Standard;
use growthchart_engine::assessment::AssessmentRequest;
use growthchart_engine::config::{default_config_path, load_config, EngineConfig};
use growthchart_engine::GrowthEngine;
use growthchart_stats::round_to;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        return Err(eyre::eyre!(
            "usage: assess_smoke <standard> <sex> <age_months> <weight_kg> [height_cm] [head_cm]"
        ));
    }

    let standard: Standard = args[0].parse()?;
    let sex: Sex = args[1].parse()?;
    let age_months: f64 = args[2].parse()?;
    let optional = |i: usize| -> eyre::Result<Option<f64>> {
        args.get(i).map(|s| s.parse::<f64>()).transpose().map_err(Into::into)
    };

    let config = match std::env::var("GROWTHCHART_DATASET_DIR") {
        Ok(dir) => EngineConfig::new(PathBuf::from(dir)),
        Err(_) => {
            let path = match std::env::var("GROWTHCHART_CONFIG") {
                Ok(p) => PathBuf::from(p),
                Err(_) => default_config_path()?,
            };
            load_config(&path)?
        }
    };

    let engine = GrowthEngine::from_config(&config)?;
    println!(
        "Loaded {} reference tables (dataset {})",
        engine.store().len(),
        engine.store().version()
    );

    let mut request = AssessmentRequest::new(standard, sex, PatientAge::from_months(age_months));
    request.weight_kg = optional(3)?;
    request.height_cm = optional(4)?;
    request.head_circumference_cm = optional(5)?;

    let assessment = engine.assess(&request);
    if !assessment.recommendation.current_standard_valid {
        match assessment.recommendation.recommended_standard {
            Some(s) => println!(
                "{} is not valid at {age_months} months; try {}",
                standard.name(),
                s.name()
            ),
            None => println!("{} is not valid at {age_months} months", standard.name()),
        }
    }

    for outcome in &assessment.outcomes {
        match outcome.result {
            Some(r) => println!(
                "  {:<20} {:>8.2} {:<6} z={:>6.2}  p={:>5.1}  {}",
                outcome.measurement.id(),
                outcome.value,
                outcome.measurement.unit(),
                round_to(r.z_score, 2),
                round_to(r.percentile, 1),
                outcome.band.map(|b| b.label()).unwrap_or("-"),
            ),
            None => println!(
                "  {:<20} {:>8.2} {:<6} percentile unavailable",
                outcome.measurement.id(),
                outcome.value,
                outcome.measurement.unit(),
            ),
        }
    }

    Ok(())
}
