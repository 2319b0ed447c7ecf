use anyhow::{Context, Result};

/// Ambient settings loaded from environment variables.
/// Scan geometry comes from the command line; this only covers what stays fixed per site.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub job_name: String,
    pub dataset_entry_path: String,
    pub default_repeats: u32,
    pub fitter_flags: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rust_log: env_or("RUST_LOG", "info"),
            job_name: env_or("FCSCAN_JOB_NAME", "FC_SCAN"),
            dataset_entry_path: env_or(
                "FCSCAN_DATASET_ENTRY_PATH",
                "/RapidFit/ToFit/DataSet/StartingEntry",
            ),
            default_repeats: env_or("FCSCAN_DEFAULT_REPEATS", "200")
                .parse::<u32>()
                .context("FCSCAN_DEFAULT_REPEATS must be a non-negative integer")?,
            fitter_flags: env_or("FCSCAN_FITTER_FLAGS", "--debugFC --BurnToROOT")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
