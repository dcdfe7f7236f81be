use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables.
///
/// Only `PORT` is parsed strictly at startup. The Gemini key is optional here:
/// a missing key must not stop the form and render paths from working, so it
/// is reported as a configuration error when an analysis is requested.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    /// Pause between the sequential provider calls of a single analysis.
    pub analysis_call_spacing_ms: u64,
    pub database_url: Option<String>,
    pub output_dir: PathBuf,
    pub wkhtmltopdf_path: Option<PathBuf>,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let analysis_call_spacing_ms = get("ANALYSIS_CALL_SPACING_MS")
            .unwrap_or_else(|| "2000".to_string())
            .parse::<u64>()
            .context("ANALYSIS_CALL_SPACING_MS must be a number of milliseconds")?;

        Ok(Config {
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_api_url: get("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            analysis_call_spacing_ms,
            database_url: get("DATABASE_URL"),
            output_dir: PathBuf::from(get("OUTPUT_DIR").unwrap_or_else(|| "output".to_string())),
            wkhtmltopdf_path: get("WKHTMLTOPDF_PATH").map(PathBuf::from),
            s3: s3_from_lookup(&get)?,
        })
    }
}

/// S3 settings are all-or-nothing: a partial set is a startup error.
fn s3_from_lookup<F>(get: &F) -> Result<Option<S3Config>>
where
    F: Fn(&str) -> Option<String>,
{
    const KEYS: [&str; 4] = [
        "S3_BUCKET",
        "S3_ENDPOINT",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
    ];

    let values: HashMap<&str, String> = KEYS
        .iter()
        .filter_map(|k| get(*k).map(|v| (*k, v)))
        .collect();

    if values.is_empty() {
        return Ok(None);
    }

    let missing: Vec<&str> = KEYS
        .iter()
        .filter(|k| !values.contains_key(*k))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!(
            "Incomplete S3 configuration; missing: {}",
            missing.join(", ")
        );
    }

    Ok(Some(S3Config {
        bucket: values["S3_BUCKET"].clone(),
        endpoint: values["S3_ENDPOINT"].clone(),
        access_key_id: values["AWS_ACCESS_KEY_ID"].clone(),
        secret_access_key: values["AWS_SECRET_ACCESS_KEY"].clone(),
    }))
}
