use chrono::{NaiveDate, Utc};
use clap::Parser;

use crate::engine::DEFAULT_PICK_COUNT;
use crate::feed::{SlateOptions, SUPPORTED_COMPETITIONS};

/// Daily football picks from standings, form and head-to-head history
#[derive(Parser, Debug, Clone)]
#[command(name = "football-picks", version, about)]
pub struct Config {
    /// football-data.org API token (not needed with --slate)
    #[arg(long, env = "FOOTBALL_API_KEY")]
    pub api_key: Option<String>,

    /// football-data.org base URL
    #[arg(
        long,
        env = "FOOTBALL_API_URL",
        default_value = "https://api.football-data.org/v4"
    )]
    pub api_url: String,

    /// Read fixtures, standings, H2H and form from a JSON file instead of the API
    #[arg(long, env = "SLATE_PATH")]
    pub slate: Option<String>,

    /// Number of picks to publish
    #[arg(long, env = "PICK_COUNT", default_value_t = DEFAULT_PICK_COUNT)]
    pub count: usize,

    /// Match day (YYYY-MM-DD, UTC); defaults to today
    #[arg(long, env = "MATCH_DATE")]
    pub date: Option<NaiveDate>,

    /// Competition codes to analyse, comma separated
    #[arg(
        long,
        env = "COMPETITIONS",
        value_delimiter = ',',
        default_values_t = SUPPORTED_COMPETITIONS.map(String::from)
    )]
    pub competitions: Vec<String>,

    /// Fetch head-to-head history for every fixture
    #[arg(long, env = "FETCH_H2H", default_value = "false")]
    pub fetch_h2h: bool,

    /// Compute form from recent results where the table has none
    #[arg(long, env = "FETCH_FORM", default_value = "false")]
    pub fetch_form: bool,

    /// Print picks as JSON instead of a table
    #[arg(long, env = "OUTPUT_JSON", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.slate.is_none() && self.api_key.is_none() {
            anyhow::bail!("FOOTBALL_API_KEY is required unless a slate file is given with --slate");
        }
        if self.count == 0 {
            anyhow::bail!("pick count must be at least 1");
        }
        if self.competitions.iter().all(|c| c.trim().is_empty()) {
            anyhow::bail!("at least one competition code is required");
        }
        Ok(())
    }

    pub fn match_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn slate_options(&self) -> SlateOptions {
        SlateOptions {
            competitions: self
                .competitions
                .iter()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
            with_h2h: self.fetch_h2h,
            with_form: self.fetch_form,
            ..SlateOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["football-picks"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn slate_run_needs_no_api_key() {
        let cfg = parse(&["--slate", "today.json"]);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.count, DEFAULT_PICK_COUNT);
        assert_eq!(cfg.competitions.len(), SUPPORTED_COMPETITIONS.len());
    }

    #[test]
    fn live_run_requires_api_key() {
        let mut cfg = parse(&["--slate", "x.json"]);
        cfg.slate = None;
        cfg.api_key = None;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("FOOTBALL_API_KEY"));
    }

    #[test]
    fn zero_count_is_rejected() {
        let cfg = parse(&["--slate", "x.json", "--count", "0"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn competitions_and_flags_flow_into_slate_options() {
        let cfg = parse(&[
            "--api-key",
            "k",
            "--competitions",
            "pl, sa",
            "--fetch-h2h",
            "--date",
            "2025-03-01",
        ]);
        let opts = cfg.slate_options();
        assert_eq!(opts.competitions, vec!["PL", "SA"]);
        assert!(opts.with_h2h);
        assert!(!opts.with_form);
        assert_eq!(cfg.match_date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
