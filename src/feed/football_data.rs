use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::provider::FootballProvider;
use crate::models::{Fixture, TeamStanding};

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";

/// Competitions covered by the free football-data.org tier.
pub const SUPPORTED_COMPETITIONS: [&str; 9] =
    ["PL", "BL1", "PD", "SA", "FL1", "CL", "DED", "PPL", "ELC"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("football-data rate limit hit on {path}")]
    RateLimited { path: String },
    #[error("football-data returned {status} for {path}")]
    Status { status: u16, path: String },
}

impl FeedError {
    fn from_status(status: StatusCode, path: &str) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS {
            FeedError::RateLimited {
                path: path.to_string(),
            }
        } else {
            FeedError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            }
        }
    }
}

/// Provider backed by the football-data.org v4 REST API.
/// Docs: <https://docs.football-data.org/general/v4/index.html>
pub struct FootballData {
    http: Client,
    api_key: String,
    /// Base URL for overriding in tests
    base_url: String,
}

impl FootballData {
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FootballData {
            http,
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let resp = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.api_key)
            .send()
            .await
            .with_context(|| format!("football-data request failed: {path}"))?;

        if !resp.status().is_success() {
            return Err(FeedError::from_status(resp.status(), path).into());
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse football-data response for {path}"))
    }
}

#[async_trait]
impl FootballProvider for FootballData {
    fn name(&self) -> &str {
        "football-data.org"
    }

    async fn fetch_fixtures(&self, date: NaiveDate) -> Result<Vec<Fixture>> {
        let day = date.format("%Y-%m-%d");
        let raw = self
            .get_json(&format!("/matches?dateFrom={day}&dateTo={day}"))
            .await?;
        Ok(parse_matches(&raw))
    }

    async fn fetch_standings(&self, competition: &str) -> Result<Vec<TeamStanding>> {
        let raw = self
            .get_json(&format!("/competitions/{competition}/standings"))
            .await?;
        Ok(parse_standings(&raw))
    }

    async fn fetch_head2head(&self, fixture_id: u64, limit: usize) -> Result<Vec<Fixture>> {
        let raw = self
            .get_json(&format!("/matches/{fixture_id}/head2head?limit={limit}"))
            .await?;
        Ok(parse_matches(&raw))
    }

    async fn fetch_team_matches(&self, team_id: u64, limit: usize) -> Result<Vec<Fixture>> {
        let raw = self
            .get_json(&format!("/teams/{team_id}/matches?status=FINISHED&limit={limit}"))
            .await?;
        Ok(parse_matches(&raw))
    }
}

/// Matches from a `{"matches": [...]}` payload. Entries that do not fit the
/// fixture shape (e.g. knockout ties with undecided teams) are skipped.
fn parse_matches(raw: &serde_json::Value) -> Vec<Fixture> {
    let matches = match raw["matches"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    matches
        .iter()
        .filter_map(|m| match serde_json::from_value::<Fixture>(m.clone()) {
            Ok(f) => Some(f),
            Err(e) => {
                debug!("Skipping match {}: {}", m["id"], e);
                None
            }
        })
        .collect()
}

/// Rows of the overall (`TOTAL`) table; home/away splits are ignored.
fn parse_standings(raw: &serde_json::Value) -> Vec<TeamStanding> {
    let groups = match raw["standings"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    groups
        .iter()
        .find(|g| g["type"].as_str() == Some("TOTAL"))
        .and_then(|g| g["table"].as_array())
        .map(|rows| {
            rows.iter()
                .filter_map(|row| match serde_json::from_value::<TeamStanding>(row.clone()) {
                    Ok(s) => Some(s),
                    Err(e) => {
                        debug!("Skipping standings row for team {}: {}", row["team"]["id"], e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}
