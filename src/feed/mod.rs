pub mod football_data;
pub mod provider;

pub use football_data::{FeedError, FootballData, SUPPORTED_COMPETITIONS};
pub use provider::FootballProvider;

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine::StandingsByCompetition;
use crate::slate::Slate;
use crate::stats::{compute_h2h, form_from_results, H2H_MAX_MEETINGS};

/// What to fetch when assembling a slate from a live provider.
#[derive(Debug, Clone)]
pub struct SlateOptions {
    /// Competition codes to keep; fixtures elsewhere are dropped
    pub competitions: Vec<String>,
    pub with_h2h: bool,
    /// Compute form from recent results for teams whose standing has none
    pub with_form: bool,
    pub h2h_limit: usize,
    pub form_limit: usize,
    /// Per-request ceiling on top of the client's own timeout
    pub request_timeout: Duration,
}

impl Default for SlateOptions {
    fn default() -> Self {
        SlateOptions {
            competitions: SUPPORTED_COMPETITIONS.iter().map(|c| c.to_string()).collect(),
            with_h2h: false,
            with_form: false,
            h2h_limit: H2H_MAX_MEETINGS,
            form_limit: 5,
            request_timeout: Duration::from_secs(15),
        }
    }
}

async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("timed out after {:?}", limit)),
    }
}

/// Fetch everything the selector needs for `date`.
///
/// Only the fixture list is required; a failed standings, head-to-head or
/// team-matches request is logged and the slate is built without it.
pub async fn build_slate(
    provider: &dyn FootballProvider,
    date: NaiveDate,
    opts: &SlateOptions,
) -> Result<Slate> {
    let fixtures: Vec<_> = with_timeout(opts.request_timeout, provider.fetch_fixtures(date))
        .await
        .with_context(|| format!("{} fixtures for {date}", provider.name()))?
        .into_iter()
        .filter(|f| opts.competitions.iter().any(|c| *c == f.competition.code))
        .collect();

    info!(
        "{}: {} fixture(s) on {} in tracked competitions",
        provider.name(),
        fixtures.len(),
        date
    );

    let codes: BTreeSet<&str> = fixtures
        .iter()
        .map(|f| f.competition.code.as_str())
        .collect();

    let standings_futures: Vec<_> = codes
        .iter()
        .map(|code| async move {
            let res = with_timeout(opts.request_timeout, provider.fetch_standings(code)).await;
            (code.to_string(), res)
        })
        .collect();

    let mut standings = StandingsByCompetition::new();
    for (code, result) in futures_util::future::join_all(standings_futures).await {
        match result {
            Ok(table) if !table.is_empty() => {
                debug!("{}: {} standings rows", code, table.len());
                standings.insert(code, table);
            }
            Ok(_) => warn!("{}: empty standings table", code),
            Err(e) => warn!("Standings for {} failed: {}", code, e),
        }
    }

    let mut h2h = HashMap::new();
    if opts.with_h2h {
        for fixture in &fixtures {
            let res = with_timeout(
                opts.request_timeout,
                provider.fetch_head2head(fixture.id, opts.h2h_limit),
            )
            .await;
            match res {
                Ok(meetings) => {
                    if let Some(record) = compute_h2h(fixture, &meetings) {
                        h2h.insert(fixture.id, record);
                    }
                }
                Err(e) => warn!("Head-to-head for fixture {} failed: {}", fixture.id, e),
            }
        }
    }

    let mut form = HashMap::new();
    if opts.with_form {
        // Teams already carrying a table form never need the extra request
        let missing: BTreeSet<u64> = fixtures
            .iter()
            .flat_map(|f| {
                let table = standings.get(&f.competition.code);
                [f.home_team.id, f.away_team.id].into_iter().filter(move |id| {
                    table
                        .and_then(|rows| rows.iter().find(|s| s.team.id == *id))
                        .is_some_and(|s| s.recent_form().is_none())
                })
            })
            .collect();

        for team_id in missing {
            let res = with_timeout(
                opts.request_timeout,
                provider.fetch_team_matches(team_id, opts.form_limit),
            )
            .await;
            match res {
                Ok(matches) => {
                    if let Some(f) = form_from_results(team_id, &matches) {
                        form.insert(team_id, f);
                    }
                }
                Err(e) => warn!("Recent matches for team {} failed: {}", team_id, e),
            }
        }
    }

    Ok(Slate {
        fixtures,
        standings,
        h2h,
        form,
    })
}
