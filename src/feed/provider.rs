use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Fixture, TeamStanding};

/// Trait that every fixtures/standings source must implement.
#[async_trait]
pub trait FootballProvider: Send + Sync {
    /// All fixtures kicking off on `date` (UTC).
    async fn fetch_fixtures(&self, date: NaiveDate) -> Result<Vec<Fixture>>;

    /// Overall league table for a competition code.
    async fn fetch_standings(&self, competition: &str) -> Result<Vec<TeamStanding>>;

    /// Past meetings of the two teams in `fixture_id`, most recent first.
    async fn fetch_head2head(&self, fixture_id: u64, limit: usize) -> Result<Vec<Fixture>>;

    /// A team's most recent finished matches.
    async fn fetch_team_matches(&self, team_id: u64, limit: usize) -> Result<Vec<Fixture>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
