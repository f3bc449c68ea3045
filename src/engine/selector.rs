//! Slate-level pick selection.
//!
//! Runs the analyzer over every fixture that has both standings, ranks the
//! results by confidence and keeps the best few using an adaptive threshold:
//! the highest bar that still yields a respectable slate wins.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{AnalysedFixture, Fixture, Form, H2HStats, TeamStanding};

use super::analyzer::analyse;

pub const DEFAULT_PICK_COUNT: usize = 5;

/// Thresholds tried in order; the first one reaching `MIN_PICKS_AT_THRESHOLD` wins.
pub const THRESHOLD_CASCADE: [u8; 3] = [75, 68, 62];
pub const MIN_PICKS_AT_THRESHOLD: usize = 4;
/// Used when no cascade tier qualifies; no minimum count applies.
pub const CONFIDENCE_FLOOR: u8 = 60;

/// League tables keyed by competition code.
pub type StandingsByCompetition = HashMap<String, Vec<TeamStanding>>;

/// Analyse a day's fixtures and return at most `count` picks, confidence descending.
///
/// Fixtures missing either team's standing are skipped. A standing without
/// form takes the team's entry from `form_by_team` when there is one.
pub fn select_top_picks(
    fixtures: &[Fixture],
    standings: &StandingsByCompetition,
    h2h_by_fixture: &HashMap<u64, H2HStats>,
    form_by_team: &HashMap<u64, Form>,
    count: usize,
) -> Vec<AnalysedFixture> {
    let analysed: Vec<AnalysedFixture> = fixtures
        .iter()
        .filter_map(|fixture| analyse_fixture(fixture, standings, h2h_by_fixture, form_by_team))
        .collect();

    debug!(
        fixtures = fixtures.len(),
        analysed = analysed.len(),
        "Slate analysed"
    );

    apply_threshold_cascade(analysed, count)
}

fn analyse_fixture(
    fixture: &Fixture,
    standings: &StandingsByCompetition,
    h2h_by_fixture: &HashMap<u64, H2HStats>,
    form_by_team: &HashMap<u64, Form>,
) -> Option<AnalysedFixture> {
    let table = standings.get(&fixture.competition.code);
    let lookup = |team_id: u64| {
        table.and_then(|rows| find_standing(rows, team_id, form_by_team))
    };

    let (Some(home_standing), Some(away_standing)) =
        (lookup(fixture.home_team.id), lookup(fixture.away_team.id))
    else {
        debug!(
            fixture_id = fixture.id,
            competition = %fixture.competition.code,
            "Skipping {} vs {}: standings missing",
            fixture.home_team.name,
            fixture.away_team.name
        );
        return None;
    };

    let h2h = h2h_by_fixture.get(&fixture.id).copied();
    let analysis = analyse(fixture, Some(&home_standing), Some(&away_standing), h2h.as_ref());

    Some(AnalysedFixture {
        fixture: fixture.clone(),
        home_standing,
        away_standing,
        h2h,
        analysis,
    })
}

fn find_standing(
    rows: &[TeamStanding],
    team_id: u64,
    form_by_team: &HashMap<u64, Form>,
) -> Option<TeamStanding> {
    let mut standing = rows.iter().find(|s| s.team.id == team_id)?.clone();
    if standing.recent_form().is_none() {
        if let Some(form) = form_by_team.get(&team_id) {
            standing.form = Some(form.clone());
        }
    }
    Some(standing)
}

/// Sort by confidence (stable) and keep the top `count` above the first
/// threshold in [`THRESHOLD_CASCADE`] that at least
/// [`MIN_PICKS_AT_THRESHOLD`] analyses reach, else above [`CONFIDENCE_FLOOR`].
pub fn apply_threshold_cascade(
    mut analyses: Vec<AnalysedFixture>,
    count: usize,
) -> Vec<AnalysedFixture> {
    analyses.sort_by(|a, b| b.confidence().cmp(&a.confidence()));

    let qualifying = |threshold: u8| {
        analyses
            .iter()
            .take_while(|a| a.confidence() >= threshold)
            .count()
    };
    let threshold = THRESHOLD_CASCADE
        .iter()
        .copied()
        .find(|t| qualifying(*t) >= MIN_PICKS_AT_THRESHOLD)
        .unwrap_or(CONFIDENCE_FLOOR);

    debug!(
        threshold,
        qualifying = qualifying(threshold),
        count,
        "Confidence threshold selected"
    );

    analyses
        .into_iter()
        .take_while(|a| a.confidence() >= threshold)
        .take(count)
        .collect()
}
