use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A team as it appears on a fixture or a league-table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub crest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    /// Short code used to key standings, e.g. "PL", "BL1"
    pub code: String,
    #[serde(default)]
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FullTime {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default)]
    pub full_time: FullTime,
}

/// A scheduled (or, for history lookups, finished) match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: u64,
    pub home_team: Team,
    pub away_team: Team,
    pub competition: Competition,
    pub utc_date: DateTime<Utc>,
    /// Provider status, e.g. "TIMED", "SCHEDULED", "FINISHED"
    pub status: String,
    #[serde(default)]
    pub score: Option<Score>,
}

impl Fixture {
    /// Full-time score as `(home, away)` once both sides are known.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        let ft = self.score?.full_time;
        Some((ft.home?, ft.away?))
    }

    pub fn involves(&self, team_id: u64) -> bool {
        self.home_team.id == team_id || self.away_team.id == team_id
    }
}

/// One recent match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    pub fn points(self) -> u32 {
        match self {
            FormResult::Win => 3,
            FormResult::Draw => 1,
            FormResult::Loss => 0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid form result '{0}' (expected W, D or L)")]
pub struct ParseFormError(pub char);

/// Up to the last five results for a team, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Form(Vec<FormResult>);

impl Form {
    pub const WINDOW: usize = 5;

    /// Keeps only the trailing `WINDOW` results.
    pub fn new(results: impl IntoIterator<Item = FormResult>) -> Self {
        let mut all: Vec<FormResult> = results.into_iter().collect();
        if all.len() > Self::WINDOW {
            all.drain(..all.len() - Self::WINDOW);
        }
        Form(all)
    }

    /// Parse `"W,D,L"`, `"W D L"` or `"WDL"`.
    pub fn parse(s: &str) -> Result<Self, ParseFormError> {
        let results = s
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'W' => Ok(FormResult::Win),
                'D' => Ok(FormResult::Draw),
                'L' => Ok(FormResult::Loss),
                other => Err(ParseFormError(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Form::new(results))
    }

    /// W = 3, D = 1, L = 0 over the window, so 0–15.
    pub fn score(&self) -> u32 {
        self.0.iter().map(|r| r.points()).sum()
    }

    pub fn results(&self) -> &[FormResult] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<String> = self.0.iter().map(|r| r.letter().to_string()).collect();
        write!(f, "{}", letters.join(" "))
    }
}

impl TryFrom<String> for Form {
    type Error = ParseFormError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Form::parse(&s)
    }
}

impl From<Form> for String {
    fn from(form: Form) -> Self {
        let letters: Vec<String> = form.0.iter().map(|r| r.letter().to_string()).collect();
        letters.join(",")
    }
}

/// A team's current league-table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    /// 1 = top of the table
    pub position: u32,
    pub team: Team,
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: i32,
    pub goals_for: u32,
    pub goals_against: u32,
    #[serde(default)]
    pub goal_difference: i32,
    #[serde(default)]
    pub form: Option<Form>,
}

impl TeamStanding {
    /// Recent form, treating an empty string from the provider as absent.
    pub fn recent_form(&self) -> Option<&Form> {
        self.form.as_ref().filter(|f| !f.is_empty())
    }
}

/// Aggregated head-to-head record, oriented to the current fixture's
/// home/away assignment. All rates are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2HStats {
    pub meetings: u32,
    pub avg_goals: f64,
    pub over05_rate: f64,
    pub over15_rate: f64,
    pub over25_rate: f64,
    pub btts_rate: f64,
    pub home_win_rate: f64,
    pub away_win_rate: f64,
    pub draw_rate: f64,
}

/// Market recommended for a fixture.
///
/// `Draw`, `TwoUp` and `HandicapPlus2` are settleable markets that the
/// analyzer never currently recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickType {
    HomeWin,
    AwayWin,
    Draw,
    /// At least one goal in the match
    #[serde(rename = "OVER_0_5")]
    Over05,
    #[serde(rename = "OVER_1_5")]
    Over15,
    #[serde(rename = "OVER_2_5")]
    Over25,
    Btts,
    /// Backed team leads by 1+ goal at any point
    OneUp,
    /// Backed team leads by 2+ goals at any point
    TwoUp,
    /// Backed team gets a one-goal head start
    #[serde(rename = "HANDICAP_PLUS_1")]
    HandicapPlus1,
    /// Backed team gets a two-goal head start
    #[serde(rename = "HANDICAP_PLUS_2")]
    HandicapPlus2,
}

impl PickType {
    pub fn code(self) -> &'static str {
        match self {
            PickType::HomeWin => "HOME_WIN",
            PickType::AwayWin => "AWAY_WIN",
            PickType::Draw => "DRAW",
            PickType::Over05 => "OVER_0_5",
            PickType::Over15 => "OVER_1_5",
            PickType::Over25 => "OVER_2_5",
            PickType::Btts => "BTTS",
            PickType::OneUp => "ONE_UP",
            PickType::TwoUp => "TWO_UP",
            PickType::HandicapPlus1 => "HANDICAP_PLUS_1",
            PickType::HandicapPlus2 => "HANDICAP_PLUS_2",
        }
    }
}

impl fmt::Display for PickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn team(self, fixture: &Fixture) -> &Team {
        match self {
            Side::Home => &fixture.home_team,
            Side::Away => &fixture.away_team,
        }
    }
}

/// Output of the match analyzer for one fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub pick: PickType,
    /// Team the pick backs, for team-specific markets
    #[serde(default)]
    pub side: Option<Side>,
    pub pick_label: String,
    /// 0–100
    pub confidence: u8,
    /// At most five lines, most salient first
    pub reasoning: Vec<String>,
}

/// A fixture together with everything the analyzer saw and what it picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysedFixture {
    pub fixture: Fixture,
    pub home_standing: TeamStanding,
    pub away_standing: TeamStanding,
    #[serde(default)]
    pub h2h: Option<H2HStats>,
    #[serde(flatten)]
    pub analysis: Analysis,
}

impl AnalysedFixture {
    pub fn confidence(&self) -> u8 {
        self.analysis.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_parses_comma_separated_and_keeps_last_five() {
        let form = Form::parse("L,L,W,W,D,W,W").unwrap();
        assert_eq!(form.results().len(), 5);
        assert_eq!(form.to_string(), "W W D W W");
        assert_eq!(form.score(), 13);
    }

    #[test]
    fn form_accepts_compact_and_lowercase() {
        let form = Form::parse("wdl").unwrap();
        assert_eq!(
            form.results(),
            &[FormResult::Win, FormResult::Draw, FormResult::Loss]
        );
    }

    #[test]
    fn form_rejects_unknown_letters() {
        assert_eq!(Form::parse("W,X"), Err(ParseFormError('X')));
    }

    #[test]
    fn standing_deserializes_null_and_empty_form() {
        let raw = r#"{
            "position": 3, "team": {"id": 57, "name": "Arsenal"},
            "playedGames": 10, "won": 6, "draw": 2, "lost": 2, "points": 20,
            "goalsFor": 18, "goalsAgainst": 9, "goalDifference": 9, "form": null
        }"#;
        let s: TeamStanding = serde_json::from_str(raw).unwrap();
        assert!(s.recent_form().is_none());

        let raw = raw.replace("null", "\"\"");
        let s: TeamStanding = serde_json::from_str(&raw).unwrap();
        assert!(s.form.is_some());
        assert!(s.recent_form().is_none());
    }

    #[test]
    fn pick_type_serializes_to_wire_codes() {
        for pick in [
            PickType::Over05,
            PickType::Over15,
            PickType::HandicapPlus1,
            PickType::OneUp,
            PickType::Btts,
        ] {
            let json = serde_json::to_string(&pick).unwrap();
            assert_eq!(json, format!("\"{}\"", pick.code()));
        }
    }

    #[test]
    fn final_score_requires_both_sides() {
        let raw = r#"{
            "id": 1, "utcDate": "2025-03-01T15:00:00Z", "status": "FINISHED",
            "homeTeam": {"id": 1, "name": "A"}, "awayTeam": {"id": 2, "name": "B"},
            "competition": {"name": "Premier League", "code": "PL"},
            "score": {"fullTime": {"home": 2, "away": null}}
        }"#;
        let f: Fixture = serde_json::from_str(raw).unwrap();
        assert_eq!(f.final_score(), None);
    }
}
