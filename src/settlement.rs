//! Settling picks against final scores and summarising a pick history.
//!
//! Library API for callers that keep a pick history. The binary only emits
//! fresh [`Prediction`]s; odds, scores and results are filled in by whoever
//! stores them, after which [`HistoryStats`] and [`combined_odds`] apply.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnalysedFixture, PickType, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultType {
    Win,
    Loss,
    /// Stake returned (handicap push)
    Void,
}

/// Settle a pick from the full-time score.
///
/// Returns `None` when the final score alone cannot decide the market
/// (`ONE_UP` / `TWO_UP` need in-play data unless the outcome is forced) or
/// when a team market has no backed side.
pub fn settle(pick: PickType, side: Option<Side>, home: u32, away: u32) -> Option<ResultType> {
    let total = home + away;
    let backed = side.map(|s| match s {
        Side::Home => (home, away),
        Side::Away => (away, home),
    });

    let outcome = match pick {
        PickType::HomeWin => win_if(home > away),
        PickType::AwayWin => win_if(away > home),
        PickType::Draw => win_if(home == away),
        PickType::Over05 => win_if(total >= 1),
        PickType::Over15 => win_if(total >= 2),
        PickType::Over25 => win_if(total >= 3),
        PickType::Btts => win_if(home > 0 && away > 0),
        PickType::OneUp => {
            let (own, other) = backed?;
            if own > other {
                // Winning means they led at some point
                ResultType::Win
            } else if own == 0 {
                ResultType::Loss
            } else {
                return None;
            }
        }
        PickType::TwoUp => {
            let (own, other) = backed?;
            if own >= other + 2 {
                ResultType::Win
            } else if own < 2 {
                ResultType::Loss
            } else {
                return None;
            }
        }
        PickType::HandicapPlus1 => {
            let (own, other) = backed?;
            handicap(own + 1, other)
        }
        PickType::HandicapPlus2 => {
            let (own, other) = backed?;
            handicap(own + 2, other)
        }
    };
    Some(outcome)
}

fn win_if(cond: bool) -> ResultType {
    if cond {
        ResultType::Win
    } else {
        ResultType::Loss
    }
}

fn handicap(adjusted_own: u32, other: u32) -> ResultType {
    match adjusted_own.cmp(&other) {
        std::cmp::Ordering::Greater => ResultType::Win,
        std::cmp::Ordering::Equal => ResultType::Void,
        std::cmp::Ordering::Less => ResultType::Loss,
    }
}

/// A published pick, as tracked in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// `"{fixture id}-{match date}"`
    pub id: String,
    pub match_id: u64,
    pub home_team: String,
    pub away_team: String,
    pub competition: String,
    pub competition_code: String,
    pub match_date: NaiveDate,
    /// "HH:MM" UTC
    pub kickoff: String,
    pub pick: PickType,
    #[serde(default)]
    pub side: Option<Side>,
    pub pick_label: String,
    pub confidence: u8,
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub result: Option<ResultType>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn from_analysed(a: &AnalysedFixture, created_at: DateTime<Utc>) -> Self {
        let f = &a.fixture;
        let match_date = f.utc_date.date_naive();
        Prediction {
            id: format!("{}-{}", f.id, match_date.format("%Y-%m-%d")),
            match_id: f.id,
            home_team: f.home_team.name.clone(),
            away_team: f.away_team.name.clone(),
            competition: f.competition.name.clone(),
            competition_code: f.competition.code.clone(),
            match_date,
            kickoff: f.utc_date.format("%H:%M").to_string(),
            pick: a.analysis.pick,
            side: a.analysis.side,
            pick_label: a.analysis.pick_label.clone(),
            confidence: a.analysis.confidence,
            reasoning: a.analysis.reasoning.clone(),
            odds: None,
            result: None,
            home_score: None,
            away_score: None,
            created_at,
        }
    }

    /// Record the full-time score and settle when the score decides the market.
    pub fn record_score(&mut self, home: u32, away: u32) {
        self.home_score = Some(home);
        self.away_score = Some(away);
        if let Some(result) = settle(self.pick, self.side, home, away) {
            self.result = Some(result);
        }
    }
}

/// Aggregate record over a pick history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub voids: usize,
    pub pending: usize,
    /// Percentage of settled, non-void picks that won
    pub win_rate: f64,
    /// Percentage return on one unit staked on every settled pick with odds
    pub roi: f64,
}

impl HistoryStats {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let count = |r: ResultType| predictions.iter().filter(|p| p.result == Some(r)).count();
        let wins = count(ResultType::Win);
        let losses = count(ResultType::Loss);
        let settled = wins + losses;

        let mut staked = 0usize;
        let mut profit = 0.0f64;
        for p in predictions {
            match (p.result, p.odds) {
                (Some(ResultType::Win), Some(odds)) => {
                    staked += 1;
                    profit += odds - 1.0;
                }
                (Some(ResultType::Loss), Some(_)) => {
                    staked += 1;
                    profit -= 1.0;
                }
                _ => {}
            }
        }

        HistoryStats {
            total: predictions.len(),
            wins,
            losses,
            voids: count(ResultType::Void),
            pending: predictions.iter().filter(|p| p.result.is_none()).count(),
            win_rate: percentage(wins as f64, settled as f64),
            roi: percentage(profit, staked as f64),
        }
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Combined decimal odds for an accumulator of `predictions`.
///
/// `None` for an empty slip or when any leg has no odds yet, which is always
/// the case for picks straight from the selector.
pub fn combined_odds(predictions: &[Prediction]) -> Option<f64> {
    if predictions.is_empty() {
        return None;
    }
    predictions.iter().map(|p| p.odds).product()
}
