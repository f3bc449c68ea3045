//! Goal expectations and goals-market predicates.
//!
//! Everything here is derived from season per-game averages, optionally
//! overridden by a head-to-head record with enough meetings.

use crate::models::{H2HStats, TeamStanding};

/// Minimum settled meetings before head-to-head rates are trusted.
pub const H2H_MIN_MEETINGS: u32 = 3;

const SCORER_AVG_FOR: f64 = 1.8;
const SCORER_OPP_AVG_AGAINST: f64 = 1.2;
const HOME_SCORING_AVG_FOR: f64 = 1.4;
const AWAY_SCORING_AVG_FOR: f64 = 1.2;
const LEAKY_AVG_AGAINST: f64 = 1.3;
const CLEAN_SHEET_AVG_AGAINST: f64 = 0.9;
const BOTH_ATTACKING_HOME_AVG_FOR: f64 = 1.4;
const BOTH_ATTACKING_AWAY_AVG_FOR: f64 = 1.3;

// Over 1.5
const GOALS_H2H_RATE: f64 = 0.6;
const GOALS_XTOTAL: f64 = 2.7;
const GOALS_XTOTAL_ATTACKING: f64 = 2.6;

// Both teams to score
const BTTS_H2H_RATE: f64 = 0.6;
const BTTS_HOME_AVG_FOR: f64 = 1.2;
const BTTS_AWAY_AVG_FOR: f64 = 1.1;

// Over 2.5
const HIGH_SCORING_H2H_RATE: f64 = 0.6;
const HIGH_SCORING_XTOTAL: f64 = 3.1;

// Over 0.5
const ONE_GOAL_H2H_RATE: f64 = 0.8;
const ONE_GOAL_XTOTAL: f64 = 1.6;
const ONE_GOAL_AVG_FOR: f64 = 0.9;

/// Per-game scoring averages for one team. Zero when no games are played.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoalAverages {
    pub scored: f64,
    pub conceded: f64,
}

impl GoalAverages {
    pub fn from_standing(standing: &TeamStanding) -> Self {
        if standing.played_games == 0 {
            return GoalAverages::default();
        }
        let played = standing.played_games as f64;
        GoalAverages {
            scored: standing.goals_for as f64 / played,
            conceded: standing.goals_against as f64 / played,
        }
    }

    /// Share of games won, zero when no games are played.
    pub fn win_rate(standing: &TeamStanding) -> f64 {
        if standing.played_games == 0 {
            0.0
        } else {
            standing.won as f64 / standing.played_games as f64
        }
    }
}

/// Cross expectation: each side's attack averaged with the other's defence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
    pub total: f64,
}

impl ExpectedGoals {
    pub fn new(home: GoalAverages, away: GoalAverages) -> Self {
        let x_home = (home.scored + away.conceded) / 2.0;
        let x_away = (away.scored + home.conceded) / 2.0;
        ExpectedGoals {
            home: x_home,
            away: x_away,
            total: x_home + x_away,
        }
    }
}

/// Boolean scoring traits of the pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringProfile {
    pub home_is_scorer: bool,
    pub away_is_scorer: bool,
    pub home_scoring_team: bool,
    pub away_scoring_team: bool,
    pub home_leaky: bool,
    pub away_leaky: bool,
    pub home_clean_sheet: bool,
    pub away_clean_sheet: bool,
    pub both_attacking: bool,
}

impl ScoringProfile {
    pub fn new(home: GoalAverages, away: GoalAverages) -> Self {
        ScoringProfile {
            home_is_scorer: home.scored >= SCORER_AVG_FOR
                && away.conceded >= SCORER_OPP_AVG_AGAINST,
            away_is_scorer: away.scored >= SCORER_AVG_FOR
                && home.conceded >= SCORER_OPP_AVG_AGAINST,
            home_scoring_team: home.scored >= HOME_SCORING_AVG_FOR,
            away_scoring_team: away.scored >= AWAY_SCORING_AVG_FOR,
            home_leaky: home.conceded >= LEAKY_AVG_AGAINST,
            away_leaky: away.conceded >= LEAKY_AVG_AGAINST,
            home_clean_sheet: home.conceded <= CLEAN_SHEET_AVG_AGAINST,
            away_clean_sheet: away.conceded <= CLEAN_SHEET_AVG_AGAINST,
            both_attacking: home.scored >= BOTH_ATTACKING_HOME_AVG_FOR
                && away.scored >= BOTH_ATTACKING_AWAY_AVG_FOR,
        }
    }

    fn any_scoring_team(&self) -> bool {
        self.home_scoring_team || self.away_scoring_team
    }

    fn any_leaky(&self) -> bool {
        self.home_leaky || self.away_leaky
    }
}

/// Why a goals market is considered probable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    No,
    Season,
    HeadToHead,
}

impl Support {
    pub fn is_probable(self) -> bool {
        self != Support::No
    }

    pub fn h2h_confirmed(self) -> bool {
        self == Support::HeadToHead
    }

    fn judge(h2h_confirms: bool, season_supports: bool) -> Self {
        if h2h_confirms {
            Support::HeadToHead
        } else if season_supports {
            Support::Season
        } else {
            Support::No
        }
    }
}

/// Verdict for each goals market on one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketOutlook {
    /// Over 1.5
    pub goals: Support,
    pub btts: Support,
    /// Over 2.5
    pub high_scoring: Support,
    /// Over 0.5
    pub at_least_one_goal: Support,
}

impl MarketOutlook {
    pub fn new(
        home: GoalAverages,
        away: GoalAverages,
        x: ExpectedGoals,
        profile: &ScoringProfile,
        h2h: Option<&H2HStats>,
    ) -> Self {
        let h2h = h2h.filter(|h| h.meetings >= H2H_MIN_MEETINGS);
        let rate_at_least = |rate: fn(&H2HStats) -> f64, min: f64| h2h.is_some_and(|h| rate(h) >= min);

        let goals = Support::judge(
            rate_at_least(|h| h.over15_rate, GOALS_H2H_RATE),
            (x.total >= GOALS_XTOTAL && profile.any_scoring_team() && profile.any_leaky())
                || (x.total >= GOALS_XTOTAL_ATTACKING && profile.both_attacking),
        );
        let btts = Support::judge(
            rate_at_least(|h| h.btts_rate, BTTS_H2H_RATE),
            home.scored >= BTTS_HOME_AVG_FOR
                && away.scored >= BTTS_AWAY_AVG_FOR
                && profile.home_leaky
                && profile.away_leaky,
        );
        let high_scoring = Support::judge(
            rate_at_least(|h| h.over25_rate, HIGH_SCORING_H2H_RATE),
            x.total >= HIGH_SCORING_XTOTAL && profile.any_scoring_team(),
        );
        let at_least_one_goal = Support::judge(
            rate_at_least(|h| h.over05_rate, ONE_GOAL_H2H_RATE),
            x.total >= ONE_GOAL_XTOTAL
                && (home.scored >= ONE_GOAL_AVG_FOR || away.scored >= ONE_GOAL_AVG_FOR)
                && !(profile.home_clean_sheet && profile.away_clean_sheet),
        );

        MarketOutlook {
            goals,
            btts,
            high_scoring,
            at_least_one_goal,
        }
    }
}
