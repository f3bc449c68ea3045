//! Builders shared by unit tests.

use chrono::{TimeZone, Utc};

use crate::models::{Competition, Fixture, Form, H2HStats, Team, TeamStanding};

pub fn team(id: u64, name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        crest: None,
    }
}

/// Premier League fixture between team ids 1 (home) and 2 (away).
pub fn fixture(id: u64, home: &str, away: &str) -> Fixture {
    fixture_between(id, (1, home), (2, away))
}

pub fn fixture_between(id: u64, home: (u64, &str), away: (u64, &str)) -> Fixture {
    Fixture {
        id,
        home_team: team(home.0, home.1),
        away_team: team(away.0, away.1),
        competition: Competition {
            id: Some(2021),
            name: "Premier League".into(),
            code: "PL".into(),
            emblem: None,
        },
        utc_date: Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap(),
        status: "TIMED".into(),
        score: None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn standing(
    team_id: u64,
    name: &str,
    position: u32,
    points: i32,
    played: u32,
    won: u32,
    goals_for: u32,
    goals_against: u32,
    form: Option<&str>,
) -> TeamStanding {
    TeamStanding {
        position,
        team: team(team_id, name),
        played_games: played,
        won,
        draw: 0,
        lost: played - won,
        points,
        goals_for,
        goals_against,
        goal_difference: goals_for as i32 - goals_against as i32,
        form: form.map(|f| Form::parse(f).unwrap()),
    }
}

/// Head-to-head record; over 0.5 is fixed at 0.7 and average goals at 2.4.
pub fn h2h(
    meetings: u32,
    home_win: f64,
    away_win: f64,
    draw: f64,
    over15: f64,
    btts: f64,
    over25: f64,
) -> H2HStats {
    H2HStats {
        meetings,
        avg_goals: 2.4,
        over05_rate: 0.7,
        over15_rate: over15,
        over25_rate: over25,
        btts_rate: btts,
        home_win_rate: home_win,
        away_win_rate: away_win,
        draw_rate: draw,
    }
}
