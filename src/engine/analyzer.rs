//! Single-fixture match analyzer.
//!
//! A hand-tuned additive point system: each side accumulates signal points
//! from table position, points, recent form, season win rate and the
//! head-to-head record. The signal gap is bucketed into bands and combined
//! with goals-market predicates in a fixed priority order to produce exactly
//! one pick with an integer confidence.
//!
//! The weights are product behaviour. Changing any of them changes which
//! picks are shown.

use tracing::debug;

use crate::models::{Analysis, Fixture, Form, H2HStats, PickType, Side, TeamStanding};

use super::goals::{
    ExpectedGoals, GoalAverages, MarketOutlook, ScoringProfile, Support, H2H_MIN_MEETINGS,
};
use super::reasoning::Reasoning;

/// Head start given to the home side before any signal is counted.
const HOME_ADVANTAGE: i32 = 5;

const NO_STANDINGS_CONFIDENCE: u8 = 52;
const NO_STANDINGS_REASON: &str = "No standings data available";

// ── Signal weights ───────────────────────────────────────────────────────────

/// (minimum table-position gap, points awarded)
const POSITION_HUGE: (i32, i32) = (14, 22);
const POSITION_LARGE: (i32, i32) = (8, 14);
const POSITION_CLEAR: (i32, i32) = (4, 7);

/// (minimum league-points gap, points awarded)
const POINTS_HUGE: (i32, i32) = (22, 18);
const POINTS_LARGE: (i32, i32) = (12, 10);
const POINTS_CLEAR: (i32, i32) = (5, 5);

/// (minimum form score, bonus)
const FORM_OUTSTANDING: (u32, i32) = (13, 14);
const FORM_GOOD: (u32, i32) = (10, 9);
const FORM_DECENT: (u32, i32) = (7, 4);
/// (maximum form score, penalty)
const FORM_DIRE: (u32, i32) = (2, -6);
const FORM_POOR: (u32, i32) = (4, -3);

const WIN_RATE_HIGH: f64 = 0.65;
const WIN_RATE_BONUS: i32 = 8;

const H2H_DOMINANT: (f64, i32) = (0.65, 12);
const H2H_EDGE: (f64, i32) = (0.5, 6);
const H2H_DRAWISH: (f64, i32) = (0.5, -3);

// ── Signal-gap bands ─────────────────────────────────────────────────────────

const EXTREME_HOME: i32 = 32;
const DOMINANT_HOME: i32 = 22;
const STRONG_HOME: i32 = 12;
const MODERATE_HOME: i32 = 5;
const MODERATE_AWAY: i32 = -5;
const STRONG_AWAY: i32 = -10;
const DOMINANT_AWAY: i32 = -20;
const EXTREME_AWAY: i32 = -30;

// ── Confidence boosts ────────────────────────────────────────────────────────

const FORM_BOOST: i32 = 4;
const FORM_BOOST_MIN_SCORE: u32 = 10;
const FORM_DRAG_MAX_SCORE: u32 = 3;
const H2H_BOOST_MIN_RATE: f64 = 0.5;

const FALLBACK_CONFIDENCE: i32 = 58;

/// Accumulated signal points per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub home: i32,
    pub away: i32,
}

impl Signals {
    fn add(&mut self, side: Side, points: i32) {
        match side {
            Side::Home => self.home += points,
            Side::Away => self.away += points,
        }
    }

    /// Positive favours the home side.
    pub fn diff(&self) -> i32 {
        self.home - self.away
    }
}

#[derive(Debug, Clone, Copy)]
struct Bands {
    extreme_home: bool,
    dominant_home: bool,
    strong_home: bool,
    moderate_home: bool,
    moderate_away: bool,
    strong_away: bool,
    dominant_away: bool,
    extreme_away: bool,
}

impl Bands {
    fn from_diff(diff: i32) -> Self {
        Bands {
            extreme_home: diff >= EXTREME_HOME,
            dominant_home: diff >= DOMINANT_HOME,
            strong_home: diff >= STRONG_HOME,
            moderate_home: diff >= MODERATE_HOME,
            moderate_away: diff <= MODERATE_AWAY,
            strong_away: diff <= STRONG_AWAY,
            dominant_away: diff <= DOMINANT_AWAY,
            extreme_away: diff <= EXTREME_AWAY,
        }
    }
}

/// Both standings plus the optional head-to-head for one fixture.
struct Matchup<'a> {
    fixture: &'a Fixture,
    home: &'a TeamStanding,
    away: &'a TeamStanding,
    h2h: Option<&'a H2HStats>,
}

impl<'a> Matchup<'a> {
    fn name(&self, side: Side) -> &'a str {
        &side.team(self.fixture).name
    }

    fn standing(&self, side: Side) -> &'a TeamStanding {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    fn form(&self, side: Side) -> Option<&'a Form> {
        self.standing(side).recent_form()
    }

    /// Head-to-head record only when there are enough meetings to trust it.
    fn trusted_h2h(&self) -> Option<&'a H2HStats> {
        self.h2h.filter(|h| h.meetings >= H2H_MIN_MEETINGS)
    }
}

struct Decision {
    pick: PickType,
    side: Option<Side>,
    confidence: u8,
}

/// Analyse one fixture and emit exactly one pick.
///
/// Total: a missing standing on either side yields a low-confidence
/// home-win fallback instead of an error.
pub fn analyse(
    fixture: &Fixture,
    home: Option<&TeamStanding>,
    away: Option<&TeamStanding>,
    h2h: Option<&H2HStats>,
) -> Analysis {
    let (Some(home), Some(away)) = (home, away) else {
        return Analysis {
            pick: PickType::HomeWin,
            side: Some(Side::Home),
            pick_label: pick_label(fixture, PickType::HomeWin, Some(Side::Home)),
            confidence: NO_STANDINGS_CONFIDENCE,
            reasoning: vec![NO_STANDINGS_REASON.to_string()],
        };
    };

    let m = Matchup {
        fixture,
        home,
        away,
        h2h,
    };
    let mut reasoning = Reasoning::new();

    let signals = compute_signals(&m, &mut reasoning);
    let home_avg = GoalAverages::from_standing(home);
    let away_avg = GoalAverages::from_standing(away);
    let x = ExpectedGoals::new(home_avg, away_avg);
    let profile = ScoringProfile::new(home_avg, away_avg);
    let outlook = MarketOutlook::new(home_avg, away_avg, x, &profile, m.trusted_h2h());

    let decision = decide(&m, signals, x, &profile, &outlook, &mut reasoning);

    debug!(
        fixture_id = fixture.id,
        home_signal = signals.home,
        away_signal = signals.away,
        x_total = format!("{:.2}", x.total),
        pick = %decision.pick,
        confidence = decision.confidence,
        "{} vs {} analysed",
        fixture.home_team.name,
        fixture.away_team.name
    );

    Analysis {
        pick: decision.pick,
        side: decision.side,
        pick_label: pick_label(fixture, decision.pick, decision.side),
        confidence: decision.confidence,
        reasoning: reasoning.finish(h2h_summary(&m), Some(form_summary(&m))),
    }
}

/// Display label for a pick, naming the backed team where relevant.
pub fn pick_label(fixture: &Fixture, pick: PickType, side: Option<Side>) -> String {
    let team = side.map(|s| s.team(fixture).name.as_str()).unwrap_or("");
    match pick {
        PickType::HomeWin => format!("{} to Win", fixture.home_team.name),
        PickType::AwayWin => format!("{} to Win", fixture.away_team.name),
        PickType::Draw => "Draw".to_string(),
        PickType::Over05 => "Over 0.5 Goals".to_string(),
        PickType::Over15 => "Over 1.5 Goals".to_string(),
        PickType::Over25 => "Over 2.5 Goals".to_string(),
        PickType::Btts => "Both Teams to Score".to_string(),
        PickType::OneUp => format!("{team} 1UP"),
        PickType::TwoUp => format!("{team} 2UP"),
        PickType::HandicapPlus1 => format!("{team} +1 Handicap"),
        PickType::HandicapPlus2 => format!("{team} +2 Handicap"),
    }
}

// ── Signals ──────────────────────────────────────────────────────────────────

fn compute_signals(m: &Matchup<'_>, reasoning: &mut Reasoning) -> Signals {
    let mut signals = Signals {
        home: HOME_ADVANTAGE,
        away: 0,
    };

    // Lower position number is better, so a positive gap favours home.
    let pos_diff = m.away.position as i32 - m.home.position as i32;
    if let Some((side, gap)) = favoured(pos_diff) {
        let (fav, other) = (m.name(side), m.name(other_side(side)));
        if gap >= POSITION_HUGE.0 {
            signals.add(side, POSITION_HUGE.1);
            reasoning.signal(format!("{fav} sit {gap} places above {other} in the table"));
        } else if gap >= POSITION_LARGE.0 {
            signals.add(side, POSITION_LARGE.1);
            reasoning.signal(format!("{fav} hold a {gap}-place table advantage"));
        } else if gap >= POSITION_CLEAR.0 {
            signals.add(side, POSITION_CLEAR.1);
            reasoning.signal(format!("{fav} are {gap} places higher than {other}"));
        }
    }

    let pts_diff = m.home.points - m.away.points;
    if let Some((side, gap)) = favoured(pts_diff) {
        let fav = m.name(side);
        if gap >= POINTS_HUGE.0 {
            signals.add(side, POINTS_HUGE.1);
            reasoning.signal(format!("{fav} lead by {gap} points, a dominant season"));
        } else if gap >= POINTS_LARGE.0 {
            signals.add(side, POINTS_LARGE.1);
            reasoning.signal(format!("{fav} lead on points (+{gap})"));
        } else if gap >= POINTS_CLEAR.0 {
            signals.add(side, POINTS_CLEAR.1);
            reasoning.signal(format!("{fav} are {gap} points better off"));
        }
    }

    for side in [Side::Home, Side::Away] {
        if let Some(form) = m.form(side) {
            let (points, line) = form_signal(m.name(side), form);
            signals.add(side, points);
            if let Some(line) = line {
                reasoning.signal(line);
            }
        }
    }

    for side in [Side::Home, Side::Away] {
        let rate = GoalAverages::win_rate(m.standing(side));
        if rate >= WIN_RATE_HIGH {
            signals.add(side, WIN_RATE_BONUS);
            reasoning.signal(format!(
                "{} win {:.0}% of their games",
                m.name(side),
                rate * 100.0
            ));
        }
    }

    if let Some(h) = m.trusted_h2h() {
        let n = h.meetings;
        // Each side is judged on its own rate; a 50/50 record rewards both.
        let mut fired = false;
        for (side, rate) in [(Side::Home, h.home_win_rate), (Side::Away, h.away_win_rate)] {
            let team = m.name(side);
            if rate >= H2H_DOMINANT.0 {
                signals.add(side, H2H_DOMINANT.1);
                reasoning.signal(format!("{team} won {} of the last {n} meetings", pct(rate)));
                fired = true;
            } else if rate >= H2H_EDGE.0 {
                signals.add(side, H2H_EDGE.1);
                reasoning.signal(format!("{team} edge the head-to-head ({} wins in {n})", pct(rate)));
                fired = true;
            }
        }
        if !fired && h.draw_rate >= H2H_DRAWISH.0 {
            signals.add(Side::Home, H2H_DRAWISH.1);
            signals.add(Side::Away, H2H_DRAWISH.1);
            reasoning.signal(format!(
                "Draws are common in this fixture ({} of {n} meetings)",
                pct(h.draw_rate)
            ));
        }
    }

    signals
}

/// Which side a signed gap favours, and by how much.
fn favoured(diff: i32) -> Option<(Side, i32)> {
    match diff {
        d if d > 0 => Some((Side::Home, d)),
        d if d < 0 => Some((Side::Away, -d)),
        _ => None,
    }
}

fn other_side(side: Side) -> Side {
    match side {
        Side::Home => Side::Away,
        Side::Away => Side::Home,
    }
}

fn form_signal(team: &str, form: &Form) -> (i32, Option<String>) {
    let score = form.score();
    if score >= FORM_OUTSTANDING.0 {
        (FORM_OUTSTANDING.1, Some(format!("{team} in outstanding form: {form}")))
    } else if score >= FORM_GOOD.0 {
        (FORM_GOOD.1, Some(format!("{team} in good form: {form}")))
    } else if score >= FORM_DECENT.0 {
        (FORM_DECENT.1, Some(format!("{team} in decent form: {form}")))
    } else if score <= FORM_DIRE.0 {
        (FORM_DIRE.1, Some(format!("{team} in dire form: {form}")))
    } else if score <= FORM_POOR.0 {
        (FORM_POOR.1, Some(format!("{team} struggling for form: {form}")))
    } else {
        (0, None)
    }
}

// ── Decision ─────────────────────────────────────────────────────────────────

fn decide(
    m: &Matchup<'_>,
    signals: Signals,
    x: ExpectedGoals,
    profile: &ScoringProfile,
    outlook: &MarketOutlook,
    reasoning: &mut Reasoning,
) -> Decision {
    let diff = signals.diff();
    let gap = diff.abs();
    let bands = Bands::from_diff(diff);
    let (home, away) = (m.name(Side::Home), m.name(Side::Away));
    let home_form_boost = form_boost(m.form(Side::Home));
    let away_form_boost = form_boost(m.form(Side::Away));

    // Extreme mismatch with a prolific favourite is the strongest spot of all.
    if bands.extreme_home && profile.home_is_scorer {
        one_up_reason(m, Side::Home, gap, reasoning);
        return decision(
            PickType::OneUp,
            Some(Side::Home),
            52 + diff / 3 + home_form_boost,
            84,
        );
    }
    if bands.extreme_away && profile.away_is_scorer {
        one_up_reason(m, Side::Away, gap, reasoning);
        return decision(
            PickType::OneUp,
            Some(Side::Away),
            50 + gap / 3 + away_form_boost,
            82,
        );
    }

    // Goals markets are judged more reliable than result markets.
    if outlook.goals.is_probable() {
        if outlook.goals.h2h_confirmed() {
            if let Some(h) = m.h2h {
                reasoning.decision(format!(
                    "H2H: {} of the last {} meetings had 2+ goals",
                    pct(h.over15_rate),
                    h.meetings
                ));
            }
        }
        reasoning.decision(format!("Expected goals {:.2} a game", x.total));
        return decision(
            PickType::Over15,
            None,
            52 + round_half_up((x.total - 2.7) * 10.0) + h2h_bonus(outlook.goals, 5),
            84,
        );
    }
    if outlook.btts.is_probable() {
        match (outlook.btts, m.h2h) {
            (Support::HeadToHead, Some(h)) => reasoning.decision(format!(
                "H2H: both teams scored in {} of the last {} meetings",
                pct(h.btts_rate),
                h.meetings
            )),
            _ => {
                let (ha, aa) = (
                    GoalAverages::from_standing(m.home),
                    GoalAverages::from_standing(m.away),
                );
                reasoning.decision(format!(
                    "{home} score {:.1} and {away} {:.1} a game, both defences concede {:.1}+",
                    ha.scored,
                    aa.scored,
                    ha.conceded.min(aa.conceded)
                ));
            }
        }
        return decision(
            PickType::Btts,
            None,
            56 + round_half_up((x.total - 2.3) * 10.0) + h2h_bonus(outlook.btts, 6),
            83,
        );
    }
    if outlook.high_scoring.is_probable() {
        if outlook.high_scoring.h2h_confirmed() {
            if let Some(h) = m.h2h {
                reasoning.decision(format!(
                    "H2H: {} of the last {} meetings had 3+ goals",
                    pct(h.over25_rate),
                    h.meetings
                ));
            }
        }
        reasoning.decision(format!("Expected goals {:.2} a game", x.total));
        return decision(
            PickType::Over25,
            None,
            50 + round_half_up((x.total - 3.1) * 14.0) + h2h_bonus(outlook.high_scoring, 6),
            83,
        );
    }

    let home_boosts = h2h_win_boost(m.trusted_h2h(), Side::Home) + home_form_boost;
    let away_boosts = h2h_win_boost(m.trusted_h2h(), Side::Away) + away_form_boost;

    if bands.dominant_home || bands.strong_home {
        reasoning.decision(format!("Signal gap of {gap} points in favour of {home}"));
        let (base, cap) = if bands.dominant_home { (46, 84) } else { (44, 81) };
        return decision(PickType::HomeWin, Some(Side::Home), base + diff / 2 + home_boosts, cap);
    }
    if bands.dominant_away || bands.strong_away {
        reasoning.decision(format!("Signal gap of {gap} points in favour of {away}"));
        let (base, cap) = if bands.dominant_away { (44, 83) } else { (42, 80) };
        return decision(PickType::AwayWin, Some(Side::Away), base + gap / 2 + away_boosts, cap);
    }

    if bands.moderate_home {
        reasoning.decision(format!(
            "{home} hold a {gap}-point edge but {away} should stay within a goal"
        ));
        return decision(
            PickType::HandicapPlus1,
            Some(Side::Away),
            66 + diff / 4 + home_form_boost,
            78,
        );
    }
    if bands.moderate_away {
        reasoning.decision(format!(
            "{away} hold a {gap}-point edge but {home} should stay within a goal"
        ));
        return decision(
            PickType::HandicapPlus1,
            Some(Side::Home),
            66 + gap / 4 + away_form_boost,
            78,
        );
    }

    if outlook.at_least_one_goal.is_probable() {
        reasoning.decision(format!(
            "Expected goals {:.2} a game, a goalless draw is unlikely",
            x.total
        ));
        return decision(PickType::Over05, None, 64 + round_half_up(x.total * 5.0), 78);
    }

    reasoning.decision("No decisive signal, home advantage tips it");
    decision(PickType::HomeWin, Some(Side::Home), FALLBACK_CONFIDENCE, 100)
}

fn decision(pick: PickType, side: Option<Side>, raw: i32, cap: i32) -> Decision {
    Decision {
        pick,
        side,
        confidence: raw.min(cap).clamp(0, 100) as u8,
    }
}

fn one_up_reason(m: &Matchup<'_>, side: Side, gap: i32, reasoning: &mut Reasoning) {
    let own = GoalAverages::from_standing(m.standing(side));
    let opp = GoalAverages::from_standing(m.standing(other_side(side)));
    reasoning.decision(format!(
        "{} average {:.1} goals a game against a defence conceding {:.1}",
        m.name(side),
        own.scored,
        opp.conceded
    ));
    reasoning.decision(format!(
        "Signal gap of {gap} points in favour of {}",
        m.name(side)
    ));
}

fn h2h_bonus(support: Support, bonus: i32) -> i32 {
    if support.h2h_confirmed() {
        bonus
    } else {
        0
    }
}

fn form_boost(form: Option<&Form>) -> i32 {
    match form.map(Form::score) {
        Some(score) if score >= FORM_BOOST_MIN_SCORE => FORM_BOOST,
        Some(score) if score <= FORM_DRAG_MAX_SCORE => -FORM_BOOST,
        _ => 0,
    }
}

fn h2h_win_boost(h2h: Option<&H2HStats>, side: Side) -> i32 {
    let Some(h) = h2h else { return 0 };
    let rate = match side {
        Side::Home => h.home_win_rate,
        Side::Away => h.away_win_rate,
    };
    if rate >= H2H_BOOST_MIN_RATE {
        round_half_up(rate * 10.0)
    } else {
        0
    }
}

/// Rounds .5 towards positive infinity.
fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

fn pct(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

// ── Summary lines ────────────────────────────────────────────────────────────

fn h2h_summary(m: &Matchup<'_>) -> Option<String> {
    let h = m.h2h.filter(|h| h.meetings > 0)?;
    Some(format!(
        "H2H last {}: {} {}, draw {}, {} {}, {:.1} goals a game",
        h.meetings,
        m.name(Side::Home),
        pct(h.home_win_rate),
        pct(h.draw_rate),
        m.name(Side::Away),
        pct(h.away_win_rate),
        h.avg_goals
    ))
}

fn form_summary(m: &Matchup<'_>) -> String {
    let show = |side: Side| {
        m.form(side)
            .map(|f| f.to_string())
            .unwrap_or_else(|| "No data".to_string())
    };
    format!(
        "Form: {} {} | {} {}",
        m.name(Side::Home),
        show(Side::Home),
        m.name(Side::Away),
        show(Side::Away)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, h2h, standing};

    fn run(
        home: &TeamStanding,
        away: &TeamStanding,
        h2h: Option<&H2HStats>,
    ) -> Analysis {
        analyse(&fixture(1, "Home FC", "Away FC"), Some(home), Some(away), h2h)
    }

    #[test]
    fn missing_standing_returns_fallback() {
        let f = fixture(1, "Home FC", "Away FC");
        let home = standing(1, "Home FC", 1, 50, 20, 15, 40, 10, None);
        for (h, a) in [(Some(&home), None), (None, Some(&home)), (None, None)] {
            let a = analyse(&f, h, a, None);
            assert_eq!(a.pick, PickType::HomeWin);
            assert_eq!(a.confidence, 52);
            assert_eq!(a.reasoning, vec!["No standings data available".to_string()]);
            assert_eq!(a.pick_label, "Home FC to Win");
        }
    }

    #[test]
    fn worked_example_is_one_up_for_home() {
        let home = standing(1, "Home FC", 1, 70, 20, 16, 50, 10, Some("W,W,W,W,W"));
        let away = standing(2, "Away FC", 18, 15, 20, 3, 12, 45, Some("L,L,D,L,L"));

        let mut r = Reasoning::new();
        let m = Matchup {
            fixture: &fixture(1, "Home FC", "Away FC"),
            home: &home,
            away: &away,
            h2h: None,
        };
        let signals = compute_signals(&m, &mut r);
        assert_eq!(signals, Signals { home: 67, away: -6 });
        assert_eq!(signals.diff(), 73);

        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::OneUp);
        assert_eq!(a.side, Some(Side::Home));
        assert_eq!(a.confidence, 80);
        assert_eq!(a.pick_label, "Home FC 1UP");
        assert!(a.reasoning[0].starts_with("Home FC average 2.5 goals"));
    }

    #[test]
    fn zero_played_games_does_not_panic() {
        let home = standing(1, "Home FC", 10, 0, 0, 0, 0, 0, None);
        let away = standing(2, "Away FC", 10, 0, 0, 0, 0, 0, None);
        let a = run(&home, &away, None);
        // Only the home advantage fires: diff 5 → away +1 handicap
        assert_eq!(a.pick, PickType::HandicapPlus1);
        assert_eq!(a.side, Some(Side::Away));
        assert_eq!(a.confidence, 67);
        assert_eq!(a.pick_label, "Away FC +1 Handicap");
    }

    #[test]
    fn no_signal_falls_back_to_home_win() {
        let home = standing(1, "Home FC", 10, 0, 0, 0, 0, 0, None);
        let away = standing(2, "Away FC", 6, 0, 0, 0, 0, 0, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::HomeWin);
        assert_eq!(a.confidence, 58);
    }

    #[test]
    fn season_goals_pick_over_one_and_a_half() {
        let home = standing(1, "Home FC", 5, 30, 15, 7, 30, 21, None);
        let away = standing(2, "Away FC", 7, 28, 15, 6, 24, 24, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::Over15);
        assert_eq!(a.side, None);
        assert_eq!(a.confidence, 58);
        assert_eq!(a.reasoning[0], "Expected goals 3.30 a game");
    }

    #[test]
    fn h2h_confirms_over_one_and_a_half() {
        let home = standing(1, "Home FC", 6, 25, 15, 6, 15, 15, None);
        let away = standing(2, "Away FC", 8, 24, 15, 6, 15, 15, None);
        let record = h2h(5, 0.4, 0.3, 0.3, 0.7, 0.2, 0.2);
        let a = run(&home, &away, Some(&record));
        assert_eq!(a.pick, PickType::Over15);
        // 52 - 7 + 5
        assert_eq!(a.confidence, 50);
        assert!(a.reasoning[0].starts_with("H2H: 70% of the last 5 meetings"));
        assert!(!a.reasoning.iter().any(|l| l.starts_with("H2H last")));
    }

    #[test]
    fn leaky_scoring_sides_pick_btts() {
        let home = standing(1, "Home FC", 10, 28, 20, 8, 24, 26, None);
        let away = standing(2, "Away FC", 11, 27, 20, 7, 24, 26, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::Btts);
        assert_eq!(a.confidence, 58);
        assert_eq!(a.pick_label, "Both Teams to Score");
    }

    #[test]
    fn tight_defences_with_a_big_attack_pick_over_two_and_a_half() {
        let home = standing(1, "Home FC", 3, 40, 20, 12, 60, 20, None);
        let away = standing(2, "Away FC", 5, 36, 20, 10, 24, 24, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::Over25);
        assert_eq!(a.confidence, 51);
    }

    #[test]
    fn dominant_home_win_is_capped() {
        let home = standing(1, "Home FC", 2, 50, 20, 14, 26, 12, Some("W,W,D,W,W"));
        let away = standing(2, "Away FC", 17, 20, 20, 4, 16, 22, Some("L,D,L,W,L"));
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::HomeWin);
        assert_eq!(a.side, Some(Side::Home));
        // 46 + 35 + 4 = 85, capped at 84
        assert_eq!(a.confidence, 84);
        assert_eq!(a.reasoning.len(), 5);
        assert!(a.reasoning[0].starts_with("Signal gap of 70 points"));
    }

    #[test]
    fn strong_home_win_adds_h2h_boost() {
        let home = standing(1, "Home FC", 5, 35, 20, 8, 20, 20, None);
        let away = standing(2, "Away FC", 9, 31, 20, 7, 20, 20, None);
        let record = h2h(3, 0.5, 0.2, 0.3, 0.3, 0.2, 0.2);
        let a = run(&home, &away, Some(&record));
        assert_eq!(a.pick, PickType::HomeWin);
        // 44 + floor(18 / 2) + round(5.0)
        assert_eq!(a.confidence, 58);
        assert!(a.reasoning.iter().any(|l| l.contains("edge the head-to-head")));
        assert!(a.reasoning[3].starts_with("H2H last 3"));
        assert!(a.reasoning[4].starts_with("Form:"));
    }

    #[test]
    fn dominant_away_win_with_h2h_and_form() {
        let home = standing(1, "Home FC", 12, 25, 20, 6, 20, 24, None);
        let away = standing(2, "Away FC", 3, 40, 20, 12, 22, 14, Some("W,W,L,W,D"));
        let record = h2h(4, 0.25, 0.75, 0.0, 0.5, 0.4, 0.2);
        let a = run(&home, &away, Some(&record));
        assert_eq!(a.pick, PickType::AwayWin);
        assert_eq!(a.pick_label, "Away FC to Win");
        // 44 + 20 + 8 + 4
        assert_eq!(a.confidence, 76);
    }

    #[test]
    fn evenly_matched_low_block_picks_over_half_goal() {
        let home = standing(1, "Home FC", 8, 25, 20, 6, 20, 20, None);
        let away = standing(2, "Away FC", 4, 29, 20, 8, 17, 18, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::Over05);
        assert_eq!(a.confidence, 73);
    }

    #[test]
    fn draw_heavy_h2h_dampens_both_sides() {
        let home = standing(1, "Home FC", 8, 25, 20, 6, 20, 20, None);
        let away = standing(2, "Away FC", 8, 25, 20, 6, 20, 20, None);
        let record = h2h(5, 0.2, 0.2, 0.6, 0.3, 0.2, 0.2);
        let m = Matchup {
            fixture: &fixture(1, "Home FC", "Away FC"),
            home: &home,
            away: &away,
            h2h: Some(&record),
        };
        let mut r = Reasoning::new();
        let signals = compute_signals(&m, &mut r);
        assert_eq!(signals, Signals { home: 2, away: -3 });
    }

    #[test]
    fn split_h2h_record_rewards_both_sides() {
        let home = standing(1, "Home FC", 8, 25, 20, 6, 20, 20, None);
        let away = standing(2, "Away FC", 8, 25, 20, 6, 20, 20, None);
        let record = h2h(4, 0.5, 0.5, 0.0, 0.3, 0.2, 0.2);
        let m = Matchup {
            fixture: &fixture(1, "Home FC", "Away FC"),
            home: &home,
            away: &away,
            h2h: Some(&record),
        };
        let mut r = Reasoning::new();
        assert_eq!(compute_signals(&m, &mut r), Signals { home: 11, away: 6 });

        let a = run(&home, &away, Some(&record));
        assert_eq!(a.pick, PickType::HandicapPlus1);
        assert_eq!(a.side, Some(Side::Away));
        // 66 + floor(5 / 4)
        assert_eq!(a.confidence, 67);
        assert!(a.reasoning.iter().any(|l| l.starts_with("Away FC edge the head-to-head")));
    }

    #[test]
    fn strong_away_win_below_dominance() {
        let home = standing(1, "Home FC", 8, 25, 20, 6, 20, 20, None);
        let away = standing(2, "Away FC", 4, 33, 20, 8, 20, 20, Some("W,W,D,W,L"));
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::AwayWin);
        assert_eq!(a.side, Some(Side::Away));
        // gap 16: 42 + 8 + form 4
        assert_eq!(a.confidence, 54);
        assert!(a.reasoning[0].starts_with("Signal gap of 16 points in favour of Away FC"));
    }

    #[test]
    fn mirrored_mismatch_is_one_up_for_away() {
        let home = standing(1, "Home FC", 18, 15, 20, 3, 12, 45, Some("L,L,D,L,L"));
        let away = standing(2, "Away FC", 1, 70, 20, 16, 50, 10, Some("W,W,W,W,W"));
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::OneUp);
        assert_eq!(a.side, Some(Side::Away));
        // gap 63: 50 + 21 + form 4
        assert_eq!(a.confidence, 75);
        assert_eq!(a.pick_label, "Away FC 1UP");
    }

    #[test]
    fn moderate_away_edge_backs_home_with_handicap() {
        let home = standing(1, "Home FC", 8, 25, 20, 6, 20, 20, None);
        let away = standing(2, "Away FC", 2, 30, 20, 8, 20, 20, None);
        let a = run(&home, &away, None);
        assert_eq!(a.pick, PickType::HandicapPlus1);
        assert_eq!(a.side, Some(Side::Home));
        // gap 7: 66 + 1
        assert_eq!(a.confidence, 67);
        assert_eq!(a.pick_label, "Home FC +1 Handicap");
    }

    #[test]
    fn absent_form_contributes_nothing() {
        let f = Form::parse("L,L,L,L,L").unwrap();
        assert_eq!(form_boost(Some(&f)), -4);
        assert_eq!(form_boost(None), 0);
        assert_eq!(form_signal("X", &f).0, -6);
    }

    #[test]
    fn round_half_up_matches_expectations() {
        assert_eq!(round_half_up(7.5), 8);
        assert_eq!(round_half_up(2.25), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-7.000000000000002), -7);
    }

    #[test]
    fn output_is_well_formed_across_inputs() {
        let forms = [None, Some("W,W,W,W,W"), Some("L,L,L,L,L"), Some("D,D,W")];
        let records = [
            None,
            Some(h2h(2, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0)),
            Some(h2h(6, 0.1, 0.8, 0.1, 0.9, 0.9, 0.9)),
        ];
        for (i, hf) in forms.iter().enumerate() {
            for af in forms.iter() {
                for rec in records.iter() {
                    for (hp, ap) in [(1, 20), (20, 1), (10, 11)] {
                        let home = standing(1, "Home FC", hp, 60 - hp as i32, 20, 10, 10 + i as u32 * 15, 25, *hf);
                        let away = standing(2, "Away FC", ap, 60 - ap as i32, 20, 9, 30, 8 + i as u32 * 10, *af);
                        let a = run(&home, &away, rec.as_ref());
                        assert!(a.confidence <= 100);
                        assert!(!a.reasoning.is_empty() && a.reasoning.len() <= 5);
                        assert!(!matches!(
                            a.pick,
                            PickType::Draw | PickType::TwoUp | PickType::HandicapPlus2
                        ));
                        assert_eq!(a, run(&home, &away, rec.as_ref()));
                    }
                }
            }
        }
    }

    #[test]
    fn labels_name_the_backed_team() {
        let f = fixture(1, "Arsenal", "Chelsea");
        assert_eq!(pick_label(&f, PickType::TwoUp, Some(Side::Away)), "Chelsea 2UP");
        assert_eq!(
            pick_label(&f, PickType::HandicapPlus2, Some(Side::Home)),
            "Arsenal +2 Handicap"
        );
        assert_eq!(pick_label(&f, PickType::Draw, None), "Draw");
        assert_eq!(pick_label(&f, PickType::Over05, None), "Over 0.5 Goals");
        assert_eq!(pick_label(&f, PickType::Over25, None), "Over 2.5 Goals");
    }
}
