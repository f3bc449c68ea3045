use crate::models::{Fixture, H2HStats};

/// Most recent meetings considered.
pub const H2H_MAX_MEETINGS: usize = 10;

/// Head-to-head record for `fixture` from past meetings of the same two teams.
///
/// Rates are oriented to the fixture's current home side whichever team
/// hosted each past meeting. Matches without a full-time score, matches
/// involving other teams and the fixture itself are ignored. `None` when no
/// settled meeting remains.
pub fn compute_h2h(fixture: &Fixture, matches: &[Fixture]) -> Option<H2HStats> {
    let home_id = fixture.home_team.id;
    let away_id = fixture.away_team.id;

    let mut meetings: Vec<(&Fixture, (u32, u32))> = matches
        .iter()
        .filter(|m| m.id != fixture.id && m.involves(home_id) && m.involves(away_id))
        .filter_map(|m| {
            let (h, a) = m.final_score()?;
            let oriented = if m.home_team.id == home_id { (h, a) } else { (a, h) };
            Some((m, oriented))
        })
        .collect();
    if meetings.is_empty() {
        return None;
    }
    meetings.sort_by(|a, b| b.0.utc_date.cmp(&a.0.utc_date));
    meetings.truncate(H2H_MAX_MEETINGS);

    let n = meetings.len() as f64;
    let rate = |pred: &dyn Fn(u32, u32) -> bool| {
        meetings.iter().filter(|(_, (h, a))| pred(*h, *a)).count() as f64 / n
    };
    let total_goals: u32 = meetings.iter().map(|(_, (h, a))| h + a).sum();

    Some(H2HStats {
        meetings: meetings.len() as u32,
        avg_goals: total_goals as f64 / n,
        over05_rate: rate(&|h, a| h + a >= 1),
        over15_rate: rate(&|h, a| h + a >= 2),
        over25_rate: rate(&|h, a| h + a >= 3),
        btts_rate: rate(&|h, a| h > 0 && a > 0),
        home_win_rate: rate(&|h, a| h > a),
        away_win_rate: rate(&|h, a| a > h),
        draw_rate: rate(&|h, a| h == a),
    })
}
