use crate::models::{Fixture, Form, FormResult};

/// Recent form for `team_id` from its finished matches.
///
/// Matches are ordered by kickoff so the most recent result ends up last;
/// only the final five are kept. `None` when the team has no settled match.
pub fn form_from_results(team_id: u64, matches: &[Fixture]) -> Option<Form> {
    let mut settled: Vec<(&Fixture, (u32, u32))> = matches
        .iter()
        .filter(|m| m.involves(team_id))
        .filter_map(|m| m.final_score().map(|score| (m, score)))
        .collect();
    if settled.is_empty() {
        return None;
    }
    settled.sort_by_key(|(m, _)| m.utc_date);

    let results = settled.into_iter().map(|(m, (home, away))| {
        let (own, other) = if m.home_team.id == team_id {
            (home, away)
        } else {
            (away, home)
        };
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => FormResult::Win,
            std::cmp::Ordering::Equal => FormResult::Draw,
            std::cmp::Ordering::Less => FormResult::Loss,
        }
    });
    Some(Form::new(results))
}
