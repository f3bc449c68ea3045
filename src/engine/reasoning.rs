/// Maximum number of reasoning lines attached to a pick.
pub const MAX_REASONS: usize = 5;

pub const H2H_SUMMARY_PREFIX: &str = "H2H";
pub const FORM_SUMMARY_PREFIX: &str = "Form:";

/// Append-only collector for the human-readable lines behind a pick.
///
/// Lines explaining the chosen market come first, followed by the signal
/// lines in the order they fired. Summary lines are appended last and the
/// whole list is cut to [`MAX_REASONS`].
#[derive(Debug, Default)]
pub struct Reasoning {
    decision: Vec<String>,
    signals: Vec<String>,
}

impl Reasoning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&mut self, line: impl Into<String>) {
        self.signals.push(line.into());
    }

    pub fn decision(&mut self, line: impl Into<String>) {
        self.decision.push(line.into());
    }

    pub fn finish(self, h2h_summary: Option<String>, form_summary: Option<String>) -> Vec<String> {
        let mut lines = self.decision;
        lines.extend(self.signals);
        push_summary(&mut lines, H2H_SUMMARY_PREFIX, h2h_summary);
        push_summary(&mut lines, FORM_SUMMARY_PREFIX, form_summary);
        lines.truncate(MAX_REASONS);
        lines
    }
}

fn push_summary(lines: &mut Vec<String>, prefix: &str, summary: Option<String>) {
    let Some(summary) = summary else { return };
    if !lines.iter().any(|l| l.starts_with(prefix)) {
        lines.push(summary);
    }
}
