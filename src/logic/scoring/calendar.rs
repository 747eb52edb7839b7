use super::{ScoreSheet, ScoringRule};
use crate::models::{CalendarEntry, ReferenceTables, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Sowing,
    Harvest,
}

/// Calendar rows whose sowing (or harvest) text mentions one of the
/// farmer's desired labels.
///
/// Each matching row is awarded once however many labels it matches. A crop
/// with two matching rows, such as a spring and a fall sowing, scores twice.
pub struct CalendarRule {
    window: Window,
}

impl CalendarRule {
    pub fn sowing() -> Self {
        Self {
            window: Window::Sowing,
        }
    }

    pub fn harvest() -> Self {
        Self {
            window: Window::Harvest,
        }
    }

    pub fn points(&self) -> u32 {
        match self.window {
            Window::Sowing => 8,
            Window::Harvest => 7,
        }
    }

    fn text<'a>(&self, row: &'a CalendarEntry) -> &'a str {
        match self.window {
            Window::Sowing => &row.sowing_time,
            Window::Harvest => &row.harvest_time,
        }
    }

    fn wanted<'a>(&self, submission: &'a Submission) -> &'a [String] {
        match self.window {
            Window::Sowing => &submission.sow_period,
            Window::Harvest => &submission.harvest_period,
        }
    }
}

impl ScoringRule for CalendarRule {
    fn id(&self) -> &'static str {
        match self.window {
            Window::Sowing => "sowing_window",
            Window::Harvest => "harvest_window",
        }
    }

    fn name(&self) -> &'static str {
        match self.window {
            Window::Sowing => "Sowing window",
            Window::Harvest => "Harvest window",
        }
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        let labels: Vec<String> = self
            .wanted(submission)
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return;
        }

        for row in &tables.calendar {
            let text = self.text(row).to_lowercase();
            if labels.iter().any(|label| text.contains(label.as_str())) {
                sheet.award(&row.crop, self.id(), self.points());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(crop: &str, sowing: &str, harvest: &str) -> CalendarEntry {
        CalendarEntry {
            crop: crop.into(),
            sowing_time: sowing.into(),
            harvest_time: harvest.into(),
        }
    }

    fn tables() -> ReferenceTables {
        ReferenceTables {
            calendar: vec![
                entry("Lettuce", "Early Spring (March, April)", "Late Spring (May, June)"),
                entry("Lettuce", "Fall (September)", "Late Fall (November)"),
                entry("Tomato", "Late Spring (May, June)", "Summer (July, August)"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn two_labels_matching_one_row_score_once() {
        let submission = Submission::new(6.5).with_sow_period(&["March", "April"]);
        let mut sheet = ScoreSheet::new();
        CalendarRule::sowing().apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.points("Lettuce"), Some(8));
        assert_eq!(sheet.points("Tomato"), Some(0));
    }

    #[test]
    fn distinct_matching_rows_each_score() {
        let submission = Submission::new(6.5).with_sow_period(&["march", "september"]);
        let mut sheet = ScoreSheet::new();
        CalendarRule::sowing().apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.points("Lettuce"), Some(16));
    }

    #[test]
    fn harvest_matches_are_case_insensitive() {
        let submission = Submission::new(6.5).with_harvest_period(&["AUGUST"]);
        let mut sheet = ScoreSheet::new();
        CalendarRule::harvest().apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.points("Tomato"), Some(7));
        assert_eq!(sheet.points("Lettuce"), Some(0));
    }

    #[test]
    fn unmatched_or_blank_labels_award_nothing() {
        let submission = Submission::new(6.5).with_sow_period(&["Monsoon", "  "]);
        let mut sheet = ScoreSheet::new();
        CalendarRule::sowing().apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.scored_count(), 0);
    }
}
