use super::{ScoreSheet, ScoringRule};
use crate::models::{ReferenceTables, Submission};

pub const SOIL_PH_POINTS: u32 = 8;

/// Crops whose tolerated pH range contains the soil pH.
pub struct SoilPhRule;

impl ScoringRule for SoilPhRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH tolerance"
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        for row in tables
            .ph_tolerance
            .iter()
            .filter(|row| row.accepts(submission.soil_ph))
        {
            sheet.award(&row.crop, self.id(), SOIL_PH_POINTS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhTolerance;

    fn peas_and_fava() -> ReferenceTables {
        ReferenceTables {
            ph_tolerance: vec![
                PhTolerance {
                    crop: "Peas".into(),
                    low: 6.0,
                    high: 7.0,
                },
                PhTolerance {
                    crop: "Fava Beans".into(),
                    low: 7.1,
                    high: 8.0,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn matching_range_awards_eight() {
        let mut sheet = ScoreSheet::new();
        SoilPhRule.apply(&Submission::new(6.5), &peas_and_fava(), &mut sheet);
        assert_eq!(sheet.points("Peas"), Some(8));
        assert_eq!(sheet.points("Fava Beans"), Some(0));
    }

    #[test]
    fn out_of_range_awards_nothing() {
        let mut sheet = ScoreSheet::new();
        SoilPhRule.apply(&Submission::new(4.2), &peas_and_fava(), &mut sheet);
        assert_eq!(sheet.scored_count(), 0);
    }

    #[test]
    fn crops_outside_universe_are_skipped() {
        let tables = ReferenceTables {
            ph_tolerance: vec![PhTolerance {
                crop: "Wheat".into(),
                low: 5.0,
                high: 8.0,
            }],
            ..Default::default()
        };
        let mut sheet = ScoreSheet::new();
        SoilPhRule.apply(&Submission::new(6.5), &tables, &mut sheet);
        assert_eq!(sheet.scored_count(), 0);
    }
}
