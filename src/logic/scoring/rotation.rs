use super::{ScoreSheet, ScoringRule};
use crate::models::{ReferenceTables, RotationYear, Submission};

pub const ROTATION_POINTS: u32 = 10;

/// Rotation bonus.
///
/// Every prior crop is placed in the first rotation year that lists it. The
/// year holding the most prior crops wins, ties going to the year listed
/// first, and every crop planted that year gets the bonus. Prior crops no
/// year lists add to no tally, so history with no listed crop at all ties
/// every year at zero and selects the first one.
pub struct RotationRule;

impl RotationRule {
    pub fn select_year<'a>(
        submission: &Submission,
        tables: &'a ReferenceTables,
    ) -> Option<&'a RotationYear> {
        if submission.prior_crops.is_empty() || tables.rotation.is_empty() {
            return None;
        }

        let mut tallies = vec![0usize; tables.rotation.len()];
        for crop in &submission.prior_crops {
            match tables.rotation_index_of(crop) {
                Some(i) => tallies[i] += 1,
                None => tracing::debug!(crop = %crop, "Prior crop not in rotation cycle"),
            }
        }

        let mut best = 0;
        for (i, &count) in tallies.iter().enumerate() {
            if count > tallies[best] {
                best = i;
            }
        }

        tables.rotation.get(best)
    }
}

impl ScoringRule for RotationRule {
    fn id(&self) -> &'static str {
        "rotation"
    }

    fn name(&self) -> &'static str {
        "Crop rotation"
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        let Some(year) = Self::select_year(submission, tables) else {
            return;
        };
        tracing::debug!(year = %year.year, "Rotation year selected");
        for crop in &year.crops {
            sheet.award(crop, self.id(), ROTATION_POINTS);
        }
    }
}
