use super::{ScoreSheet, ScoringRule};
use crate::models::{ReferenceTables, Submission, WaterNeed, WaterSources};

pub const WATER_AMOUNT_POINTS: u32 = 10;
pub const WATER_SOURCE_POINTS: u32 = 7;

/// Crops whose water need range contains the available water (mm).
pub struct WaterAmountRule;

impl ScoringRule for WaterAmountRule {
    fn id(&self) -> &'static str {
        "water_amount"
    }

    fn name(&self) -> &'static str {
        "Water amount"
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        for row in tables
            .water_needs
            .iter()
            .filter(|row| row.accepts_level(submission.water_level_mm))
        {
            sheet.award(&row.crop, self.id(), WATER_AMOUNT_POINTS);
        }
    }
}

/// Crops suited to at least one of the farm's water sources. A row matching
/// several sources still scores once.
pub struct WaterSourceRule;

impl WaterSourceRule {
    fn suits(row: &WaterNeed, sources: &WaterSources) -> bool {
        (sources.rainfall && row.rainfall)
            || (sources.irrigated && row.irrigated)
            || (sources.groundwater && row.groundwater)
            || (sources.surface_water && row.surface_water)
    }
}

impl ScoringRule for WaterSourceRule {
    fn id(&self) -> &'static str {
        "water_source"
    }

    fn name(&self) -> &'static str {
        "Water source"
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        let sources = &submission.water_sources;
        if !sources.any() {
            return;
        }
        for row in tables
            .water_needs
            .iter()
            .filter(|row| Self::suits(row, sources))
        {
            sheet.award(&row.crop, self.id(), WATER_SOURCE_POINTS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(crop: &str, min_mm: i64, max_mm: i64, flags: [bool; 4]) -> WaterNeed {
        WaterNeed {
            crop: crop.into(),
            min_mm,
            max_mm,
            rainfall: flags[0],
            irrigated: flags[1],
            groundwater: flags[2],
            surface_water: flags[3],
        }
    }

    fn tables() -> ReferenceTables {
        ReferenceTables {
            water_needs: vec![
                row("Celery", 600, 900, [false, true, true, true]),
                row("Radishes", 200, 300, [true, false, false, false]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn water_amount_in_range() {
        let mut sheet = ScoreSheet::new();
        let submission = Submission::new(6.5).with_water(250, WaterSources::default());
        WaterAmountRule.apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.points("Radishes"), Some(10));
        assert_eq!(sheet.points("Celery"), Some(0));
    }

    #[test]
    fn several_matching_sources_count_once() {
        let sources = WaterSources {
            rainfall: false,
            irrigated: true,
            groundwater: true,
            surface_water: true,
        };
        let submission = Submission::new(6.5).with_water(0, sources);
        let mut sheet = ScoreSheet::new();
        WaterSourceRule.apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.points("Celery"), Some(7));
        assert_eq!(sheet.points("Radishes"), Some(0));
    }

    #[test]
    fn no_sources_selected_awards_nothing() {
        let submission = Submission::new(6.5).with_water(0, WaterSources::default());
        let mut sheet = ScoreSheet::new();
        WaterSourceRule.apply(&submission, &tables(), &mut sheet);
        assert_eq!(sheet.scored_count(), 0);
    }
}
