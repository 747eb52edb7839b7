use super::{
    calendar::CalendarRule,
    nutrients::{Nutrient, NutrientRule},
    rotation::RotationRule,
    soil_ph::SoilPhRule,
    water::{WaterAmountRule, WaterSourceRule},
    ScoreSheet, ScoringRule,
};
use crate::models::{ReferenceTables, Submission};
use std::sync::Arc;

/// Ranks the crop universe for a submission.
///
/// Holds a shared, read-only snapshot of the reference tables; a scorer can
/// be cloned or shared across threads and every call builds its own
/// `ScoreSheet`.
#[derive(Clone)]
pub struct CropScorer {
    tables: Arc<ReferenceTables>,
    rules: Arc<Vec<Box<dyn ScoringRule>>>,
}

impl CropScorer {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        let rules: Vec<Box<dyn ScoringRule>> = vec![
            Box::new(SoilPhRule),
            Box::new(NutrientRule::new(Nutrient::Nitrogen)),
            Box::new(NutrientRule::new(Nutrient::Phosphorus)),
            Box::new(NutrientRule::new(Nutrient::Potassium)),
            Box::new(WaterAmountRule),
            Box::new(WaterSourceRule),
            Box::new(CalendarRule::sowing()),
            Box::new(CalendarRule::harvest()),
            Box::new(RotationRule),
        ];

        Self {
            tables,
            rules: Arc::new(rules),
        }
    }

    pub fn score(&self, submission: &Submission) -> ScoreSheet {
        let mut sheet = ScoreSheet::new();
        for rule in self.rules.iter() {
            rule.apply(submission, &self.tables, &mut sheet);
            tracing::debug!(
                rule = rule.id(),
                scored = sheet.scored_count(),
                "Applied scoring rule"
            );
        }
        sheet
    }

    /// Up to seven crop names, best first.
    pub fn recommend(&self, submission: &Submission) -> Vec<String> {
        self.score(submission).suggestions()
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}
