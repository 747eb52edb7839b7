use super::{ScoreSheet, ScoringRule};
use crate::models::{NutrientTolerance, ReferenceTables, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    pub fn points(&self) -> u32 {
        match self {
            Nutrient::Nitrogen => 10,
            Nutrient::Phosphorus => 9,
            Nutrient::Potassium => 9,
        }
    }

    fn level(&self, submission: &Submission) -> i64 {
        match self {
            Nutrient::Nitrogen => submission.nitrogen,
            Nutrient::Phosphorus => submission.phosphorus,
            Nutrient::Potassium => submission.potassium,
        }
    }

    fn accepts(&self, row: &NutrientTolerance, level: i64) -> bool {
        match self {
            Nutrient::Nitrogen => row.accepts_nitrogen(level),
            Nutrient::Phosphorus => row.accepts_phosphorus(level),
            Nutrient::Potassium => row.accepts_potassium(level),
        }
    }
}

/// One nutrient range check.
///
/// Nitrogen, phosphorus and potassium are separate rules: a crop whose three
/// ranges all match collects all three awards.
pub struct NutrientRule {
    nutrient: Nutrient,
}

impl NutrientRule {
    pub fn new(nutrient: Nutrient) -> Self {
        Self { nutrient }
    }
}

impl ScoringRule for NutrientRule {
    fn id(&self) -> &'static str {
        match self.nutrient {
            Nutrient::Nitrogen => "nitrogen",
            Nutrient::Phosphorus => "phosphorus",
            Nutrient::Potassium => "potassium",
        }
    }

    fn name(&self) -> &'static str {
        match self.nutrient {
            Nutrient::Nitrogen => "Nitrogen range",
            Nutrient::Phosphorus => "Phosphorus range",
            Nutrient::Potassium => "Potassium range",
        }
    }

    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet) {
        let level = self.nutrient.level(submission);
        for row in tables
            .nutrients
            .iter()
            .filter(|row| self.nutrient.accepts(row, level))
        {
            sheet.award(&row.crop, self.id(), self.nutrient.points());
        }
    }
}
