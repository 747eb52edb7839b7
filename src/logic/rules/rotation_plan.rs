use super::{AdvisoryContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Next step in the rotation cycle.
///
/// Any recorded history points to nitrogen-fixing legumes next. Without
/// history the farmer is asked for data.
pub struct RotationPlanRule;

impl Rule for RotationPlanRule {
    fn id(&self) -> &'static str {
        "rotation_plan"
    }

    fn name(&self) -> &'static str {
        "Crop rotation plan"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let history = ctx.record.map(|r| r.history_crops()).unwrap_or_default();

        if history.is_empty() {
            return Some(
                Recommendation::new(
                    "rotation_plan_missing_history",
                    RecommendationCategory::Rotation,
                    Severity::Info,
                    "No Crop History",
                    "No crop history available. Submit your farm data for crop rotation \
                     recommendations.",
                )
                .with_action("Run `cropwise submit` with --crop-history."),
            );
        }

        Some(
            Recommendation::new(
                "rotation_plan_legumes",
                RecommendationCategory::Rotation,
                Severity::Advisory,
                "Plant Legumes Next",
                "Based on your crop history, plant Legumes (Nitrogen Fixers) next.",
            )
            .with_explanation(
                "Legumes restore nitrogen drawn down by heavy feeders. Intercropping \
                 complementary crops improves pest control and nutrient use. Adjust \
                 schedules to local weather and soil test results.",
            )
            .with_data_point("Crop History", history.join(", "), "Farm submission")
            .with_action("Plan peas, beans or peanuts for the next planting.")
            .with_link("https://www.sare.org/"),
        )
    }
}
