use super::{AdvisoryContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Target soil moisture (%)
pub const MOISTURE_OPTIMAL: f64 = 30.0;

/// Soil moisture compared to a single optimum.
pub struct SoilMoistureRule;

impl Rule for SoilMoistureRule {
    fn id(&self) -> &'static str {
        "soil_moisture"
    }

    fn name(&self) -> &'static str {
        "Soil moisture"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let moisture = ctx.record?.soil_moisture?;

        let rec = if moisture < MOISTURE_OPTIMAL {
            Recommendation::new(
                "soil_moisture_low",
                RecommendationCategory::SoilHealth,
                Severity::Advisory,
                "Soil Moisture Is Low",
                format!("Soil moisture of {:.0}% is below {:.0}%.", moisture, MOISTURE_OPTIMAL),
            )
            .with_action("Increase irrigation or plant cover crops to hold moisture.")
        } else if moisture > MOISTURE_OPTIMAL {
            Recommendation::new(
                "soil_moisture_high",
                RecommendationCategory::SoilHealth,
                Severity::Advisory,
                "Soil Moisture Is High",
                format!("Soil moisture of {:.0}% is above {:.0}%.", moisture, MOISTURE_OPTIMAL),
            )
            .with_action("Consider improved drainage.")
        } else {
            Recommendation::new(
                "soil_moisture_optimal",
                RecommendationCategory::SoilHealth,
                Severity::Info,
                "Soil Moisture Is Optimal",
                "Soil moisture is right at the target level.",
            )
        };

        Some(
            rec.with_explanation(
                "Crop rotation and cover crops build organic matter, which improves \
                 both water holding in dry soils and drainage in wet ones.",
            )
            .with_data_point("Soil Moisture", format!("{:.0}%", moisture), "Farm submission")
            .with_link("https://www.sare.org/"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCatalog, FarmRecord};

    fn evaluate(moisture: f64) -> Recommendation {
        let catalog = CropCatalog::default();
        let record = FarmRecord::new("f").with_soil(None, 6.5, moisture);
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        SoilMoistureRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn moisture_levels() {
        assert_eq!(evaluate(12.0).id, "soil_moisture_low");
        assert_eq!(evaluate(45.0).id, "soil_moisture_high");
        let optimal = evaluate(30.0);
        assert_eq!(optimal.id, "soil_moisture_optimal");
        assert_eq!(optimal.severity, Severity::Info);
    }
}
