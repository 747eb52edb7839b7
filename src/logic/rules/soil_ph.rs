use super::{AdvisoryContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, Severity};

pub const PH_OPTIMAL_LOW: f64 = 6.0;
pub const PH_OPTIMAL_HIGH: f64 = 7.0;

/// Soil pH advice against the 6.0-7.0 band most vegetables prefer.
///
/// - Below 6.0: apply lime (Warning)
/// - Above 7.0: add elemental sulfur or organic matter (Warning)
/// - Otherwise optimal (Info)
pub struct SoilPhAdviceRule;

impl Rule for SoilPhAdviceRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let ph = ctx.record?.soil_ph?;

        let rec = if ph < PH_OPTIMAL_LOW {
            Recommendation::new(
                "soil_ph_low",
                RecommendationCategory::SoilHealth,
                Severity::Warning,
                "Soil pH Is Low",
                format!("Soil pH of {:.1} is below {:.1}.", ph, PH_OPTIMAL_LOW),
            )
            .with_action("Consider applying agricultural lime before the next planting.")
            .with_link("https://www.nrcs.usda.gov/wps/portal/nrcs/main/soils/health/")
        } else if ph > PH_OPTIMAL_HIGH {
            Recommendation::new(
                "soil_ph_high",
                RecommendationCategory::SoilHealth,
                Severity::Warning,
                "Soil pH Is High",
                format!("Soil pH of {:.1} is above {:.1}.", ph, PH_OPTIMAL_HIGH),
            )
            .with_action("Add elemental sulfur or organic matter.")
        } else {
            Recommendation::new(
                "soil_ph_optimal",
                RecommendationCategory::SoilHealth,
                Severity::Info,
                "Soil pH Is Optimal",
                format!("Soil pH of {:.1} is within the preferred range.", ph),
            )
        };

        Some(
            rec.with_explanation(
                "Most vegetables take up nutrients best between pH 6.0 and 7.0. \
                 Regularly adding compost improves soil structure and buffers pH swings.",
            )
            .with_data_point("Soil pH", format!("{:.1}", ph), "Farm submission")
            .with_data_point(
                "Preferred Range",
                format!("{:.1}-{:.1}", PH_OPTIMAL_LOW, PH_OPTIMAL_HIGH),
                "Reference",
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCatalog, FarmRecord};

    fn evaluate(ph: f64) -> Option<Recommendation> {
        let catalog = CropCatalog::default();
        let record = FarmRecord::new("f").with_soil(None, ph, 30.0);
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        SoilPhAdviceRule.evaluate(&ctx)
    }

    #[test]
    fn low_ph_suggests_lime() {
        let rec = evaluate(5.5).unwrap();
        assert_eq!(rec.id, "soil_ph_low");
        assert_eq!(rec.severity, Severity::Warning);
        assert!(rec.suggested_action.unwrap().contains("lime"));
        assert!(rec.link.is_some());
    }

    #[test]
    fn high_ph_suggests_sulfur() {
        let rec = evaluate(7.4).unwrap();
        assert_eq!(rec.id, "soil_ph_high");
        assert!(rec.suggested_action.unwrap().contains("sulfur"));
    }

    #[test]
    fn band_edges_are_optimal() {
        assert_eq!(evaluate(6.0).unwrap().id, "soil_ph_optimal");
        assert_eq!(evaluate(7.0).unwrap().id, "soil_ph_optimal");
    }

    #[test]
    fn no_record_no_advice() {
        let catalog = CropCatalog::default();
        assert!(SoilPhAdviceRule
            .evaluate(&AdvisoryContext::new(&catalog))
            .is_none());
    }
}
