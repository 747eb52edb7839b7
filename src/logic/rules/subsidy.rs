use super::{AdvisoryContext, Rule};
use crate::models::{FarmRecord, Recommendation, RecommendationCategory, Severity};

/// Funding programs worth a look given what the farmer reported.
pub struct SubsidyRule;

impl SubsidyRule {
    /// One line per reported detail that maps to a program.
    pub fn messages(record: &FarmRecord) -> Vec<String> {
        let mut msgs = Vec::new();
        if let Some(city) = &record.city {
            msgs.push(format!("Explore loan programs available in {}.", city));
        }
        if let Some(soil) = &record.soil_type {
            msgs.push(format!(
                "Your {} soil may qualify for cover crop grants.",
                soil
            ));
        }
        if let Some(crop) = record.history_crops().first() {
            msgs.push(format!(
                "Since you grow {}, you might be eligible for specialty crop aid.",
                crop
            ));
        }
        if record.fertilizer_usage.is_some() {
            msgs.push("Fertilizer usage noted; check out EQIP for funding.".to_string());
        }
        if record.pest_issues.is_some() {
            msgs.push("Pest issues reported; explore pest control subsidies.".to_string());
        }
        if record.rainfall.map_or(true, |r| r == 0.0) {
            msgs.push(
                "If your farm is mainly rain-fed, consider drought assistance.".to_string(),
            );
        }
        msgs
    }
}

impl Rule for SubsidyRule {
    fn id(&self) -> &'static str {
        "subsidy"
    }

    fn name(&self) -> &'static str {
        "Subsidy programs"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let record = ctx.record?;
        let msgs = Self::messages(record);
        if msgs.is_empty() {
            return None;
        }

        let mut rec = Recommendation::new(
            "subsidy_programs",
            RecommendationCategory::Subsidy,
            Severity::Info,
            "Funding Programs to Explore",
            msgs.join(" "),
        )
        .with_explanation(
            "The PA Department of Agriculture's Agricultural Business Development Center \
             offers loans, grants, technical assistance and disaster support. The USDA \
             Farm Service Agency runs federal programs such as EQIP.",
        )
        .with_link("https://www.fsa.usda.gov/");

        if let Some(city) = &record.city {
            rec = rec.with_data_point("City", city, "Farm submission");
        }
        if let Some(soil) = &record.soil_type {
            rec = rec.with_data_point("Soil Type", soil, "Farm submission");
        }
        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropCatalog;

    #[test]
    fn messages_follow_reported_details() {
        let record = FarmRecord::new("f")
            .with_soil(Some("Clay".into()), 6.5, 30.0)
            .with_climate(70.0, 12.0)
            .with_crop_history(Some("Garlic, Peas".into()))
            .with_notes(Some("10-10-10 monthly".into()), None)
            .with_city(Some("Lancaster".into()));

        let msgs = SubsidyRule::messages(&record);
        assert_eq!(
            msgs,
            vec![
                "Explore loan programs available in Lancaster.",
                "Your Clay soil may qualify for cover crop grants.",
                "Since you grow Garlic, you might be eligible for specialty crop aid.",
                "Fertilizer usage noted; check out EQIP for funding.",
            ]
        );
    }

    #[test]
    fn zero_rainfall_suggests_drought_assistance() {
        let record = FarmRecord::new("f").with_climate(70.0, 0.0);
        let msgs = SubsidyRule::messages(&record);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("drought assistance"));
    }

    #[test]
    fn rule_needs_a_record() {
        let catalog = CropCatalog::default();
        let ctx = AdvisoryContext::new(&catalog);
        assert!(SubsidyRule.evaluate(&ctx).is_none());

        let record = FarmRecord::new("f").with_city(Some("York".into()));
        let ctx = ctx.with_record(Some(&record));
        let rec = SubsidyRule.evaluate(&ctx).unwrap();
        assert!(rec.description.contains("York"));
    }
}
