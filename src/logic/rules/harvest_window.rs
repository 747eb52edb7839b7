use super::{AdvisoryContext, Rule};
use crate::models::{CropCatalog, Recommendation, RecommendationCategory, Severity};

const HARVEST_MIN_TEMP_F: f64 = 20.0;
const HARVEST_MIN_PRICE: f64 = 0.50;

/// Suggested crops worth harvesting now: warm enough and priced above
/// $0.50 per unit.
pub struct HarvestWindowRule;

impl HarvestWindowRule {
    /// Suggestions that clear both thresholds, in suggestion order.
    pub fn ready_crops(
        suggestions: &[String],
        temperature_f: f64,
        catalog: &CropCatalog,
    ) -> Vec<String> {
        if temperature_f <= HARVEST_MIN_TEMP_F {
            return Vec::new();
        }
        suggestions
            .iter()
            .filter(|crop| {
                catalog
                    .price_of(crop)
                    .is_some_and(|price| price > HARVEST_MIN_PRICE)
            })
            .cloned()
            .collect()
    }
}

impl Rule for HarvestWindowRule {
    fn id(&self) -> &'static str {
        "harvest_window"
    }

    fn name(&self) -> &'static str {
        "Harvest window"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let record = ctx.record?;
        let weather = ctx.weather?;
        if record.suggestions.is_empty() {
            return None;
        }

        let ready = Self::ready_crops(&record.suggestions, weather.temperature_f, ctx.catalog);

        let rec = if ready.is_empty() {
            Recommendation::new(
                "harvest_window_closed",
                RecommendationCategory::Harvest,
                Severity::Info,
                "Harvest Conditions Not Optimal",
                "Conditions are not optimal for harvest of your suggested crops.",
            )
        } else {
            Recommendation::new(
                "harvest_window_open",
                RecommendationCategory::Harvest,
                Severity::Advisory,
                "Harvest Window Open",
                format!("Optimal harvest time for: {}", ready.join(", ")),
            )
            .with_action("Schedule harvest while prices and temperatures hold.")
        };

        Some(
            rec.with_explanation(
                "Combines current temperature in your city with stored market prices. \
                 Crops selling above $0.50 per unit are worth harvesting in warm weather.",
            )
            .with_data_point(
                "Current Temp",
                format!("{:.0}°F", weather.temperature_f),
                "OpenWeatherMap",
            )
            .with_data_point("City", &weather.city, "OpenWeatherMap"),
        )
    }
}
