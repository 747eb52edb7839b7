use super::{AdvisoryContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, Severity};

/// Extra watering when the farm is dry and the ground is not frozen.
///
/// Conditions:
/// - Soil moisture below 90%
/// - Current temperature above 20 degrees Fahrenheit, a frost cutoff
///   rather than a warm-day threshold
/// - Reported rainfall below 10
pub struct IrrigationRule;

const MOISTURE_CEILING: f64 = 90.0;
const FROST_CUTOFF_F: f64 = 20.0;
const LOW_RAINFALL: f64 = 10.0;

impl Rule for IrrigationRule {
    fn id(&self) -> &'static str {
        "irrigation"
    }

    fn name(&self) -> &'static str {
        "Irrigation"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let record = ctx.record?;
        let weather = ctx.weather?;

        let mut notes = Vec::new();
        if let Some(moisture) = record.soil_moisture {
            if moisture < MOISTURE_CEILING && weather.temperature_f > FROST_CUTOFF_F {
                notes.push("Soil moisture is low; consider extra irrigation.");
            }
        }
        if let Some(rainfall) = record.rainfall {
            if rainfall < LOW_RAINFALL {
                notes.push("Low rainfall detected; supplemental watering might be needed.");
            }
        }
        if notes.is_empty() {
            return None;
        }

        let mut rec = Recommendation::new(
            "irrigation_needed",
            RecommendationCategory::Irrigation,
            Severity::Advisory,
            "Irrigation Recommended",
            notes.join(" "),
        )
        .with_data_point(
            "Current Temp",
            format!("{:.0}°F", weather.temperature_f),
            "OpenWeatherMap",
        )
        .with_action("Water early in the day to limit evaporation.");

        if let Some(moisture) = record.soil_moisture {
            rec = rec.with_data_point("Soil Moisture", format!("{:.0}%", moisture), "Farm submission");
        }
        if let Some(rainfall) = record.rainfall {
            rec = rec.with_data_point("Rainfall", format!("{:.1}", rainfall), "Farm submission");
        }
        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCatalog, CurrentWeather, FarmRecord};

    fn evaluate(moisture: f64, rainfall: f64, temp: f64) -> Option<Recommendation> {
        let catalog = CropCatalog::default();
        let record = FarmRecord::new("f")
            .with_soil(None, 6.5, moisture)
            .with_climate(70.0, rainfall);
        let weather = CurrentWeather::new("York", temp);
        let ctx = AdvisoryContext::new(&catalog)
            .with_record(Some(&record))
            .with_weather(Some(&weather));
        IrrigationRule.evaluate(&ctx)
    }

    #[test]
    fn warm_and_dry_gets_both_notes() {
        let rec = evaluate(40.0, 2.0, 80.0).unwrap();
        assert!(rec.description.contains("extra irrigation"));
        assert!(rec.description.contains("supplemental watering"));
    }

    #[test]
    fn cold_weather_with_rain_needs_nothing() {
        assert!(evaluate(40.0, 25.0, 15.0).is_none());
    }

    #[test]
    fn moisture_note_applies_above_frost_cutoff() {
        let rec = evaluate(40.0, 25.0, 35.0).unwrap();
        assert!(rec.description.contains("extra irrigation"));
        assert!(evaluate(40.0, 25.0, 20.0).is_none());
    }

    #[test]
    fn low_rainfall_alone_triggers() {
        let rec = evaluate(95.0, 5.0, 80.0).unwrap();
        assert!(!rec.description.contains("extra irrigation"));
        assert!(rec.description.contains("supplemental watering"));
    }

    #[test]
    fn requires_weather() {
        let catalog = CropCatalog::default();
        let record = FarmRecord::new("f").with_soil(None, 6.5, 10.0);
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        assert!(IrrigationRule.evaluate(&ctx).is_none());
    }
}
