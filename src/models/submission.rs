use crate::error::{CropwiseError, Result};
use crate::models::FarmRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOIL_PH: f64 = 6.5;

/// Water sources available on the farm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterSources {
    pub rainfall: bool,
    pub irrigated: bool,
    pub groundwater: bool,
    pub surface_water: bool,
}

impl WaterSources {
    pub fn any(&self) -> bool {
        self.rainfall || self.irrigated || self.groundwater || self.surface_water
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.rainfall {
            labels.push("Rainfall");
        }
        if self.irrigated {
            labels.push("Irrigated");
        }
        if self.groundwater {
            labels.push("Groundwater");
        }
        if self.surface_water {
            labels.push("Surface Water");
        }
        labels
    }
}

/// Farm parameters consumed by the crop scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub soil_ph: f64,
    pub nitrogen: i64,
    pub phosphorus: i64,
    pub potassium: i64,
    pub water_level_mm: i64,
    pub water_sources: WaterSources,
    pub sow_period: Vec<String>,
    pub harvest_period: Vec<String>,
    pub prior_crops: Vec<String>,
}

impl Submission {
    pub fn new(soil_ph: f64) -> Self {
        Self {
            soil_ph,
            nitrogen: 0,
            phosphorus: 0,
            potassium: 0,
            water_level_mm: 0,
            water_sources: WaterSources::default(),
            sow_period: Vec::new(),
            harvest_period: Vec::new(),
            prior_crops: Vec::new(),
        }
    }

    pub fn with_nutrients(mut self, nitrogen: i64, phosphorus: i64, potassium: i64) -> Self {
        self.nitrogen = nitrogen;
        self.phosphorus = phosphorus;
        self.potassium = potassium;
        self
    }

    pub fn with_water(mut self, level_mm: i64, sources: WaterSources) -> Self {
        self.water_level_mm = level_mm;
        self.water_sources = sources;
        self
    }

    pub fn with_sow_period<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.sow_period = labels.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_harvest_period<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.harvest_period = labels.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_prior_crops<S: AsRef<str>>(mut self, crops: &[S]) -> Self {
        self.prior_crops = crops.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

/// Raw form input, exactly as entered by the farmer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub soil_type: Option<String>,
    pub soil_ph: Option<String>,
    pub soil_moisture: Option<String>,
    pub temperature: Option<String>,
    pub rainfall_amount: Option<String>,
    pub crop_history: Option<String>,
    pub fertilizer_usage: Option<String>,
    pub pest_issues: Option<String>,
    pub city: Option<String>,
    pub wanted_sow: Option<String>,
    pub wanted_harvest: Option<String>,
    pub previous_plants: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub water_level: Option<String>,
    pub rainfall: Option<String>,
    pub irrigated: Option<String>,
    pub groundwater: Option<String>,
    pub surface_water: Option<String>,
}

/// A form that passed validation: what to score and what to store.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub submission: Submission,
    pub record: FarmRecord,
}

impl SubmissionForm {
    /// Parse every numeric field up front. The first bad field wins.
    pub fn validate(&self, farmer_id: &str) -> Result<ValidatedSubmission> {
        let soil_ph = parse_optional_float("soil_ph", self.soil_ph.as_deref(), DEFAULT_SOIL_PH)?;
        if !(0.0..=14.0).contains(&soil_ph) {
            return Err(CropwiseError::validation(
                "soil_ph",
                soil_ph.to_string(),
                "must be between 0 and 14",
            ));
        }
        let soil_moisture =
            parse_optional_float("soil_moisture", self.soil_moisture.as_deref(), 0.0)?;
        let temperature = parse_optional_float("temperature", self.temperature.as_deref(), 0.0)?;
        let rainfall = parse_optional_float("rainfall_amount", self.rainfall_amount.as_deref(), 0.0)?;

        let nitrogen = parse_required_int("nitrogen", self.nitrogen.as_deref())?;
        let phosphorus = parse_required_int("phosphorus", self.phosphorus.as_deref())?;
        let potassium = parse_required_int("potassium", self.potassium.as_deref())?;
        let water_level_mm = parse_required_int("water_level", self.water_level.as_deref())?;

        let water_sources = WaterSources {
            rainfall: is_yes(self.rainfall.as_deref()),
            irrigated: is_yes(self.irrigated.as_deref()),
            groundwater: is_yes(self.groundwater.as_deref()),
            surface_water: is_yes(self.surface_water.as_deref()),
        };

        let submission = Submission {
            soil_ph,
            nitrogen,
            phosphorus,
            potassium,
            water_level_mm,
            water_sources,
            sow_period: split_labels(self.wanted_sow.as_deref()),
            harvest_period: split_labels(self.wanted_harvest.as_deref()),
            prior_crops: split_labels(self.previous_plants.as_deref()),
        };

        let record = FarmRecord::new(farmer_id)
            .with_soil(non_blank(&self.soil_type), soil_ph, soil_moisture)
            .with_climate(temperature, rainfall)
            .with_crop_history(non_blank(&self.crop_history))
            .with_notes(non_blank(&self.fertilizer_usage), non_blank(&self.pest_issues))
            .with_city(non_blank(&self.city));

        Ok(ValidatedSubmission { submission, record })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn parse_optional_float(
    field: &'static str,
    raw: Option<&str>,
    default: f64,
) -> Result<f64> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => parse_float(field, s),
    }
}

pub(crate) fn parse_float(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CropwiseError::validation(field, raw, "expected a number"))?;
    if !value.is_finite() {
        return Err(CropwiseError::validation(field, raw, "expected a finite number"));
    }
    Ok(value)
}

fn parse_required_int(field: &'static str, raw: Option<&str>) -> Result<i64> {
    let s = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CropwiseError::validation(field, "", "a whole number is required"))?;
    s.parse::<i64>()
        .map_err(|_| CropwiseError::validation(field, s, "expected a whole number"))
}

fn is_yes(raw: Option<&str>) -> bool {
    raw.map(|s| s.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

/// Split a comma separated list, dropping blanks.
pub fn split_labels(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> SubmissionForm {
        SubmissionForm {
            soil_type: Some("Loamy".into()),
            soil_ph: Some("6.4".into()),
            soil_moisture: Some("25".into()),
            temperature: Some("68".into()),
            rainfall_amount: Some("40".into()),
            crop_history: Some("Tomato, Peppers".into()),
            city: Some("Chester Springs".into()),
            wanted_sow: Some("April, May".into()),
            wanted_harvest: Some("August".into()),
            previous_plants: Some("Tomato, Peppers".into()),
            nitrogen: Some("40".into()),
            phosphorus: Some("30".into()),
            potassium: Some("50".into()),
            water_level: Some("500".into()),
            rainfall: Some("Yes".into()),
            irrigated: Some("no".into()),
            groundwater: Some("YES".into()),
            surface_water: None,
            ..Default::default()
        }
    }

    #[test]
    fn validate_complete_form() {
        let validated = complete_form().validate("farmer-1").unwrap();
        let s = &validated.submission;
        assert!((s.soil_ph - 6.4).abs() < 1e-9);
        assert_eq!((s.nitrogen, s.phosphorus, s.potassium), (40, 30, 50));
        assert_eq!(s.water_level_mm, 500);
        assert!(s.water_sources.rainfall);
        assert!(!s.water_sources.irrigated);
        assert!(s.water_sources.groundwater);
        assert!(!s.water_sources.surface_water);
        assert_eq!(s.sow_period, vec!["April", "May"]);
        assert_eq!(s.harvest_period, vec!["August"]);
        assert_eq!(s.prior_crops, vec!["Tomato", "Peppers"]);

        let r = &validated.record;
        assert_eq!(r.farmer_id, "farmer-1");
        assert_eq!(r.soil_type.as_deref(), Some("Loamy"));
        assert_eq!(r.city.as_deref(), Some("Chester Springs"));
        assert_eq!(r.temperature, Some(68.0));
    }

    #[test]
    fn blank_optional_numbers_use_defaults() {
        let form = SubmissionForm {
            soil_ph: Some("  ".into()),
            soil_moisture: None,
            ..complete_form()
        };
        let validated = form.validate("f").unwrap();
        assert!((validated.submission.soil_ph - DEFAULT_SOIL_PH).abs() < 1e-9);
        assert_eq!(validated.record.soil_moisture, Some(0.0));
    }

    #[test]
    fn non_numeric_ph_is_rejected_with_field_name() {
        let form = SubmissionForm {
            soil_ph: Some("acidic".into()),
            ..complete_form()
        };
        let err = form.validate("f").unwrap_err();
        assert_eq!(err.field(), Some("soil_ph"));
    }

    #[test]
    fn out_of_range_ph_is_rejected() {
        let form = SubmissionForm {
            soil_ph: Some("15".into()),
            ..complete_form()
        };
        assert_eq!(form.validate("f").unwrap_err().field(), Some("soil_ph"));
    }

    #[test]
    fn nan_is_not_a_number() {
        let form = SubmissionForm {
            temperature: Some("NaN".into()),
            ..complete_form()
        };
        assert_eq!(form.validate("f").unwrap_err().field(), Some("temperature"));
    }

    #[test]
    fn missing_nutrient_is_rejected() {
        let form = SubmissionForm {
            phosphorus: None,
            ..complete_form()
        };
        assert_eq!(form.validate("f").unwrap_err().field(), Some("phosphorus"));
    }

    #[test]
    fn fractional_water_level_is_rejected() {
        let form = SubmissionForm {
            water_level: Some("12.5".into()),
            ..complete_form()
        };
        assert_eq!(form.validate("f").unwrap_err().field(), Some("water_level"));
    }

    #[test]
    fn split_labels_drops_blanks() {
        assert_eq!(split_labels(Some("Spring,, Fall ,")), vec!["Spring", "Fall"]);
        assert!(split_labels(Some("")).is_empty());
        assert!(split_labels(None).is_empty());
    }

    #[test]
    fn water_source_labels() {
        let sources = WaterSources {
            rainfall: true,
            surface_water: true,
            ..Default::default()
        };
        assert!(sources.any());
        assert_eq!(sources.labels(), vec!["Rainfall", "Surface Water"]);
        assert!(!WaterSources::default().any());
    }
}
