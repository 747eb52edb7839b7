use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored farm submission and the crops suggested for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmRecord {
    pub id: Option<i64>,
    pub farmer_id: String,
    pub soil_type: Option<String>,
    pub soil_ph: Option<f64>,
    pub soil_moisture: Option<f64>,
    /// Degrees Fahrenheit
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub crop_history: Option<String>,
    pub fertilizer_usage: Option<String>,
    pub pest_issues: Option<String>,
    pub city: Option<String>,
    pub suggestions: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl FarmRecord {
    pub fn new(farmer_id: impl Into<String>) -> Self {
        Self {
            id: None,
            farmer_id: farmer_id.into(),
            soil_type: None,
            soil_ph: None,
            soil_moisture: None,
            temperature: None,
            rainfall: None,
            crop_history: None,
            fertilizer_usage: None,
            pest_issues: None,
            city: None,
            suggestions: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    pub fn with_soil(mut self, soil_type: Option<String>, ph: f64, moisture: f64) -> Self {
        self.soil_type = soil_type;
        self.soil_ph = Some(ph);
        self.soil_moisture = Some(moisture);
        self
    }

    pub fn with_climate(mut self, temperature: f64, rainfall: f64) -> Self {
        self.temperature = Some(temperature);
        self.rainfall = Some(rainfall);
        self
    }

    pub fn with_crop_history(mut self, history: Option<String>) -> Self {
        self.crop_history = history;
        self
    }

    pub fn with_notes(
        mut self,
        fertilizer_usage: Option<String>,
        pest_issues: Option<String>,
    ) -> Self {
        self.fertilizer_usage = fertilizer_usage;
        self.pest_issues = pest_issues;
        self
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = city;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Crops from the free-text history, trimmed, in entry order.
    pub fn history_crops(&self) -> Vec<String> {
        crate::models::split_labels(self.crop_history.as_deref())
    }

    pub fn greeting(&self) -> String {
        match self.city.as_deref() {
            Some(city) => format!("Hello farmer from {}!", city),
            None => "Hello Farmer!".to_string(),
        }
    }

    /// Suggestions as stored in the database: a JSON array, since several
    /// crop names contain commas.
    pub fn suggestions_column(&self) -> serde_json::Result<Option<String>> {
        if self.suggestions.is_empty() {
            Ok(None)
        } else {
            serde_json::to_string(&self.suggestions).map(Some)
        }
    }
}
