use crate::error::{CropwiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_TABLES: &str = include_str!("../../data/reference_tables.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhTolerance {
    pub crop: String,
    pub low: f64,
    pub high: f64,
}

impl PhTolerance {
    pub fn accepts(&self, ph: f64) -> bool {
        self.low <= ph && ph <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientTolerance {
    pub crop: String,
    pub nitrogen_low: i64,
    pub nitrogen_high: i64,
    pub phosphorus_low: i64,
    pub phosphorus_high: i64,
    pub potassium_low: i64,
    pub potassium_high: i64,
}

impl NutrientTolerance {
    pub fn accepts_nitrogen(&self, level: i64) -> bool {
        (self.nitrogen_low..=self.nitrogen_high).contains(&level)
    }

    pub fn accepts_phosphorus(&self, level: i64) -> bool {
        (self.phosphorus_low..=self.phosphorus_high).contains(&level)
    }

    pub fn accepts_potassium(&self, level: i64) -> bool {
        (self.potassium_low..=self.potassium_high).contains(&level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterNeed {
    pub crop: String,
    pub min_mm: i64,
    pub max_mm: i64,
    #[serde(default)]
    pub rainfall: bool,
    #[serde(default)]
    pub irrigated: bool,
    #[serde(default)]
    pub groundwater: bool,
    #[serde(default)]
    pub surface_water: bool,
}

impl WaterNeed {
    pub fn accepts_level(&self, level_mm: i64) -> bool {
        (self.min_mm..=self.max_mm).contains(&level_mm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub crop: String,
    pub sowing_time: String,
    pub harvest_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationYear {
    pub year: String,
    #[serde(default)]
    pub family: Option<String>,
    pub crops: Vec<String>,
}

impl RotationYear {
    /// Whether any crop listed for this year contains `crop`, ignoring case.
    /// Each listed crop is checked on its own, never the joined list, so
    /// `"Peas, Lima"` matches nothing.
    pub fn lists(&self, crop: &str) -> bool {
        let needle = crop.to_lowercase();
        self.crops.iter().any(|c| c.to_lowercase().contains(&needle))
    }
}

/// The five lookup tables behind crop scoring. Loaded once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    #[serde(default)]
    pub ph_tolerance: Vec<PhTolerance>,
    #[serde(default)]
    pub nutrients: Vec<NutrientTolerance>,
    #[serde(default)]
    pub water_needs: Vec<WaterNeed>,
    #[serde(default)]
    pub calendar: Vec<CalendarEntry>,
    #[serde(default)]
    pub rotation: Vec<RotationYear>,
}

impl ReferenceTables {
    /// Tables shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_TABLES)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CropwiseError::Config(format!(
                "Failed to read reference tables {:?}: {}",
                path, e
            ))
        })?;
        let tables = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            ph_rows = tables.ph_tolerance.len(),
            calendar_rows = tables.calendar.len(),
            "Loaded reference tables"
        );
        Ok(tables)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let tables: ReferenceTables = serde_yaml::from_str(content)?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<()> {
        for row in &self.ph_tolerance {
            if !(row.low <= row.high) {
                return Err(CropwiseError::InvalidData(format!(
                    "pH range for {} is inverted ({} > {})",
                    row.crop, row.low, row.high
                )));
            }
        }
        for row in &self.nutrients {
            let ranges = [
                ("nitrogen", row.nitrogen_low, row.nitrogen_high),
                ("phosphorus", row.phosphorus_low, row.phosphorus_high),
                ("potassium", row.potassium_low, row.potassium_high),
            ];
            for (nutrient, low, high) in ranges {
                if low > high {
                    return Err(CropwiseError::InvalidData(format!(
                        "{} range for {} is inverted ({} > {})",
                        nutrient, row.crop, low, high
                    )));
                }
            }
        }
        for row in &self.water_needs {
            if row.min_mm > row.max_mm {
                return Err(CropwiseError::InvalidData(format!(
                    "Water range for {} is inverted ({} > {})",
                    row.crop, row.min_mm, row.max_mm
                )));
            }
        }
        let mut years = HashSet::new();
        for row in &self.rotation {
            if !years.insert(row.year.as_str()) {
                return Err(CropwiseError::InvalidData(format!(
                    "Rotation year '{}' is listed twice",
                    row.year
                )));
            }
        }
        Ok(())
    }

    /// Index of the first rotation year that lists `crop`.
    pub fn rotation_index_of(&self, crop: &str) -> Option<usize> {
        self.rotation.iter().position(|year| year.lists(crop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CROP_UNIVERSE;

    #[test]
    fn embedded_tables_cover_the_universe() {
        let tables = ReferenceTables::embedded().unwrap();
        for crop in CROP_UNIVERSE {
            assert!(
                tables.ph_tolerance.iter().any(|r| r.crop == crop),
                "missing pH row for {}",
                crop
            );
            assert!(tables.nutrients.iter().any(|r| r.crop == crop));
            assert!(tables.water_needs.iter().any(|r| r.crop == crop));
            assert!(tables.calendar.iter().any(|r| r.crop == crop));
        }
        assert_eq!(tables.rotation.len(), 4);
    }

    #[test]
    fn rotation_lookup_is_case_insensitive_substring() {
        let tables = ReferenceTables::embedded().unwrap();
        assert_eq!(tables.rotation_index_of("peas"), Some(0));
        assert_eq!(tables.rotation_index_of("Cabbage"), Some(1));
        assert_eq!(tables.rotation_index_of("tomato"), Some(2));
        assert_eq!(tables.rotation_index_of("Potatoes"), Some(3));
        assert_eq!(tables.rotation_index_of("Wheat"), None);
        assert!(!tables.rotation[0].lists("Peas, Lima Beans"));
    }

    #[test]
    fn inverted_ph_range_is_rejected() {
        let yaml = r#"
ph_tolerance:
  - { crop: "Peas", low: 7.5, high: 6.0 }
"#;
        let err = ReferenceTables::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CropwiseError::InvalidData(_)));
    }

    #[test]
    fn duplicate_rotation_year_is_rejected() {
        let yaml = r#"
rotation:
  - { year: "Year 1", crops: ["Peas"] }
  - { year: "Year 1", crops: ["Beans"] }
"#;
        assert!(ReferenceTables::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let tables = ReferenceTables::from_yaml_str("ph_tolerance: []").unwrap();
        assert!(tables.nutrients.is_empty());
        assert!(tables.rotation.is_empty());
    }

    #[test]
    fn range_checks_are_inclusive() {
        let ph = PhTolerance {
            crop: "Peas".into(),
            low: 6.0,
            high: 7.0,
        };
        assert!(ph.accepts(6.0));
        assert!(ph.accepts(7.0));
        assert!(!ph.accepts(7.01));

        let water = WaterNeed {
            crop: "Peas".into(),
            min_mm: 350,
            max_mm: 500,
            rainfall: true,
            irrigated: false,
            groundwater: false,
            surface_water: false,
        };
        assert!(water.accepts_level(350));
        assert!(water.accepts_level(500));
        assert!(!water.accepts_level(501));
    }
}
