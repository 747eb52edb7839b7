use crate::error::{CropwiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerGuide {
    pub crop: String,
    pub npk: String,
    pub irrigation: String,
    pub water_needs: String,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub crop: String,
    /// Dollars per unit
    pub price: f64,
}

/// One row of the precomputed yield table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSample {
    pub temperature: f64,
    pub rainfall: f64,
    pub soil_ph: f64,
    pub predicted_yield: f64,
}

/// Static content joined against a farmer's suggestions and history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropCatalog {
    #[serde(default)]
    pub fertilizer: Vec<FertilizerGuide>,
    #[serde(default)]
    pub market_prices: Vec<MarketPrice>,
    #[serde(default)]
    pub yield_table: Vec<YieldSample>,
}

impl CropCatalog {
    pub fn embedded() -> Result<Self> {
        Ok(serde_yaml::from_str(EMBEDDED_CATALOG)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CropwiseError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        let catalog: CropCatalog = serde_yaml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            prices = catalog.market_prices.len(),
            yield_rows = catalog.yield_table.len(),
            "Loaded crop catalog"
        );
        Ok(catalog)
    }

    /// Exact-name lookup, as suggestions carry canonical crop names.
    pub fn fertilizer_for(&self, crop: &str) -> Option<&FertilizerGuide> {
        self.fertilizer.iter().find(|g| g.crop == crop)
    }

    pub fn price_of(&self, crop: &str) -> Option<f64> {
        self.market_prices
            .iter()
            .find(|p| p.crop == crop)
            .map(|p| p.price)
    }

    /// Case-insensitive lookup for free-text crop history.
    pub fn price_matching(&self, crop: &str) -> Option<&MarketPrice> {
        let needle = crop.trim().to_lowercase();
        self.market_prices
            .iter()
            .find(|p| p.crop.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CROP_UNIVERSE;

    #[test]
    fn embedded_catalog_prices_every_crop() {
        let catalog = CropCatalog::embedded().unwrap();
        for crop in CROP_UNIVERSE {
            assert!(catalog.price_of(crop).is_some(), "no price for {}", crop);
            assert!(catalog.fertilizer_for(crop).is_some(), "no guide for {}", crop);
        }
        assert_eq!(catalog.yield_table.len(), 20);
    }

    #[test]
    fn price_matching_ignores_case() {
        let catalog = CropCatalog::embedded().unwrap();
        let garlic = catalog.price_matching(" garlic ").unwrap();
        assert_eq!(garlic.crop, "Garlic");
        assert!((garlic.price - 4.0).abs() < 1e-9);
        assert!(catalog.price_matching("wheat").is_none());
    }
}
