use serde::{Deserialize, Serialize};

/// Advisory pages offered to the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    CropRecommendation,
    SubsidyInfo,
    SoilHealth,
    MarketPrices,
    CropRotation,
    Weather,
    FertilizerWater,
    HarvestOptimization,
    YieldPrediction,
}

impl Feature {
    pub fn all() -> &'static [Feature] {
        &[
            Feature::CropRecommendation,
            Feature::SubsidyInfo,
            Feature::SoilHealth,
            Feature::MarketPrices,
            Feature::CropRotation,
            Feature::Weather,
            Feature::FertilizerWater,
            Feature::HarvestOptimization,
            Feature::YieldPrediction,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::CropRecommendation => "Crop Recommendation",
            Feature::SubsidyInfo => "Government Aid & Subsidy Info",
            Feature::SoilHealth => "Soil Health Monitoring",
            Feature::MarketPrices => "Market Price Alerts",
            Feature::CropRotation => "Crop Rotation Planning",
            Feature::Weather => "Real-Time Weather",
            Feature::FertilizerWater => "Fertilizer & Water Usage Recommendations",
            Feature::HarvestOptimization => "Harvest Optimization",
            Feature::YieldPrediction => "AI-Based Yield Prediction",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::CropRecommendation => {
                "Suggests the best crop based on soil type, weather, and month."
            }
            Feature::SubsidyInfo => "Provides a list of available farming subsidies based on region.",
            Feature::SoilHealth => {
                "Allows farmers to input soil fertility levels and suggests ways to improve soil."
            }
            Feature::MarketPrices => "Displays current crop prices from a stored dataset.",
            Feature::CropRotation => {
                "Suggests a rotation schedule to improve soil fertility & reduce pests."
            }
            Feature::Weather => "Fetch live weather data from OpenWeatherMap.",
            Feature::FertilizerWater => {
                "Suggests the best fertilizer & irrigation methods for each crop."
            }
            Feature::HarvestOptimization => {
                "Uses live weather data and current market prices to pinpoint the ideal harvest window."
            }
            Feature::YieldPrediction => {
                "Predicts crop yield from weather, soil, and planting conditions."
            }
        }
    }

    pub fn benefit(&self) -> &'static str {
        match self {
            Feature::CropRecommendation => "Helps farmers choose the right crop for higher yield & profit.",
            Feature::SubsidyInfo => {
                "Helps farmers access financial support for seeds, fertilizers, or technology."
            }
            Feature::SoilHealth => "Prevents soil degradation and boosts long-term productivity.",
            Feature::MarketPrices => "Helps farmers decide when to sell crops for maximum profit.",
            Feature::CropRotation => "Prevents soil depletion and increases productivity.",
            Feature::Weather => "Provides accurate climate data for better crop selection.",
            Feature::FertilizerWater => "Saves money & resources while ensuring healthy crops.",
            Feature::HarvestOptimization => "Maximizes profit & crop quality.",
            Feature::YieldPrediction => {
                "Helps farmers make data-driven decisions to improve productivity."
            }
        }
    }

    /// Pages that show live weather when it can be fetched.
    pub fn uses_weather(&self) -> bool {
        matches!(self, Feature::Weather | Feature::HarvestOptimization)
    }

    /// Accepts the display name or a short slug such as `soil-health`.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        if let Some(f) = Self::all()
            .iter()
            .find(|f| f.as_str().to_lowercase() == normalized)
        {
            return Some(*f);
        }
        match normalized.replace(['_', ' '], "-").as_str() {
            "crops" | "crop-recommendation" => Some(Feature::CropRecommendation),
            "subsidy" | "subsidies" | "aid" => Some(Feature::SubsidyInfo),
            "soil" | "soil-health" => Some(Feature::SoilHealth),
            "market" | "prices" | "market-prices" => Some(Feature::MarketPrices),
            "rotation" | "crop-rotation" => Some(Feature::CropRotation),
            "weather" => Some(Feature::Weather),
            "fertilizer" | "water" | "fertilizer-water" => Some(Feature::FertilizerWater),
            "harvest" | "harvest-optimization" => Some(Feature::HarvestOptimization),
            "yield" | "yield-prediction" => Some(Feature::YieldPrediction),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_from_display_name() {
        for feature in Feature::all() {
            assert_eq!(Feature::from_str(feature.as_str()), Some(*feature));
        }
    }

    #[test]
    fn feature_from_slug() {
        assert_eq!(Feature::from_str("soil-health"), Some(Feature::SoilHealth));
        assert_eq!(Feature::from_str("Soil Health"), Some(Feature::SoilHealth));
        assert_eq!(Feature::from_str("yield"), Some(Feature::YieldPrediction));
        assert_eq!(Feature::from_str("fertilizer_water"), Some(Feature::FertilizerWater));
        assert_eq!(Feature::from_str("unknown"), None);
    }

    #[test]
    fn weather_pages() {
        let live: Vec<_> = Feature::all().iter().filter(|f| f.uses_weather()).collect();
        assert_eq!(live, vec![&Feature::Weather, &Feature::HarvestOptimization]);
    }
}
