use super::rules::{
    harvest_window::HarvestWindowRule, irrigation::IrrigationRule, market_watch::MarketWatchRule,
    rotation_plan::RotationPlanRule, soil_moisture::SoilMoistureRule, soil_ph::SoilPhAdviceRule,
    subsidy::SubsidyRule, AdvisoryContext, Rule,
};
use super::yield_model::YieldPredictor;
use crate::models::{Feature, Recommendation};

const SOIL_TYPE_GUIDE: [(&str, &str); 3] = [
    ("Sandy", "Carrots, thanks to good drainage."),
    ("Loamy", "Most vegetables; loam is ideal."),
    ("Clay", "Crops that like steady moisture, as clay holds water well."),
];

const WEATHER_GUIDE: [(&str, &str); 3] = [
    ("Sunny", "Sweet Corn."),
    ("Rainy", "Leafy greens and Cabbage."),
    ("Humid", "Okra and Beans."),
];

const MONTHLY_SUGGESTIONS: [(&str, &str); 12] = [
    ("January", "Plant winter-hardy crops like Kale or Cabbage."),
    ("February", "Begin early sowing of Spinach."),
    ("March", "Start planting spring vegetables such as Lettuce."),
    ("April", "Ideal time for warm-season crops like Tomatoes and Peppers."),
    ("May", "Plant summer crops such as Corn or Beans."),
    ("June", "Ensure proper irrigation for high-demand crops like Cucumbers."),
    ("July", "Monitor for pests and rotate crops if needed."),
    ("August", "Prepare for harvest; consider quick-growing vegetables."),
    ("September", "Start planting fall crops like Broccoli."),
    ("October", "Plant root vegetables for cooler temperatures."),
    ("November", "Sow cover crops to improve soil fertility."),
    ("December", "Rest the soil and plan for next season."),
];

const SUBSIDY_PROGRAMS: [(&str, &str); 4] = [
    (
        "Direct Loan & Loan Guarantee Programs",
        "Low-interest loans for equipment upgrades and expansion.",
    ),
    (
        "Grant Programs & Financial Assistance",
        "Competitive grants for business planning and infrastructure improvements.",
    ),
    (
        "Technical Assistance & Training",
        "Expert guidance on financial management and best practices.",
    ),
    (
        "Disaster Assistance",
        "Emergency support for severe weather or natural disasters.",
    ),
];

const SUBSIDY_LINKS: [(&str, &str); 3] = [
    (
        "PA Agricultural Business Development Center",
        "https://www.pa.gov/agencies/pda/business-and-industry/agricultural-business-development-center/financial-assistance.html",
    ),
    ("USDA Farm Service Agency", "https://www.fsa.usda.gov/"),
    (
        "Pennsylvania Department of Agriculture",
        "https://www.agriculture.pa.gov/",
    ),
];

const SUBMIT_PROMPT: &str = "No farm data yet. Run `cropwise submit` to get personalized advice.";

/// A rendered feature: body lines plus any recommendations behind them.
#[derive(Debug, Clone)]
pub struct FeaturePage {
    pub feature: Feature,
    pub title: String,
    pub lines: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl FeaturePage {
    fn new(feature: Feature) -> Self {
        Self {
            feature,
            title: feature.as_str().to_string(),
            lines: vec![feature.description().to_string()],
            recommendations: Vec::new(),
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn add(&mut self, rec: Option<Recommendation>) {
        if let Some(rec) = rec {
            self.lines.push(format!("{} {}", rec.severity.symbol(), rec.description));
            self.recommendations.push(rec);
        }
    }

    pub fn build(feature: Feature, ctx: &AdvisoryContext) -> Self {
        let mut page = Self::new(feature);
        page.blank();

        match feature {
            Feature::CropRecommendation => {
                page.push("By soil type:");
                for (soil, crop) in SOIL_TYPE_GUIDE {
                    page.push(format!("  {}: {}", soil, crop));
                }
                page.push("By weather:");
                for (weather, crop) in WEATHER_GUIDE {
                    page.push(format!("  {}: {}", weather, crop));
                }
                page.push("By month:");
                for (month, tip) in MONTHLY_SUGGESTIONS {
                    page.push(format!("  {}: {}", month, tip));
                }
                if let Some(record) = ctx.record.filter(|r| !r.suggestions.is_empty()) {
                    page.blank();
                    page.push("Your best-matched crops:");
                    for (i, crop) in record.suggestions.iter().enumerate() {
                        page.push(format!("  {}. {}", i + 1, crop));
                    }
                }
            }
            Feature::SubsidyInfo => {
                page.push("Government aid and subsidy programs in Pennsylvania:");
                for (program, detail) in SUBSIDY_PROGRAMS {
                    page.push(format!("  {}: {}", program, detail));
                }
                page.push("Resources:");
                for (name, url) in SUBSIDY_LINKS {
                    page.push(format!("  {} <{}>", name, url));
                }
                if let Some(record) = ctx.record {
                    page.blank();
                    page.push("Personalized recommendations:");
                    for msg in SubsidyRule::messages(record) {
                        page.push(format!("  {}", msg));
                    }
                    page.recommendations.extend(SubsidyRule.evaluate(ctx));
                }
            }
            Feature::SoilHealth => {
                if ctx.record.is_some() {
                    page.add(SoilPhAdviceRule.evaluate(ctx));
                    page.add(SoilMoistureRule.evaluate(ctx));
                    page.push("Regularly add compost for better soil structure.");
                    page.push("Utilize crop rotation.");
                } else {
                    page.push(SUBMIT_PROMPT);
                }
            }
            Feature::MarketPrices => {
                for price in &ctx.catalog.market_prices {
                    page.push(format!("  {:<40} ${:.2}", price.crop, price.price));
                }
                if let Some(record) = ctx.record {
                    let lines = MarketWatchRule::price_lines(record, ctx.catalog);
                    if !lines.is_empty() {
                        page.blank();
                        page.push("Your crops:");
                        for line in lines {
                            page.push(format!("  {}", line));
                        }
                        page.recommendations.extend(MarketWatchRule.evaluate(ctx));
                    }
                }
            }
            Feature::CropRotation => {
                page.add(RotationPlanRule.evaluate(ctx));
            }
            Feature::Weather => match ctx.weather {
                Some(weather) => {
                    page.push(format!("City: {}", weather.city));
                    if !weather.description.is_empty() {
                        page.push(format!("Conditions: {}", weather.description));
                    }
                    page.push(format!("Temperature: {:.1}°F", weather.temperature_f));
                    page.push(format!("Humidity: {:.0}%", weather.humidity_percent));
                    page.push(format!("Wind Speed: {:.1} mph", weather.wind_speed_mph));
                    page.add(IrrigationRule.evaluate(ctx));
                }
                None => page.push("Could not retrieve weather data"),
            },
            Feature::FertilizerWater => {
                let suggestions = ctx.record.map(|r| r.suggestions.as_slice()).unwrap_or(&[]);
                let guides: Vec<_> = suggestions
                    .iter()
                    .filter_map(|crop| ctx.catalog.fertilizer_for(crop))
                    .collect();
                if guides.is_empty() {
                    page.push(SUBMIT_PROMPT);
                }
                for guide in guides {
                    page.push(format!(
                        "{}: NPK {}, {} irrigation, {} water needs. {}",
                        guide.crop, guide.npk, guide.irrigation, guide.water_needs, guide.tips
                    ));
                }
            }
            Feature::HarvestOptimization => match ctx.record.filter(|r| !r.suggestions.is_empty()) {
                Some(record) => match ctx.weather {
                    Some(weather) => {
                        page.push(format!(
                            "Weather in {}: {:.0}°F {}",
                            weather.city, weather.temperature_f, weather.description
                        ));
                        page.add(HarvestWindowRule.evaluate(ctx));
                    }
                    None => {
                        page.push(format!(
                            "Weather in {}: Unavailable",
                            record.city.as_deref().unwrap_or("your city")
                        ));
                        page.push("Conditions are not optimal for harvest of your suggested crops.");
                    }
                },
                None => page.push(
                    "No personalized crop suggestions available. Please submit your farm data.",
                ),
            },
            Feature::YieldPrediction => {
                let Some(record) = ctx.record else {
                    page.push("Run `cropwise predict-yield` with temperature, rainfall and soil pH.");
                    return page;
                };
                let (temp, rain, ph) = (record.temperature, record.rainfall, record.soil_ph);
                page.push(format!(
                    "From your latest submission: temperature {}, rainfall {}, soil pH {}",
                    fmt_opt(temp),
                    fmt_opt(rain),
                    fmt_opt(ph)
                ));
                if let (Some(t), Some(r), Some(p)) = (temp, rain, ph) {
                    match YieldPredictor::new(&ctx.catalog.yield_table).predict(t, r, p) {
                        Some(estimate) => page.push(estimate.summary()),
                        None => page.push("No yield data available."),
                    }
                }
            }
        }

        page
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCatalog, CurrentWeather, FarmRecord};

    fn record() -> FarmRecord {
        FarmRecord::new("f")
            .with_soil(Some("Loamy".into()), 7.4, 30.0)
            .with_climate(65.0, 40.0)
            .with_crop_history(Some("Garlic".into()))
            .with_city(Some("York".into()))
            .with_suggestions(vec!["Tomato".into(), "Garlic".into()])
    }

    fn has_line(page: &FeaturePage, needle: &str) -> bool {
        page.lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn every_feature_builds_without_data() {
        let catalog = CropCatalog::embedded().unwrap();
        let ctx = AdvisoryContext::new(&catalog);
        for &feature in Feature::all() {
            let page = FeaturePage::build(feature, &ctx);
            assert_eq!(page.title, feature.as_str());
            assert!(page.lines.len() > 1, "{} is empty", feature);
        }
    }

    #[test]
    fn crop_recommendation_lists_suggestions() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = record();
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let page = FeaturePage::build(Feature::CropRecommendation, &ctx);
        assert!(has_line(&page, "1. Tomato"));
        assert!(has_line(&page, "November: Sow cover crops"));
    }

    #[test]
    fn soil_health_prompts_without_record() {
        let catalog = CropCatalog::embedded().unwrap();
        let page = FeaturePage::build(Feature::SoilHealth, &AdvisoryContext::new(&catalog));
        assert!(has_line(&page, "cropwise submit"));
        assert!(page.recommendations.is_empty());

        let record = record();
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let page = FeaturePage::build(Feature::SoilHealth, &ctx);
        let ids: Vec<&str> = page.recommendations.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["soil_ph_high", "soil_moisture_optimal"]);
    }

    #[test]
    fn weather_page_reports_missing_data() {
        let catalog = CropCatalog::embedded().unwrap();
        let page = FeaturePage::build(Feature::Weather, &AdvisoryContext::new(&catalog));
        assert!(has_line(&page, "Could not retrieve weather data"));

        let weather = CurrentWeather::new("York", 71.3).with_description("Clear sky");
        let ctx = AdvisoryContext::new(&catalog).with_weather(Some(&weather));
        let page = FeaturePage::build(Feature::Weather, &ctx);
        assert!(has_line(&page, "Temperature: 71.3°F"));
        assert!(has_line(&page, "Conditions: Clear sky"));
    }

    #[test]
    fn fertilizer_page_joins_suggestions() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = record();
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let page = FeaturePage::build(Feature::FertilizerWater, &ctx);
        assert!(has_line(&page, "Tomato: NPK 10-10-10"));
        assert!(has_line(&page, "Garlic: NPK 15-10-10"));
    }

    #[test]
    fn harvest_page_without_weather() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = record();
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let page = FeaturePage::build(Feature::HarvestOptimization, &ctx);
        assert!(has_line(&page, "Weather in York: Unavailable"));
        assert!(has_line(&page, "not optimal"));
    }

    #[test]
    fn yield_page_predicts_from_latest_record() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = record();
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let page = FeaturePage::build(Feature::YieldPrediction, &ctx);
        assert!(has_line(&page, "Predicted crop yield:"));
    }
}
