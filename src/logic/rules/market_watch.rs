use super::{AdvisoryContext, Rule};
use crate::models::{CropCatalog, FarmRecord, Recommendation, RecommendationCategory, Severity};

/// Current prices for crops the farmer already grows.
pub struct MarketWatchRule;

impl MarketWatchRule {
    /// One line per history crop with a known price. Unknown crops are skipped.
    pub fn price_lines(record: &FarmRecord, catalog: &CropCatalog) -> Vec<String> {
        record
            .history_crops()
            .iter()
            .filter_map(|crop| catalog.price_matching(crop))
            .map(|p| format!("{}: ${:.2} per unit; keep monitoring.", p.crop, p.price))
            .collect()
    }
}

impl Rule for MarketWatchRule {
    fn id(&self) -> &'static str {
        "market_watch"
    }

    fn name(&self) -> &'static str {
        "Market watch"
    }

    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation> {
        let record = ctx.record?;
        let lines = Self::price_lines(record, ctx.catalog);
        if lines.is_empty() {
            return None;
        }

        let mut rec = Recommendation::new(
            "market_watch",
            RecommendationCategory::Market,
            Severity::Info,
            "Prices for Your Crops",
            lines.join(" "),
        )
        .with_explanation("Prices come from the stored market dataset, not a live feed.");

        for crop in record.history_crops() {
            if let Some(p) = ctx.catalog.price_matching(&crop) {
                rec = rec.with_data_point(&p.crop, format!("${:.2}", p.price), "Market prices");
            }
        }
        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_matches_ignore_case() {
        let catalog = CropCatalog::embedded().unwrap();
        let record =
            FarmRecord::new("f").with_crop_history(Some("garlic, Wheat, TOMATO".into()));
        assert_eq!(
            MarketWatchRule::price_lines(&record, &catalog),
            vec![
                "Garlic: $4.00 per unit; keep monitoring.",
                "Tomato: $1.80 per unit; keep monitoring.",
            ]
        );
    }

    #[test]
    fn unknown_crops_produce_nothing() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = FarmRecord::new("f").with_crop_history(Some("Wheat, Barley".into()));
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        assert!(MarketWatchRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn recommendation_carries_price_points() {
        let catalog = CropCatalog::embedded().unwrap();
        let record = FarmRecord::new("f").with_crop_history(Some("Garlic".into()));
        let ctx = AdvisoryContext::new(&catalog).with_record(Some(&record));
        let rec = MarketWatchRule.evaluate(&ctx).unwrap();
        assert_eq!(rec.data_points[0].label, "Garlic");
        assert_eq!(rec.data_points[0].value, "$4.00");
    }
}
