use super::{
    harvest_window::HarvestWindowRule, irrigation::IrrigationRule, market_watch::MarketWatchRule,
    rotation_plan::RotationPlanRule, soil_moisture::SoilMoistureRule, soil_ph::SoilPhAdviceRule,
    subsidy::SubsidyRule, AdvisoryContext, Rule,
};
use crate::models::Recommendation;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(SoilPhAdviceRule),
            Box::new(SoilMoistureRule),
            Box::new(IrrigationRule),
            Box::new(HarvestWindowRule),
            Box::new(RotationPlanRule),
            Box::new(MarketWatchRule),
            Box::new(SubsidyRule),
        ];

        Self { rules }
    }

    /// Every firing rule, most severe first. Equal severities keep rule order.
    pub fn evaluate(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx))
            .collect();
        recs.sort_by(|a, b| b.severity.cmp(&a.severity));
        tracing::debug!(count = recs.len(), "Evaluated advisory rules");
        recs
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
