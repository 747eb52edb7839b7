pub mod engine;
pub mod harvest_window;
pub mod irrigation;
pub mod market_watch;
pub mod rotation_plan;
pub mod soil_moisture;
pub mod soil_ph;
pub mod subsidy;

pub use engine::RulesEngine;

use crate::models::{CropCatalog, CurrentWeather, FarmRecord, Recommendation};

/// Everything an advisory rule may look at.
#[derive(Clone, Copy)]
pub struct AdvisoryContext<'a> {
    /// The farmer's most recent submission
    pub record: Option<&'a FarmRecord>,
    pub weather: Option<&'a CurrentWeather>,
    pub catalog: &'a CropCatalog,
}

impl<'a> AdvisoryContext<'a> {
    pub fn new(catalog: &'a CropCatalog) -> Self {
        Self {
            record: None,
            weather: None,
            catalog,
        }
    }

    pub fn with_record(mut self, record: Option<&'a FarmRecord>) -> Self {
        self.record = record;
        self
    }

    pub fn with_weather(mut self, weather: Option<&'a CurrentWeather>) -> Self {
        self.weather = weather;
        self
    }
}

/// Trait for advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &AdvisoryContext) -> Option<Recommendation>;
}
