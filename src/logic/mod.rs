pub mod features;
pub mod rules;
pub mod scoring;
pub mod yield_model;

pub use features::FeaturePage;
pub use rules::{AdvisoryContext, RulesEngine};
pub use scoring::{CropScorer, ScoreSheet};
pub use yield_model::YieldPredictor;
