pub mod calendar;
pub mod engine;
pub mod nutrients;
pub mod rotation;
pub mod score_sheet;
pub mod soil_ph;
pub mod water;

pub use engine::CropScorer;
pub use score_sheet::{CropScore, ScoreSheet};

use crate::models::{ReferenceTables, Submission};

/// One additive criterion of crop suitability.
pub trait ScoringRule: Send + Sync {
    /// Unique identifier, recorded on every award
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Award points to every crop the submission qualifies for
    fn apply(&self, submission: &Submission, tables: &ReferenceTables, sheet: &mut ScoreSheet);
}
