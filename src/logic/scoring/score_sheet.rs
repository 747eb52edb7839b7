use crate::models::{crop_index, CROP_UNIVERSE, MAX_SUGGESTIONS};
use serde::Serialize;

/// Points granted to one crop by one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Award {
    pub rule: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropScore {
    pub crop: &'static str,
    pub points: u32,
    pub awards: Vec<Award>,
}

/// Accumulated points for every crop in the universe.
///
/// Scores are stored in universe order, so a stable sort by points keeps
/// equal-scoring crops in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSheet {
    scores: Vec<CropScore>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        let scores = CROP_UNIVERSE
            .iter()
            .map(|&crop| CropScore {
                crop,
                points: 0,
                awards: Vec::new(),
            })
            .collect();
        Self { scores }
    }

    /// Add points to `crop`. Crops outside the universe are ignored and
    /// `false` is returned.
    pub fn award(&mut self, crop: &str, rule: &'static str, points: u32) -> bool {
        match crop_index(crop) {
            Some(i) => {
                let score = &mut self.scores[i];
                score.points += points;
                score.awards.push(Award { rule, points });
                true
            }
            None => {
                tracing::trace!(crop, rule, "Ignoring crop outside the universe");
                false
            }
        }
    }

    pub fn points(&self, crop: &str) -> Option<u32> {
        crop_index(crop).map(|i| self.scores[i].points)
    }

    pub fn get(&self, crop: &str) -> Option<&CropScore> {
        crop_index(crop).map(|i| &self.scores[i])
    }

    /// Points `crop` received from `rule`.
    pub fn points_from(&self, crop: &str, rule: &str) -> u32 {
        self.get(crop)
            .map(|s| {
                s.awards
                    .iter()
                    .filter(|a| a.rule == rule)
                    .map(|a| a.points)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Every crop, highest score first; ties keep universe order.
    pub fn ranked(&self) -> Vec<&CropScore> {
        let mut ranked: Vec<&CropScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<String> {
        self.ranked()
            .into_iter()
            .take(n)
            .map(|s| s.crop.to_string())
            .collect()
    }

    /// The suggestion list stored with a farm record.
    pub fn suggestions(&self) -> Vec<String> {
        self.top(MAX_SUGGESTIONS)
    }

    pub fn scored_count(&self) -> usize {
        self.scores.iter().filter(|s| s.points > 0).count()
    }
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::new()
    }
}
