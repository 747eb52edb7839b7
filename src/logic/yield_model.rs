use crate::error::Result;
use crate::models::submission::parse_float;
use crate::models::YieldSample;
use serde::Serialize;

/// Closest precomputed yield for a set of growing conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldEstimate {
    pub predicted_yield: f64,
    /// Euclidean distance from the query to the matched row
    pub distance: f64,
    pub matched: YieldSample,
}

impl YieldEstimate {
    pub fn summary(&self) -> String {
        format!("Predicted crop yield: {:.2} units", self.predicted_yield)
    }
}

/// Nearest-neighbour lookup over the yield table.
///
/// Units are mixed (°F, mm, pH) and not normalized, so temperature and
/// rainfall dominate the distance.
pub struct YieldPredictor<'a> {
    table: &'a [YieldSample],
}

impl<'a> YieldPredictor<'a> {
    pub fn new(table: &'a [YieldSample]) -> Self {
        Self { table }
    }

    /// `None` only when the table is empty. The first row wins ties.
    pub fn predict(&self, temperature: f64, rainfall: f64, soil_ph: f64) -> Option<YieldEstimate> {
        let mut best: Option<YieldEstimate> = None;
        for row in self.table {
            let distance = ((row.temperature - temperature).powi(2)
                + (row.rainfall - rainfall).powi(2)
                + (row.soil_ph - soil_ph).powi(2))
            .sqrt();
            match best {
                Some(ref b) if b.distance <= distance => {}
                _ => {
                    best = Some(YieldEstimate {
                        predicted_yield: row.predicted_yield,
                        distance,
                        matched: *row,
                    })
                }
            }
        }
        best
    }

    /// Parse raw form input, then predict.
    pub fn predict_input(
        &self,
        temperature: &str,
        rainfall: &str,
        soil_ph: &str,
    ) -> Result<Option<YieldEstimate>> {
        let temperature = parse_float("temperature", temperature)?;
        let rainfall = parse_float("rainfall", rainfall)?;
        let soil_ph = parse_float("soil_ph", soil_ph)?;
        Ok(self.predict(temperature, rainfall, soil_ph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropCatalog;

    fn sample(temperature: f64, rainfall: f64, soil_ph: f64, predicted_yield: f64) -> YieldSample {
        YieldSample {
            temperature,
            rainfall,
            soil_ph,
            predicted_yield,
        }
    }

    #[test]
    fn picks_nearest_row() {
        let table = vec![
            sample(40.0, 30.0, 6.5, 7.4),
            sample(65.0, 40.0, 6.8, 31.0),
            sample(90.0, 50.0, 7.2, 54.5),
        ];
        let estimate = YieldPredictor::new(&table).predict(70.0, 41.0, 6.9).unwrap();
        assert!((estimate.predicted_yield - 31.0).abs() < 1e-9);
        assert_eq!(estimate.matched, table[1]);
    }

    #[test]
    fn exact_match_has_zero_distance() {
        let table = vec![sample(40.0, 30.0, 6.5, 7.4)];
        let estimate = YieldPredictor::new(&table).predict(40.0, 30.0, 6.5).unwrap();
        assert!(estimate.distance.abs() < 1e-12);
        assert_eq!(estimate.summary(), "Predicted crop yield: 7.40 units");
    }

    #[test]
    fn first_row_wins_ties() {
        let table = vec![sample(10.0, 0.0, 7.0, 1.0), sample(30.0, 0.0, 7.0, 2.0)];
        let estimate = YieldPredictor::new(&table).predict(20.0, 0.0, 7.0).unwrap();
        assert!((estimate.predicted_yield - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_predicts_nothing() {
        assert!(YieldPredictor::new(&[]).predict(70.0, 40.0, 6.5).is_none());
    }

    #[test]
    fn embedded_table_extremes() {
        let catalog = CropCatalog::embedded().unwrap();
        let predictor = YieldPredictor::new(&catalog.yield_table);
        let low = predictor.predict(0.0, 0.0, 6.5).unwrap();
        let high = predictor.predict(120.0, 80.0, 7.0).unwrap();
        assert!((low.predicted_yield - 7.40).abs() < 1e-9);
        assert!((high.predicted_yield - 54.47).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_input_names_the_field() {
        let table = vec![sample(40.0, 30.0, 6.5, 7.4)];
        let err = YieldPredictor::new(&table)
            .predict_input("70", "lots", "6.5")
            .unwrap_err();
        assert_eq!(err.field(), Some("rainfall"));
    }
}
