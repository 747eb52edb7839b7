use crate::db::Database;
use crate::error::{CropwiseError, Result};
use crate::models::{FarmRecord, Submission};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

// Farm Record Queries

impl Database {
    /// Store a record. `inputs` are the scorer inputs it was ranked from,
    /// kept so the ranking can be rebuilt later.
    pub fn insert_farm_record(
        &self,
        record: &FarmRecord,
        inputs: Option<&Submission>,
    ) -> Result<i64> {
        let suggestions = record.suggestions_column()?;
        let inputs = inputs.map(serde_json::to_string).transpose()?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO farm_records
                    (farmer_id, soil_type, soil_ph, soil_moisture, temperature, rainfall,
                     crop_history, fertilizer_usage, pest_issues, city, suggestions, submitted_at,
                     scoring_inputs)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
                params![
                    record.farmer_id,
                    record.soil_type,
                    record.soil_ph,
                    record.soil_moisture,
                    record.temperature,
                    record.rainfall,
                    record.crop_history,
                    record.fertilizer_usage,
                    record.pest_issues,
                    record.city,
                    suggestions,
                    record.submitted_at.to_rfc3339(),
                    inputs,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Scorer inputs saved with a record, if any.
    pub fn scoring_inputs(&self, id: i64) -> Result<Option<Submission>> {
        let raw: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT scoring_inputs FROM farm_records WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()
            .map(Option::flatten)
            .map_err(Into::into)
        })?;

        match raw {
            None => Ok(None),
            Some(s) => match serde_json::from_str(&s) {
                Ok(submission) => Ok(Some(submission)),
                Err(e) => {
                    warn!(id, error = %e, "Unreadable scoring inputs in database, ignoring");
                    Ok(None)
                }
            },
        }
    }

    pub fn set_suggestions(&self, id: i64, suggestions: &[String]) -> Result<()> {
        let column = if suggestions.is_empty() {
            None
        } else {
            Some(serde_json::to_string(suggestions)?)
        };
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE farm_records SET suggestions = ?1 WHERE id = ?2",
                params![column, id],
            )?;
            if changed == 0 {
                return Err(CropwiseError::NotFound(format!("farm record {}", id)));
            }
            Ok(())
        })
    }

    pub fn get_farm_record(&self, id: i64) -> Result<Option<FarmRecord>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM farm_records WHERE id = ?1",
                [id],
                row_to_farm_record,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Most recent submission; the higher id wins when timestamps tie.
    pub fn latest_farm_record(&self, farmer_id: &str) -> Result<Option<FarmRecord>> {
        self.with_conn(|conn| {
            conn.query_row(
                r#"
                SELECT * FROM farm_records
                WHERE farmer_id = ?1
                ORDER BY submitted_at DESC, id DESC
                LIMIT 1
                "#,
                [farmer_id],
                row_to_farm_record,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// All submissions for a farmer, newest first.
    pub fn farm_records_for(&self, farmer_id: &str) -> Result<Vec<FarmRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM farm_records
                WHERE farmer_id = ?1
                ORDER BY submitted_at DESC, id DESC
                "#,
            )?;

            let records = stmt
                .query_map([farmer_id], row_to_farm_record)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(records)
        })
    }
}

fn row_to_farm_record(row: &Row) -> rusqlite::Result<FarmRecord> {
    let id: i64 = row.get("id")?;
    let suggestions_str: Option<String> = row.get("suggestions")?;
    let submitted_at_str: String = row.get("submitted_at")?;

    let suggestions = match suggestions_str.as_deref() {
        None | Some("") => Vec::new(),
        Some(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            warn!(id, error = %e, "Unreadable suggestions in database, ignoring");
            Vec::new()
        }),
    };

    Ok(FarmRecord {
        id: Some(id),
        farmer_id: row.get("farmer_id")?,
        soil_type: row.get("soil_type")?,
        soil_ph: row.get("soil_ph")?,
        soil_moisture: row.get("soil_moisture")?,
        temperature: row.get("temperature")?,
        rainfall: row.get("rainfall")?,
        crop_history: row.get("crop_history")?,
        fertilizer_usage: row.get("fertilizer_usage")?,
        pest_issues: row.get("pest_issues")?,
        city: row.get("city")?,
        suggestions,
        submitted_at: DateTime::parse_from_rfc3339(&submitted_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                warn!(id, submitted_at = %submitted_at_str, "Unparseable submitted_at, using now");
                Utc::now()
            }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(farmer: &str) -> FarmRecord {
        FarmRecord::new(farmer)
            .with_soil(Some("Loamy".into()), 6.4, 28.0)
            .with_climate(72.0, 35.0)
            .with_crop_history(Some("Tomato, Peppers".into()))
            .with_city(Some("Chester Springs".into()))
    }

    #[test]
    fn insert_and_read_back() {
        let db = Database::open_in_memory().unwrap();
        let suggestions = vec![
            "Beans (Bush, Pole, Shell, Dried)".to_string(),
            "Tomato".to_string(),
        ];
        let id = db
            .insert_farm_record(&record("a").with_suggestions(suggestions.clone()), None)
            .unwrap();

        let stored = db.get_farm_record(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.suggestions, suggestions);
        assert_eq!(stored.city.as_deref(), Some("Chester Springs"));
        assert_eq!(stored.soil_ph, Some(6.4));
        assert!(stored.fertilizer_usage.is_none());
    }

    #[test]
    fn missing_record_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_farm_record(42).unwrap().is_none());
        assert!(db.latest_farm_record("nobody").unwrap().is_none());
    }

    #[test]
    fn set_suggestions_after_insert() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_farm_record(&record("a"), None).unwrap();
        assert!(db.get_farm_record(id).unwrap().unwrap().suggestions.is_empty());

        db.set_suggestions(id, &["Okra".to_string()]).unwrap();
        assert_eq!(db.get_farm_record(id).unwrap().unwrap().suggestions, vec!["Okra"]);

        let err = db.set_suggestions(id + 1, &[]).unwrap_err();
        assert!(matches!(err, CropwiseError::NotFound(_)));
    }

    #[test]
    fn latest_record_is_per_farmer() {
        let db = Database::open_in_memory().unwrap();
        let mut older = record("a");
        older.submitted_at = Utc::now() - Duration::days(3);
        older.city = Some("York".into());
        db.insert_farm_record(&older, None).unwrap();
        db.insert_farm_record(&record("a"), None).unwrap();
        db.insert_farm_record(&record("b").with_city(Some("Erie".into())), None)
            .unwrap();

        let latest = db.latest_farm_record("a").unwrap().unwrap();
        assert_eq!(latest.city.as_deref(), Some("Chester Springs"));

        let history = db.farm_records_for("a").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].city.as_deref(), Some("York"));
    }

    #[test]
    fn record_keeps_scoring_inputs() {
        let db = Database::open_in_memory().unwrap();
        let submission = Submission::new(6.4)
            .with_nutrients(110, 70, 160)
            .with_prior_crops(&["Tomato"]);
        let id = db
            .insert_farm_record(
                &record("a").with_suggestions(vec!["Tomato".into()]),
                Some(&submission),
            )
            .unwrap();

        assert_eq!(db.scoring_inputs(id).unwrap(), Some(submission));
        assert_eq!(db.get_farm_record(id).unwrap().unwrap().suggestions, vec!["Tomato"]);

        let plain = db.insert_farm_record(&record("a"), None).unwrap();
        assert!(db.scoring_inputs(plain).unwrap().is_none());
        assert!(db.scoring_inputs(plain + 100).unwrap().is_none());
    }

    #[test]
    fn corrupt_suggestions_are_dropped() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_farm_record(&record("a"), None).unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "UPDATE farm_records SET suggestions = 'Peas,Okra' WHERE id = ?1",
                [id],
            )?;
            Ok(())
        })
        .unwrap();
        assert!(db.get_farm_record(id).unwrap().unwrap().suggestions.is_empty());
    }
}
