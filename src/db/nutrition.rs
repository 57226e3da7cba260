use chrono::NaiveDate;
use rusqlite::params;

use crate::error::{Error, Result};
use crate::models::nutrition::{MacroTotals, NutritionDayLog, NutritionTargets};

use super::{Database, parse_date, parse_timestamp};

struct NutritionRow {
    client_id: String,
    date: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    compliance_score: i64,
    meals_completed: Option<String>,
    created_at: String,
    updated_at: String,
}

fn row_to_log(r: NutritionRow) -> Result<NutritionDayLog> {
    let meals_completed: Vec<String> = match r.meals_completed {
        Some(ref m) => serde_json::from_str(m)
            .map_err(|e| Error::Corrupt(format!("meals_completed '{}': {}", m, e)))?,
        None => Vec::new(),
    };
    let compliance_score = u8::try_from(r.compliance_score)
        .map_err(|_| Error::Corrupt(format!("compliance score {}", r.compliance_score)))?;
    Ok(NutritionDayLog {
        client_id: r.client_id,
        date: parse_date(&r.date)?,
        totals: MacroTotals {
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
        },
        compliance_score,
        meals_completed,
        created_at: parse_timestamp(&r.created_at)?,
        updated_at: parse_timestamp(&r.updated_at)?,
    })
}

const SELECT_COLS: &str = "client_id, date, calories, protein, carbs, fat, compliance_score, meals_completed, created_at, updated_at";

impl Database {
    /// Insert or replace the day's totals for a client, keeping `created_at`.
    pub fn upsert_nutrition_log(&self, log: &NutritionDayLog) -> Result<NutritionDayLog> {
        let meals_json = if log.meals_completed.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&log.meals_completed)?)
        };
        self.conn.execute(
            "INSERT INTO nutrition_logs (client_id, date, calories, protein, carbs, fat, compliance_score, meals_completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(client_id, date) DO UPDATE SET
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                compliance_score = excluded.compliance_score,
                meals_completed = excluded.meals_completed,
                updated_at = excluded.updated_at",
            params![
                log.client_id,
                log.date.to_string(),
                log.totals.calories,
                log.totals.protein,
                log.totals.carbs,
                log.totals.fat,
                log.compliance_score as i64,
                meals_json,
                log.created_at.to_rfc3339(),
                log.updated_at.to_rfc3339(),
            ],
        )?;

        let mut logs = self.query_nutrition_logs(&log.client_id, log.date, log.date)?;
        logs.pop()
            .ok_or_else(|| Error::NotFound(format!("nutrition log {} on {}", log.client_id, log.date)))
    }

    /// Logs for `client_id` with dates in `[from, to]`, newest first.
    pub fn query_nutrition_logs(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NutritionDayLog>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM nutrition_logs
             WHERE client_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![client_id, from.to_string(), to.to_string()],
            |row| {
                Ok(NutritionRow {
                    client_id: row.get(0)?,
                    date: row.get(1)?,
                    calories: row.get(2)?,
                    protein: row.get(3)?,
                    carbs: row.get(4)?,
                    fat: row.get(5)?,
                    compliance_score: row.get(6)?,
                    meals_completed: row.get(7)?,
                    created_at: row.get(8)?,
                    updated_at: row.get(9)?,
                })
            },
        )?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row_to_log(row?)?);
        }
        Ok(logs)
    }

    pub fn upsert_nutrition_targets(&self, t: &NutritionTargets) -> Result<()> {
        self.conn.execute(
            "INSERT INTO nutrition_targets (client_id, calories, protein, carbs, fat, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(client_id) DO UPDATE SET
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                updated_at = excluded.updated_at",
            params![
                t.client_id,
                t.calories,
                t.protein,
                t.carbs,
                t.fat,
                t.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_nutrition_targets(&self, client_id: &str) -> Result<Option<NutritionTargets>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_id, calories, protein, carbs, fat, updated_at
             FROM nutrition_targets WHERE client_id = ?1",
        )?;
        let mut rows = stmt.query_map(params![client_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;
        match rows.next() {
            Some(row) => {
                let (client_id, calories, protein, carbs, fat, updated_at) = row?;
                Ok(Some(NutritionTargets {
                    client_id,
                    calories,
                    protein,
                    carbs,
                    fat,
                    updated_at: parse_timestamp(&updated_at)?,
                }))
            }
            None => Ok(None),
        }
    }
}
