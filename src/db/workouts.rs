use chrono::NaiveDate;
use rusqlite::params;

use crate::error::Result;
use crate::models::workout::WorkoutCompletion;

use super::{Database, parse_date, parse_timestamp};

impl Database {
    pub fn insert_workout(&self, w: &WorkoutCompletion) -> Result<()> {
        self.conn.execute(
            "INSERT INTO workout_completions (id, client_id, date, workout_name, duration_minutes, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                w.id,
                w.client_id,
                w.date.to_string(),
                w.workout_name,
                w.duration_minutes,
                w.notes,
                w.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Completion dates in `[from, to]`, newest first. Several workouts on one
    /// day yield repeated dates.
    pub fn workout_dates(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT date FROM workout_completions
             WHERE client_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC",
        )?;
        let rows = stmt.query_map(
            params![client_id, from.to_string(), to.to_string()],
            |row| row.get::<_, String>(0),
        )?;

        let mut dates = Vec::new();
        for row in rows {
            dates.push(parse_date(&row?)?);
        }
        Ok(dates)
    }

    pub fn list_workouts(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkoutCompletion>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, client_id, date, workout_name, duration_minutes, notes, created_at
             FROM workout_completions
             WHERE client_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC, created_at DESC",
        )?;
        let rows = stmt.query_map(
            params![client_id, from.to_string(), to.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<u32>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, String>(6)?,
                ))
            },
        )?;

        let mut workouts = Vec::new();
        for row in rows {
            let (id, client_id, date, workout_name, duration_minutes, notes, created_at) = row?;
            workouts.push(WorkoutCompletion {
                id,
                client_id,
                date: parse_date(&date)?,
                workout_name,
                duration_minutes,
                notes,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(workouts)
    }
}
