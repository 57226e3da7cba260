use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Error, Result};
use crate::models::metric::{CurrentSnapshot, Feeling, MetricEntry, TimeOfDay};

use super::{Database, parse_date, parse_timestamp};

struct MetricRow {
    id: String,
    client_id: String,
    date: String,
    value: f64,
    time_of_day: String,
    feeling: Option<String>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

fn row_to_entry(r: MetricRow) -> Result<MetricEntry> {
    let time_of_day: TimeOfDay = r
        .time_of_day
        .parse()
        .map_err(|e: anyhow::Error| Error::Corrupt(e.to_string()))?;
    let feeling = match r.feeling {
        Some(ref f) => Some(
            f.parse::<Feeling>()
                .map_err(|e: anyhow::Error| Error::Corrupt(e.to_string()))?,
        ),
        None => None,
    };
    Ok(MetricEntry {
        id: r.id,
        client_id: r.client_id,
        date: parse_date(&r.date)?,
        value: r.value,
        time_of_day,
        feeling,
        notes: r.notes,
        created_at: parse_timestamp(&r.created_at)?,
        updated_at: parse_timestamp(&r.updated_at)?,
    })
}

const SELECT_COLS: &str =
    "id, client_id, date, value, time_of_day, feeling, notes, created_at, updated_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(MetricRow {
            id: $row.get(0)?,
            client_id: $row.get(1)?,
            date: $row.get(2)?,
            value: $row.get(3)?,
            time_of_day: $row.get(4)?,
            feeling: $row.get(5)?,
            notes: $row.get(6)?,
            created_at: $row.get(7)?,
            updated_at: $row.get(8)?,
        })
    };
}

/// Insert the entry, or update the existing row for the same (client, date)
/// in place. `id` and `created_at` of an existing row are kept.
fn upsert_entry(conn: &Connection, e: &MetricEntry) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO metric_entries (id, client_id, date, value, time_of_day, feeling, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(client_id, date) DO UPDATE SET
            value = excluded.value,
            time_of_day = excluded.time_of_day,
            feeling = excluded.feeling,
            notes = excluded.notes,
            updated_at = excluded.updated_at",
        params![
            e.id,
            e.client_id,
            e.date.to_string(),
            e.value,
            e.time_of_day.to_string(),
            e.feeling.map(|f| f.to_string()),
            e.notes,
            e.created_at.to_rfc3339(),
            e.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Point the client's snapshot at `e` unless the snapshot already holds a
/// strictly later date.
fn sync_snapshot(conn: &Connection, e: &MetricEntry) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO client_snapshots (client_id, latest_value, latest_date, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(client_id) DO UPDATE SET
            latest_value = excluded.latest_value,
            latest_date = excluded.latest_date,
            updated_at = excluded.updated_at
         WHERE excluded.latest_date >= client_snapshots.latest_date",
        params![
            e.client_id,
            e.value,
            e.date.to_string(),
            e.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Upsert one entry and sync its snapshot on `conn`, returning the stored row.
/// The caller owns the transaction.
fn write_entry(conn: &Connection, e: &MetricEntry) -> Result<MetricEntry> {
    upsert_entry(conn, e)?;
    let stored = get_entry(conn, &e.client_id, e.date)?
        .ok_or_else(|| Error::NotFound(format!("entry {} on {}", e.client_id, e.date)))?;
    sync_snapshot(conn, &stored).map_err(|source| Error::SnapshotSync {
        client_id: e.client_id.clone(),
        source,
    })?;
    Ok(stored)
}

impl Database {
    /// Upsert a metric entry and its client snapshot in one transaction.
    /// Returns the stored row.
    pub fn write_metric_entry(&self, e: &MetricEntry) -> Result<MetricEntry> {
        let tx = self.conn.unchecked_transaction()?;
        let stored = write_entry(&tx, e)?;
        tx.commit()?;
        Ok(stored)
    }

    /// Write every entry and its snapshot in a single transaction. Either all
    /// rows are stored or none are.
    pub fn write_metric_entries(&self, entries: &[MetricEntry]) -> Result<Vec<MetricEntry>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut stored = Vec::with_capacity(entries.len());
        for e in entries {
            stored.push(write_entry(&tx, e)?);
        }
        tx.commit()?;
        Ok(stored)
    }

    /// Raw rows for `client_id` with dates in `[from, to]`, newest date first.
    pub fn query_metric_entries(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MetricEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM metric_entries
             WHERE client_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC, created_at DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![client_id, from.to_string(), to.to_string()],
            |row| map_row!(row),
        )?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row_to_entry(row?)?);
        }
        Ok(entries)
    }

    pub fn get_metric_entry(&self, client_id: &str, date: NaiveDate) -> Result<Option<MetricEntry>> {
        get_entry(&self.conn, client_id, date)
    }

    pub fn get_snapshot(&self, client_id: &str) -> Result<Option<CurrentSnapshot>> {
        let row = self
            .conn
            .query_row(
                "SELECT client_id, latest_value, latest_date, updated_at
                 FROM client_snapshots WHERE client_id = ?1",
                params![client_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        match row {
            Some((client_id, latest_value, latest_date, updated_at)) => Ok(Some(CurrentSnapshot {
                client_id,
                latest_value,
                latest_date: parse_date(&latest_date)?,
                updated_at: parse_timestamp(&updated_at)?,
            })),
            None => Ok(None),
        }
    }
}

fn get_entry(conn: &Connection, client_id: &str, date: NaiveDate) -> Result<Option<MetricEntry>> {
    let sql = format!(
        "SELECT {SELECT_COLS} FROM metric_entries
         WHERE client_id = ?1 AND date = ?2
         ORDER BY created_at DESC LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![client_id, date.to_string()], |row| map_row!(row))?;
    match rows.next() {
        Some(row) => Ok(Some(row_to_entry(row?)?)),
        None => Ok(None),
    }
}
