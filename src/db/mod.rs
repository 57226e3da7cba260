mod metrics;
mod migrate;
mod nutrition;
mod workouts;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use std::path::Path;

use crate::error::{Error, Result};

/// Handle to the SQLite store. Owned by the caller and passed in explicitly.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            if !path.exists() {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .mode(0o600)
                    .open(path)?;
            } else {
                let mut perms = fs::metadata(path)?.permissions();
                if perms.mode() & 0o777 != 0o600 {
                    perms.set_mode(0o600);
                    fs::set_permissions(path, perms)?;
                }
            }
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        migrate::run(&db.conn)?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrate::run(&conn)?;
        Ok(Self { conn })
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse::<NaiveDate>()
        .map_err(|e| Error::Corrupt(format!("bad date '{}': {}", s, e)))
}

pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Corrupt(format!("bad timestamp '{}': {}", s, e)))
}
