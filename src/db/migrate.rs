use rusqlite::Connection;

pub fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS metric_entries (
            id           TEXT PRIMARY KEY,
            client_id    TEXT NOT NULL,
            date         TEXT NOT NULL,
            value        REAL NOT NULL,
            time_of_day  TEXT NOT NULL DEFAULT 'morning',
            feeling      TEXT,
            notes        TEXT,
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL,
            UNIQUE (client_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_metric_entries_client_date
            ON metric_entries(client_id, date);

        CREATE TABLE IF NOT EXISTS client_snapshots (
            client_id    TEXT PRIMARY KEY,
            latest_value REAL NOT NULL,
            latest_date  TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS nutrition_logs (
            client_id        TEXT NOT NULL,
            date             TEXT NOT NULL,
            calories         REAL NOT NULL,
            protein          REAL NOT NULL,
            carbs            REAL NOT NULL,
            fat              REAL NOT NULL,
            compliance_score INTEGER NOT NULL,
            meals_completed  TEXT,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL,
            PRIMARY KEY (client_id, date)
        );

        CREATE TABLE IF NOT EXISTS nutrition_targets (
            client_id  TEXT PRIMARY KEY,
            calories   REAL NOT NULL,
            protein    REAL,
            carbs      REAL,
            fat        REAL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workout_completions (
            id               TEXT PRIMARY KEY,
            client_id        TEXT NOT NULL,
            date             TEXT NOT NULL,
            workout_name     TEXT NOT NULL,
            duration_minutes INTEGER,
            notes            TEXT,
            created_at       TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_workouts_client_date
            ON workout_completions(client_id, date);",
    )?;
    Ok(())
}
