use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// One schema step. Applied at most once; the `log` table remembers it.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_create_plants",
        description: "Created plants table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS plants (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL,
            type   TEXT NOT NULL DEFAULT '',
            notes  TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
    Migration {
        version: "20250601_0002_create_care_events",
        description: "Created care_events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS care_events (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            plant_id            INTEGER NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
            type                TEXT NOT NULL
                                CHECK(type IN ('WATERING','FERTILIZING','SPRAYING','REPOTTING')),
            interval_days       REAL,
            last_date           INTEGER,
            fertilizer_type     TEXT,
            next_date           INTEGER,
            reminder_date_time  INTEGER,
            done                INTEGER NOT NULL DEFAULT 0,
            reminder_enabled    INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_care_events_plant ON care_events(plant_id);
        "#,
    },
    Migration {
        version: "20250715_0003_add_reminder_time",
        description: "Added reminder_time to care_events",
        sql: "ALTER TABLE care_events ADD COLUMN reminder_time INTEGER;",
    },
    Migration {
        version: "20250715_0004_create_pending_triggers",
        description: "Created pending_triggers table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS pending_triggers (
            key         TEXT PRIMARY KEY,
            due_at      INTEGER NOT NULL,
            scheduled_at INTEGER NOT NULL,
            payload     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pending_triggers_due ON pending_triggers(due_at);
        "#,
    },
    Migration {
        version: "20250902_0005_create_notes",
        description: "Created notes table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS notes (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            text      TEXT NOT NULL,
            date      INTEGER NOT NULL,
            plant_id  INTEGER REFERENCES plants(id) ON DELETE SET NULL,
            done      INTEGER NOT NULL DEFAULT 0
        );
        "#,
    },
    Migration {
        version: "20250902_0006_create_reference_plants",
        description: "Created reference_plants table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS reference_plants (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            description    TEXT NOT NULL DEFAULT '',
            image_res      TEXT,
            watering       TEXT,
            light          TEXT,
            temperature    TEXT,
            fertilizing    TEXT,
            notes          TEXT,
            toxicity_note  TEXT,
            is_favorite    INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_reference_plants_name ON reference_plants(name);
        "#,
    },
    Migration {
        version: "20251020_0007_create_afflictions",
        description: "Created afflictions table, linked reference plants to diseases",
        sql: r#"
        ALTER TABLE reference_plants ADD COLUMN disease_ids TEXT NOT NULL DEFAULT '[]';

        CREATE TABLE IF NOT EXISTS afflictions (
            kind             TEXT NOT NULL CHECK(kind IN ('DISEASE','PEST')),
            id               INTEGER NOT NULL,
            name             TEXT NOT NULL,
            symptoms         TEXT NOT NULL DEFAULT '[]',
            causes           TEXT NOT NULL DEFAULT '[]',
            treatment        TEXT NOT NULL DEFAULT '[]',
            prevention       TEXT NOT NULL DEFAULT '',
            affected_plants  TEXT NOT NULL DEFAULT '[]',
            is_favorite      INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (kind, id)
        );

        CREATE INDEX IF NOT EXISTS idx_afflictions_name ON afflictions(kind, name);
        "#,
    },
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Called by db::init_db(). Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        tracing::info!(version = m.version, "migration applied");
        applied.push(m.version);
    }

    Ok(applied)
}

/// Versions known to this build, in application order.
pub fn known_versions() -> Vec<&'static str> {
    MIGRATIONS.iter().map(|m| m.version).collect()
}
