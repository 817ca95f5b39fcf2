//! SQLite persistence for named simulation snapshots.
//!
//! RULE: Only store.rs talks to the database.
//! The simulation engine never reads or writes here; the dashboard saves
//! an input and its result together as one row.

use crate::{
    error::{DashError, DashResult},
    simulation::{SimulationInput, SimulationResult},
    snapshot::{NamedSnapshot, SnapshotMeta},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Open (or create) the snapshot database at `path`.
    pub fn open(path: &str) -> DashResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DashResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DashResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_snapshots.sql"))?;
        Ok(())
    }

    /// Save under `name`, replacing any snapshot already stored there.
    /// The id of a replaced snapshot is kept.
    pub fn save(
        &self,
        name: &str,
        input: &SimulationInput,
        result: &SimulationResult,
    ) -> DashResult<NamedSnapshot> {
        let id = uuid::Uuid::new_v4().to_string();
        let saved_at = Utc::now();
        self.conn.execute(
            "INSERT INTO snapshot (id, name, saved_at, input_json, result_json)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE SET
                saved_at    = excluded.saved_at,
                input_json  = excluded.input_json,
                result_json = excluded.result_json",
            params![
                id,
                name,
                saved_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                serde_json::to_string(input)?,
                serde_json::to_string(result)?,
            ],
        )?;
        log::info!("snapshot saved: {name}");
        self.load(name)
    }

    pub fn load(&self, name: &str) -> DashResult<NamedSnapshot> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, saved_at, input_json, result_json
                 FROM snapshot WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let (id, name, saved_at, input_json, result_json) =
            row.ok_or_else(|| DashError::SnapshotNotFound { name: name.to_string() })?;

        Ok(NamedSnapshot {
            id,
            name,
            saved_at: parse_timestamp(&saved_at)?,
            input: serde_json::from_str(&input_json)?,
            result: serde_json::from_str(&result_json)?,
        })
    }

    /// All snapshots, newest first. Timestamps are fixed-width so they
    /// sort as text; rowid breaks ties between saves in the same instant.
    pub fn list(&self) -> DashResult<Vec<SnapshotMeta>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, saved_at FROM snapshot
             ORDER BY saved_at DESC, rowid DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, saved_at)| {
                Ok(SnapshotMeta { id, name, saved_at: parse_timestamp(&saved_at)? })
            })
            .collect()
    }

    pub fn delete(&self, name: &str) -> DashResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM snapshot WHERE name = ?1", params![name])?;
        if removed == 0 {
            return Err(DashError::SnapshotNotFound { name: name.to_string() });
        }
        log::info!("snapshot deleted: {name}");
        Ok(())
    }

    pub fn count(&self) -> DashResult<i64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM snapshot", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn parse_timestamp(raw: &str) -> DashResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DashError::Other(anyhow::anyhow!("bad snapshot timestamp {raw}: {e}")))
}
