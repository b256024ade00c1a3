use std::path::Path;

use rusqlite::{params, Connection};

use crate::action::ActionLabel;
use crate::error::Result;
use crate::metrics::HandMetrics;
use crate::pose::PoseLabel;

/// Embedded store for per-frame gesture results. Two flat tables, one row
/// in each per detected hand per frame:
/// `HandMetrics(HandSize, FingerLengths, HandPose)` and
/// `HandActions(HandAction, FingerCount)`.
pub struct GestureStore {
    conn: Connection,
}

impl GestureStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS HandMetrics (
                 HandSize      REAL NOT NULL,
                 FingerLengths TEXT NOT NULL,
                 HandPose      TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS HandActions (
                 HandAction  TEXT NOT NULL,
                 FingerCount INTEGER NOT NULL
             );",
        )?;
        Ok(Self { conn })
    }

    pub fn insert_metrics(&self, metrics: &HandMetrics, pose: PoseLabel) -> Result<()> {
        self.conn.execute(
            "INSERT INTO HandMetrics (HandSize, FingerLengths, HandPose) VALUES (?1, ?2, ?3)",
            params![
                metrics.hand_size as f64,
                metrics.finger_lengths_text(),
                pose.name()
            ],
        )?;
        Ok(())
    }

    pub fn insert_action(&self, action: ActionLabel, finger_count: u8) -> Result<()> {
        self.conn.execute(
            "INSERT INTO HandActions (HandAction, FingerCount) VALUES (?1, ?2)",
            params![action.name(), finger_count as i64],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_rows_round_trip() {
        let store = GestureStore::open_in_memory().unwrap();
        let metrics = HandMetrics {
            hand_size: 12.5,
            finger_lengths: [1.0, 2.0, 3.0, 4.0, 5.0],
        };
        store
            .insert_metrics(&metrics, PoseLabel::TwoFingers)
            .unwrap();

        let (size, lengths, pose): (f64, String, String) = store
            .conn
            .query_row(
                "SELECT HandSize, FingerLengths, HandPose FROM HandMetrics",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert!((size - 12.5).abs() < 1e-9);
        assert_eq!(lengths, "1,2,3,4,5");
        assert_eq!(pose, "Two Fingers");
    }

    #[test]
    fn action_rows_round_trip() {
        let store = GestureStore::open_in_memory().unwrap();
        store.insert_action(ActionLabel::Grab, 0).unwrap();

        let (action, count): (String, i64) = store
            .conn
            .query_row(
                "SELECT HandAction, FingerCount FROM HandActions",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(action, "Grab");
        assert_eq!(count, 0);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let path = std::env::temp_dir().join(format!(
            "handtracking-store-test-{}.sqlite",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = GestureStore::open(&path).unwrap();
            store.insert_action(ActionLabel::Point, 1).unwrap();
        }

        // second open runs the schema pass again and must not clobber rows
        let store = GestureStore::open(&path).unwrap();
        let count: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM HandActions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        drop(store);
        let _ = std::fs::remove_file(&path);
    }
}
