//! SQLite-backed point store: schema, connection pragmas, batched loading,
//! range queries, and online backup.

use crate::error::{Error, Result};
use crate::generate::Point;
use crate::query::BoundingBox;
use rusqlite::backup::Backup;
use rusqlite::{params, Connection, Row, Transaction};
use std::path::Path;
use std::time::Duration;

/// Default rows-per-transaction for batched loads.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Pages copied per online-backup step.
const BACKUP_PAGES_PER_STEP: i32 = 4096;

/// Exclusively-owned handle to one SQLite database holding the `points`
/// table. Threaded explicitly through the generator, loader, and query
/// paths; there is no shared global connection.
pub struct PointStore {
    conn: Connection,
}

impl PointStore {
    /// Open an in-memory store, the default for benchmark runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    /// Open (or create) a file-backed store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    /// Create the points table and its composite coordinate index.
    ///
    /// The index must exist before any range query runs; `query_bbox`
    /// relies on it for O(log N + k) candidate retrieval.
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS points (
                 x REAL NOT NULL,
                 y REAL NOT NULL,
                 z REAL NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_points_xyz ON points (x, y, z);",
        )?;
        Ok(())
    }

    /// Insert points in chunks of at most `batch_size` rows, one
    /// transaction per chunk, so the load is amortized rather than issued
    /// as N single-row commits.
    ///
    /// Returns the number of rows committed. A storage error aborts the
    /// load; chunks committed before the failure stay durable and their
    /// row count is carried in the error.
    pub fn insert_batch(&mut self, points: &[Point], batch_size: usize) -> Result<usize> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }

        let mut committed = 0usize;
        for chunk in points.chunks(batch_size) {
            let tx = self
                .conn
                .transaction()
                .map_err(|source| Error::StorageWrite { committed, source })?;
            insert_chunk(&tx, chunk).map_err(|source| Error::StorageWrite { committed, source })?;
            tx.commit()
                .map_err(|source| Error::StorageWrite { committed, source })?;
            committed += chunk.len();
        }
        Ok(committed)
    }

    /// Total number of stored points.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM points", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Index-backed range query: every stored point inside the box,
    /// boundary faces included.
    pub fn query_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Point>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT x, y, z FROM points
             WHERE x BETWEEN ?1 AND ?2
               AND y BETWEEN ?3 AND ?4
               AND z BETWEEN ?5 AND ?6",
        )?;
        let rows = stmt.query_map(
            params![
                bbox.xmin, bbox.xmax, bbox.ymin, bbox.ymax, bbox.zmin, bbox.zmax
            ],
            point_from_row,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Exact sphere membership evaluated inside SQL over the full table.
    /// No index assistance; cost is O(N) regardless of hit count.
    pub fn query_ball(&self, center: Point, radius: f64) -> Result<Vec<Point>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT x, y, z FROM points
             WHERE (x - ?1) * (x - ?1)
                 + (y - ?2) * (y - ?2)
                 + (z - ?3) * (z - ?3) <= ?4 * ?4",
        )?;
        let rows = stmt.query_map(
            params![center.x, center.y, center.z, radius],
            point_from_row,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Every stored point, in storage order.
    pub fn query_all(&self) -> Result<Vec<Point>> {
        let mut stmt = self.conn.prepare_cached("SELECT x, y, z FROM points")?;
        let rows = stmt.query_map([], point_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Copy the store to `path` with SQLite's online backup API.
    ///
    /// The source keeps serving reads during and after the copy; reopening
    /// the destination yields the same table and index.
    pub fn backup_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut dst = Connection::open(path).map_err(Error::Backup)?;
        let backup = Backup::new(&self.conn, &mut dst).map_err(Error::Backup)?;
        backup
            .run_to_completion(BACKUP_PAGES_PER_STEP, Duration::ZERO, None)
            .map_err(Error::Backup)?;
        Ok(())
    }
}

fn insert_chunk(tx: &Transaction, chunk: &[Point]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached("INSERT INTO points (x, y, z) VALUES (?1, ?2, ?3)")?;
    for p in chunk {
        stmt.execute(params![p.x, p.y, p.z])?;
    }
    Ok(())
}

fn point_from_row(row: &Row<'_>) -> rusqlite::Result<Point> {
    Ok(Point::new(row.get(0)?, row.get(1)?, row.get(2)?))
}

/// Configure a connection for in-memory benchmarking.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = OFF;
         PRAGMA cache_size = -131072;
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}
