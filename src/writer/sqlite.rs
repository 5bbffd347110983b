use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar};
use rusqlite::{Connection, Transaction};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::progress_style;
use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use super::value::TableRow;
use crate::generator::{DatasetSink, SiteDataset};
use crate::reference::Site;

const BATCH_SIZE: usize = 1000;

/// Writes every site into one SQLite database, one table per site and kind.
///
/// The database is built at `<db>.tmp` and only replaces `db_path` in
/// `finish`; an unfinished sink removes its staging files on drop.
pub struct SqliteSink {
    conn: Option<Connection>,
    progress: MultiProgress,
    db_path: PathBuf,
    staged_path: PathBuf,
    finished: bool,
}

impl SqliteSink {
    pub fn new(db_path: &Path) -> Result<Self> {
        let staged_path = staged_path(db_path);
        remove_staged(&staged_path);

        let conn = Connection::open(&staged_path).context("Failed to create database")?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        Ok(Self {
            conn: Some(conn),
            progress: MultiProgress::new(),
            db_path: db_path.to_path_buf(),
            staged_path,
            finished: false,
        })
    }

    fn progress_bar(&self, site: Site, table: &str, len: usize) -> Result<ProgressBar> {
        let pb = self.progress.add(ProgressBar::new(len as u64));
        pb.set_style(progress_style()?);
        pb.set_message(format!("{} {}", site, table));
        Ok(pb)
    }
}

impl DatasetSink for SqliteSink {
    /// All three tables of a site land in one transaction
    fn accept(&mut self, dataset: SiteDataset) -> Result<()> {
        let site = dataset.site;
        let bars = [
            self.progress_bar(site, "courses", dataset.courses.rows.len())?,
            self.progress_bar(site, "students", dataset.students.rows.len())?,
            self.progress_bar(site, "assessments", dataset.assessments.rows.len())?,
        ];

        let conn = self.conn.as_mut().context("Database already finished")?;
        let tx = conn.transaction()?;
        let courses = import_table(&tx, site, &dataset.courses.rows, &bars[0])?;
        let students = import_table(&tx, site, &dataset.students.rows, &bars[1])?;
        let assessments = import_table(&tx, site, &dataset.assessments.rows, &bars[2])?;
        tx.commit()
            .with_context(|| format!("Failed to commit tables for {}", site))?;

        info!(site = %site, courses, students, assessments, "Wrote site to SQLite");
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let conn = self.conn.take().context("Database already finished")?;
        conn.execute_batch("PRAGMA optimize; PRAGMA journal_mode = DELETE;")?;
        conn.close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")?;

        fs::rename(&self.staged_path, &self.db_path)
            .with_context(|| format!("Failed to move database into place: {:?}", self.db_path))?;
        self.finished = true;

        info!(path = ?self.db_path, "SQLite database ready");
        Ok(())
    }
}

impl Drop for SqliteSink {
    fn drop(&mut self) {
        if !self.finished {
            drop(self.conn.take());
            warn!(path = ?self.staged_path, "Discarding unfinished database");
            remove_staged(&self.staged_path);
        }
    }
}

fn staged_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Remove a staged database along with its WAL side files
fn remove_staged(staged: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut name = staged.as_os_str().to_owned();
        name.push(suffix);
        fs::remove_file(PathBuf::from(name)).ok();
    }
}

/// Create a site's table and insert its rows in batches
fn import_table<T: TableRow>(
    tx: &Transaction,
    site: Site,
    rows: &[T],
    progress: &ProgressBar,
) -> Result<u64> {
    let schema = T::schema();
    let table = schema.table_name(site);

    tx.execute(&generate_create_table(schema, site), [])
        .with_context(|| format!("Failed to create table: {}", table))?;
    for index_sql in generate_indexes(schema, site) {
        tx.execute(&index_sql, [])
            .with_context(|| format!("Failed to create index for: {}", table))?;
    }

    let insert_sql = generate_insert(schema, site);
    let mut count: u64 = 0;

    for batch in rows.chunks(BATCH_SIZE) {
        insert_batch(tx, &insert_sql, batch)
            .with_context(|| format!("Failed to insert rows into {}", table))?;
        count += batch.len() as u64;
        progress.set_position(count);
    }

    progress.finish_with_message(format!("{}: {} records", table, count));
    Ok(count)
}

/// Insert a batch of rows into the database
fn insert_batch<T: TableRow>(tx: &Transaction, sql: &str, batch: &[T]) -> Result<()> {
    let mut stmt = tx.prepare_cached(sql)?;

    for row in batch {
        for (idx, value) in row.values().iter().enumerate() {
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;
    }

    Ok(())
}
