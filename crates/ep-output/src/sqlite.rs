//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `populations`, `aggregate`, `region_percentages`, and
//! `region_totals`.  Compartment columns follow the writer's [`LogFormat`].

use std::fs;
use std::path::Path;

use ep_core::{AggregateRow, Compartments, LogFormat, RegionId};
use ep_scan::{InitialPopulation, RegionSeries};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes scan results to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    format:   LogFormat,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path, format: LogFormat) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        let cols = Compartments::<f64>::columns(format);
        let real: Vec<String> = cols.iter().map(|c| format!("{c} REAL NOT NULL")).collect();
        let int: Vec<String> = cols.iter().map(|c| format!("{c} INTEGER NOT NULL")).collect();

        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS populations (
                 region     TEXT PRIMARY KEY,
                 population REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS aggregate (
                 sim_time INTEGER PRIMARY KEY,
                 {real},
                 pop_sum  REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS region_percentages (
                 region   TEXT NOT NULL,
                 sim_time INTEGER NOT NULL,
                 {real},
                 PRIMARY KEY (region, sim_time)
             );
             CREATE TABLE IF NOT EXISTS region_totals (
                 region   TEXT NOT NULL,
                 sim_time INTEGER NOT NULL,
                 {int},
                 PRIMARY KEY (region, sim_time)
             );",
            real = real.join(", "),
            int = int.join(", "),
        ))?;

        Ok(Self { conn, format, finished: false })
    }

    fn insert_sql(table: &str, leading: &[&str], format: LogFormat, trailing: &[&str]) -> String {
        let mut cols: Vec<&str> = leading.to_vec();
        cols.extend(Compartments::<f64>::columns(format));
        cols.extend_from_slice(trailing);
        let marks: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT OR REPLACE INTO {table} ({}) VALUES ({})",
            cols.join(", "),
            marks.join(", ")
        )
    }

    fn guard(&self, format: LogFormat) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        if format != self.format {
            tracing::warn!(
                writer = %self.format,
                rows   = %format,
                "row format differs from the schema the database was created with"
            );
        }
        Ok(())
    }
}

fn time_value(time: ep_core::TimeStep) -> Value {
    Value::Integer(time.0 as i64)
}

impl OutputWriter for SqliteWriter {
    fn write_populations(&mut self, populations: &InitialPopulation) -> OutputResult<()> {
        self.guard(self.format)?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO populations (region, population) VALUES (?1, ?2)",
            )?;
            for (region, population) in populations.iter() {
                stmt.execute(rusqlite::params![region.as_str(), population])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_aggregate(&mut self, format: LogFormat, rows: &[AggregateRow]) -> OutputResult<()> {
        self.guard(format)?;
        if rows.is_empty() {
            return Ok(());
        }
        let sql = Self::insert_sql("aggregate", &["sim_time"], format, &["pop_sum"]);
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                let mut values = vec![time_value(row.time)];
                values.extend(row.fractions.values(format).into_iter().map(Value::Real));
                values.push(Value::Real(row.checksum));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_region(&mut self, format: LogFormat, region: &RegionId, series: &RegionSeries) -> OutputResult<()> {
        self.guard(format)?;
        let percent_sql = Self::insert_sql("region_percentages", &["region", "sim_time"], format, &[]);
        let total_sql = Self::insert_sql("region_totals", &["region", "sim_time"], format, &[]);

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(&percent_sql)?;
            for row in &series.percents {
                let mut values = vec![Value::Text(region.to_string()), time_value(row.time)];
                values.extend(row.values.values(format).into_iter().map(Value::Real));
                stmt.execute(params_from_iter(values))?;
            }
            let mut stmt = tx.prepare_cached(&total_sql)?;
            for row in &series.totals {
                let mut values = vec![Value::Text(region.to_string()), time_value(row.time)];
                values.extend(row.values.values(format).into_iter().map(Value::Integer));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
