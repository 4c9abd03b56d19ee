// src/table.rs

use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::ColumnRenameMap;
use crate::error::Result;

/// Rows of places under named columns. Every value is kept as the text the API sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl PlaceTable {
    /// Callers guarantee every row has `columns.len()` values.
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Rename columns found in `map`; others keep their name. Returns how many changed.
    pub fn rename_columns(&mut self, map: &ColumnRenameMap) -> usize {
        let mut renamed = 0;
        for col in self.columns.iter_mut() {
            if let Some(new_name) = map.get(col.as_str()) {
                debug!(from = %col, to = %new_name, "rename column");
                *col = new_name.clone();
                renamed += 1;
            }
        }
        renamed
    }

    /// Write header + rows as CSV. The file only appears once fully written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut wtr = WriterBuilder::new().from_writer(tmp.as_file());
            wtr.write_record(&self.columns)?;
            for row in &self.rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        tmp.persist(path).map_err(|e| e.error)?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote csv");
        Ok(())
    }

    /// Read a CSV written by [`PlaceTable::write_csv`]. Values stay strings.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let columns = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self { columns, rows })
    }
}
