// 💾 Details Persistence - Five-line snapshot of a driver record
//
// ID: <identifier>
// First Name: <first name>
// Last Name: <last name>
// Address: <address>
// Birthdate: <dd-MM-yyyy>
//
// Every write replaces the previous contents entirely.

use crate::record::DriverDetails;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name for the details snapshot
pub const DEFAULT_DETAILS_FILE: &str = "Details.txt";

/// Render the five labelled lines, each terminated by a newline
pub fn render_details(details: &DriverDetails) -> String {
    format!(
        "ID: {}\nFirst Name: {}\nLast Name: {}\nAddress: {}\nBirthdate: {}\n",
        details.identifier(),
        details.first_name(),
        details.last_name(),
        details.address(),
        details.birth_date().literal(),
    )
}

// ============================================================================
// SINK TRAIT
// ============================================================================

/// Destination for committed snapshots. Called after every successful
/// register or update, never after a rejection or an accrual.
pub trait DetailsSink {
    fn write_details(&mut self, details: &DriverDetails) -> Result<()>;
}

// ============================================================================
// FILE SINK
// ============================================================================

#[derive(Debug, Clone)]
pub struct DetailsFile {
    path: PathBuf,
}

impl DetailsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        DetailsFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DetailsFile {
    fn default() -> Self {
        Self::new(DEFAULT_DETAILS_FILE)
    }
}

impl DetailsSink for DetailsFile {
    fn write_details(&mut self, details: &DriverDetails) -> Result<()> {
        // fs::write truncates before writing
        fs::write(&self.path, render_details(details))
            .with_context(|| format!("Failed to write details file: {:?}", self.path))
    }
}

// ============================================================================
// MEMORY SINK
// ============================================================================

/// Keeps every rendered snapshot in write order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, as a file sink would hold them
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl DetailsSink for MemorySink {
    fn write_details(&mut self, details: &DriverDetails) -> Result<()> {
        self.writes.push(render_details(details));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
