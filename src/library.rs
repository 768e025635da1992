//! Library loading.
//!
//! A library file is a tab-separated spreadsheet export. The plate layouts
//! are embedded between two markers: a line containing `Primer plate N`
//! starts the layout of plate N, and a line containing `Extract plate`
//! (the extraction layouts further down the sheet) stops parsing entirely.
//!
//! Inside a plate section, each well-row carries the row letter in the
//! second column and the samples for columns 1–12 in the twelve columns
//! after it. Cells past the twelfth sample column are ignored. Empty cells
//! leave the well unoccupied.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::well::{Well, COLS, PLATE_COUNT};

/// One library: a named batch of up to four plate layouts.
#[derive(Debug)]
pub struct Library {
    /// Name derived from the input filename (basename, truncated at the first `.`).
    pub name: String,
    /// Plate number to occupied wells. Only occupied wells are present.
    pub plates: BTreeMap<u8, BTreeMap<Well, String>>,
}

impl Library {
    /// Sample name at a well, if occupied.
    pub fn sample(&self, plate: u8, well: Well) -> Option<&str> {
        self.plates.get(&plate)?.get(&well).map(|s| s.as_str())
    }

    /// Total occupied wells across all plates.
    pub fn sample_count(&self) -> usize {
        self.plates.values().map(|m| m.len()).sum()
    }
}

/// Fail unless every character of a sample name is in `[A-Za-z0-9_-]`.
///
/// This is the only content-correctness guard in the pipeline; it exists to
/// catch stray spaces and spreadsheet artifacts before they reach a tag file.
pub fn check_sample_name(name: &str) -> Result<()> {
    if name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        bail!("sample name {name:?} contains invalid characters (allowed: A-Z a-z 0-9 _ -)")
    }
}

/// Derive a library name from its file path: basename, truncated at the
/// first `.` so spreadsheet double extensions (`.layout.xls`) drop away.
pub fn library_name_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let p = path.as_ref();
    let base = p
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = base.split('.').next().unwrap_or_default();
    if name.is_empty() {
        bail!("cannot derive a library name from {}", p.display());
    }
    Ok(name.to_string())
}

/// Load one library file.
pub fn load_library<P: AsRef<Path>>(path: P) -> Result<Library> {
    let p = path.as_ref();
    let name = library_name_from_path(p)?;
    let file = File::open(p).with_context(|| format!("opening library file {}", p.display()))?;

    let mut plates: BTreeMap<u8, BTreeMap<Well, String>> = BTreeMap::new();
    let mut current_plate: Option<u8> = None;

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("reading {} line {lineno}", p.display()))?;

        // Extraction layouts follow the primer layouts; nothing below them is ours.
        if line.contains("Extract plate") {
            break;
        }

        let fields: Vec<&str> = line.split('\t').collect();

        if line.contains("Primer plate") {
            let token = fields[0].trim_end().rsplit(' ').next().unwrap_or_default();
            let plate: u8 = token.parse().with_context(|| {
                format!("{} line {lineno}: cannot read a plate number from {:?}", p.display(), fields[0])
            })?;
            if !(1..=PLATE_COUNT).contains(&plate) {
                bail!(
                    "{} line {lineno}: plate number {plate} out of range 1-{PLATE_COUNT}",
                    p.display()
                );
            }
            // A repeated marker restarts that plate's layout.
            plates.insert(plate, BTreeMap::new());
            current_plate = Some(plate);
            continue;
        }

        let Some(plate) = current_plate else { continue };
        let row_cell = fields.get(1).map(|s| s.trim()).unwrap_or_default();
        if row_cell.is_empty() {
            continue;
        }

        let mut row_chars = row_cell.chars();
        let row_letter = row_chars.next().unwrap_or('\0');
        if row_chars.next().is_some() || Well::new(row_letter, 1).is_none() {
            bail!(
                "{} line {lineno}: expected a row letter A-H in column 2, found {row_cell:?}",
                p.display()
            );
        }

        for (i, cell) in fields.iter().skip(2).take(COLS as usize).enumerate() {
            let col = (i + 1) as u8;
            // Right-trim only: leading whitespace is an invalid character and
            // should fail the whitelist, not vanish silently.
            let sample = cell.trim_end();
            check_sample_name(sample)
                .with_context(|| format!("{} line {lineno}, well {row_letter}{col}", p.display()))?;
            if sample.is_empty() {
                continue;
            }
            if let Some(well) = Well::new(row_letter, col) {
                plates
                    .entry(plate)
                    .or_default()
                    .insert(well, sample.to_string());
            }
        }
    }

    Ok(Library { name, plates })
}
