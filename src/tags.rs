//! Tag table loading.
//!
//! The tag file is a TSV with a header row; each data row maps a
//! `(plate, well)` coordinate to a nucleotide tag sequence. Only the first
//! three columns are read, extra columns are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::well::{Well, PLATE_COUNT};

/// Length of the tag suffix carried into output rows.
const TAG_SUFFIX_LEN: usize = 8;

/// Immutable lookup from `(plate, well)` to tag sequence, loaded once at startup.
#[derive(Debug, Default)]
pub struct TagTable {
    plates: BTreeMap<u8, BTreeMap<Well, String>>,
}

impl TagTable {
    /// Full tag sequence for a well, if the tag file declared one.
    pub fn tag(&self, plate: u8, well: Well) -> Option<&str> {
        self.plates.get(&plate)?.get(&well).map(|s| s.as_str())
    }

    /// Number of distinct plates in the file.
    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    /// `(plate, wells)` counts in plate order, for the load summary.
    pub fn plate_summary(&self) -> Vec<(u8, usize)> {
        self.plates.iter().map(|(p, m)| (*p, m.len())).collect()
    }

    /// First `(plate, well)` of the full 4×96 grid with no tag, if any.
    ///
    /// Output covers the whole grid, so a gap here means the run would fail
    /// partway through a file; callers check this before writing anything.
    pub fn first_gap(&self) -> Option<(u8, Well)> {
        (1..=PLATE_COUNT)
            .flat_map(|p| Well::grid().map(move |w| (p, w)))
            .find(|(p, w)| self.tag(*p, *w).is_none())
    }
}

/// The tag carried into output rows: the last eight characters of the stored
/// sequence, or the whole sequence when shorter.
pub fn short_tag(tag: &str) -> &str {
    &tag[tag.len().saturating_sub(TAG_SUFFIX_LEN)..]
}

/// Load a tag table from a TSV file.
///
/// The file must start with a header row; a first cell of `"1"` is taken as
/// evidence that the header is missing and fails the load. Plate numbers and
/// well coordinates are validated as they are read.
pub fn load_tag_table<P: AsRef<Path>>(path: P) -> Result<TagTable> {
    let p = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .flexible(true)
        .from_path(p)
        .with_context(|| format!("opening tag file {}", p.display()))?;

    let first_cell = rdr
        .headers()
        .with_context(|| format!("reading tag file header in {}", p.display()))?
        .get(0)
        .unwrap_or("")
        .to_string();
    if first_cell == "1" {
        bail!(
            "tag file {} should have a header row (first line starts with a plate number)",
            p.display()
        );
    }

    let mut table = TagTable::default();
    for (i, rec) in rdr.records().enumerate() {
        let line = i + 2; // 1-based, after the header
        let rec = rec.with_context(|| format!("reading tag file {} line {line}", p.display()))?;
        if rec.len() < 3 {
            bail!(
                "tag file {} line {line}: expected at least 3 columns (plate, well, tag), found {}",
                p.display(),
                rec.len()
            );
        }
        let plate: u8 = rec[0]
            .trim()
            .parse()
            .with_context(|| format!("tag file {} line {line}: bad plate number {:?}", p.display(), &rec[0]))?;
        let well: Well = rec[1]
            .trim()
            .parse()
            .map_err(|e: String| anyhow::anyhow!("tag file {} line {line}: {e}", p.display()))?;
        table
            .plates
            .entry(plate)
            .or_default()
            .insert(well, rec[2].trim_end().to_string());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        let mut f = std::fs::File::create(&p).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        p
    }

    #[test]
    fn loads_plates_and_wells() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(
            &dir,
            "tags.tsv",
            "plate\twell\ttag\n1\tA1\tACGTACGTAC\n1\tB1\tTTTTACGTACGT\n2\tA1\tGGGG\n",
        );
        let t = load_tag_table(&p).unwrap();
        assert_eq!(t.plate_count(), 2);
        assert_eq!(t.plate_summary(), vec![(1, 2), (2, 1)]);
        assert_eq!(t.tag(1, "A1".parse().unwrap()), Some("ACGTACGTAC"));
        assert_eq!(t.tag(2, "B1".parse().unwrap()), None);
        assert_eq!(t.tag(3, "A1".parse().unwrap()), None);
        // first gap in canonical order: plate 1 has A1 and B1, C1 is missing
        let (plate, well) = t.first_gap().unwrap();
        assert_eq!((plate, well.to_string().as_str()), (1, "C1"));
    }

    #[test]
    fn short_tag_takes_last_eight() {
        assert_eq!(short_tag("TTTTACGTACGT"), "ACGTACGT");
        assert_eq!(short_tag("ACGT"), "ACGT");
        assert_eq!(short_tag(""), "");
    }

    #[test]
    fn headerless_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(&dir, "tags.tsv", "1\tA1\tACGT\n1\tB1\tTTTT\n");
        let err = load_tag_table(&p).unwrap_err();
        assert!(err.to_string().contains("header"), "{err}");
    }

    #[test]
    fn bad_well_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(&dir, "tags.tsv", "plate\twell\ttag\n1\tZ9\tACGT\n");
        assert!(load_tag_table(&p).is_err());
    }

    #[test]
    fn short_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(&dir, "tags.tsv", "plate\twell\ttag\n1\tA1\n");
        let err = load_tag_table(&p).unwrap_err();
        assert!(err.to_string().contains("3 columns"), "{err}");
    }
}
