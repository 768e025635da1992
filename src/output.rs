//! Tag file emission.
//!
//! One output file per library: a 5-column TSV with one row per well of the
//! full 4×96 grid, in canonical order. Wells the library never filled (and
//! whole plates it never declared) are emitted as `not_used<N>` placeholder
//! rows so downstream demultiplexing still accounts for every tag.
//!
//! The optional matrix output is the combined view: one row per tag with a
//! sample column for every library in the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::library::Library;
use crate::primers::PrimerSet;
use crate::repeats::NotUsedCounter;
use crate::tags::{short_tag, TagTable};
use crate::well::{Well, PLATE_COUNT};

/// Fixed header of every per-library tag file.
pub const TAGFILE_HEADER: [&str; 5] = ["#exp", "sample", "tags", "forward_primer", "reverse_primer"];

/// Output path for a library: `<outdir>/<name>_<primer_key>_tag.tsv`.
pub fn output_path(outdir: &Path, library_name: &str, primer_key: &str) -> PathBuf {
    outdir.join(format!("{library_name}_{primer_key}_tag.tsv"))
}

fn tag_for(tags: &TagTable, plate: u8, well: Well) -> Result<&str> {
    tags.tag(plate, well)
        .with_context(|| format!("tag file has no tag for plate {plate} well {well}"))
}

/// Write one tag file covering the full grid.
///
/// `library` is `None` for a declared not-used library: every row is then a
/// placeholder. `exp_name` fills the first column either way, so a not-used
/// file carries its own name rather than a leftover from another library.
pub fn write_tagfile(
    path: &Path,
    exp_name: &str,
    library: Option<&Library>,
    tags: &TagTable,
    primer: &PrimerSet,
    counter: &mut NotUsedCounter,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    wtr.write_record(TAGFILE_HEADER)?;

    for plate in 1..=PLATE_COUNT {
        for well in Well::grid() {
            let tag = tag_for(tags, plate, well)?;
            let sample = match library.and_then(|l| l.sample(plate, well)) {
                Some(s) => s.to_string(),
                None => counter.next_name(),
            };
            wtr.write_record([exp_name, sample.as_str(), short_tag(tag), primer.forward, primer.reverse])?;
        }
    }
    wtr.flush()
        .with_context(|| format!("writing output file {}", path.display()))?;
    Ok(())
}

/// Write the combined matrix: one row per (plate, well) with a global
/// 1-based tag number, the full tag sequence, and one sample column per
/// library (real libraries in load order, then not-used names).
pub fn write_matrix(
    path: &Path,
    libraries: &[Library],
    not_used_names: &[String],
    tags: &TagTable,
    counter: &mut NotUsedCounter,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating matrix file {}", path.display()))?;

    let mut header: Vec<&str> = vec!["Tag_number", "Tag"];
    header.extend(libraries.iter().map(|l| l.name.as_str()));
    header.extend(not_used_names.iter().map(|n| n.as_str()));
    wtr.write_record(&header)?;

    let mut tag_number: u32 = 0;
    for plate in 1..=PLATE_COUNT {
        for well in Well::grid() {
            tag_number += 1;
            let tag = tag_for(tags, plate, well)?;
            let mut row: Vec<String> = vec![tag_number.to_string(), tag.to_string()];
            for lib in libraries {
                row.push(match lib.sample(plate, well) {
                    Some(s) => s.to_string(),
                    None => counter.next_name(),
                });
            }
            for _ in not_used_names {
                row.push(counter.next_name());
            }
            wtr.write_record(&row)?;
        }
    }
    wtr.flush()
        .with_context(|| format!("writing matrix file {}", path.display()))?;
    Ok(())
}
