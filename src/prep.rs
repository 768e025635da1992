//! Pipeline driver: load everything, annotate, then write.
//!
//! All validation (primer key, tag table, sample names) happens in the load
//! phase, so a failing run aborts before the first output file is created.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::library::{library_name_from_path, load_library, Library};
use crate::output::{output_path, write_matrix, write_tagfile};
use crate::primers::{get_primer_set, known_keys, PrimerSet};
use crate::repeats::{annotate_repeats, NotUsedCounter};
use crate::tags::load_tag_table;

/// Options for one run, mirroring the command line.
#[derive(Debug)]
pub struct PrepOpts {
    /// Tag file path (TSV: plate, well, tag).
    pub tags: PathBuf,
    /// Library spreadsheet exports, one output file each.
    pub libraries: Vec<PathBuf>,
    /// Primer key; must resolve against the compiled-in registry.
    pub primer: Option<String>,
    /// Output directory, created if absent.
    pub outdir: PathBuf,
    /// Names of libraries with no samples for this primer.
    pub not_used: Vec<String>,
    /// Optional combined matrix output path.
    pub matrix: Option<PathBuf>,
}

fn resolve_primer(key: Option<&str>) -> Result<&'static PrimerSet> {
    match key {
        None => bail!("no primer key given (-p/--primer); known keys: {}", known_keys()),
        Some(k) => match get_primer_set(k) {
            Some(p) => Ok(p),
            None => bail!("unknown primer key {k:?}; known keys: {}", known_keys()),
        },
    }
}

/// Run the whole pipeline.
pub fn run_prep(opts: PrepOpts) -> Result<()> {
    let primer = resolve_primer(opts.primer.as_deref())?;

    let tags = load_tag_table(&opts.tags)?;
    eprintln!("Loaded {} tag plates from {}", tags.plate_count(), opts.tags.display());
    for (plate, wells) in tags.plate_summary() {
        eprintln!("  plate {plate}: {wells} wells");
    }
    if let Some((plate, well)) = tags.first_gap() {
        bail!(
            "tag file {} has no tag for plate {plate} well {well}; every output covers the full 4x96 grid",
            opts.tags.display()
        );
    }

    let mut libraries: Vec<Library> = Vec::new();
    for path in &opts.libraries {
        eprintln!("Loading library: {}", path.display());
        let lib = load_library(path)?;
        if libraries.iter().any(|l| l.name == lib.name) {
            bail!(
                "duplicate library name {:?} (derived from {}); outputs would overwrite each other",
                lib.name,
                path.display()
            );
        }
        eprintln!("  {}: {} samples", lib.name, lib.sample_count());
        libraries.push(lib);
    }

    let not_used_names: Vec<String> = opts
        .not_used
        .iter()
        .map(library_name_from_path)
        .collect::<Result<_>>()?;

    // Repeat annotation and the count dump, before any file is written.
    for lib in &mut libraries {
        let counts = annotate_repeats(lib);
        println!("{}:", lib.name);
        for (sample, n) in &counts {
            println!("  {sample}: {n}");
        }
    }

    std::fs::create_dir_all(&opts.outdir)?;
    let mut counter = NotUsedCounter::new();

    for lib in &libraries {
        let path = output_path(&opts.outdir, &lib.name, primer.key);
        write_tagfile(&path, &lib.name, Some(lib), &tags, primer, &mut counter)?;
        eprintln!("Wrote {}", path.display());
    }
    for name in &not_used_names {
        let path = output_path(&opts.outdir, name, primer.key);
        write_tagfile(&path, name, None, &tags, primer, &mut counter)?;
        eprintln!("Wrote {}", path.display());
    }
    if let Some(matrix) = &opts.matrix {
        write_matrix(matrix, &libraries, &not_used_names, &tags, &mut counter)?;
        eprintln!("Wrote {}", matrix.display());
    }

    eprintln!("Issued {} not_used placeholders", counter.issued());
    Ok(())
}
