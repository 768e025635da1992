use std::path::PathBuf;

use clap::Parser;

use platetag::prep::{run_prep, PrepOpts};

/// Platetag CLI
#[derive(Parser)]
#[command(name = "platetag")]
#[command(version)]
#[command(about = "Creates per-library tagfiles from plate layouts and a tag lookup table", long_about = None)]
struct Cli {
    /// Tag file (TSV with header: plate, well, tag)
    #[arg(short = 't', long = "tags", required_unless_present = "list_primers")]
    tags: Option<PathBuf>,

    /// Library layout files to add (one output file each)
    #[arg(short = 'l', long = "libraries", num_args = 1.., required_unless_present = "list_primers")]
    libraries: Vec<PathBuf>,

    /// Primer key used in sequencing (see --list-primers)
    #[arg(short = 'p', long = "primer")]
    primer: Option<String>,

    /// Output directory (created if absent)
    #[arg(short = 'o', long = "outdir", required_unless_present = "list_primers")]
    outdir: Option<PathBuf>,

    /// Libraries with no samples for this primer (full placeholder output)
    #[arg(short = 'n', long = "notused", num_args = 1..)]
    notused: Vec<String>,

    /// Also write a combined tag matrix (one sample column per library)
    #[arg(short = 'm', long = "matrix")]
    matrix: Option<PathBuf>,

    /// List the compiled-in primer sets and exit
    #[arg(long = "list-primers")]
    list_primers: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_primers {
        cmd_list_primers();
        return Ok(());
    }

    // required_unless_present guarantees these are set past this point
    let (Some(tags), Some(outdir)) = (cli.tags, cli.outdir) else {
        anyhow::bail!("missing required arguments; see --help");
    };

    run_prep(PrepOpts {
        tags,
        libraries: cli.libraries,
        primer: cli.primer,
        outdir,
        not_used: cli.notused,
        matrix: cli.matrix,
    })
}

fn cmd_list_primers() {
    println!("{:<6}{:<26}{:<26}{}", "key", "forward", "reverse", "description");
    for (key, description, forward, reverse) in platetag::list_primer_rows() {
        println!("{key:<6}{forward:<26}{reverse:<26}{description}");
    }
}
