//! kontocsv: export Kontoudskrift statement dumps to a single CSV ledger.
//!
//! Feed it a directory of per-statement HTML dumps (as produced by
//! `mutool convert -F html <statement>.pdf`); it reconstructs every
//! transaction and writes one date-sorted, header-less CSV.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::RegexBuilder;

use kontocsv_ingest::parsers::kontoudskrift::parse_document;
use kontocsv_ingest::types::{BankEntry, StatementLayout};

#[derive(Parser, Debug)]
#[command(name = "kontocsv", version, about = "Kontoudskrift statement export")]
struct Cli {
    /// Directory holding "<account> Kontoudskrift <n>.html" dumps
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output CSV path (default: <dir>/kontoudskrift.csv)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let statements = find_statements(&cli.dir)?;
    if statements.is_empty() {
        bail!("no Kontoudskrift dumps found in {}", cli.dir.display());
    }

    let layout = StatementLayout::default();
    let mut entries: Vec<BankEntry> = Vec::new();
    for path in &statements {
        let html = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let parsed = parse_document(&html, &layout)
            .with_context(|| format!("parsing {}", path.display()))?;
        println!("{}: {} entries", path.display(), parsed.len());
        entries.extend(parsed);
    }

    // Stable sort: same-day entries keep statement order.
    entries.sort_by_key(|entry| entry.entry_date);

    let out = cli.out.unwrap_or_else(|| cli.dir.join("kontoudskrift.csv"));
    write_csv(&entries, &out)?;
    println!("Wrote {} entries to {}", entries.len(), out.display());

    Ok(())
}

/// Statement dumps in `dir`, matched by the bank's filename convention and
/// sorted by path so document order is deterministic.
fn find_statements(dir: &Path) -> Result<Vec<PathBuf>> {
    let name_re = RegexBuilder::new(r"^\d+ kontoudskrift \d+\.html$")
        .case_insensitive(true)
        .build()?;

    let mut paths = Vec::new();
    for dent in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let dent = dent?;
        if dent.file_name().to_str().is_some_and(|name| name_re.is_match(name)) {
            paths.push(dent.path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn write_csv(entries: &[BankEntry], out: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(out).with_context(|| format!("creating {}", out.display()))?;
    for entry in entries {
        writer.write_record(entry.as_row())?;
    }
    writer.flush()?;
    Ok(())
}
