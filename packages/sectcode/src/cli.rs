//! Command-line interface for sectcode.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use sectcode_reference::{load_table, nlsc::load_mirror, save_snapshot};

use crate::config::ConverterConfig;
use crate::converter::SectCodeConverter;
use crate::error::{Result, SectCodeError};
use crate::normalizer::Normalizer;
use crate::resolver::SectCode;
use crate::segment::UnitSegmenter;

/// sectcode - Convert Taiwanese cadastral addresses to registry codes.
#[derive(Parser)]
#[command(name = "sectcode")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized form of an address.
    Normalize {
        /// Raw address
        address: String,
    },

    /// Print the county, town, section and parcel fields of an address.
    Tokenize {
        /// Raw address
        address: String,

        /// Reference data: YAML snapshot or NLSC mirror directory
        /// (default: $SECTCODE_REFERENCE)
        #[arg(short, long)]
        reference: Option<PathBuf>,
    },

    /// Convert addresses to county, town, section and parcel codes.
    Convert {
        /// Raw addresses
        addresses: Vec<String>,

        /// Read addresses from a file, one per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reference data: YAML snapshot or NLSC mirror directory
        /// (default: $SECTCODE_REFERENCE)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split an address into unit tokens and single addresses.
    Segment {
        /// Raw address text, possibly holding several addresses
        address: String,

        /// Reference data used to keep town names whole
        /// (default: $SECTCODE_REFERENCE)
        #[arg(short, long)]
        reference: Option<PathBuf>,
    },

    /// Convert an NLSC mirror directory to a YAML snapshot.
    Snapshot {
        /// Directory holding ListCounty.xml, ListTown/ and ListLandSection/
        mirror: PathBuf,

        /// Output YAML file
        output: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { address } => normalize_command(&address),
        Commands::Tokenize { address, reference } => tokenize_command(&address, reference),
        Commands::Convert {
            addresses,
            input,
            reference,
            json,
        } => convert_command(addresses, input.as_deref(), reference, json),
        Commands::Segment { address, reference } => segment_command(&address, reference),
        Commands::Snapshot { mirror, output } => snapshot_command(&mirror, &output),
    }
}

/// Environment configuration with an optional `--reference` override.
fn load_config(reference: Option<PathBuf>) -> Result<ConverterConfig> {
    let config = ConverterConfig::from_env()?;
    Ok(match reference {
        Some(path) => config.with_reference(path),
        None => config,
    })
}

fn normalize_command(address: &str) -> Result<()> {
    let config = ConverterConfig::from_env()?;
    println!("{}", Normalizer::new(config.tai).normalize(address));
    Ok(())
}

fn tokenize_command(address: &str, reference: Option<PathBuf>) -> Result<()> {
    let config = load_config(reference)?;
    let converter = SectCodeConverter::from_config(&config)?;
    let token = converter.tokenize(address);

    println!("  County:  {}", style(&token.county).green());
    println!("  Town:    {}", style(&token.town).green());
    println!("  Section: {}", style(&token.section).green());
    if token.parcel.is_empty() {
        println!("  Parcel:  {}", style("(none)").dim());
    } else {
        println!(
            "  Parcel:  {}{}",
            style(&token.parcel.value).green(),
            style(&token.parcel.unit).dim()
        );
    }

    Ok(())
}

/// One line of `convert --json` output.
#[derive(Debug, Serialize)]
struct ConversionRecord {
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<SectCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn convert_command(
    mut addresses: Vec<String>,
    input: Option<&Path>,
    reference: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if let Some(path) = input {
        let content = std::fs::read_to_string(path)?;
        addresses.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if addresses.is_empty() {
        return Err(SectCodeError::Config(
            "no addresses given; pass them as arguments or with --input".to_string(),
        ));
    }

    let config = load_config(reference)?;
    let converter = SectCodeConverter::from_config(&config)?;

    let pb = if input.is_some() && !json {
        ProgressBar::new(addresses.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let records: Vec<ConversionRecord> = addresses
        .into_iter()
        .map(|address| {
            pb.inc(1);
            match converter.convert_address(&address) {
                Ok(code) => ConversionRecord {
                    address,
                    code: Some(code),
                    error: None,
                },
                Err(e) => ConversionRecord {
                    address,
                    code: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();
    pb.finish_and_clear();

    let total = records.len();
    let unresolved = records.iter().filter(|r| r.error.is_some()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            print_record(record);
        }
        println!();
        println!(
            "{} {} converted, {} unresolved",
            style("Done:").green().bold(),
            total - unresolved,
            unresolved
        );
    }

    if unresolved > 0 {
        return Err(SectCodeError::BatchUnresolved { unresolved, total });
    }
    Ok(())
}

fn print_record(record: &ConversionRecord) {
    println!("{}", style(&record.address).bold());
    if let Some(code) = &record.code {
        println!(
            "  {} {} {} {}",
            style(&code.county_code).cyan(),
            style(&code.town_code).cyan(),
            style(&code.section_code).cyan(),
            code.parcel_code_strings().join(",")
        );
        for warning in &code.warnings {
            println!("  {} {}", style("Skipped:").yellow(), warning);
        }
    }
    if let Some(error) = &record.error {
        println!("  {} {}", style("Unresolved:").red(), error);
    }
}

fn segment_command(address: &str, reference: Option<PathBuf>) -> Result<()> {
    let config = load_config(reference)?;
    let stems = match &config.reference {
        Some(path) => load_table(path)?.town_name_stems(),
        None => Vec::new(),
    };
    let segmenter = UnitSegmenter::new(&stems)?;
    let segments = segmenter.segment(&Normalizer::new(config.tai).normalize(address));

    for token in &segments.tokens {
        println!(
            "  {:<14} {}{}",
            format!("{:?}", token.level()),
            style(&token.value).green(),
            style(&token.unit).dim()
        );
    }
    println!();
    for single in segments.split_addresses() {
        println!("{single}");
    }

    Ok(())
}

fn snapshot_command(mirror: &Path, output: &Path) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Reading mirror...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let snapshot = match load_mirror(mirror) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.set_message("Saving snapshot...");
    let saved = save_snapshot(&snapshot, output);
    pb.finish_and_clear();
    saved?;

    println!("  Counties: {}", snapshot.counties.len());
    println!("  Towns: {}", snapshot.town_count());
    println!("  Sections: {}", snapshot.section_count());
    println!();
    println!("{} {}", style("Saved to:").green().bold(), output.display());

    Ok(())
}
