//! SSPM CLI - Command-line tool for inspecting SSPM rhythm game maps.
//!
//! This is the main entry point for the `sspm` command-line application.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use memmap2::Mmap;
use rayon::prelude::*;
use walkdir::WalkDir;

use sspm::format::DEFAULT_NOTE_DEFINITION;
use sspm::prelude::*;

/// sspm - SSPM map inspection tool
#[derive(Parser)]
#[command(name = "sspm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Marker definition id used for every marker
    #[arg(long, global = true, default_value = DEFAULT_NOTE_DEFINITION)]
    definition: String,

    /// Select each marker's definition by its type byte instead
    #[arg(long, global = true)]
    by_marker_type: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a map
    Info {
        /// Path to the SSPM file
        #[arg(short, long, env = "INPUT_SSPM")]
        input: PathBuf,
    },

    /// Dump a decoded map as JSON
    Dump {
        /// Path to the SSPM file
        #[arg(short, long, env = "INPUT_SSPM")]
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode every map in a directory
    Scan {
        /// Directory to search
        #[arg(short, long, env = "MAPS_FOLDER")]
        dir: PathBuf,

        /// File name pattern (glob-style)
        #[arg(short, long, default_value = "*.sspm")]
        pattern: String,
    },

    /// Compute performance points for a star rating and accuracy
    Pp {
        /// Star rating
        #[arg(short, long)]
        stars: f64,

        /// Accuracy between 0.0 and 1.0
        #[arg(short, long)]
        accuracy: f64,
    },
}

impl Cli {
    fn decode_options(&self) -> DecodeOptions {
        let lookup = if self.by_marker_type {
            DefinitionLookup::ByMarkerType
        } else {
            DefinitionLookup::Fixed(self.definition.clone())
        };
        DecodeOptions::new().with_definition_lookup(lookup)
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let options = cli.decode_options();

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input, &options)?;
        }
        Commands::Dump { input, output } => {
            cmd_dump(&input, output.as_deref(), &options)?;
        }
        Commands::Scan { dir, pattern } => {
            cmd_scan(&dir, &pattern, &options)?;
        }
        Commands::Pp { stars, accuracy } => {
            cmd_pp(stars, accuracy)?;
        }
    }

    Ok(())
}

/// Map a file and decode it.
fn load_map(path: &Path, options: &DecodeOptions) -> Result<ParsedMap> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file)? };

    if !ParsedMap::is_sspm(&mmap) {
        log::warn!("{} does not start with the SSPM signature", path.display());
    }

    ParsedMap::parse_with(&mmap, options).with_context(|| format!("Failed to decode {}", path.display()))
}

fn cmd_info(input: &Path, options: &DecodeOptions) -> Result<()> {
    let start = Instant::now();
    let map = load_map(input, options)?;
    log::info!("Decoded {} in {:?}", input.display(), start.elapsed());

    let header = &map.header;
    let metadata = &map.metadata;
    let strings = &map.strings;

    println!(
        "Signature:    {} (version {})",
        String::from_utf8_lossy(&header.signature),
        header.version
    );
    println!("Map ID:       {}", strings.map_id);
    println!("Map name:     {}", strings.map_name);
    println!("Song name:    {}", strings.song_name);
    println!("Mappers:      {}", strings.mappers.join(", "));
    println!("Hash:         {}", metadata.hash_hex());
    println!("Difficulty:   {}", metadata.difficulty);
    println!("Rating:       {}", metadata.rating);
    println!(
        "Markers:      {} declared, {} decoded ({} notes)",
        metadata.marker_count,
        map.markers.len(),
        map.notes().len()
    );
    println!("Duration:     {} ms", map.duration_ms());
    println!("Requires mod: {}", metadata.requires_mod);
    println!(
        "Audio:        {}",
        map.audio
            .as_ref()
            .map_or("none".to_string(), |a| format!("{} bytes", a.len()))
    );
    println!(
        "Cover:        {}",
        map.cover
            .as_ref()
            .map_or("none".to_string(), |c| format!("{} bytes", c.len()))
    );

    println!("\nMarker definitions:");
    for definition in &map.marker_definitions {
        let types: Vec<String> = definition
            .data_types()
            .zip(&definition.tags)
            .map(|(t, tag)| t.map_or(format!("{:#04x}", tag), |t| t.to_string()))
            .collect();
        println!("  {}: [{}]", definition.id, types.join(", "));
    }

    if !map.custom_data.is_empty() {
        println!("\nCustom data:");
        for field in &map.custom_data.fields {
            match field.decode_value() {
                Ok(value) => println!("  {} = {}", field.id, value),
                Err(e) => println!("  {} = <{} raw bytes: {}>", field.id, field.value.len(), e),
            }
        }
    }

    Ok(())
}

fn cmd_dump(input: &Path, output: Option<&Path>, options: &DecodeOptions) -> Result<()> {
    let mut map = load_map(input, options)?;
    map.sort_markers();

    let mut json = serde_json::to_value(&map).context("Failed to serialize map")?;
    if let Some(object) = json.as_object_mut() {
        object.insert(
            "audio_length".to_string(),
            map.audio.as_ref().map(|a| a.len()).into(),
        );
        object.insert(
            "cover_length".to_string(),
            map.cover.as_ref().map(|c| c.len()).into(),
        );
    }
    let text = serde_json::to_string_pretty(&json)?;

    match output {
        Some(path) => {
            fs::write(path, text).context("Failed to write output file")?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

/// Per-file result of a directory scan.
struct ScanSummary {
    map_name: String,
    notes: usize,
    duration_ms: u32,
}

fn cmd_scan(dir: &Path, pattern: &str, options: &DecodeOptions) -> Result<()> {
    let pattern = glob::Pattern::new(pattern).context("Invalid file pattern")?;

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| pattern.matches(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();

    println!("Decoding {} maps...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut results: Vec<(PathBuf, Result<ScanSummary>)> = files
        .into_par_iter()
        .map(|path| {
            let summary = load_map(&path, options).map(|map| ScanSummary {
                map_name: map.strings.map_name.clone(),
                notes: map.notes().len(),
                duration_ms: map.duration_ms(),
            });
            pb.inc(1);
            (path, summary)
        })
        .collect();

    pb.finish_with_message("Done");
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut errors = 0;
    for (path, result) in &results {
        let name = path.strip_prefix(dir).unwrap_or(path.as_path()).display();
        match result {
            Ok(summary) => println!(
                "{} {:?}: {} notes, {:.1} s",
                name,
                summary.map_name,
                summary.notes,
                f64::from(summary.duration_ms) / 1000.0
            ),
            Err(e) => {
                eprintln!("Error decoding {}: {:#}", name, e);
                errors += 1;
            }
        }
    }

    println!(
        "Decoded {} maps in {:?} ({} errors)",
        results.len() - errors,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn cmd_pp(stars: f64, accuracy: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&accuracy) {
        anyhow::bail!("Accuracy must be between 0.0 and 1.0, got {}", accuracy);
    }

    println!("{}", performance_points(stars, accuracy));

    Ok(())
}
