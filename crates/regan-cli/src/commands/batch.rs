//! Batch processing command for multiple report files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use regan_core::models::guest::GuestRecord;

use super::process::{build_extractor, format_records, load_config, load_source, Engine, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction engine
    #[arg(short, long, value_enum, default_value = "rules")]
    engine: Engine,

    /// API key for the genai engine (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Also generate a summary CSV across all files
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    records: Vec<GuestRecord>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = build_extractor(args.engine, args.api_key.as_deref(), &config)?;

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let outcome = analyze_file(&path, extractor.as_ref()).await;

        match outcome {
            Ok(records) => {
                debug!(
                    "{}: {} returning guest(s)",
                    path.display(),
                    records.len()
                );
                results.push(FileResult {
                    path,
                    records,
                    error: None,
                });
            }
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), message);
                    results.push(FileResult {
                        path,
                        records: Vec::new(),
                        error: Some(message),
                    });
                } else {
                    pb.abandon();
                    anyhow::bail!("Failed to process {}: {}", path.display(), message);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish();

    // Write per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for result in results.iter().filter(|r| r.error.is_none()) {
            let stem = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("report");
            let target = output_dir.join(format!("{}.{}", stem, output_extension(args.format)));
            fs::write(&target, format_records(&result.records, args.format)?)?;
        }
    } else {
        for result in results.iter().filter(|r| r.error.is_none()) {
            println!("--- {}", result.path.display());
            println!("{}", format_records(&result.records, args.format)?);
        }
    }

    if args.summary {
        let summary = summary_csv(&results)?;
        match args.output_dir {
            Some(ref output_dir) => {
                let target = output_dir.join("summary.csv");
                fs::write(&target, summary)?;
                println!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    target.display()
                );
            }
            None => println!("{}", summary),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let total_guests: usize = results.iter().map(|r| r.records.len()).sum();
    println!(
        "{} Processed {} file(s), {} failed, {} returning guest(s) in {:.1?}",
        style("✓").green(),
        results.len(),
        failed,
        total_guests,
        start.elapsed()
    );

    Ok(())
}

async fn analyze_file(
    path: &PathBuf,
    extractor: &dyn regan_core::report::GuestExtractor,
) -> anyhow::Result<Vec<GuestRecord>> {
    let source = load_source(path)?;
    Ok(extractor.extract(&source).await?)
}

fn output_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    }
}

/// One row per extracted guest, with the source file in the first column.
fn summary_csv(results: &[FileResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "source_file",
        "guest_name",
        "confirmation_number",
        "identified_by",
        "number_of_previous_stays",
        "fixed_charge_description",
        "fixed_charge_amount",
        "accompanying_guests",
        "error",
    ])?;

    for result in results {
        let source = result.path.display().to_string();

        if let Some(error) = &result.error {
            wtr.write_record([source.as_str(), "", "", "", "", "", "", "", error.as_str()])?;
            continue;
        }

        for record in &result.records {
            wtr.write_record([
                source.as_str(),
                record.guest_name.as_str(),
                record.confirmation_number.as_str(),
                record.identified_by.as_str(),
                record.number_of_previous_stays.as_str(),
                record.fixed_charge_description.as_str(),
                record.fixed_charge_amount.as_str(),
                record.accompanying_guests.as_str(),
                "",
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regan_core::models::guest::IdentifiedBy;

    #[test]
    fn test_summary_csv_includes_failures() {
        let results = vec![
            FileResult {
                path: PathBuf::from("a.txt"),
                records: vec![GuestRecord {
                    guest_name: "Doe, Jane".to_string(),
                    confirmation_number: "XYZ999".to_string(),
                    arrival_date: None,
                    departure_date: None,
                    identified_by: IdentifiedBy::PreviousStays,
                    number_of_previous_stays: "3".to_string(),
                    fixed_charge_description: "None".to_string(),
                    fixed_charge_amount: "N/A".to_string(),
                    accompanying_guests: "Doe, Bob".to_string(),
                }],
                error: None,
            },
            FileResult {
                path: PathBuf::from("b.pdf"),
                records: Vec::new(),
                error: Some("could not read document".to_string()),
            },
        ];

        let csv = summary_csv(&results).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("a.txt,\"Doe, Jane\",XYZ999,Previous Stays"));
        assert!(csv.contains("b.pdf,,,,,,,,could not read document"));
    }

    #[test]
    fn test_output_extension() {
        assert_eq!(output_extension(OutputFormat::Json), "json");
        assert_eq!(output_extension(OutputFormat::Text), "txt");
    }
}
