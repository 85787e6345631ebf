//! Process command - analyze a single arrivals report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use regan_core::models::config::ReganConfig;
use regan_core::models::guest::GuestRecord;
use regan_core::report::{GuestExtractor, ReportParser, ReportSource};
use regan_genai::GenAiExtractor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain-text report)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction engine
    #[arg(short, long, value_enum, default_value = "rules")]
    engine: Engine,

    /// API key for the genai engine (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Engine {
    /// Pattern-based extraction, fully offline
    Rules,
    /// Generative document-understanding API
    Genai,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading report...");
    pb.set_position(10);
    let source = load_source(&args.input)?;

    pb.set_message("Analyzing report...");
    pb.set_position(40);
    let extractor = build_extractor(args.engine, args.api_key.as_deref(), &config)?;
    let records = extractor.extract(&source).await?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    eprintln!(
        "{} {} returning guest(s) identified",
        style("ℹ").blue(),
        records.len()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration from an explicit path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ReganConfig> {
    Ok(match config_path {
        Some(path) => ReganConfig::from_file(Path::new(path))?,
        None => ReganConfig::default(),
    })
}

/// Build the selected extraction engine behind the shared interface.
pub fn build_extractor(
    engine: Engine,
    api_key: Option<&str>,
    config: &ReganConfig,
) -> anyhow::Result<Box<dyn GuestExtractor>> {
    match engine {
        Engine::Rules => {
            let parser = ReportParser::with_vocabulary(config.vocabulary.clone())?;
            Ok(Box::new(parser))
        }
        Engine::Genai => {
            let key = api_key
                .map(str::to_string)
                .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!("genai engine requires --api-key or GEMINI_API_KEY")
                })?;
            let extractor = GenAiExtractor::new(key).with_config(config.genai.clone());
            Ok(Box::new(extractor))
        }
    }
}

/// Read a report file into an extraction source.
pub fn load_source(input: &Path) -> anyhow::Result<ReportSource> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(ReportSource::Pdf(fs::read(input)?)),
        "txt" | "text" => Ok(ReportSource::Text(fs::read_to_string(input)?)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Render records in the requested output format.
pub fn format_records(records: &[GuestRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[GuestRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "guest_name",
        "confirmation_number",
        "identified_by",
        "number_of_previous_stays",
        "fixed_charge_description",
        "fixed_charge_amount",
        "accompanying_guests",
        "arrival_date",
        "departure_date",
    ])?;

    for record in records {
        wtr.write_record([
            record.guest_name.as_str(),
            record.confirmation_number.as_str(),
            record.identified_by.as_str(),
            record.number_of_previous_stays.as_str(),
            record.fixed_charge_description.as_str(),
            record.fixed_charge_amount.as_str(),
            record.accompanying_guests.as_str(),
            record.arrival_date.as_deref().unwrap_or(""),
            record.departure_date.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[GuestRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Returning Guests Found ({})\n\n", records.len()));

    for record in records {
        output.push_str(&format!(
            "{}  [{}]\n",
            record.guest_name, record.identified_by
        ));
        output.push_str(&format!("  Confirmation: {}\n", record.confirmation_number));
        if let (Some(arrival), Some(departure)) =
            (&record.arrival_date, &record.departure_date)
        {
            output.push_str(&format!("  Stay:         {} - {}\n", arrival, departure));
        }
        output.push_str(&format!(
            "  Prev. stays:  {}\n",
            record.number_of_previous_stays
        ));
        output.push_str(&format!(
            "  Fixed charge: {} ({})\n",
            record.fixed_charge_description, record.fixed_charge_amount
        ));
        output.push_str(&format!(
            "  Accompanying: {}\n\n",
            record.accompanying_guests
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use regan_core::models::guest::IdentifiedBy;

    fn sample_record() -> GuestRecord {
        GuestRecord {
            guest_name: "Smith, John".to_string(),
            confirmation_number: "ABC123".to_string(),
            arrival_date: None,
            departure_date: None,
            identified_by: IdentifiedBy::FixedCharge,
            number_of_previous_stays: "0".to_string(),
            fixed_charge_description: "Return Guest Credit".to_string(),
            fixed_charge_amount: "100.00".to_string(),
            accompanying_guests: "None".to_string(),
        }
    }

    #[test]
    fn test_format_csv() {
        let output = format_csv(&[sample_record()]).unwrap();
        let mut lines = output.lines();
        assert!(lines.next().unwrap().starts_with("guest_name,"));
        assert_eq!(
            lines.next().unwrap(),
            "\"Smith, John\",ABC123,Fixed Charge,0,Return Guest Credit,100.00,None,,"
        );
    }

    #[test]
    fn test_format_text() {
        let output = format_text(&[sample_record()]);
        assert!(output.starts_with("Returning Guests Found (1)"));
        assert!(output.contains("Smith, John  [Fixed Charge]"));
        assert!(output.contains("Fixed charge: Return Guest Credit (100.00)"));
    }

    #[test]
    fn test_format_json_is_a_list() {
        let output = format_records(&[sample_record()], OutputFormat::Json).unwrap();
        assert!(output.trim_start().starts_with('['));
        assert!(output.contains("\"confirmationNumber\": \"ABC123\""));
    }
}
