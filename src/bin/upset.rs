//! upset - UpSet plot CLI
//!
//! Command-line interface for drawing UpSet plots from tabular membership data.

use clap::{Parser, ValueEnum};
use composable_upset::data::{IntersectionSet, Table};
use composable_upset::demo::{demo_columns, demo_table};
use composable_upset::error::{Result, UpsetError};
use composable_upset::load::load_table_with_sheet;
use composable_upset::normalize::NormalizePolicy;
use composable_upset::pipeline::{PipelineConfig, UpsetPipeline};
use composable_upset::profile::{profile_membership, MembershipProfile};
use composable_upset::render::{renderer_for, resolve_output};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for the printed summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
    Yaml,
}

/// Draw an UpSet plot from a CSV, TSV or Excel file
#[derive(Parser)]
#[command(name = "upset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (CSV, TSV or Excel)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Set columns, each holding 1/0 or yes/no style values
    #[arg(short, long, num_args = 1..)]
    columns: Vec<String>,

    /// Output image path (.png, .jpg or .svg; no extension means .png)
    #[arg(short, long, default_value = "upset_plot.png")]
    output: PathBuf,

    /// Use the built-in example dataset
    #[arg(long)]
    demo: bool,

    /// Fail on values that are neither true-like nor false-like
    #[arg(long)]
    strict: bool,

    /// Pipeline configuration YAML (columns, policy, order, plot styling)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the intersection table as TSV
    #[arg(long)]
    table: Option<PathBuf>,

    /// Print a summary of the intersections
    #[arg(long, value_enum)]
    summary: Option<SummaryFormat>,

    /// Worksheet to read from a workbook (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Write an example pipeline configuration and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `UPSET_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("UPSET_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.write_config {
        return cmd_write_config(path);
    }

    let config = pipeline_config(cli)?;
    // Reject an unusable output before any input is read or file written.
    let output = resolve_output(&cli.output);
    let renderer = renderer_for(&output, &config.render)?;

    let (table, columns) = if cli.demo {
        println!("Running in demo mode...");
        (demo_table()?, demo_columns())
    } else {
        let file = cli.file.as_ref().ok_or_else(|| {
            UpsetError::MissingArgument("Use --file or enable --demo mode.".to_string())
        })?;
        let table = load_table_with_sheet(file, cli.sheet.as_deref())?;
        (table, resolve_columns(&cli.columns, &config)?)
    };

    let pipeline = UpsetPipeline::from_config(&config).columns(columns);
    let (set, profile) = build(&pipeline, &table)?;

    renderer.render(&set, &output)?;
    info!(path = %output.display(), patterns = set.len(), "rendered UpSet plot");

    if let Some(path) = &cli.table {
        set.to_tsv(path)?;
        eprintln!("Intersection table written to {}", path.display());
    }

    match cli.summary {
        Some(format) => {
            print_summary(&set, &profile, format)?;
            // Keep stdout parseable for structured summaries.
            if format == SummaryFormat::Text {
                println!("UpSet plot saved as: {}", output.display());
            } else {
                eprintln!("UpSet plot saved as: {}", output.display());
            }
        }
        None => println!("UpSet plot saved as: {}", output.display()),
    }
    Ok(())
}

/// Config file (or defaults) with `--strict` applied on top.
fn pipeline_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if cli.strict {
        config.policy = NormalizePolicy::Strict;
    }
    Ok(config)
}

/// Columns from the command line win over columns from the config file.
fn resolve_columns(cli_columns: &[String], config: &PipelineConfig) -> Result<Vec<String>> {
    if !cli_columns.is_empty() {
        Ok(cli_columns.to_vec())
    } else if !config.columns.is_empty() {
        Ok(config.columns.clone())
    } else {
        Err(UpsetError::MissingArgument(
            "Specify column names using --columns.".to_string(),
        ))
    }
}

fn build(pipeline: &UpsetPipeline, table: &Table) -> Result<(IntersectionSet, MembershipProfile)> {
    let matrix = pipeline.normalize(table)?;
    let profile = profile_membership(&matrix);
    Ok((pipeline.aggregate(&matrix), profile))
}

fn print_summary(set: &IntersectionSet, profile: &MembershipProfile, format: SummaryFormat) -> Result<()> {
    match format {
        SummaryFormat::Json => {
            let summary = serde_json::json!({
                "summary": set.summary(),
                "profile": profile,
                "intersections": set.records,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        SummaryFormat::Yaml => {
            let summary = serde_json::json!({
                "summary": set.summary(),
                "profile": profile,
                "intersections": set.records,
            });
            print!("{}", serde_yaml::to_string(&summary)?);
        }
        SummaryFormat::Text => {
            println!("UpSet Summary");
            println!("=============");
            println!();
            print!("{}", set.summary());
            println!();
            print!("{}", profile);
            println!();
            println!("Intersections:");
            for record in set {
                println!("  {:>6}  {}", record.count, record.label());
            }
            println!();
        }
    }
    Ok(())
}

/// Write an example pipeline configuration
fn cmd_write_config(path: &Path) -> Result<()> {
    let config = UpsetPipeline::new()
        .name("example")
        .columns(demo_columns())
        .to_config(
            Some("Three conditions from the built-in demo dataset"),
            Default::default(),
        );
    std::fs::write(path, config.to_yaml()?)?;
    eprintln!("Example configuration written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("upset").chain(args.iter().copied())).unwrap()
    }

    fn write_file(dir: &TempDir, name: &str, lines: &[&str]) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    fn gene_csv(dir: &TempDir) -> String {
        write_file(
            dir,
            "genes.csv",
            &["Gene,Liver,Kidney", "G1,1,yes", "G2,0,maybe", "G3,1,no"],
        )
    }

    fn out(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    fn missing_argument(result: Result<()>) -> String {
        match result {
            Err(UpsetError::MissingArgument(message)) => message,
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_demo_writes_plot() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "demo.svg");

        run(&cli(&["--demo", "--output", &output])).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("Condition_A"));
    }

    #[test]
    fn test_demo_ignores_file_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "demo.svg");

        let args = cli(&[
            "--demo",
            "--file",
            "/nonexistent/genes.csv",
            "--columns",
            "Nope",
            "--output",
            &output,
        ]);
        run(&args).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("Condition_C"));
        assert!(!text.contains("Nope"));
    }

    #[test]
    fn test_extensionless_output_is_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "plot");

        run(&cli(&["--demo", "--output", &output])).unwrap();
        let bytes = std::fs::read(dir.path().join("plot.png")).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_jpeg_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "plot.jpg");

        run(&cli(&["--demo", "--output", &output])).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], b"\xff\xd8");
    }

    #[test]
    fn test_bad_output_fails_before_table_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let table = out(&dir, "counts.tsv");
        let output = out(&dir, "plot.gif");

        let result = run(&cli(&["--demo", "--output", &output, "--table", &table]));
        assert!(matches!(result, Err(UpsetError::UnsupportedFormat { extension, .. }) if extension == "gif"));
        assert!(!dir.path().join("counts.tsv").exists());
        assert!(!dir.path().join("plot.gif").exists());
    }

    #[test]
    fn test_table_written_next_to_plot() {
        let dir = tempfile::tempdir().unwrap();
        let file = gene_csv(&dir);
        let table = out(&dir, "counts.tsv");
        let output = out(&dir, "plot.svg");

        let args = cli(&["-f", &file, "-c", "Liver", "Kidney", "-o", &output, "--table", &table]);
        run(&args).unwrap();
        let text = std::fs::read_to_string(&table).unwrap();
        assert!(text.starts_with("Liver\tKidney\tpattern\tdegree\tcount"));
    }

    #[test]
    fn test_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "plot.png");

        let message = missing_argument(run(&cli(&["--columns", "A", "--output", &output])));
        assert_eq!(message, "Use --file or enable --demo mode.");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = out(&dir, "plot.png");

        let result = run(&cli(&["-f", "/nonexistent/genes.csv", "-c", "A", "-o", &output]));
        assert!(matches!(result, Err(UpsetError::FileNotFound(_))));
        assert!(!dir.path().join("plot.png").exists());
    }

    #[test]
    fn test_unsupported_input_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "genes.json", &["{}"]);
        let output = out(&dir, "plot.png");

        let result = run(&cli(&["-f", &file, "-c", "A", "-o", &output]));
        assert!(matches!(result, Err(UpsetError::UnsupportedFormat { extension, .. }) if extension == "json"));
    }

    #[test]
    fn test_columns_required() {
        let dir = tempfile::tempdir().unwrap();
        let file = gene_csv(&dir);
        let output = out(&dir, "plot.png");

        let message = missing_argument(run(&cli(&["-f", &file, "-o", &output])));
        assert_eq!(message, "Specify column names using --columns.");
    }

    #[test]
    fn test_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let file = gene_csv(&dir);
        let output = out(&dir, "plot.png");

        let result = run(&cli(&["-f", &file, "-c", "Liver", "Heart", "-o", &output]));
        assert!(matches!(result, Err(UpsetError::MissingColumn(c)) if c == "Heart"));
    }

    #[test]
    fn test_resolve_columns_precedence() {
        let config = PipelineConfig {
            columns: vec!["Brain".to_string()],
            ..PipelineConfig::default()
        };
        let from_cli = vec!["Liver".to_string()];

        assert_eq!(resolve_columns(&from_cli, &config).unwrap(), from_cli);
        assert_eq!(resolve_columns(&[], &config).unwrap(), config.columns);
        assert!(resolve_columns(&[], &PipelineConfig::default()).is_err());
    }

    #[test]
    fn test_cli_columns_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = gene_csv(&dir);
        let config = write_file(&dir, "pipeline.yaml", &["columns: [Heart]"]);
        let output = out(&dir, "plot.svg");

        // Config alone names a column the file lacks
        let result = run(&cli(&["-f", &file, "--config", &config, "-o", &output]));
        assert!(matches!(result, Err(UpsetError::MissingColumn(c)) if c == "Heart"));

        run(&cli(&["-f", &file, "--config", &config, "-c", "Liver", "-o", &output])).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("Liver"));
    }

    #[test]
    fn test_strict_flag_overrides_config_policy() {
        let dir = tempfile::tempdir().unwrap();
        let file = gene_csv(&dir);
        let config = write_file(&dir, "pipeline.yaml", &["policy: Permissive"]);
        let output = out(&dir, "plot.svg");

        let permissive = cli(&["-f", &file, "-c", "Kidney", "--config", &config, "-o", &output]);
        assert_eq!(pipeline_config(&permissive).unwrap().policy, NormalizePolicy::Permissive);
        run(&permissive).unwrap();

        let strict = cli(&[
            "-f", &file, "-c", "Kidney", "--config", &config, "--strict", "-o", &output,
        ]);
        assert_eq!(pipeline_config(&strict).unwrap().policy, NormalizePolicy::Strict);
        match run(&strict) {
            Err(UpsetError::UnrecognizedValue { column, value, .. }) => {
                assert_eq!(column, "Kidney");
                assert_eq!(value, "maybe");
            }
            other => panic!("expected UnrecognizedValue, got {:?}", other),
        }
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = out(&dir, "pipeline.yaml");

        run(&cli(&["--write-config", &path])).unwrap();
        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.columns, demo_columns());
    }
}
