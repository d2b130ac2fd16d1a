//! Payroll Import CLI
//!
//! Command-line tool for merging labor and tips exports into a payroll
//! import file.

use clap::{Parser, Subcommand, ValueEnum};
use payroll_core::pipeline::{load_labor, load_tips};
use payroll_core::{
    parse_file, run_import, to_csv, to_json, CsvSink, FileSink, FileSource, ImportConfig,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "payroll-cli")]
#[command(about = "Merge labor and tips exports into a payroll import file", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate both exports and write the merged payroll file
    Merge {
        /// Labor/hours export (CSV)
        #[arg(short, long)]
        labor: PathBuf,

        /// Tips export (CSV)
        #[arg(short, long)]
        tips: PathBuf,

        /// Output file path (defaults to payroll-import-YYYYMMDD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Department mapping config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate one or both exports without writing anything
    Check {
        /// Labor/hours export (CSV)
        #[arg(short, long)]
        labor: Option<PathBuf>,

        /// Tips export (CSV)
        #[arg(short, long)]
        tips: Option<PathBuf>,

        /// Department mapping config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse and display a single CSV file
    Parse {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List the job code and job title department mappings
    Departments {
        /// Department mapping config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the default config to a file for editing
    InitConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if e.is_validation() {
            // Already tagged with the file and row
            eprintln!("{}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> payroll_core::Result<()> {
    match cli.command {
        Commands::Merge {
            labor,
            tips,
            output,
            format,
            config,
        } => cmd_merge(&labor, &tips, output, format, config.as_deref()),
        Commands::Check {
            labor,
            tips,
            config,
        } => cmd_check(labor.as_deref(), tips.as_deref(), config.as_deref()),
        Commands::Parse { file, limit } => cmd_parse(&file, limit),
        Commands::Departments { config } => cmd_departments(config.as_deref()),
        Commands::InitConfig { output } => cmd_init_config(&output),
    }
}

fn load_config(path: Option<&Path>) -> payroll_core::Result<ImportConfig> {
    match path {
        Some(path) => ImportConfig::load(path),
        None => Ok(ImportConfig::default()),
    }
}

/// `payroll-import-20240131.csv` for the current local date
fn default_output_path(format: Format) -> PathBuf {
    let extension = match format {
        Format::Csv => "csv",
        Format::Json => "json",
    };
    let date = chrono::Local::now().format("%Y%m%d");
    PathBuf::from(format!("payroll-import-{}.{}", date, extension))
}

fn cmd_merge(
    labor: &Path,
    tips: &Path,
    output: Option<PathBuf>,
    format: Format,
    config: Option<&Path>,
) -> payroll_core::Result<()> {
    let config = load_config(config)?;
    let run = run_import(&FileSource::new(labor), &FileSource::new(tips), &config)?;

    let output = output.unwrap_or_else(|| default_output_path(format));
    let content = match format {
        Format::Csv => to_csv(&run.lines)?,
        Format::Json => to_json(&run.lines)?,
    };
    FileSink::new(&output).deliver(&content)?;

    println!("Labor records: {}", run.labor_records);
    println!("Tips records: {}", run.tips_records);
    println!("Exported {} lines to {}", run.lines.len(), output.display());

    Ok(())
}

fn cmd_check(
    labor: Option<&Path>,
    tips: Option<&Path>,
    config: Option<&Path>,
) -> payroll_core::Result<()> {
    if labor.is_none() && tips.is_none() {
        eprintln!("Nothing to check: pass --labor and/or --tips");
        std::process::exit(2);
    }

    let config = load_config(config)?;
    let mut failures = 0;

    if let Some(path) = labor {
        match load_labor(&FileSource::new(path), &config) {
            Ok(records) => println!("{}: {} hours records OK", path.display(), records.len()),
            Err(e) => {
                println!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if let Some(path) = tips {
        match load_tips(&FileSource::new(path), &config) {
            Ok(records) => println!("{}: {} tips records OK", path.display(), records.len()),
            Err(e) => {
                println!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_parse(file: &Path, limit: usize) -> payroll_core::Result<()> {
    let rows = parse_file(file)?;

    println!("File: {}", file.display());
    println!("Rows: {}", rows.len());
    println!();

    for (i, row) in rows.iter().take(limit).enumerate() {
        println!("{}\t{}", i + 1, row.fields.join("\t"));
    }

    if rows.len() > limit {
        println!("... ({} more rows)", rows.len() - limit);
    }

    Ok(())
}

fn cmd_departments(config: Option<&Path>) -> payroll_core::Result<()> {
    let config = load_config(config)?;

    println!("Job codes (labor export, {}):", config.job_codes.len());
    for (code, dept) in config.job_codes.iter() {
        println!("  {:<20} {}", code, dept);
    }
    println!();
    println!("Job titles (tips export, {}):", config.job_titles.len());
    for (title, dept) in config.job_titles.iter() {
        println!("  {:<20} {}", title, dept);
    }
    println!();
    println!("Row cap: {} data rows per file", config.max_data_rows);

    Ok(())
}

fn cmd_init_config(output: &Path) -> payroll_core::Result<()> {
    let config = ImportConfig::default();
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the mappings, then run:");
    println!(
        "  payroll-cli merge --labor <file> --tips <file> --config {}",
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_merge_args() {
        let cli = Cli::parse_from([
            "payroll-cli",
            "-vv",
            "merge",
            "--labor",
            "labor.csv",
            "--tips",
            "tips.csv",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Merge {
                labor,
                output,
                format,
                ..
            } => {
                assert_eq!(labor, PathBuf::from("labor.csv"));
                assert!(output.is_none());
                assert!(format == Format::Json);
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Format::Csv);
        let name = path.to_str().unwrap();
        assert!(name.starts_with("payroll-import-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "payroll-import-YYYYMMDD.csv".len());
    }
}
