//! talscore: readability analyzer for Swedish parliamentary speeches

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use talscore::analyzer::AnalysisEngine;
use talscore::config::{
    build_ignore_set, is_ignored, load_config, Config, SparvConfig, CONFIG_FILENAME,
};
use talscore::reporter::{ConsoleReporter, CsvReporter, JsonReporter};
use talscore::Analysis;
use tracing::{debug, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};
use walkdir::WalkDir;

/// talscore: readability analysis for Swedish parliamentary speeches
#[derive(Parser, Debug)]
#[command(name = "talscore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Speech file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Output format as CSV
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Minimum total score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per speech)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output and debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .talscorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the Sparv stand-in for reproducible scores
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Use a constant Sparv score (1-50)
    #[arg(long, value_name = "N")]
    sparv_fixed: Option<u8>,

    /// Analyze files and metrics on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .talscorerc.json with sensible defaults
    Init {
        /// Minimum total score (e.g. 60)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("talscore=debug")
        } else {
            EnvFilter::new("talscore=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(Commands::Init { threshold, dir }) = args.command {
        return run_init(threshold, dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a path is required when no subcommand is given");
    };

    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // CLI flags override config file
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        args.seed,
        args.sparv_fixed,
    );
    debug!(?config, "effective config");

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_speech_files(&path, ignore_set.as_ref(), &config)?;
    if files.is_empty() {
        eprintln!("{}: No speech files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!("could not configure thread pool: {e}");
        }
    }

    let mut engine = AnalysisEngine::new()
        .with_sparv_scorer(config.sparv_scorer()?)
        .with_source_tag(config.source_tag());
    if args.sequential {
        engine = engine.sequential();
    }

    let outcomes = if args.sequential || files.len() == 1 {
        engine.analyze_many(&files)
    } else {
        engine.analyze_parallel(&files)
    };

    let mut results: Vec<Analysis> = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(analysis) => results.push(analysis),
            Err(e) => {
                had_errors = true;
                warn!(file = %file.display(), "analysis failed: {e:#}");
                if !args.quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
            }
        }
    }

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);

    if args.csv {
        print!("{}", CsvReporter::new().report_many(&results));
    } else if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for analysis in &results {
            reporter.report_quiet(analysis);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }
    }

    if let Some(threshold) = config.threshold {
        let score = if results.len() == 1 {
            results[0].total_score
        } else {
            stats.average_score.value
        };

        if score < threshold {
            if !args.quiet && !args.json && !args.csv {
                eprintln!(
                    "\n{}: Score {} is below threshold {}",
                    "Failed".red().bold(),
                    score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(60);
    let config = Config {
        threshold: Some(threshold_value),
        ignore: vec!["**/utkast/**".to_string()],
        file_patterns: vec![".txt".to_string()],
        sparv: Some(SparvConfig::default()),
        source: Some("upload".to_string()),
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;

    std::fs::write(&config_path, json + "\n")
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn collect_speech_files(
    path: &Path,
    ignore_set: Option<&GlobSet>,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if ignore_set.is_some_and(|set| is_ignored(path, set)) {
            return Ok(vec![]);
        }
        if !config.accepts_file(path) {
            eprintln!(
                "{}: {} is not a speech file (expected {})",
                "Warning".yellow(),
                path.display(),
                config.get_file_patterns().join(", ")
            );
            return Ok(vec![]);
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !config.accepts_file(file_path) {
            continue;
        }
        if ignore_set.is_some_and(|set| is_ignored(file_path, set)) {
            debug!(file = %file_path.display(), "ignored by config");
            continue;
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_speech_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "Tack.").unwrap();
        fs::write(dir.path().join("a.txt"), "Tack.").unwrap();
        fs::write(dir.path().join("notes.md"), "Tack.").unwrap();
        fs::create_dir(dir.path().join("utkast")).unwrap();
        fs::write(dir.path().join("utkast").join("c.txt"), "Tack.").unwrap();

        let config = Config {
            ignore: vec!["**/utkast/**".to_string()],
            ..Default::default()
        };
        let set = build_ignore_set(&config.ignore).unwrap();
        let files = collect_speech_files(dir.path(), Some(&set), &config).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_collect_rejects_non_speech_file() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("tal.pdf");
        fs::write(&pdf, "x").unwrap();
        let files = collect_speech_files(&pdf, None, &Config::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_missing_path() {
        let err = collect_speech_files(Path::new("/nonexistent/tal"), None, &Config::default())
            .unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }
}
