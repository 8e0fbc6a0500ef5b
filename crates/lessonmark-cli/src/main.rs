use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lessonmark_config::Config;
use lessonmark_engine::{
    CellBody, LessonCell, ParseOptions, ParsedLesson, io, parse_lesson_with,
};
use std::{
    io::Read,
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser)]
#[command(name = "lessonmark")]
#[command(about = "Parse lesson documents into typed content cells")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/lessonmark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a parsed lesson as JSON
    Parse {
        /// Lesson file, or `-` for stdin
        file: PathBuf,

        /// Single-line JSON instead of pretty printing
        #[arg(long, conflicts_with = "summary")]
        compact: bool,

        /// One line per cell instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Report cells that could not be typed
    Check {
        /// Lesson files or directories (defaults to the configured lessons_path)
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let options = config.parse_options();

    match cli.command {
        Commands::Parse {
            file,
            compact,
            summary,
        } => {
            let source = read_source(&file)?;
            let lesson = parse_lesson_with(&source, &options);
            if summary {
                for line in summarize(&source, &lesson) {
                    println!("{line}");
                }
            } else if compact || !config.output.pretty {
                println!("{}", serde_json::to_string(&lesson)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&lesson)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { paths } => {
            let roots = if paths.is_empty() {
                match config.lessons_path.clone() {
                    Some(path) => vec![path],
                    None => bail!("no paths given and no lessons_path configured"),
                }
            } else {
                paths
            };
            let unknown = check(&roots, &options)?;
            Ok(if unknown > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            log::debug!("Config path: {}", path.display());
            Config::load_from_path(path)?
                .with_context(|| format!("config file not found: {}", path.display()))
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    io::read_lesson(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Prints one report per unknown cell and returns how many were found.
fn check(roots: &[PathBuf], options: &ParseOptions) -> Result<usize> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_dir() {
            files.extend(io::scan_lesson_files(root)?);
        } else {
            files.push(root.clone());
        }
    }

    let mut unknown = 0;
    for file in &files {
        let source = io::read_lesson(file)?;
        let lesson = parse_lesson_with(&source, options);
        for report in unknown_reports(&source, &lesson) {
            println!("{}:{report}", file.display());
            unknown += 1;
        }
    }

    log::info!("checked {} files, {unknown} unknown cells", files.len());
    if unknown > 0 {
        eprintln!("{unknown} unknown cell(s) in {} file(s) checked", files.len());
    }
    Ok(unknown)
}

/// `LINE: unknown cell (type `T`)` for each unknown cell, in document order.
fn unknown_reports(source: &str, lesson: &ParsedLesson) -> Vec<String> {
    lesson
        .unknown_cells()
        .map(|cell| {
            let declared = match &cell.body {
                CellBody::Unknown { data, .. } => data.declared_type.as_deref().unwrap_or(""),
                _ => "",
            };
            format!(
                "{}: unknown cell (type `{declared}`)",
                cell.span.start_line(source)
            )
        })
        .collect()
}

fn summarize(source: &str, lesson: &ParsedLesson) -> Vec<String> {
    lesson
        .cells
        .iter()
        .map(|cell| {
            format!(
                "{:>4}  {:<8} {}",
                cell.span.start_line(source),
                cell.kind(),
                describe(cell)
            )
        })
        .collect()
}

fn describe(cell: &LessonCell) -> String {
    match &cell.body {
        CellBody::Text { content } => first_line(content),
        CellBody::Code { language, content } => {
            format!("[{language}] {}", first_line(content))
        }
        CellBody::Quiz {
            question, options, ..
        } => format!("{question} ({} options)", options.len()),
        CellBody::Unknown { data, .. } => {
            format!("type `{}`", data.declared_type.as_deref().unwrap_or(""))
        }
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}
