//! odl-pdf CLI - load PDF content through the OpenDataLoader engine

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use opendataloader_pdf::{
    EngineOptions, ErrorMode, JavaEngine, Loader, OutputFormat, Record,
};

#[derive(Parser)]
#[command(name = "odl-pdf")]
#[command(version)]
#[command(about = "Load PDF content into text records via the OpenDataLoader engine", long_about = None)]
struct Cli {
    /// Input PDF files or directories
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(flatten)]
    batch: BatchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten the engine's JSON result into records (default)
    Load {
        /// Input PDF files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit one JSON object per line instead of a pretty array
        #[arg(long)]
        jsonl: bool,

        #[command(flatten)]
        engine: EngineArgs,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Extract the whole plain-text rendition per file
    Text {
        /// Input PDF files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Extract the whole Markdown rendition per file
    #[command(alias = "md")]
    Markdown {
        /// Input PDF files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Extract the whole HTML rendition per file
    Html {
        /// Input PDF files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,

        #[command(flatten)]
        batch: BatchArgs,
    },
}

/// Options forwarded to the extraction engine.
#[derive(Args, Clone)]
struct EngineArgs {
    /// Path to the OpenDataLoader engine jar
    #[arg(long, env = "OPENDATALOADER_JAR", value_name = "JAR")]
    jar: Option<PathBuf>,

    /// Password for encrypted documents
    #[arg(long)]
    password: Option<String>,

    /// Table detection method
    #[arg(long, value_name = "METHOD")]
    table_method: Option<String>,

    /// Reading-order reconstruction mode
    #[arg(long, value_name = "MODE")]
    reading_order: Option<String>,

    /// Embed extracted images into the output
    #[arg(long)]
    embed_images: bool,

    /// Content-safety filter to switch off (repeatable)
    #[arg(long, value_name = "FILTER")]
    content_safety_off: Vec<String>,

    /// Separator inserted between pages in flat output modes
    #[arg(long, value_name = "SEP")]
    page_separator: Option<String>,

    /// Raw argument passed to the engine verbatim (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG")]
    extra_args: Vec<String>,
}

impl EngineArgs {
    fn to_options(&self, format: OutputFormat) -> EngineOptions {
        let mut options = EngineOptions::new().with_format(format).quiet();
        if let Some(ref password) = self.password {
            options = options.with_password(password);
        }
        if let Some(ref method) = self.table_method {
            options = options.with_table_method(method);
        }
        if let Some(ref mode) = self.reading_order {
            options = options.with_reading_order(mode);
        }
        options = options.with_embedded_images(self.embed_images);
        for filter in &self.content_safety_off {
            options = options.with_content_safety_off(filter);
        }
        if let Some(ref separator) = self.page_separator {
            options = options.with_page_separator(separator);
        }
        for arg in &self.extra_args {
            options = options.with_arg(arg);
        }
        options
    }
}

/// Options controlling batch behavior.
#[derive(Args, Clone)]
struct BatchArgs {
    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    recursive: bool,

    /// Stop the whole batch at the first failing file
    #[arg(long, conflicts_with = "keep_going")]
    fail_fast: bool,

    /// Continue past failing files, reporting them at the end (default)
    #[arg(long)]
    keep_going: bool,
}

impl BatchArgs {
    fn error_mode(&self) -> ErrorMode {
        if self.fail_fast && !self.keep_going {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Load {
            inputs,
            output,
            jsonl,
            engine,
            batch,
        }) => cmd_load(&inputs, output.as_deref(), jsonl, &engine, &batch),
        Some(Commands::Text {
            inputs,
            output,
            engine,
            batch,
        }) => cmd_flat(&inputs, output.as_deref(), OutputFormat::Text, &engine, &batch),
        Some(Commands::Markdown {
            inputs,
            output,
            engine,
            batch,
        }) => cmd_flat(
            &inputs,
            output.as_deref(),
            OutputFormat::Markdown,
            &engine,
            &batch,
        ),
        Some(Commands::Html {
            inputs,
            output,
            engine,
            batch,
        }) => cmd_flat(
            &inputs,
            output.as_deref(),
            OutputFormat::Html,
            &engine,
            &batch,
        ),
        None => {
            if cli.inputs.is_empty() {
                println!("{}", "Usage: odl-pdf <INPUTS>...".yellow());
                println!("       odl-pdf --help for more information");
                Ok(())
            } else {
                cmd_load(
                    &cli.inputs,
                    cli.output.as_deref(),
                    false,
                    &cli.engine,
                    &cli.batch,
                )
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_loader(
    inputs: &[PathBuf],
    format: OutputFormat,
    engine: &EngineArgs,
    batch: &BatchArgs,
) -> Loader {
    log::debug!("Resolving {} input argument(s)", inputs.len());

    let mut loader = Loader::new(inputs.iter().cloned())
        .recursive(batch.recursive)
        .with_error_mode(batch.error_mode())
        .with_options(engine.to_options(format));

    if let Some(ref jar) = engine.jar {
        loader = loader.with_engine(JavaEngine::new(jar));
    }

    loader
}

fn progress_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb
}

fn cmd_load(
    inputs: &[PathBuf],
    output: Option<&Path>,
    jsonl: bool,
    engine: &EngineArgs,
    batch: &BatchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = build_loader(inputs, OutputFormat::Json, engine, batch);
    let mut stream = loader.lazy_load()?;

    let pb = progress_spinner();
    let mut records: Vec<Record> = Vec::new();
    let mut failures: Vec<String> = Vec::new();
    let mut last_source = String::new();

    while let Some(item) = stream.next() {
        if let Some(source) = stream.current_source() {
            let source = source.display().to_string();
            if source != last_source {
                pb.set_message(format!("Loading {}", source));
                last_source = source;
            }
        }
        match item {
            Ok(record) => records.push(record),
            Err(e) => failures.push(format!("{}", e)),
        }
        pb.tick();
    }
    pb.finish_and_clear();

    let rendered = if jsonl {
        let mut lines = String::new();
        for record in &records {
            lines.push_str(&serde_json::to_string(record)?);
            lines.push('\n');
        }
        lines
    } else {
        let mut pretty = serde_json::to_string_pretty(&records)?;
        pretty.push('\n');
        pretty
    };
    write_output(output, &rendered)?;

    eprintln!(
        "{} {} records",
        "Loaded".green().bold(),
        records.len()
    );
    report_failures(&failures)
}

fn cmd_flat(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: OutputFormat,
    engine: &EngineArgs,
    batch: &BatchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = build_loader(inputs, format, engine, batch);
    let report = loader.load_with_report()?;

    let mut body = String::new();
    for record in &report.records {
        body.push_str(&record.text);
        if !record.text.ends_with('\n') {
            body.push('\n');
        }
    }
    write_output(output, &body)?;

    let failures: Vec<String> = report
        .failures
        .iter()
        .map(|(_, e)| format!("{}", e))
        .collect();
    report_failures(&failures)
}

fn write_output(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    match output {
        Some(path) => fs::write(path, content),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())
        }
    }
}

fn report_failures(failures: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    if failures.is_empty() {
        return Ok(());
    }
    for failure in failures {
        eprintln!("{}: {}", "Failed".red().bold(), failure);
    }
    Err(format!("{} file(s) failed", failures.len()).into())
}
