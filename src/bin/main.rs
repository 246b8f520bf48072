//! reportdoc CLI - flatten Power BI report schemas
//!
//! Usage:
//!   reportdoc archive <dir> [--name <name>] [--view <view>] [--format <format>]
//!   reportdoc scan <file> --report <name> [--view <view>] [--format <format>]
//!   reportdoc reports <file>
//!
//! Examples:
//!   reportdoc archive ./Sales.pbit --view measures
//!   reportdoc scan scan.json --report Sales --format summary
//!   reportdoc reports scan.json

use clap::{Parser, Subcommand, ValueEnum};
use reportdoc::config::Settings;
use reportdoc::document::ArchiveMembers;
use reportdoc::ingest::scan::{self, WorkspaceScan};
use reportdoc::output::{self, Format, View};
use reportdoc::ReportSchema;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reportdoc")]
#[command(about = "reportdoc - Flatten Power BI report schemas into a reporting table")]
#[command(version)]
struct Cli {
    /// Path to a reportdoc.toml (defaults to the usual search locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten an extracted template archive
    Archive {
        /// Directory holding the Connections and DataModelSchema members
        dir: PathBuf,

        /// Report name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Flatten one report of a workspace scan result
    Scan {
        /// Path to the scan JSON document
        file: PathBuf,

        /// Name of the report (dataset) to flatten
        #[arg(short, long)]
        report: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List the reports of a workspace scan result
    Reports {
        /// Path to the scan JSON document
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Relation to print
    #[arg(short, long, default_value = "full")]
    view: ViewArg,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: FormatArg,
}

#[derive(Clone, ValueEnum)]
enum ViewArg {
    Full,
    Tables,
    Columns,
    Measures,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Full => View::Full,
            ViewArg::Tables => View::Tables,
            ViewArg::Columns => View::Columns,
            ViewArg::Measures => View::Measures,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
    /// Text outline of tables, sources and measures
    Summary,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Jsonl => Format::JsonLines,
            FormatArg::Summary => Format::Summary,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&settings);

    match cli.command {
        Commands::Archive { dir, name, render } => cmd_archive(&settings, &dir, name, render),
        Commands::Scan {
            file,
            report,
            render,
        } => cmd_scan(&settings, &file, &report, render),
        Commands::Reports { file } => cmd_reports(&settings, &file),
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_archive(
    settings: &Settings,
    dir: &Path,
    name: Option<String>,
    render: RenderArgs,
) -> ExitCode {
    let options = match settings.normalize_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let members = match ArchiveMembers::read_dir(dir) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error reading archive '{}': {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let members = match name {
        Some(name) => members.with_report_name(name),
        None => members,
    };

    match members.normalize(&options) {
        Ok(schema) => print_schema(&schema, render),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_scan(settings: &Settings, file: &Path, report: &str, render: RenderArgs) -> ExitCode {
    let options = match settings.normalize_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(workspace) = read_scan(file) else {
        return ExitCode::FAILURE;
    };

    let schema = scan::normalize(&workspace, report, &options);
    print_schema(&schema, render)
}

fn cmd_reports(settings: &Settings, file: &Path) -> ExitCode {
    let Some(workspace) = read_scan(file) else {
        return ExitCode::FAILURE;
    };

    for name in workspace.report_names(&settings.report_filter()) {
        println!("{}", name);
    }
    ExitCode::SUCCESS
}

fn read_scan(file: &Path) -> Option<WorkspaceScan> {
    let source = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            return None;
        }
    };

    match WorkspaceScan::from_json(&source) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

fn print_schema(schema: &ReportSchema, render: RenderArgs) -> ExitCode {
    for diagnostic in &schema.diagnostics {
        eprintln!("Note: {}", diagnostic);
    }

    let rows = schema.denormalize();
    match output::render(&rows, render.view.into(), render.format.into()) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering output: {}", e);
            ExitCode::FAILURE
        }
    }
}
