//! rv - host report viewer
//!
//! Command-line front end over the report session:
//! - `render`: convert structured text to markup
//! - `view`: fetch a host/date bundle and print the display region
//! - `generate`: ask the server for a fresh report, then print the result
//! - `hosts`: build the host/date map from an ingest directory

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rv_common::{ActiveTab, HostMap, Selection};
use rv_render::{convert, date_options, host_options, render_report};
use rv_session::{
    HttpReportSource, Msg, ReportSession, SessionError, SessionRuntime, ViewState, ViewerConfig,
};
use tracing::{debug, info, info_span, warn};

mod exit_codes;
mod logging;

use exit_codes::ExitCode;
use logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};

/// Host report viewer
#[derive(Parser)]
#[command(name = "rv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report server base URL (overrides the config file)
    #[arg(long, global = true, env = "RV_SERVER_URL")]
    server: Option<String>,

    /// Viewer configuration file (JSON)
    #[arg(long, global = true, env = "RV_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, env = "RV_LOG")]
    log_level: Option<LogLevel>,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true, env = "RV_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert structured text to markup (reads stdin without FILE)
    Render(RenderArgs),

    /// Fetch a report bundle and print the display region
    View(ViewArgs),

    /// Generate a report, then print the refreshed display region
    Generate(GenerateArgs),

    /// List hosts and dates found under an ingest root
    Hosts(HostsArgs),
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input file; `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// Convert without escaping the input first
    #[arg(long)]
    raw: bool,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Host name
    #[arg(long)]
    host: String,

    /// Report date
    #[arg(long)]
    date: String,
}

impl SelectionArgs {
    fn to_selection(&self) -> Selection {
        Selection::new(self.host.as_str(), self.date.as_str())
    }
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Tab to show (report, logs, specs)
    #[arg(long, default_value = "report")]
    tab: ActiveTab,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Args, Debug)]
struct HostsArgs {
    /// Directory containing uploads/, reports/ and archive/
    #[arg(long)]
    root: PathBuf,

    /// Print selector option markup instead of JSON
    #[arg(long)]
    options: bool,
}

fn main() {
    let cli = Cli::parse();

    let cli_level = cli
        .global
        .log_level
        .or_else(|| LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet));
    let log_config = LogConfig::from_env(cli_level, cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = info_span!("rv", run_id = %run_id);
    let exit_code = span.in_scope(|| match &cli.command {
        Commands::Render(args) => run_render(args),
        Commands::View(args) => run_view(&cli.global, args),
        Commands::Generate(args) => run_generate(&cli.global, args),
        Commands::Hosts(args) => run_hosts(args),
    });

    debug!(
        run_id = %run_id,
        exit_code = %exit_code,
        success = exit_code.is_success(),
        "done"
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_render(args: &RenderArgs) -> ExitCode {
    let input = match read_input(args.file.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("rv: failed to read input: {}", e);
            return ExitCode::Failure;
        }
    };

    let html = if args.raw {
        convert(&input)
    } else {
        render_report(&input)
    };
    println!("{}", html);
    ExitCode::Clean
}

fn run_view(global: &GlobalOpts, args: &ViewArgs) -> ExitCode {
    let mut runtime = match build_runtime(global) {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let selection = args.selection.to_selection();
    if !selection.is_complete() {
        warn!("host and date must both be non-empty; nothing to fetch");
    }
    runtime.dispatch(Msg::Select(selection));
    if args.tab != ActiveTab::Report {
        runtime.dispatch(Msg::TabClicked(args.tab));
    }

    println!("{}", runtime.display());
    exit_for(runtime.session().view())
}

fn run_generate(global: &GlobalOpts, args: &GenerateArgs) -> ExitCode {
    let mut runtime = match build_runtime(global) {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let selection = args.selection.to_selection();
    if !selection.is_complete() {
        warn!("host and date must both be non-empty; nothing to generate");
        return ExitCode::Clean;
    }
    runtime.dispatch(Msg::Select(selection));
    runtime.dispatch(Msg::GenerateRequested);

    // The retry fetch replaces the failure message, so report it now.
    let generate_failed = match runtime.session().view() {
        ViewState::GenerateFailed { message, .. } => {
            eprintln!("rv: report generation failed: {}", message);
            true
        }
        _ => false,
    };

    runtime.settle();
    println!("{}", runtime.display());

    if generate_failed {
        ExitCode::Failure
    } else {
        exit_for(runtime.session().view())
    }
}

fn run_hosts(args: &HostsArgs) -> ExitCode {
    if !args.root.is_dir() {
        eprintln!("rv: not a directory: {}", args.root.display());
        return ExitCode::Failure;
    }

    let map = match HostMap::scan_ingest_root(&args.root) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("rv: failed to scan {}: {}", args.root.display(), e);
            return ExitCode::Failure;
        }
    };
    info!(hosts = map.len(), root = %args.root.display(), "host map built");

    if args.options {
        println!("{}", host_options(&map));
        println!("{}", date_options(&map));
        return ExitCode::Clean;
    }

    match serde_json::to_string_pretty(&map) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("rv: failed to serialize host map: {}", e);
            ExitCode::Failure
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Config file (if any), then `--server`, then validation.
fn resolve_config(global: &GlobalOpts) -> Result<ViewerConfig, SessionError> {
    let mut config = match &global.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(server) = &global.server {
        config.source = config.source.clone().with_base_url(server.as_str());
    }
    config.validate()?;
    Ok(config)
}

fn build_runtime(global: &GlobalOpts) -> Result<SessionRuntime<HttpReportSource>, ExitCode> {
    let config = resolve_config(global).map_err(|e| {
        eprintln!("rv: {}", e);
        ExitCode::ConfigError
    })?;
    info!(server = %config.source.base_url, "using report server");

    let source = HttpReportSource::new(&config.source);
    Ok(SessionRuntime::new(ReportSession::new(config.session), source))
}

fn exit_for(view: &ViewState) -> ExitCode {
    match view {
        ViewState::Error(_) | ViewState::GenerateFailed { .. } => ExitCode::Failure,
        _ => ExitCode::Clean,
    }
}
