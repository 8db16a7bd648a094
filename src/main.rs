use clap::{Parser, Subcommand};
use sdmx_filter_ui::batch::{self, BatchOptions, BatchSummary};
use sdmx_filter_ui::config::Config;
use sdmx_filter_ui::report::{self, ReportFormat, ReportMeta};
use sdmx_filter_ui::serve::{self, ServeOptions};
use sdmx_filter_ui::{logging, render, SchemaHint, UploadResult};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sdmx-filter-ui")]
#[command(author, version, about = "Render SDMX global filter upload results")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: ./sdmx-filter-ui.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "sdmx_filter_ui=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render saved upload results (a JSON file or a directory of them)
    Render(RenderArgs),

    /// Start the upload result page
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Don't open the browser
        #[arg(long)]
        no_open: bool,

        /// Response shape: auto, violations or removals
        #[arg(long)]
        schema: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Result file or directory
    path: PathBuf,

    /// Output file for a single result ("-" for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format: html, json or fragments
    #[arg(long)]
    format: Option<String>,

    /// Response shape: auto, violations or removals
    #[arg(long)]
    schema: Option<String>,

    /// Directory for generated reports
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,

    /// Open the report when done (single result only)
    #[arg(long)]
    open: bool,
}

fn main() {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    logging::init(args.log_level.as_deref(), &config.logging.level);

    let outcome = match args.command {
        Command::Render(render_args) => run_render(render_args, &config),
        Command::Serve { host, port, no_open, schema } => {
            run_serve(host, port, no_open, schema, &config).map(|()| true)
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_schema(flag: Option<&str>, config: &Config) -> sdmx_filter_ui::Result<SchemaHint> {
    match flag {
        Some(s) => s.parse(),
        None => Ok(config.schema),
    }
}

fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    no_open: bool,
    schema: Option<String>,
    config: &Config,
) -> sdmx_filter_ui::Result<()> {
    let opts = ServeOptions {
        schema: parse_schema(schema.as_deref(), config)?,
        fallback: config.fallback,
    };
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    serve::start(&host, port, config.server.open_browser && !no_open, opts)
}

/// Returns `Ok(false)` when any input failed to render.
fn run_render(args: RenderArgs, config: &Config) -> sdmx_filter_ui::Result<bool> {
    let schema = parse_schema(args.schema.as_deref(), config)?;
    let explicit_format = args.format.as_deref().map(str::parse::<ReportFormat>).transpose()?;

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global().ok();
    }

    let files = batch::collect_inputs(&args.path);
    if files.is_empty() {
        eprintln!("No upload results found at {}", args.path.display());
        return Ok(false);
    }

    // Single result written to an explicit destination
    if let (Some(output), false) = (&args.output, args.path.is_dir()) {
        let format = explicit_format.unwrap_or_else(|| ReportFormat::from_path(output));
        let input = &files[0];
        let bytes = std::fs::read(input)?;
        let result = UploadResult::from_slice(&bytes, schema, config.fallback)?;
        let regions = render(&result);
        let meta = ReportMeta::now(Some(input));

        if output.as_os_str() == "-" {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            format.write(&mut lock, &regions, &meta)?;
            lock.flush()?;
        } else {
            report::generate_as(output, format, &regions, &meta)?;
            if !args.quiet {
                eprintln!("\x1b[32mReport saved: {}\x1b[0m", output.display());
            }
            if args.open {
                open_report(output);
            }
        }
        return Ok(true);
    }

    let opts = BatchOptions {
        schema,
        fallback: config.fallback,
        format: explicit_format.unwrap_or(config.report.format),
        root: args.path.clone(),
        report_dir: args.report_dir.unwrap_or_else(|| config.report.dir.clone()),
        progress: !args.quiet,
    };

    if !args.quiet {
        eprintln!("\x1b[1mSDG SDMX global filter - result renderer\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("Found {} upload result(s)\n", files.len());
    }

    let outcomes = batch::run(&files, &opts);

    if !args.quiet {
        for o in &outcomes {
            match &o.result {
                Ok((path, schema)) => eprintln!(
                    "\x1b[32m{:<12}\x1b[0m {} → {}",
                    format!("[{}]", schema),
                    o.input.display(),
                    path.display()
                ),
                Err(e) => eprintln!("\x1b[31m{:<12}\x1b[0m {}: {}", "[error]", o.input.display(), e),
            }
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    eprintln!("\n{}", "─".repeat(70));
    eprintln!("\x1b[1mSummary:\x1b[0m");
    eprintln!("  \x1b[32m✓ Rendered:\x1b[0m   {}", summary.rendered);
    eprintln!("    violations: {}", summary.violations);
    eprintln!("    removals:   {}", summary.removals);
    if summary.failed > 0 {
        eprintln!("  \x1b[31m✗ Failed:\x1b[0m     {}", summary.failed);
    }

    if args.open && files.len() == 1 {
        if let Some(Ok((path, _))) = outcomes.first().map(|o| &o.result) {
            open_report(path);
        }
    }

    Ok(summary.failed == 0)
}

fn open_report(path: &Path) {
    if let Err(e) = open::that(path) {
        eprintln!("Failed to open report: {}", e);
    }
}
