// algotrace: record an algorithm once, then scrub through every step

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;

use algotrace::config::{PlayerConfig, DEFAULT_SPEED_MS};
use algotrace::input::{GeneratorConfig, InputGenerator, Notation, Shape};
use algotrace::player::Player;
use algotrace::registry::{
    all_algorithms, require_algorithm, AlgorithmDescriptor, Family, ParamKind, ParamValue, Params,
};
use algotrace::snapshot::Trace;
use algotrace::ui::App;

#[derive(Parser, Debug)]
#[command(name = "algotrace", version, about)]
struct Cli {
    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every algorithm with its parameters.
    List {
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate a trace and print it as JSON.
    Trace {
        #[command(flatten)]
        run: RunArgs,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Step through a trace in the terminal.
    View {
        #[command(flatten)]
        run: RunArgs,

        /// Autoplay interval in milliseconds.
        #[arg(long, default_value_t = DEFAULT_SPEED_MS)]
        speed_ms: u64,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Algorithm id (see `algotrace list`).
    id: String,

    /// Input in the algorithm's notation, e.g. "[5, 2, 4, 1]" or "({[]})".
    #[arg(long, conflicts_with = "seed")]
    input: Option<String>,

    /// Seed for a random input; omitted means a fresh seed.
    #[arg(long)]
    seed: Option<String>,

    /// Length of a random input.
    #[arg(long, default_value_t = 12)]
    len: usize,

    /// Parameter as key=value; repeatable.
    #[arg(long = "param", value_parser = Params::parse_assignment)]
    params: Vec<(String, ParamValue)>,
}

/// Everything needed to reproduce a run, plus its trace
#[derive(Serialize)]
struct Export<'a> {
    algorithm: &'a str,
    input: &'a [i64],
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<&'a str>,
    params: &'a Params,
    trace: &'a Trace,
}

/// A fully resolved run request
struct Run {
    descriptor: &'static AlgorithmDescriptor,
    input: Vec<i64>,
    seed: Option<String>,
    params: Params,
    generator: InputGenerator,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let in_tui = matches!(cli.cmd, Command::View { .. });
    init_logging(cli.log_file.as_deref(), !in_tui)?;

    match cli.cmd {
        Command::List { json } => cmd_list(json),
        Command::Trace { run, pretty } => cmd_trace(run, pretty),
        Command::View { run, speed_ms } => cmd_view(run, speed_ms),
    }
}

/// Logs go to `--log-file` when given, otherwise to stderr outside the TUI
fn init_logging(log_file: Option<&Path>, allow_stderr: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        None if allow_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn cmd_list(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(all_algorithms())?);
        return Ok(());
    }

    let mut family: Option<Family> = None;
    for descriptor in all_algorithms() {
        if family != Some(descriptor.family) {
            family = Some(descriptor.family);
            println!("\n{}", descriptor.family);
        }
        let params: Vec<String> = descriptor
            .params
            .iter()
            .map(|spec| match spec.kind {
                ParamKind::Number { min, max, default } => match default {
                    Some(d) => format!("{}={} ({}..={})", spec.id, d, min, max),
                    None => format!("{}=<required>", spec.id),
                },
                ParamKind::Select { options, default } => {
                    format!("{}={} ({})", spec.id, default, options.join("|"))
                }
            })
            .collect();
        println!(
            "  {:<18} {:<22} [{}] {}",
            descriptor.id,
            descriptor.name,
            descriptor.notation,
            params.join(" ")
        );
    }
    Ok(())
}

fn cmd_trace(args: RunArgs, pretty: bool) -> anyhow::Result<()> {
    let run = resolve_run(args)?;
    let params = run.descriptor.resolve_params(&run.params)?;
    let trace = run.descriptor.generate(&run.input, &params)?;

    let export = Export {
        algorithm: run.descriptor.id,
        input: &run.input,
        seed: run.seed.as_deref(),
        params: &params,
        trace: &trace,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_json::to_string(&export)?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_view(args: RunArgs, speed_ms: u64) -> anyhow::Result<()> {
    let run = resolve_run(args)?;
    let config = PlayerConfig {
        speed: Duration::from_millis(speed_ms),
        ..PlayerConfig::default()
    };
    let mut player = Player::new(config);
    player.load_algorithm(run.descriptor.id, &run.input, &run.params)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(player, run.generator);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}

/// Look up the algorithm, then parse or generate its input
fn resolve_run(args: RunArgs) -> anyhow::Result<Run> {
    let descriptor = require_algorithm(&args.id)?;
    let generator = InputGenerator::new(generator_config(descriptor, args.len));

    let (input, seed) = match &args.input {
        Some(raw) => {
            let input = descriptor
                .notation
                .parse(raw)
                .with_context(|| format!("cannot read input for {}", descriptor.id))?;
            (input, None)
        }
        None => {
            let generated = generator.generate(args.seed.as_deref());
            (generated.input, Some(generated.seed))
        }
    };

    let mut params: Params = args.params.into_iter().collect();
    if params.get("target").is_none() {
        if let Some(target) = default_target(descriptor, &input) {
            tracing::info!(target_value = target, "no target given, using the middle element");
            params.insert("target", ParamValue::Number(target));
        }
    }

    Ok(Run {
        descriptor,
        input,
        seed,
        params,
        generator,
    })
}

/// Searches without an explicit target look for the middle element, pulled
/// into the range the target parameter accepts
fn default_target(descriptor: &AlgorithmDescriptor, input: &[i64]) -> Option<i64> {
    let spec = descriptor.param("target")?;
    let &middle = input.get(input.len() / 2)?;
    match spec.kind {
        ParamKind::Number { min, max, .. } => Some(middle.clamp(min, max)),
        ParamKind::Select { .. } => None,
    }
}

/// Random inputs that satisfy the algorithm's preconditions
fn generator_config(descriptor: &AlgorithmDescriptor, len: usize) -> GeneratorConfig {
    let (min, max) = match (descriptor.family, descriptor.notation) {
        (_, Notation::Text) => ('a' as i64, 'z' as i64),
        (Family::Distribution, _) => (0, 99),
        (Family::Analysis, _) => (1, 5),
        _ => (1, 99),
    };
    let shape = match descriptor.family {
        Family::Searching => Shape::Sorted,
        _ => descriptor.notation.default_shape(),
    };
    GeneratorConfig {
        len,
        min,
        max,
        shape,
    }
}
