use anyhow::{Context, Result};
use clap::Parser;
use jumpmotion::{
    jump_report, render_overlay, session_report, CliConfig, JumpEngine, KeyEvent, KeyResult,
    LabelPool, RankingMode, StrView,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jumpmotion")]
#[command(about = "Label every word in a text window and jump by typing the label")]
#[command(version)]
struct Cli {
    /// Text file to navigate
    file: PathBuf,

    /// Caret offset in characters
    #[arg(long, default_value_t = 0)]
    caret: usize,

    /// First visible line (0-based)
    #[arg(long, default_value_t = 0)]
    first_line: usize,

    /// Number of visible lines
    #[arg(long)]
    lines: Option<usize>,

    /// Label distribution
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Label alphabet, e.g. "fjdksla;"
    #[arg(long)]
    keys: Option<String>,

    /// Caret sensitivity for caret-relative ranking
    #[arg(long)]
    sensitivity: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label pool capacity
    #[arg(long)]
    pool: Option<usize>,

    /// Extend a selection to the target instead of moving the caret
    #[arg(long)]
    extend: bool,

    /// Print JSON instead of the text overlay
    #[arg(long)]
    json: bool,

    /// Colour labels with ANSI escapes
    #[arg(long)]
    color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum ModeArg {
    Sequential,
    CaretRelative,
}

impl From<ModeArg> for RankingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => RankingMode::Sequential,
            ModeArg::CaretRelative => RankingMode::CaretRelative,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load_toml(path)?,
        None => CliConfig::default(),
    };
    let base = config.base_mut();
    if let Some(keys) = &cli.keys {
        base.set_alphabet(keys).context("invalid --keys")?;
    }
    if let Some(mode) = cli.mode {
        base.set_ranking_mode(mode.into());
    }
    if let Some(sensitivity) = cli.sensitivity {
        base.set_caret_sensitivity(sensitivity);
    }
    if let Some(pool) = cli.pool {
        config.pool_capacity = pool;
    }
    if let Some(lines) = cli.lines {
        config.viewport_lines = lines;
    }
    Ok(config)
}

fn print_state(cli: &Cli, view: &StrView, engine: &JumpEngine<LabelPool>) -> Result<()> {
    let mut out = io::stdout().lock();
    if cli.json {
        let report = session_report(view, engine.session());
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        for line in render_overlay(view, engine.renderer().visible(), cli.color) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "-- {} target(s), typed {:?}", engine.session().len(), engine.session().consumed())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let view = StrView::new(&text)
        .with_viewport(cli.first_line, config.viewport_lines)
        .with_caret(cli.caret)
        .with_cell_size(config.cell_width, config.cell_height);

    let pool = LabelPool::new(config.pool_capacity);
    let mut engine = JumpEngine::new(config.into_base(), pool);
    let targets = engine.begin(&view)?;
    tracing::info!(targets, "jump session started");
    print_state(&cli, &view, &engine)?;
    if targets == 0 {
        eprintln!("no jump targets in view");
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let keys: Vec<KeyEvent> = if input == "esc" {
            vec![KeyEvent::Escape]
        } else {
            input.chars().map(KeyEvent::Char).collect()
        };

        for key in keys {
            match engine.process_key(key) {
                KeyResult::NotHandled => {}
                KeyResult::NoMatch => {
                    if let KeyEvent::Char(ch) = key {
                        eprintln!("no label continues with {:?}", ch);
                    }
                }
                KeyResult::Narrowed(_) => {}
                KeyResult::Jump(target) => {
                    let report = jump_report(&view, target, cli.extend);
                    if cli.json {
                        println!("{}", serde_json::to_string(&report)?);
                    } else {
                        println!(
                            "jump to offset {} (line {}, column {}), caret {}",
                            report.offset,
                            report.line + 1,
                            report.column + 1,
                            report.caret
                        );
                    }
                    return Ok(());
                }
                KeyResult::Cancelled => {
                    println!("cancelled");
                    return Ok(());
                }
            }
        }
        print_state(&cli, &view, &engine)?;
    }

    engine.reset();
    Ok(())
}
