use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use encoding_rs::Encoding;
use mobtrack::{Tracker, TrackerConfig, content};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

mod view;

#[derive(Subcommand)]
enum Cmd {
    /// Interactive session, one command per line (the default)
    Repl,
    /// Run commands from a script file, one per line
    Run {
        /// Path to the script
        file: PathBuf,
    },
    /// Run the given command lines in order
    Exec {
        /// Full command lines, e.g. "damage 1 4"
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Print the starting roster as JSON (stdout)
    Dump {
        /// Single-line JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// List the built-in encounters
    Encounters,
}

#[derive(Parser)]
#[command(name = "mobtrack")]
#[command(about = "Tabletop combat encounter tracker")]
struct Cli {
    /// RNG seed for deterministic dice (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// YAML or JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Built-in encounter to add after the config roster
    #[arg(long, global = true)]
    encounter: Option<String>,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mut tracker = Tracker::from_config(&config).context("failed to build the starting roster")?;
    if let Some(name) = &cli.encounter {
        let roster = content::encounter(name)?;
        tracker
            .load_roster(&roster)
            .with_context(|| format!("failed to load encounter: {}", name))?;
    }
    for line in tracker.take_output() {
        tracing::info!("{}", line);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.cmd.unwrap_or(Cmd::Repl) {
        Cmd::Repl => repl(&mut tracker, io::stdin().lock(), &mut out)?,
        Cmd::Run { file } => {
            let text = read_text_auto(&file)
                .with_context(|| format!("failed to read script: {}", file.display()))?;
            run_lines(&mut tracker, text.lines(), &mut out)?;
        }
        Cmd::Exec { lines } => run_lines(&mut tracker, lines.iter().map(String::as_str), &mut out)?,
        Cmd::Dump { compact } => {
            let snapshot = tracker.snapshot();
            if compact {
                writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
            } else {
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            }
        }
        Cmd::Encounters => {
            let mut names: Vec<_> = content::builtin_encounters().into_keys().collect();
            names.sort_unstable();
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<TrackerConfig> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    TrackerConfig::from_str_for_path(&text, path)
}

/// Decode UTF-8/UTF-16 text, honouring a BOM if present.
fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// Run one line: print its log, then the roster if it asked for a refresh.
fn step(tracker: &mut Tracker, line: &str, out: &mut impl Write) -> Result<()> {
    let refresh = tracker.exec(line);
    for msg in tracker.take_output() {
        writeln!(out, "{}", msg)?;
    }
    if refresh {
        writeln!(out, "{}", view::render(&tracker.snapshot()))?;
    }
    Ok(())
}

fn run_lines<'a>(
    tracker: &mut Tracker,
    lines: impl Iterator<Item = &'a str>,
    out: &mut impl Write,
) -> Result<()> {
    for line in lines {
        step(tracker, line, out)?;
        if tracker.exit_requested() {
            break;
        }
    }
    Ok(())
}

fn repl(tracker: &mut Tracker, mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", view::render(&tracker.snapshot()))?;
    writeln!(out, "Enter a command (type 'help' for options)")?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        step(tracker, line.trim_end_matches(['\r', '\n']), out)?;
        if tracker.exit_requested() {
            break;
        }
    }
    Ok(())
}
