use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use pagesim::common::types::{
    DEFAULT_GENERATED_LENGTH, DEFAULT_GENERATED_MAX_PAGE, DEFAULT_REFERENCE_STRING, FRAME_COUNT_RANGE,
};
use pagesim::simulation::comparison::{belady_anomalies, best_policy, compare_all_seeded, fault_curve};
use pagesim::simulation::reference::{format_reference, generate_reference, parse_reference};
use pagesim::{
    AutoPlayer, ComparisonResult, PlaybackEvent, PolicyKind, SimulationConfig, SimulationSession,
    StepRecord,
};

const HISTORY_FILE: &str = ".pagesim_history";

#[derive(Parser)]
#[command(author, version, about = "pagesim - step through virtual-memory page replacement policies")]
struct Cli {
    /// Replacement policy (fifo, lru, optimal, clock, frequency, random)
    #[arg(short, long, default_value = "fifo")]
    policy: PolicyKind,

    /// Number of frames (1-10)
    #[arg(short, long, default_value_t = 3)]
    frames: usize,

    /// Comma-separated page references
    #[arg(short, long, default_value = DEFAULT_REFERENCE_STRING)]
    reference: String,

    /// Auto-step interval in milliseconds (100-2000)
    #[arg(short, long, default_value_t = 1000)]
    speed: u64,

    /// Track TLB hits and misses
    #[arg(long)]
    tlb: bool,

    /// TLB window length (1-8)
    #[arg(long, default_value_t = 4)]
    tlb_size: usize,

    /// Working-set window length (2-10)
    #[arg(short, long, default_value_t = 5)]
    working_set: usize,

    /// Seed for the random policy
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Run the selected policy to completion and print every step
    Run {
        /// Emit the step history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare all policies on the same input
    Compare {
        /// Emit the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fault count of the selected policy for every frame count
    Sweep,
}

impl Cli {
    fn config(&self) -> Result<SimulationConfig> {
        let config = SimulationConfig {
            policy: self.policy,
            frame_count: self.frames,
            reference: parse_reference(&self.reference).context("Invalid reference string")?,
            speed_ms: self.speed,
            tlb_enabled: self.tlb,
            tlb_size: self.tlb_size,
            working_set_size: self.working_set,
            seed: self.seed,
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn format_step(record: &StepRecord) -> String {
    let mut line = format!(
        "{:>3} | page {:>3} | {:<5} | {:?}",
        record.index + 1,
        record.page,
        if record.fault { "FAULT" } else { "hit" },
        record.frames
    );
    if let Some(evicted) = record.evicted {
        line.push_str(&format!(" | evicted {}", evicted));
    }
    if let Some(tlb_hit) = record.tlb_hit {
        line.push_str(if tlb_hit { " | TLB hit" } else { " | TLB miss" });
    }
    if let Some(bits) = &record.reference_bits {
        let bits: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        line.push_str(&format!(" | bits {}", bits));
    }
    line
}

fn print_summary(session: &SimulationSession) {
    println!(
        "Policy: {}  Frames: {}  Step: {}/{}",
        session.policy(),
        session.config().frame_count,
        session.cursor(),
        session.config().reference.len()
    );
    println!("Faults: {}  Hits: {}", session.fault_count(), session.hit_count());
    if let Some(tlb) = session.tlb() {
        println!("TLB hits: {}  TLB misses: {}", tlb.hits, tlb.misses);
    }
    println!("Working set: {}", session.working_set());
}

fn display_comparison(results: &[ComparisonResult]) {
    let headers = ["policy", "faults", "hits", "efficiency"];
    let rows: Vec<[String; 4]> = results
        .iter()
        .map(|r| {
            [
                r.policy_name().to_string(),
                r.fault_count.to_string(),
                r.hit_count.to_string(),
                format!("{:.2}%", r.efficiency_percent),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.len());
        }
    }

    print!("|");
    for (header, width) in headers.iter().zip(widths) {
        print!(" {:<width$} |", header, width = width);
    }
    println!();

    print!("+");
    for width in widths {
        print!("{:-<width$}+", "", width = width + 2);
    }
    println!();

    for row in &rows {
        print!("|");
        for (value, width) in row.iter().zip(widths) {
            print!(" {:<width$} |", value, width = width);
        }
        println!();
    }

    if let Some(best) = best_policy(results) {
        println!("Fewest faults: {}", best.policy_name());
    }
}

fn run_once(config: SimulationConfig, json: bool) -> Result<()> {
    let mut session = SimulationSession::new(config)?;
    session.run_to_end()?;

    if json {
        println!("{}", serde_json::to_string_pretty(session.history())?);
        return Ok(());
    }

    for record in session.history() {
        println!("{}", format_step(record));
    }
    print_summary(&session);
    Ok(())
}

fn run_compare(config: &SimulationConfig, json: bool) -> Result<()> {
    let results = compare_all_seeded(&config.reference, config.frame_count, config.seed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display_comparison(&results);
    }
    Ok(())
}

fn run_sweep(config: &SimulationConfig) -> Result<()> {
    let curve = fault_curve(config.policy, &config.reference, FRAME_COUNT_RANGE, config.seed)?;
    println!("{} faults by frame count:", config.policy);
    for (frames, faults) in &curve {
        println!("  {:>2} frames: {}", frames, faults);
    }

    let anomalies = belady_anomalies(&curve);
    if !anomalies.is_empty() {
        println!("Belady's anomaly at frame counts: {:?}", anomalies);
    }
    Ok(())
}

/// Print whatever the playback worker produced since the last prompt
fn drain_events(player: &AutoPlayer) {
    while let Ok(event) = player.events().try_recv() {
        match event {
            PlaybackEvent::Step(record) => println!("{}", format_step(&record)),
            PlaybackEvent::Completed { fault_count, hit_count } => {
                println!("Simulation complete: {} faults, {} hits", fault_count, hit_count)
            }
            PlaybackEvent::Failed(err) => println!("Playback failed: {}", err),
        }
    }
}

fn reconfigure(player: &mut AutoPlayer, update: impl FnOnce(&mut SimulationConfig) -> Result<()>) -> Result<()> {
    player.pause();
    let mut session = player.session().lock();
    let mut config = session.config().clone();
    update(&mut config)?;
    session.reconfigure(config)?;
    println!("Session reset with policy {}, {} frames", session.policy(), session.config().frame_count);
    Ok(())
}

fn handle_command(player: &mut AutoPlayer, line: &str) -> Result<()> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match command.as_str() {
        "step" => {
            let mut session = player.session().lock();
            if session.is_terminal() {
                println!("Simulation is complete; use 'reset' to start over");
            } else {
                let record = session.step()?;
                println!("{}", format_step(record));
            }
        }
        "play" => {
            player.play();
            println!("Playing; results appear at each prompt. Use 'pause' to stop.");
        }
        "pause" => player.pause(),
        "reset" => {
            player.reset();
            println!("Session reset");
        }
        "state" => print_summary(&player.session().lock()),
        "history" => {
            for record in player.session().lock().history() {
                println!("{}", format_step(record));
            }
        }
        "ws" => println!("Working set: {}", player.session().lock().working_set()),
        "tlb" => match player.session().lock().tlb() {
            Some(tlb) => println!("TLB hits: {}  TLB misses: {}", tlb.hits, tlb.misses),
            None => println!("TLB model is disabled"),
        },
        "compare" => {
            let config = player.session().lock().config().clone();
            run_compare(&config, false)?;
        }
        "policy" => {
            let policy: PolicyKind = arg.parse()?;
            reconfigure(player, |c| {
                c.policy = policy;
                Ok(())
            })?;
        }
        "frames" => {
            let frames: usize = arg.parse().context("Frame count must be a number")?;
            reconfigure(player, |c| {
                c.frame_count = frames;
                Ok(())
            })?;
        }
        "ref" => {
            let reference = parse_reference(arg)?;
            reconfigure(player, |c| {
                c.reference = reference;
                Ok(())
            })?;
        }
        "random" => {
            let reference = generate_reference(
                &mut rand::thread_rng(),
                DEFAULT_GENERATED_LENGTH,
                DEFAULT_GENERATED_MAX_PAGE,
            );
            println!("Reference string: {}", format_reference(&reference));
            reconfigure(player, |c| {
                c.reference = reference;
                Ok(())
            })?;
        }
        "help" => print_help(),
        other => println!("Unknown command '{}'. Type 'help' for assistance.", other),
    }
    Ok(())
}

fn run_shell(config: SimulationConfig) -> Result<()> {
    println!("Welcome to pagesim. Type 'help' for assistance or 'exit' to quit.");

    let session = Arc::new(Mutex::new(SimulationSession::new(config)?));
    let mut player = AutoPlayer::new(session);

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        drain_events(&player);
        match rl.readline("pagesim> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
                    println!("Goodbye!");
                    break;
                }
                if let Err(err) = handle_command(&mut player, line) {
                    println!("Error: {}", err);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    player.pause();
    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Simulation commands:");
    println!("  step                 - Process the next reference");
    println!("  play                 - Step automatically at the configured speed");
    println!("  pause                - Stop automatic stepping");
    println!("  reset                - Clear the session and start over");
    println!();
    println!("Inspection:");
    println!("  state                - Show counters and progress");
    println!("  history              - Show every processed step");
    println!("  ws                   - Show the current working-set size");
    println!("  tlb                  - Show TLB hits and misses");
    println!("  compare              - Compare all policies on the current input");
    println!();
    println!("Configuration (resets the session):");
    println!("  policy <name>        - fifo, lru, optimal, clock, frequency, random");
    println!("  frames <n>           - Number of frames (1-10)");
    println!("  ref <p1,p2,...>      - New reference string");
    println!("  random               - Generate a random reference string");
    println!();
    println!("Other commands:");
    println!("  help                 - Display this help message");
    println!("  exit                 - Exit the shell");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config()?;

    match &cli.command {
        Some(Commands::Shell) | None => run_shell(config)?,
        Some(Commands::Run { json }) => run_once(config, *json)?,
        Some(Commands::Compare { json }) => run_compare(&config, *json)?,
        Some(Commands::Sweep) => run_sweep(&config)?,
    }

    Ok(())
}
