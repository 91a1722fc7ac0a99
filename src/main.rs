//! Wordle Learner - CLI
//!
//! Plays Wordle against a simulated game and learns its vocabulary as it
//! goes, in the terminal or on a live dashboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wordle_learner::{
    commands::{load_stats, run_benchmark, run_learn},
    config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_REJECTIONS, SessionConfig},
    game::{Session, SimulatedEnvironment},
    output::{print_benchmark_result, print_learn_summary, print_stats_report},
    persistence::{JsonRepository, MemoryRepository, Repository},
    solver::DEFAULT_EXPLORATION_THRESHOLD,
    vocabulary::DEFAULT_EXPLORATION_RESET,
    wordlists::WordPool,
};

#[derive(Parser)]
#[command(
    name = "wordle_learner",
    about = "Self-learning Wordle player that grows its vocabulary from the game's feedback",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory for learned words, game history and logs
    #[arg(short, long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Vocabulary size below which every guess explores
    #[arg(short, long, global = true, default_value_t = DEFAULT_EXPLORATION_THRESHOLD)]
    threshold: usize,

    /// Exploration used-set size above which it is cleared
    #[arg(long, global = true, default_value_t = DEFAULT_EXPLORATION_RESET)]
    exploration_reset: usize,

    /// Accepted attempts per game
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Rejected words tolerated in one game before it is abandoned
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_REJECTIONS)]
    max_rejections: usize,

    /// Dictionary file the simulated game accepts words from
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Answer list the simulated game draws from
    #[arg(long, global = true)]
    answers: Option<PathBuf>,

    /// Keep everything in memory; nothing is read or saved
    #[arg(long, global = true)]
    in_memory: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games in the terminal and learn from them (default)
    Learn {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "10")]
        games: usize,
    },

    /// Live dashboard that plays until you quit
    Dashboard {
        /// Milliseconds between submissions
        #[arg(long, default_value = "300")]
        tick_ms: u64,
    },

    /// Play many games in parallel from the starter words, without saving
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "200")]
        games: usize,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value = "0")]
        workers: usize,
    },

    /// Show saved learning progress
    Stats {
        /// Number of recent games to list
        #[arg(short, long, default_value = "5")]
        recent: usize,
    },
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_attempts: self.max_attempts,
            exploration_threshold: self.threshold,
            exploration_reset: self.exploration_reset,
            max_rejections: self.max_rejections,
            data_dir: self.data_dir.clone(),
            seed: self.seed,
            ..SessionConfig::default()
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Log to stderr, or to a file while the dashboard owns the terminal
fn init_logging(cli: &Cli, config: &SessionConfig, to_file: bool) -> Result<()> {
    let level = if to_file {
        cli.log_level().max(LevelFilter::Info)
    } else {
        cli.log_level()
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if to_file {
        let log_dir = config.log_dir();
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;
        let path = log_dir.join("wordle_learner.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn repository(cli: &Cli) -> Box<dyn Repository> {
    if cli.in_memory {
        info!("Running in memory, progress will not be saved");
        Box::new(MemoryRepository::new())
    } else {
        Box::new(JsonRepository::new(&cli.data_dir))
    }
}

fn environment_rng(seed: Option<u64>) -> StdRng {
    // Answers are drawn from a stream separate from the learner's own
    seed.map_or_else(StdRng::from_os_rng, |seed| StdRng::seed_from_u64(seed.wrapping_add(1)))
}

fn open_session(cli: &Cli, config: SessionConfig) -> Result<Session<SimulatedEnvironment>> {
    let pool = Arc::new(WordPool::load(cli.dictionary.as_deref(), cli.answers.as_deref())?);
    info!(
        "Simulated game: {} accepted words, {} answers",
        pool.dictionary_len(),
        pool.answers().len()
    );
    let environment = SimulatedEnvironment::new(pool, environment_rng(config.seed));
    Ok(Session::open(config, environment, repository(cli)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.session_config();

    // Default to Learn mode if no command given
    let command = cli.command.as_ref().unwrap_or(&Commands::Learn { games: 10 });
    init_logging(&cli, &config, matches!(command, Commands::Dashboard { .. }))?;

    match command {
        Commands::Learn { games } => run_learn_command(&cli, config, *games),
        Commands::Dashboard { tick_ms } => run_dashboard_command(&cli, config, *tick_ms),
        Commands::Benchmark { games, workers } => {
            run_benchmark_command(&cli, &config, *games, *workers)
        }
        Commands::Stats { recent } => run_stats_command(&cli, *recent),
    }
}

fn run_learn_command(cli: &Cli, config: SessionConfig, games: usize) -> Result<()> {
    let mut session = open_session(cli, config)?;
    println!(
        "Playing {games} games starting from {} known words...",
        session.vocabulary().len()
    );
    let summary = run_learn(&mut session, games, true)?;
    print_learn_summary(&summary);
    Ok(())
}

fn run_dashboard_command(cli: &Cli, config: SessionConfig, tick_ms: u64) -> Result<()> {
    use wordle_learner::interactive::{App, run_dashboard};

    let session = open_session(cli, config)?;
    let app = App::new(session, Duration::from_millis(tick_ms));
    run_dashboard(app)
}

fn run_benchmark_command(
    cli: &Cli,
    config: &SessionConfig,
    games: usize,
    workers: usize,
) -> Result<()> {
    let pool = Arc::new(WordPool::load(cli.dictionary.as_deref(), cli.answers.as_deref())?);
    println!(
        "Running benchmark: {games} games on {} threads...",
        if workers == 0 {
            "all".to_string()
        } else {
            workers.to_string()
        }
    );
    let result = run_benchmark(&pool, config, games, workers, true)?;
    print_benchmark_result(&result);
    Ok(())
}

fn run_stats_command(cli: &Cli, recent: usize) -> Result<()> {
    let repository = repository(cli);
    let report = load_stats(repository.as_ref(), recent).or_else(|e| {
        warn!("{e:#}");
        load_stats(&MemoryRepository::new(), recent)
    })?;
    print_stats_report(&report);
    Ok(())
}
