//! Benchmark command
//!
//! Plays many simulated games in parallel against one shared vocabulary,
//! starting from the starter words, to measure how fast the learner improves.
//! Nothing is persisted.

use crate::config::SessionConfig;
use crate::game::{Environment, Game, GameRecord, SimulatedEnvironment};
use crate::solver::GuessSelector;
use crate::vocabulary::Vocabulary;
use crate::wordlists::WordPool;
use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub average_attempts: f64,
    /// Won games by number of attempts
    pub distribution: BTreeMap<usize, usize>,
    pub vocabulary_before: usize,
    pub vocabulary_after: usize,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64 * 100.0
        }
    }
}

/// Play `games` games on `workers` threads
///
/// Games share one vocabulary, locked for each submission, so words learned
/// in one game are available to the others straight away. Game `i` draws
/// its answer from a generator seeded with `seed + i`.
///
/// # Errors
/// Returns an error if the thread pool cannot be built or a game fails.
pub fn run_benchmark(
    pool: &Arc<WordPool>,
    config: &SessionConfig,
    games: usize,
    workers: usize,
    show_progress: bool,
) -> Result<BenchmarkResult> {
    let vocabulary = {
        let mut vocabulary = Vocabulary::new();
        vocabulary.set_exploration_reset(config.exploration_reset);
        Mutex::new(vocabulary)
    };
    let vocabulary_before = vocabulary
        .lock()
        .map_err(|_| anyhow!("vocabulary lock poisoned"))?
        .len();
    let selector = GuessSelector::new(config.exploration_threshold);
    let seed = config.seed.unwrap_or_else(rand::random);

    let pb = if show_progress {
        let pb = ProgressBar::new(games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let threads = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let start = Instant::now();
    let records: Vec<GameRecord> = threads.install(|| {
        (0..games)
            .into_par_iter()
            .map(|index| {
                let game_seed = seed.wrapping_add(index as u64);
                let record = play_one(index + 1, game_seed, pool, &vocabulary, &selector, config)?;
                pb.inc(1);
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()
    })?;
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    let vocabulary_after = vocabulary
        .into_inner()
        .map_err(|_| anyhow!("vocabulary lock poisoned"))?
        .len();

    let mut distribution = BTreeMap::new();
    let mut won_attempts = 0;
    for record in records.iter().filter(|record| record.won) {
        *distribution.entry(record.attempts.len()).or_insert(0) += 1;
        won_attempts += record.attempts.len();
    }
    let wins = distribution.values().sum::<usize>();
    let total_games = records.len();

    Ok(BenchmarkResult {
        total_games,
        wins,
        losses: total_games - wins,
        average_attempts: if wins == 0 {
            0.0
        } else {
            won_attempts as f64 / wins as f64
        },
        distribution,
        vocabulary_before,
        vocabulary_after,
        duration,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

fn play_one(
    game_number: usize,
    seed: u64,
    pool: &Arc<WordPool>,
    vocabulary: &Mutex<Vocabulary>,
    selector: &GuessSelector,
    config: &SessionConfig,
) -> Result<GameRecord> {
    let mut environment = SimulatedEnvironment::new(Arc::clone(pool), StdRng::seed_from_u64(seed));
    let mut rng = StdRng::seed_from_u64(seed.rotate_left(32));
    environment.start_game()?;

    let lock = move || vocabulary.lock().map_err(|_| anyhow!("vocabulary lock poisoned"));
    let mut game = Game::new(game_number, lock()?.len());
    while !game.is_finished() {
        let mut vocabulary = lock()?;
        game.advance(&mut vocabulary, selector, &mut environment, &mut rng, config)?;
    }
    Ok(game.into_record())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(42),
            feedback_retry_delay: Duration::ZERO,
            ..SessionConfig::default()
        }
    }

    fn pool() -> Arc<WordPool> {
        Arc::new(WordPool::embedded().unwrap())
    }

    #[test]
    fn benchmark_runs() {
        let result = run_benchmark(&pool(), &config(), 16, 4, false).unwrap();

        assert_eq!(result.total_games, 16);
        assert_eq!(result.wins + result.losses, 16);
        assert!(result.vocabulary_after >= result.vocabulary_before);
        assert!(result.win_rate() <= 100.0);
    }

    #[test]
    fn benchmark_distribution_sums_to_wins() {
        let result = run_benchmark(&pool(), &config(), 24, 3, false).unwrap();

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.wins);
        for &attempts in result.distribution.keys() {
            assert!((1..=6).contains(&attempts));
        }
        if result.wins > 0 {
            assert!(result.average_attempts >= 1.0);
            assert!(result.average_attempts <= 6.0);
        }
    }

    #[test]
    fn benchmark_with_no_games() {
        let result = run_benchmark(&pool(), &config(), 0, 2, false).unwrap();
        assert_eq!(result.total_games, 0);
        assert_eq!(result.vocabulary_after, result.vocabulary_before);
        assert!(result.win_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn single_worker_is_deterministic() {
        let first = run_benchmark(&pool(), &config(), 8, 1, false).unwrap();
        let second = run_benchmark(&pool(), &config(), 8, 1, false).unwrap();

        assert_eq!(first.wins, second.wins);
        assert_eq!(first.distribution, second.distribution);
        assert_eq!(first.vocabulary_after, second.vocabulary_after);
    }
}
