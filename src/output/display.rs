//! Display functions for command results

use super::formatters::{attempt_line, create_progress_bar, letter_counts};
use crate::commands::{BenchmarkResult, LearnSummary, StatsReport};
use colored::Colorize;

/// Print the result of a learning run
pub fn print_learn_summary(summary: &LearnSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "LEARNING SESSION".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if summary.games_played < summary.games_requested {
        println!(
            "\n{}",
            format!(
                "Stopped after {} of {} games",
                summary.games_played, summary.games_requested
            )
            .yellow()
        );
    }

    println!("\n🎮 {}", "Games:".bright_cyan().bold());
    println!("   Played:           {}", summary.games_played);
    println!(
        "   Won / lost:       {} / {}",
        summary.wins.to_string().green(),
        summary.losses.to_string().red()
    );
    println!(
        "   Win rate:         [{}] {}",
        create_progress_bar(summary.win_rate(), 100.0, 20).green(),
        format!("{:.1}%", summary.win_rate()).bright_yellow().bold()
    );
    println!("   Attempts per win: {:.2}", summary.attempts_per_win);
    println!("   Lifetime win rate: {:.1}%", summary.lifetime_win_rate);
    println!("   Time taken:       {:.2}s", summary.duration.as_secs_f64());

    println!("\n📚 {}", "Vocabulary:".bright_cyan().bold());
    println!(
        "   {} → {} words ({})",
        summary.vocabulary_before,
        summary.vocabulary_after,
        format!("+{}", summary.words_learned()).green()
    );
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate()).bright_yellow().bold()
    );
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts).bright_yellow()
    );
    println!(
        "   Vocabulary:       {} → {} words",
        result.vocabulary_before, result.vocabulary_after
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&attempts, &count) in &result.distribution {
        let pct = (count as f64 / result.total_games as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {attempts}: {bar} {count:4} ({pct:5.1}%)");
    }
    if result.losses > 0 {
        let pct = (result.losses as f64 / result.total_games as f64) * 100.0;
        println!("   {}: {:>45} ({pct:5.1}%)", "X".red(), result.losses);
    }
}

/// Print saved learning progress
pub fn print_stats_report(report: &StatsReport) {
    let stats = &report.statistics;

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "LEARNING PROGRESS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n🎮 {}", "Games:".bright_cyan().bold());
    println!("   Played:           {}", stats.total_games);
    println!(
        "   Won / lost:       {} / {}",
        stats.games_won.to_string().green(),
        stats.games_lost.to_string().red()
    );
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", stats.win_rate()).bright_yellow().bold()
    );
    println!("   Attempts per win: {:.2}", stats.attempts_per_win());

    println!("\n📚 {}", "Vocabulary:".bright_cyan().bold());
    println!(
        "   Known words:      {} ({} starters)",
        report.vocabulary_size, report.starter_count
    );
    println!("   Rejected words:   {}", report.invalid_words);
    println!("   Top letters:      {}", letter_counts(&report.top_letters));

    if let (Some(first), Some(last)) = (stats.learning_curve.first(), stats.learning_curve.last()) {
        println!(
            "   Growth:           {} → {} words over {} games",
            first.vocabulary,
            last.vocabulary,
            stats.learning_curve.len()
        );
    }

    if report.recent_games.is_empty() {
        return;
    }

    println!("\n🕹  {}", "Recent games:".bright_cyan().bold());
    for game in &report.recent_games {
        let result = if game.won {
            "won".green()
        } else {
            "lost".red()
        };
        let target = game
            .target_word
            .as_ref()
            .map_or_else(|| "?????".to_string(), |word| word.text().to_uppercase());
        println!("   Game {} ({result}, answer {target})", game.game_number);
        for attempt in &game.attempts {
            println!("     {}", attempt_line(attempt));
        }
    }
}
