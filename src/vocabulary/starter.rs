//! Curated seed vocabulary
//!
//! Common five-letter words every session starts out knowing. Exploration
//! works through these before it touches anything learned.

/// Seed words, in the order exploration prefers them
pub const STARTER_WORDS: &[&str] = &[
    "raise", "later", "soare", "arise", "irate", "arose", "alter", "saner", "stare", "snare",
    "crate", "slate", "crane", "trace", "share", "spare", "parse", "reaps", "pares", "cares",
    "dares", "fares", "wares", "tares", "rates", "mates", "dates", "gates", "hates", "fates",
    "bates", "sates", "about", "after", "other", "which", "their", "there", "would", "could",
    "these", "those", "think", "place", "still", "where", "world", "first", "great", "heart",
    "house", "large", "point", "small", "round", "white", "black", "plain", "green", "light",
    "stand", "clear", "sound", "water",
];
