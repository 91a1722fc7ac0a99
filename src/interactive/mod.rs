//! Live learning dashboard

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, run_dashboard};
