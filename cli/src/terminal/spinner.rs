use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn start(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = match ProgressStyle::with_template("{spinner:.blue} {msg}") {
        Ok(style) => style.tick_strings(TICKS),
        Err(_) => ProgressStyle::default_spinner(),
    };

    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
