use std::fmt::Display;

use colored::*;
use nono_common::contact::BatchOutcome;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

/// Events on this target are terminal output, not log lines.
pub const TARGET: &str = "nono::print";
pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 12;
const COLUMN_MIN_WIDTH: usize = 15;

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: TARGET, "{msg}");
}

pub fn banner() {
    let text_content: String = format!("⟦ NONO v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    print(&format!("{sep}{text}{sep}"));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: String = format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.bright_green(),
        "─".repeat(right).bright_black()
    );

    print(&line);
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{sep}"));
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(UnicodeWidthStr::width(key)));
    let colon: String = format!(
        "{}{}",
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

/// One status line per item, or a single "none".
pub fn lines<'a>(items: impl Iterator<Item = &'a str>) {
    let mut empty = true;
    for item in items {
        print_status(item);
        empty = false;
    }
    if empty {
        print_status("none".dimmed().to_string());
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Two aligned columns, one row per phone field.
pub fn before_after(rows: &[(&str, &str)]) {
    let width: usize = rows
        .iter()
        .map(|(before, _)| UnicodeWidthStr::width(*before))
        .max()
        .unwrap_or(0)
        .max(COLUMN_MIN_WIDTH);
    let bar: ColoredString = "│".color(colors::SEPARATOR);

    print(&format!(
        " {} {} {}",
        pad("BEFORE", width).color(colors::PRIMARY),
        bar,
        "AFTER".color(colors::PRIMARY)
    ));
    print(&format!(
        " {}",
        format!("{}┼{}", "─".repeat(width + 1), "─".repeat(COLUMN_MIN_WIDTH + 1)).color(colors::SEPARATOR)
    ));

    for (before, after) in rows {
        let (before, after) = if before == after {
            (pad(before, width).color(colors::TEXT_DEFAULT), after.color(colors::TEXT_DEFAULT))
        } else {
            (pad(before, width).color(colors::NUMBER_BEFORE), after.color(colors::NUMBER_AFTER).bold())
        };
        print(&format!(" {before} {bar} {after}"));
    }
}

pub fn outcome(outcome: &BatchOutcome) {
    let status: ColoredString = if outcome.is_success() {
        outcome.status_code.to_string().green().bold()
    } else {
        outcome.status_code.to_string().red().bold()
    };
    print_status(format!(
        "{} for contact {}: {} ({})",
        outcome.correlation_id,
        outcome.contact_name.color(colors::ACCENT),
        status,
        outcome.reason
    ));
}
