//! Display utilities for the CLI

use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(50).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(50).bright_black());
}

pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// `[#####.....]  50%`
pub fn progress_bar(percent: u8) -> String {
    let filled = (percent as usize).min(100) / 10;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled).bright_green(),
        ".".repeat(10 - filled).bright_black(),
        percent
    )
}
