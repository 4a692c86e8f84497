//! Styled terminal output for tf-visual
//!
//! Status lines use a pastel palette so they stay readable next to the
//! diff columns, which carry their own action colours.

use owo_colors::OwoColorize;

type Rgb = (u8, u8, u8);

const MINT: Rgb = (152, 225, 152);
const CORAL: Rgb = (255, 160, 160);
const CREAM: Rgb = (255, 230, 160);
const SKY: Rgb = (160, 200, 255);
const LAVENDER: Rgb = (181, 174, 254);
const MUTED: Rgb = (160, 160, 160);

/// Width of the rule printed under section headers
const RULE_WIDTH: usize = 50;

fn status_line(symbol: &str, (r, g, b): Rgb, message: &str) -> String {
    format!("{} {}", symbol.truecolor(r, g, b).bold(), message.bright_white())
}

pub fn success(message: &str) {
    println!("{}", status_line("✓", MINT, message));
}

/// Printed to stderr
pub fn error(message: &str) {
    eprintln!("{}", status_line("✗", CORAL, message));
}

pub fn warning(message: &str) {
    println!("{}", status_line("⚠", CREAM, message));
}

pub fn info(message: &str) {
    println!("{}", status_line("ℹ", SKY, message));
}

/// Section header followed by a muted rule
pub fn section(title: &str) {
    let (r, g, b) = LAVENDER;
    let (mr, mg, mb) = MUTED;
    println!("\n{}", title.truecolor(r, g, b).bold());
    println!("{}", "─".repeat(RULE_WIDTH).truecolor(mr, mg, mb));
}

/// Indented `key: value` line, key muted
pub fn key_value(key: &str, value: &str) {
    let (r, g, b) = MUTED;
    println!(
        "  {} {}",
        format!("{}:", key).truecolor(r, g, b),
        value.bright_white()
    );
}

pub fn dimmed(message: &str) {
    let (r, g, b) = MUTED;
    println!("{}", message.truecolor(r, g, b));
}

pub fn blank() {
    println!();
}
