//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print a labelled value, label in green
pub fn field(label: &str, value: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), value);
}

/// Print one rendered child: index, key and text
pub fn entry(index: usize, key: &str, text: &str) {
    println!("{:>3} {} {}", index.to_string().dimmed(), key.bold(), text);
}

/// Print one child section: index and key with a trailing slash
pub fn section(index: usize, key: &str) {
    println!("{:>3} {}", index.to_string().dimmed(), format!("{key}/").blue().bold());
}

/// Print plain output (no color, for rendered text and data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
