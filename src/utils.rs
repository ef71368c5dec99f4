use colored::Colorize;
use std::io::{self, Write};

pub fn print_info(text: &str) {
    println!("{} {}", "ℹ".blue(), text);
}

pub fn print_success(text: &str) {
    println!("{} {}", "✓".green(), text);
}

pub fn print_warning(text: &str) {
    println!("{} {}", "⚠".yellow(), text);
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", "✗".red(), text);
}

/// Ask the user a yes/no question on stdin, matching the exact reply "y".
/// Any other reply (including empty input or a read failure) is "no".
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut reply = String::new();
    if io::stdin().read_line(&mut reply).is_err() {
        return false;
    }
    reply.trim_end_matches(['\n', '\r']) == "y"
}
