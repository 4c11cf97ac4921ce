// Rust guideline compliant 2026-10-12

//! Terminal UI utilities for the `pid` CLI.
//!
//! Color detection and colored status lines on stderr, so stdout only ever
//! carries command output.

use std::env;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stdout)
}

fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints a status message with a colored prefix to stderr.
///
/// # Arguments
/// * `prefix` - The prefix text
/// * `prefix_color` - The color for the prefix
/// * `message` - The message text
/// * `use_color` - Whether color may be emitted at all
pub fn print_status(prefix: &str, prefix_color: Color, message: &str, use_color: bool) {
    let mut stderr = StandardStream::stderr(color_choice(use_color));
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(prefix_color)).set_bold(true));
    let _ = write!(stderr, "{}: ", prefix);
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{}", message);
}

/// Prints a success message.
pub fn print_success(message: &str, use_color: bool) {
    print_status("ok", Color::Green, message, use_color);
}

/// Prints a warning message.
pub fn print_warning(message: &str, use_color: bool) {
    print_status("warning", Color::Yellow, message, use_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_never_when_disabled() {
        assert_eq!(color_choice(false), ColorChoice::Never);
        assert_eq!(color_choice(true), ColorChoice::Auto);
    }

    #[test]
    fn test_should_use_color_does_not_panic() {
        // Result depends on the environment running the tests.
        let _ = should_use_color();
    }
}
