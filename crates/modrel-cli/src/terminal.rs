// Rust guideline compliant 2026-10-17

//! Terminal helpers: color detection and status lines on stderr.

use std::env;
use std::io::Write;
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the `NO_COLOR` environment variable and requires stdout to be a TTY.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Returns an in-memory buffer that renders colors only when asked to.
#[must_use]
pub fn buffer(use_color: bool) -> Buffer {
    if use_color {
        Buffer::ansi()
    } else {
        Buffer::no_color()
    }
}

/// Writes `text` to `out` in the given color.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_colored<W: WriteColor>(
    out: &mut W,
    text: &str,
    color: Option<Color>,
    bold: bool,
) -> std::io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
    write!(out, "{}", text)?;
    out.reset()
}

/// Returns stdout as a color-aware stream.
#[must_use]
pub fn stdout(use_color: bool) -> StandardStream {
    StandardStream::stdout(color_choice(use_color))
}

fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn print_status(prefix: &str, prefix_color: Color, message: &str, use_color: bool) {
    let mut stderr = StandardStream::stderr(color_choice(use_color));
    let _ = write_colored(&mut stderr, &format!("{} ", prefix), Some(prefix_color), true);
    let _ = writeln!(stderr, "{}", message);
}

/// Prints an error message to stderr.
pub fn print_error(message: &str, use_color: bool) {
    print_status("✗ Error:", Color::Red, message, use_color);
}

/// Prints a warning message to stderr.
pub fn print_warning(message: &str, use_color: bool) {
    print_status("⚠", Color::Yellow, message, use_color);
}
