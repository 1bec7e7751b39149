//! Terminal rendering for markdown output.
//!
//! Rich mode styles markdown with termimad; plain mode prints it untouched,
//! which keeps output stable for scripts and tests.

use std::fmt::Display;

use edutron_core::OperationStatus;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Renders anything that displays as markdown.
    pub fn render(&self, markdown: impl Display) {
        let markdown = markdown.to_string();
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                // Keep the hashes visible so heading levels stay readable.
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Renders a success line.
    pub fn success(&self, message: impl Into<String>) {
        self.render(OperationStatus::success(message.into()));
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
