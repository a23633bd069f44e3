//! Plain-text terminal surface.

use super::view::{View, ViewOptions, LOADING_TEXT, PRICES_HEADING, TITLE};
use super::Surface;
use crate::refresh::RefreshState;

use std::io::{self, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes each view as a full frame of text.
pub struct TerminalSurface<W: Write> {
    out: W,
    options: ViewOptions,
    clear_screen: bool,
    retry_hint: Option<String>,
}

impl TerminalSurface<io::Stdout> {
    /// Interactive surface on stdout: clears the screen between frames and
    /// shows the reload key on the error view.
    pub fn stdout(options: ViewOptions) -> Self {
        Self::new(io::stdout(), options)
            .clear_screen(true)
            .retry_hint("Press r + Enter to retry, q to quit")
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, options: ViewOptions) -> Self {
        Self {
            out,
            options,
            clear_screen: false,
            retry_hint: None,
        }
    }

    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn retry_hint(mut self, hint: impl Into<String>) -> Self {
        self.retry_hint = Some(hint.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// One frame of text for `view`.
    pub fn frame(&self, view: &View) -> String {
        let mut s = String::new();
        s.push_str(TITLE);
        s.push_str("\n\n");

        match view {
            View::Loading => {
                s.push_str(LOADING_TEXT);
                s.push('\n');
            }
            View::Failed { message } => {
                s.push_str(&format!("Error: {}\n", message));
                if let Some(hint) = &self.retry_hint {
                    s.push_str(&format!("[{}]\n", hint));
                }
            }
            View::Ready {
                cards,
                history_heading,
                history,
            } => {
                s.push_str(PRICES_HEADING);
                s.push('\n');
                let name_width = cards.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
                for card in cards {
                    s.push_str(&format!("  {:<width$}  {}\n", card.name, card.price, width = name_width));
                }

                s.push('\n');
                s.push_str(history_heading);
                s.push('\n');
                let date_width = history.iter().map(|r| r.date.len()).max().unwrap_or(0);
                for row in history {
                    s.push_str(&format!("  {:<width$}  {}\n", row.date, row.price, width = date_width));
                }
            }
        }
        s
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, state: &RefreshState) -> io::Result<()> {
        let view = View::from_state(state, &self.options);
        let frame = self.frame(&view);
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}
