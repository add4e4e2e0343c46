//! Line-oriented terminal surface.
//!
//! Output lines go straight to the writer. The title becomes an OSC window
//! title sequence, the prompt is printed whenever an input takes focus, and
//! status markup is echoed on a `[status]` line. Control characters in
//! server text are dropped before anything reaches the terminal, so a
//! server cannot emit escape sequences of its own.

use std::io::Write;

use super::Surface;
use crate::ws::messages::InputKind;

/// Hint printed when the multi-line widget is shown.
pub const TEXTAREA_HINT: &str = "(multi-line input: finish with a line containing only \".\")";

/// [`Surface`] rendering to any [`Write`] sink, normally stdout.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    prompt: String,
    status_visible: bool,
}

impl<W: Write> TerminalSurface<W> {
    /// Wraps a writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            prompt: String::new(),
            status_visible: false,
        }
    }

    /// Consumes the surface and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "terminal flush failed");
        }
    }
}

/// Removes C0, DEL and C1 control characters, keeping tabs.
fn inert(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn append_line(&mut self, line: &str) {
        let line = inert(line);
        self.write(&line);
        self.write("\n");
    }

    fn scroll_to_bottom(&mut self) {
        self.flush();
    }

    fn show_input(&mut self, kind: InputKind) {
        if kind == InputKind::Textarea {
            self.write(TEXTAREA_HINT);
            self.write("\n");
        }
    }

    fn focus_input(&mut self, _kind: InputKind) {
        if !self.prompt.is_empty() {
            let prompt = format!("{} ", self.prompt);
            self.write(&prompt);
        }
        self.flush();
    }

    fn set_input_value(&mut self, _kind: InputKind, value: &str) {
        // A plain terminal cannot pre-fill the line being typed.
        if !value.is_empty() {
            let line = format!("[input] {}\n", inert(value));
            self.write(&line);
        }
    }

    fn set_prompt(&mut self, text: &str) {
        self.prompt = inert(text);
    }

    fn set_title(&mut self, title: &str) {
        let osc = format!("\x1b]0;{}\x07", inert(title));
        self.write(&osc);
        self.flush();
    }

    fn set_status(&mut self, markup: &str) {
        if self.status_visible {
            let line = format!("[status] {}\n", inert(markup));
            self.write(&line);
        }
    }

    fn set_status_visible(&mut self, visible: bool) {
        self.status_visible = visible;
    }
}
