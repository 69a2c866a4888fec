use crate::ui::colors::Color;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

pub const DEFAULT_COMPLETE_CHARACTER: &str = "✓";
pub const DEFAULT_ERROR_CHARACTER: &str = "✗";

/// Construction options for a single spinner line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerOptions {
    pub message: String,
    pub spinner_color: Color,
    pub complete_color: Color,
    pub error_color: Color,
    pub message_color: Color,
    pub complete_character: String,
    pub error_character: String,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            message: String::new(),
            spinner_color: Color::NoColor,
            complete_color: Color::NoColor,
            error_color: Color::NoColor,
            message_color: Color::NoColor,
            complete_character: DEFAULT_COMPLETE_CHARACTER.to_string(),
            error_character: DEFAULT_ERROR_CHARACTER.to_string(),
        }
    }
}

#[derive(Debug)]
struct SpinnerState {
    message: String,
    prefix: String,
    complete: bool,
    error: bool,
    spinner_color: Color,
    complete_color: Color,
    error_color: Color,
    message_color: Color,
    complete_character: String,
    error_character: String,
}

/// One line of output.
///
/// `Spinner` is a handle: clones share the same state, so the copy held by
/// the manager and the copy held by a worker task see the same updates.
/// Every operation takes the spinner's lock for its whole duration.
#[derive(Debug, Clone)]
pub struct Spinner {
    state: Arc<Mutex<SpinnerState>>,
    has_update: Arc<AtomicBool>,
}

impl Spinner {
    pub fn new(options: SpinnerOptions) -> Self {
        let state = SpinnerState {
            message: options.message,
            prefix: String::new(),
            complete: false,
            error: false,
            spinner_color: options.spinner_color,
            complete_color: options.complete_color,
            error_color: options.error_color,
            message_color: options.message_color,
            complete_character: options.complete_character,
            error_character: options.error_character,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            has_update: Arc::new(AtomicBool::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SpinnerState> {
        // A caller that panicked mid-update leaves plain data behind; keep rendering it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, f: impl FnOnce(&mut SpinnerState)) {
        let mut state = self.lock();
        f(&mut state);
        self.has_update.store(true, Ordering::Release);
    }

    pub fn get_message(&self) -> String {
        self.lock().message.clone()
    }

    pub fn get_prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    pub fn update_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|s| s.message = message);
    }

    /// Formatted variant of [`update_message`](Self::update_message):
    /// `spinner.update_message_fmt(format_args!("step {}/{}", i, n))`.
    pub fn update_message_fmt(&self, args: fmt::Arguments<'_>) {
        self.update_message(fmt::format(args));
    }

    pub fn update_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.mutate(|s| s.prefix = prefix);
    }

    pub fn update_prefix_fmt(&self, args: fmt::Arguments<'_>) {
        self.update_prefix(fmt::format(args));
    }

    /// Mark the spinner complete. The error flag is left as it is.
    pub fn complete(&self) {
        self.mutate(|s| s.complete = true);
    }

    pub fn complete_with_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|s| {
            s.message = message;
            s.complete = true;
        });
    }

    pub fn complete_with_message_fmt(&self, args: fmt::Arguments<'_>) {
        self.complete_with_message(fmt::format(args));
    }

    /// Mark the spinner failed. The completion flag is left as it is.
    pub fn error(&self) {
        self.mutate(|s| s.error = true);
    }

    pub fn error_with_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|s| {
            s.message = message;
            s.error = true;
        });
    }

    pub fn error_with_message_fmt(&self, args: fmt::Arguments<'_>) {
        self.error_with_message(fmt::format(args));
    }

    pub fn complete_character(&self, character: impl Into<String>) {
        let character = character.into();
        self.mutate(|s| s.complete_character = character);
    }

    pub fn error_character(&self, character: impl Into<String>) {
        let character = character.into();
        self.mutate(|s| s.error_character = character);
    }

    pub fn get_complete_character(&self) -> String {
        self.lock().complete_character.clone()
    }

    pub fn get_error_character(&self) -> String {
        self.lock().error_character.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.lock().complete
    }

    pub fn is_error(&self) -> bool {
        self.lock().error
    }

    /// True when the state changed since the last `print`.
    pub fn has_update(&self) -> bool {
        self.has_update.load(Ordering::Acquire)
    }

    fn render_line(&self, frame: &str) -> String {
        let s = self.lock();
        // Cleared under the lock so a later mutation always sets it again.
        self.has_update.store(false, Ordering::Release);

        let icon = if s.error {
            s.error_color.paint(&s.error_character)
        } else if s.complete {
            s.complete_color.paint(&s.complete_character)
        } else {
            s.spinner_color.paint(frame)
        };

        format!("{}{} {}\r\n", s.prefix, icon, s.message_color.paint(&s.message))
    }

    /// Write `{prefix}{icon} {message}\r\n` to `w`.
    ///
    /// The icon is the error character if the error flag is set, else the
    /// complete character if the completion flag is set, else `frame`.
    /// Write failures are logged and dropped.
    pub fn print<W: Write + ?Sized>(&self, w: &mut W, frame: &str) {
        let line = self.render_line(frame);

        if let Err(e) = w.write_all(line.as_bytes()) {
            warn!(error = %e, "failed to write spinner line");
        }
    }
}
