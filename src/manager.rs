//! The spinner manager: an ordered set of spinners redrawn as one block.
//!
//! Every tick the render loop saves the cursor, prints each spinner with the
//! shared frame glyph, advances the frame and restores the cursor, so the
//! next pass overwrites the same lines instead of scrolling.

use crate::config::{SpinnerConfig, DEFAULT_FRAME_DURATION};
use crate::error::{Result, SpinnerError};
use crate::spinner::{
    Spinner, SpinnerOptions, DEFAULT_COMPLETE_CHARACTER, DEFAULT_ERROR_CHARACTER,
};
use crate::ui::animations::Animation;
use crate::ui::colors::Color;
use crate::ui::terminal;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct RenderLoop {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

struct Inner {
    spinners: RwLock<Vec<Spinner>>,
    chars: Vec<String>,
    frame_duration: Duration,
    spinner_color: Color,
    complete_color: Color,
    error_color: Color,
    message_color: Color,
    complete_character: String,
    error_character: String,
    writer: SharedWriter,
    handle_signals: bool,
    frame: AtomicUsize,
    render_loop: Mutex<Option<RenderLoop>>,
    stopping: tokio::sync::Mutex<()>,
}

impl Inner {
    fn spinners(&self) -> Vec<Spinner> {
        self.spinners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn current_glyph(&self) -> &str {
        &self.chars[self.frame.load(Ordering::Acquire)]
    }

    fn advance_frame(&self) {
        let next = (self.frame.load(Ordering::Acquire) + 1) % self.chars.len();
        self.frame.store(next, Ordering::Release);
    }

    fn render_frame(&self) {
        let mut w = lock(&self.writer);
        let spinners = self.spinners.read().unwrap_or_else(PoisonError::into_inner);
        trace!(
            frame = self.frame.load(Ordering::Relaxed),
            spinners = spinners.len(),
            "render pass"
        );

        log_write_error(terminal::save_cursor(&mut *w));
        log_write_error(terminal::hide_cursor(&mut *w));

        let glyph = self.current_glyph();
        for spinner in spinners.iter() {
            spinner.print(&mut *w, glyph);
        }
        drop(spinners);
        self.advance_frame();

        log_write_error(terminal::restore_cursor(&mut *w));
        log_write_error(w.flush());
    }

    fn render_final_frame(&self) {
        let mut w = lock(&self.writer);
        let glyph = self.current_glyph();
        for spinner in self.spinners() {
            spinner.print(&mut *w, glyph);
        }

        log_write_error(terminal::show_cursor(&mut *w));
        log_write_error(w.flush());
    }
}

fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to write to spinner output");
    }
}

/// Owns the spinners and drives the shared render loop.
///
/// Cloning gives another handle to the same manager.
#[derive(Clone)]
pub struct SpinnerManager {
    inner: Arc<Inner>,
}

impl Default for SpinnerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerManager {
    pub fn new() -> Self {
        Self::from_builder(ManagerBuilder::default())
    }

    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::default()
    }

    fn from_builder(builder: ManagerBuilder) -> Self {
        let inner = Inner {
            spinners: RwLock::new(Vec::new()),
            chars: builder.chars,
            frame_duration: builder.frame_duration,
            spinner_color: builder.spinner_color,
            complete_color: builder.complete_color,
            error_color: builder.error_color,
            message_color: builder.message_color,
            complete_character: builder.complete_character,
            error_character: builder.error_character,
            writer: Arc::new(Mutex::new(builder.writer)),
            handle_signals: builder.handle_signals,
            frame: AtomicUsize::new(0),
            render_loop: Mutex::new(None),
            stopping: tokio::sync::Mutex::new(()),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Append a spinner using the manager's colors and icons.
    ///
    /// Safe to call while the render loop is running; the spinner shows up
    /// from the next pass on.
    pub fn add_spinner(&self, message: impl Into<String>) -> Spinner {
        let inner = &self.inner;
        let spinner = Spinner::new(SpinnerOptions {
            message: message.into(),
            spinner_color: inner.spinner_color,
            complete_color: inner.complete_color,
            error_color: inner.error_color,
            message_color: inner.message_color,
            complete_character: inner.complete_character.clone(),
            error_character: inner.error_character.clone(),
        });

        inner
            .spinners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(spinner.clone());
        spinner
    }

    /// Handles to every spinner, in display order.
    pub fn get_spinners(&self) -> Vec<Spinner> {
        self.inner.spinners()
    }

    /// Start the render loop on the current tokio runtime.
    ///
    /// Unless disabled, also installs a SIGINT/SIGTERM handler that stops
    /// the manager and exits the process with status 0, so the cursor is
    /// shown again after an external interrupt.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn init(&self) {
        let mut slot = lock(&self.inner.render_loop);
        if slot.is_some() {
            warn!("spinner manager already running; ignoring init");
            return;
        }

        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_render_loop(Arc::clone(&self.inner), shutdown_rx));
        *slot = Some(RenderLoop { shutdown, handle });
        drop(slot);

        debug!(
            frame_duration = ?self.inner.frame_duration,
            frames = self.inner.chars.len(),
            "spinner render loop started"
        );

        if self.inner.handle_signals {
            let manager = self.clone();
            tokio::spawn(async move {
                wait_for_termination().await;
                info!("termination signal received, stopping spinners");
                manager.stop().await;
                std::process::exit(0);
            });
        }
    }

    /// Stop the render loop, persist the final frame and show the cursor.
    ///
    /// Waits for the loop to exit before rendering. A `stop` that races
    /// another one returns only after the first has shown the cursor again.
    /// Calling `stop` when the manager is not running (never started, or
    /// already stopped) does nothing.
    pub async fn stop(&self) {
        let _stopping = self.inner.stopping.lock().await;
        let running = lock(&self.inner.render_loop).take();
        let Some(RenderLoop { shutdown, handle }) = running else {
            debug!("spinner manager not running; ignoring stop");
            return;
        };

        // The loop may already be gone; awaiting its handle still returns.
        let _ = shutdown.send(());
        if let Err(e) = handle.await {
            warn!(error = %e, "spinner render loop ended abnormally");
        }

        self.inner.render_final_frame();
        debug!("spinner manager stopped");
    }

    /// Run one render pass immediately.
    pub fn render_frame(&self) {
        self.inner.render_frame();
    }

    /// Index into the character map used by the next pass.
    pub fn current_frame(&self) -> usize {
        self.inner.frame.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.render_loop).is_some()
    }

    pub fn get_writer(&self) -> SharedWriter {
        Arc::clone(&self.inner.writer)
    }

    pub fn get_char_map(&self) -> &[String] {
        &self.inner.chars
    }

    pub fn get_frame_duration(&self) -> Duration {
        self.inner.frame_duration
    }
}

async fn run_render_loop(inner: Arc<Inner>, mut shutdown: oneshot::Receiver<()>) {
    let mut ticks = tokio::time::interval(inner.frame_duration);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticks.tick().await; // Skip the first tick which fires immediately

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticks.tick() => inner.render_frame(),
        }
    }

    debug!("spinner render loop exited");
}

async fn wait_for_termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => debug!("received SIGINT"),
        _ = terminate => debug!("received SIGTERM"),
    }
}

/// Options for a [`SpinnerManager`], applied in the order they are called.
pub struct ManagerBuilder {
    chars: Vec<String>,
    frame_duration: Duration,
    spinner_color: Color,
    complete_color: Color,
    error_color: Color,
    message_color: Color,
    complete_character: String,
    error_character: String,
    writer: Box<dyn Write + Send>,
    handle_signals: bool,
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self {
            chars: Animation::Dots.char_map(),
            frame_duration: DEFAULT_FRAME_DURATION,
            spinner_color: Color::HiGreen,
            complete_color: Color::HiGreen,
            error_color: Color::HiRed,
            message_color: Color::NoColor,
            complete_character: DEFAULT_COMPLETE_CHARACTER.to_string(),
            error_character: DEFAULT_ERROR_CHARACTER.to_string(),
            writer: Box::new(io::stdout()),
            handle_signals: true,
        }
    }
}

impl ManagerBuilder {
    /// Glyphs cycled through by every running spinner. Default: dots.
    pub fn with_char_map<I, S>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chars = chars.into_iter().map(Into::into).collect();
        self
    }

    /// Use a named animation's glyphs and its interval as the frame duration.
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.chars = animation.char_map();
        self.frame_duration = animation.interval();
        self
    }

    /// Default: 250ms.
    pub fn with_frame_duration(mut self, duration: Duration) -> Self {
        self.frame_duration = duration;
        self
    }

    /// Default: `Color::HiGreen`.
    pub fn with_spinner_color(mut self, color: Color) -> Self {
        self.spinner_color = color;
        self
    }

    /// Default: `Color::HiGreen`.
    pub fn with_complete_color(mut self, color: Color) -> Self {
        self.complete_color = color;
        self
    }

    /// Default: `Color::HiRed`.
    pub fn with_error_color(mut self, color: Color) -> Self {
        self.error_color = color;
        self
    }

    /// Default: `Color::NoColor`.
    pub fn with_message_color(mut self, color: Color) -> Self {
        self.message_color = color;
        self
    }

    pub fn without_colors(self) -> Self {
        self.with_spinner_color(Color::NoColor)
            .with_complete_color(Color::NoColor)
            .with_error_color(Color::NoColor)
            .with_message_color(Color::NoColor)
    }

    pub fn with_complete_character(mut self, character: impl Into<String>) -> Self {
        self.complete_character = character.into();
        self
    }

    pub fn with_error_character(mut self, character: impl Into<String>) -> Self {
        self.error_character = character.into();
        self
    }

    /// Output stream for every render. Default: stdout.
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Whether `init` installs the SIGINT/SIGTERM handler. Default: true.
    pub fn with_signal_handler(mut self, enabled: bool) -> Self {
        self.handle_signals = enabled;
        self
    }

    pub fn with_config(mut self, config: &SpinnerConfig) -> Self {
        if let Some(animation) = config.animation {
            self = self.with_animation(animation);
        }
        if let Some(duration) = config.frame_duration() {
            self = self.with_frame_duration(duration);
        }

        self.with_spinner_color(config.spinner_color)
            .with_complete_color(config.complete_color)
            .with_error_color(config.error_color)
            .with_message_color(config.message_color)
            .with_complete_character(config.complete_character.clone())
            .with_error_character(config.error_character.clone())
            .with_signal_handler(config.handle_signals)
    }

    pub fn build(self) -> Result<SpinnerManager> {
        if self.chars.is_empty() {
            return Err(SpinnerError::EmptyCharMap);
        }
        if self.frame_duration.is_zero() {
            return Err(SpinnerError::ZeroFrameDuration);
        }

        Ok(SpinnerManager::from_builder(self))
    }
}
