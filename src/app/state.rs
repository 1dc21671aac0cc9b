//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::engine::Splitter;
use crate::ui::form::FormState;

/// How long the "Copied!" acknowledgement stays visible.
pub const COPIED_FLASH: Duration = Duration::from_millis(1500);

/// Top-level application state.
pub struct AppState {
    /// The engine owning the roster and the bill.
    pub splitter: Splitter,
    /// Persisted user preferences.
    pub config: AppConfig,
    /// Current display mode.  Seeded from config (or a CLI override) and
    /// flipped by the runtime toggle, which persists the new preference.
    pub dark_mode: bool,
    /// Form focus, scroll offset, and text cursor.
    pub form: FormState,
    /// Deadline for the transient "Copied!" indicator.  A newer copy simply
    /// overwrites the deadline, so timers never overlap.
    pub copied_until: Option<Instant>,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known terminal size, kept for mouse hit-testing.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, dark_mode: bool) -> Self {
        Self {
            splitter: Splitter::seed(),
            config,
            dark_mode,
            form: FormState::default(),
            copied_until: None,
            status_message: None,
            terminal_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Whether the copy acknowledgement is currently showing.
    pub fn copied(&self) -> bool {
        self.copied_until.is_some()
    }

    /// Arm the copy acknowledgement for [`COPIED_FLASH`].
    pub fn flash_copied(&mut self) {
        self.copied_until = Some(Instant::now() + COPIED_FLASH);
    }

    /// Clear the acknowledgement once its deadline has passed.  Called on
    /// every tick.
    pub fn expire_copied(&mut self) {
        if self.copied_until.is_some_and(|until| Instant::now() >= until) {
            self.copied_until = None;
        }
    }

    /// Flip the display mode and persist the preference.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.config.dark_mode = self.dark_mode;
        let _ = self.config.save();
    }
}
