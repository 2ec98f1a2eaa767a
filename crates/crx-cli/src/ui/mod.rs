//! Terminal status lines.
//!
//! ```no_run
//! use crx_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Wrote dist/manifest.json");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, relative_display};
pub use messages::{error, info, success, warning};

/// Whether stderr should get colors.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to TTY detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

static COLORS: AtomicBool = AtomicBool::new(false);

/// Decide once whether status lines are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
