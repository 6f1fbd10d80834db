/// Default gap allowed between two same-titled articles, in hours.
pub const DEFAULT_TITLE_WINDOW_HOURS: f64 = 48.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Tuning knobs for a deduplication run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupeOptions {
    /// Maximum distance between publication times for two articles with the
    /// same normalized title to count as one story. Values below one hour are
    /// raised to one hour.
    pub title_window_hours: f64,
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            title_window_hours: DEFAULT_TITLE_WINDOW_HOURS,
        }
    }
}

impl DedupeOptions {
    #[must_use]
    pub fn with_title_window_hours(title_window_hours: f64) -> Self {
        Self { title_window_hours }
    }

    /// The title window in milliseconds, never less than one hour.
    ///
    /// A NaN window is treated as the one hour floor.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn window_ms(&self) -> u64 {
        (self.title_window_hours.max(1.0) * MILLIS_PER_HOUR) as u64
    }
}
