use crate::options::DedupeOptions;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub title_window_hours: f64,
}

impl AppConfig {
    #[must_use]
    pub fn dedupe_options(&self) -> DedupeOptions {
        DedupeOptions::with_title_window_hours(self.title_window_hours)
    }
}
