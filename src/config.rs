use std::path::PathBuf;

pub const DEFAULT_ROWS: usize = 13;
pub const DEFAULT_COLS: usize = 11;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings for the terminal game, taken from `BLOOM_*` variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub render_fps: u64,
    /// `EnvFilter` directive for the log file.
    pub log_filter: String,
    /// Logging is off unless a file is given; the terminal is in raw mode.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            render_fps: DEFAULT_RENDER_FPS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; missing, unparseable or zero values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };
        Self {
            rows: positive("BLOOM_ROWS").map_or(defaults.rows, |v| v as usize),
            cols: positive("BLOOM_COLS").map_or(defaults.cols, |v| v as usize),
            render_fps: positive("BLOOM_FPS").unwrap_or(defaults.render_fps),
            log_filter: lookup("BLOOM_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            log_file: lookup("BLOOM_LOG_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}
