//! Persisted display settings.
//!
//! Settings live in a 3-line plain text file next to the executable:
//! line 1 is the display mode (`"12"` or `"24"`), lines 2 and 3 are the
//! window x/y position. The file is rewritten in full on every mutation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file has {0} lines, expected 3 (mode, x, y)")]
    Truncated(usize),
    #[error("settings file has non-integer {axis} position: {value:?}")]
    BadPosition { axis: &'static str, value: String },
}

/// 12-hour (with AM/PM suffix) vs 24-hour time rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl DisplayMode {
    /// Parse the stored mode line. Anything other than `"24"` renders as
    /// 12-hour time, including empty or garbage values.
    pub fn from_stored(line: &str) -> Self {
        match line.trim() {
            "24" => Self::TwentyFourHour,
            _ => Self::TwelveHour,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::TwelveHour => Self::TwentyFourHour,
            Self::TwentyFourHour => Self::TwelveHour,
        }
    }

    /// Render a wall-clock instant in this mode.
    pub fn format(self, now: DateTime<Local>) -> String {
        match self {
            Self::TwentyFourHour => now.format("%H:%M:%S").to_string(),
            Self::TwelveHour => now.format("%I:%M:%S %p").to_string(),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwelveHour => write!(f, "12"),
            Self::TwentyFourHour => write!(f, "24"),
        }
    }
}

/// The one persisted record: display mode plus window top-left position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub mode: DisplayMode,
    pub x: i32,
    pub y: i32,
}

/// Flat-file store for [`DisplaySettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings record.
    ///
    /// A missing file, fewer than 3 lines, or non-integer positions are
    /// all fatal: there are no fallback defaults. An unrecognized mode
    /// line is not an error and normalizes to 12-hour display.
    pub fn load(&self) -> Result<DisplaySettings, SettingsError> {
        let raw = fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = raw.lines().collect();
        if lines.len() < 3 {
            return Err(SettingsError::Truncated(lines.len()));
        }

        let parse_pos = |axis, line: &str| {
            line.trim()
                .parse::<i32>()
                .map_err(|_| SettingsError::BadPosition {
                    axis,
                    value: line.to_string(),
                })
        };

        Ok(DisplaySettings {
            mode: DisplayMode::from_stored(lines[0]),
            x: parse_pos("x", lines[1])?,
            y: parse_pos("y", lines[2])?,
        })
    }

    /// Rewrite the whole file. The last line carries no trailing newline,
    /// matching the format `load` accepts.
    pub fn save(&self, settings: &DisplaySettings) -> Result<(), SettingsError> {
        let data = format!("{}\n{}\n{}", settings.mode, settings.x, settings.y);
        fs::write(&self.path, data)?;
        Ok(())
    }
}
