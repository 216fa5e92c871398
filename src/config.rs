use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FreightError;
use crate::io::LoadOptions;

/// Report settings, loadable from a TOML file.
///
/// ```toml
/// delimiter = ";"
/// skip_malformed = true
/// top_n = 5
/// charts_dir = "out/charts"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Field delimiter for delimited text input
    pub delimiter: String,
    /// Cell values treated as missing
    pub null_markers: Vec<String>,
    /// Skip rows with unparseable values instead of failing
    pub skip_malformed: bool,
    /// Row limit for the ranked carrier/route tables
    pub top_n: usize,
    /// Directory SVG charts are written to
    pub charts_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            null_markers: LoadOptions::default().null_markers,
            skip_malformed: false,
            top_n: 10,
            charts_dir: PathBuf::from("charts"),
            chart_width: 1200,
            chart_height: 600,
        }
    }
}

impl ReportConfig {
    /// Read a config file; keys that are absent keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FreightError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ReportConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FreightError> {
        self.delimiter_byte()?;
        if self.top_n == 0 {
            return Err(FreightError::Config("top_n must be at least 1".to_string()));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(FreightError::Config(
                "chart dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The delimiter as a single byte. `\t` and `tab` both mean a tab.
    pub fn delimiter_byte(&self) -> Result<u8, FreightError> {
        match self.delimiter.as_str() {
            "\\t" | "tab" => Ok(b'\t'),
            d if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
            d => Err(FreightError::Config(format!(
                "delimiter must be a single ASCII character, got '{d}'"
            ))),
        }
    }

    /// Loader options derived from this config.
    pub fn load_options(&self) -> Result<LoadOptions, FreightError> {
        Ok(LoadOptions {
            delimiter: self.delimiter_byte()?,
            null_markers: self.null_markers.clone(),
            skip_malformed: self.skip_malformed,
        })
    }
}
