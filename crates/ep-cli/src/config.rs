//! Scan settings: TOML file plus command-line overrides.

use std::path::Path;

use anyhow::Context;
use ep_core::{LogFormat, Priming, ScanConfig, ScanMode};

/// Command-line flags that take precedence over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub format:    Option<LogFormat>,
    pub mode:      Option<ScanMode>,
    pub full_scan: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut ScanConfig) {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.full_scan {
            config.priming = Priming::FullScan;
        }
    }
}

/// Parse a TOML document into a [`ScanConfig`].  Missing keys keep their
/// defaults.
pub fn parse(text: &str) -> anyhow::Result<ScanConfig> {
    let config: ScanConfig = toml::from_str(text)?;
    Ok(config)
}

/// Read `path` (if any), apply `overrides`, and validate the result.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<ScanConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ScanConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
