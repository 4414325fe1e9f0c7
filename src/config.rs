//! Saved defaults and resolved highlighter settings.
//!
//! Config files hold the same `--flag value` tokens as the command line.
//! Precedence is CLI over the local `.tocmarkrc` over the global file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::{DEFAULT_MARKER_CLASS, MissingEntryPolicy};
use crate::observer::Threshold;
use crate::page::DEFAULT_NAV_PREFIX;

/// Everything the highlighter needs at initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub threshold: Threshold,
    pub marker_class: String,
    pub nav_prefix: String,
    pub policy: MissingEntryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            nav_prefix: DEFAULT_NAV_PREFIX.to_string(),
            policy: MissingEntryPolicy::Skip,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub no_toc: bool,
    pub strict: bool,
    pub perf: bool,
    pub threshold: Option<f64>,
    pub marker_class: Option<String>,
    pub nav_prefix: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_toc: self.no_toc || other.no_toc,
            strict: self.strict || other.strict,
            perf: self.perf || other.perf,
            threshold: other.threshold.or(self.threshold),
            marker_class: other
                .marker_class
                .clone()
                .or_else(|| self.marker_class.clone()),
            nav_prefix: other.nav_prefix.clone().or_else(|| self.nav_prefix.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Resolve to settings, filling defaults.
    ///
    /// An out-of-range threshold falls back to the default with a warning.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let threshold = match self.threshold.map(Threshold::new) {
            Some(Ok(threshold)) => threshold,
            Some(Err(err)) => {
                tracing::warn!("{err}; using {}", defaults.threshold);
                defaults.threshold
            }
            None => defaults.threshold,
        };
        Settings {
            threshold,
            marker_class: self
                .marker_class
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.marker_class),
            nav_prefix: self.nav_prefix.clone().unwrap_or(defaults.nav_prefix),
            policy: if self.strict {
                MissingEntryPolicy::Halt
            } else {
                MissingEntryPolicy::Skip
            },
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tocmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tocmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tocmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tocmark").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".tocmarkrc")
}

/// Load flags from `path`; a missing file yields defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
/// Returns an error if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# tocmark defaults (saved with --save)".to_string()];
    if flags.no_toc {
        lines.push("--no-toc".to_string());
    }
    if flags.strict {
        lines.push("--strict".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(threshold) = flags.threshold {
        lines.push(format!("--threshold {threshold}"));
    }
    if let Some(class) = &flags.marker_class {
        lines.push(format!("--marker-class {class}"));
    }
    if let Some(prefix) = &flags.nav_prefix {
        lines.push(format!("--nav-prefix {prefix}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log \"{}\"", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Split a config line on whitespace; double quotes group a value with spaces.
fn split_line_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut has_token = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                has_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

/// Extract known flags from raw tokens; unknown tokens are ignored.
///
/// Valued flags accept both `--flag value` and `--flag=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--no-toc" => flags.no_toc = true,
            "--strict" => flags.strict = true,
            "--perf" => flags.perf = true,
            _ => {
                let (name, inline) = match token.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (token, None),
                };
                if !matches!(
                    name,
                    "--threshold" | "--marker-class" | "--nav-prefix" | "--debug-log"
                ) {
                    i += 1;
                    continue;
                }
                let value = match inline {
                    Some(value) => value,
                    None => {
                        let Some(next) = tokens.get(i + 1) else {
                            break;
                        };
                        i += 1;
                        next.clone()
                    }
                };
                match name {
                    "--threshold" => flags.threshold = value.parse().ok(),
                    "--marker-class" => flags.marker_class = Some(value),
                    "--nav-prefix" => flags.nav_prefix = Some(value),
                    _ => flags.debug_log = Some(PathBuf::from(value)),
                }
            }
        }
        i += 1;
    }
    flags
}
