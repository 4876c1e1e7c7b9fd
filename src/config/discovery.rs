//! Pattern configuration discovery.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::DetectorConfig;

/// File name looked up at every configuration tier.
pub const PATTERNS_FILE: &str = "patterns.yaml";

/// Returns the XDG-compliant config directory for porkscan.
///
/// Uses `$XDG_CONFIG_HOME/porkscan/` if the variable is set, otherwise
/// defaults to `$HOME/.config/porkscan/`. Returns `None` if neither can be
/// determined.
fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_home.is_empty() {
            return Some(PathBuf::from(xdg_home).join("porkscan"));
        }
    }

    dirs::home_dir().map(|home| home.join(".config").join("porkscan"))
}

/// Resolves the configuration directory from an optional CLI override.
///
/// Priority:
/// 1. `override_dir` (from `--config-dir`)
/// 2. `PORKSCAN_CONFIG_DIR` environment variable
/// 3. `.porkscan` default
pub fn resolve_config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Ok(env_dir) = std::env::var("PORKSCAN_CONFIG_DIR") {
        if !env_dir.is_empty() {
            return PathBuf::from(env_dir);
        }
    }

    PathBuf::from(".porkscan")
}

/// Where the active pattern configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed explicitly with `--patterns`.
    Explicit(PathBuf),
    /// Found in `{dir}/local/patterns.yaml`.
    LocalOverride(PathBuf),
    /// Found in `{dir}/patterns.yaml`.
    Project(PathBuf),
    /// Found in `$XDG_CONFIG_HOME/porkscan/patterns.yaml`.
    Xdg(PathBuf),
    /// Found in `$HOME/.porkscan/patterns.yaml`.
    Global(PathBuf),
    /// No file found; the embedded template is used.
    Embedded,
}

impl ConfigSource {
    /// Returns the file backing this source, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p)
            | Self::LocalOverride(p)
            | Self::Project(p)
            | Self::Xdg(p)
            | Self::Global(p) => Some(p),
            Self::Embedded => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "Explicit: {}", p.display()),
            Self::LocalOverride(p) => write!(f, "Local override: {}", p.display()),
            Self::Project(p) => write!(f, "Project: {}", p.display()),
            Self::Xdg(p) => write!(f, "Global (XDG): {}", p.display()),
            Self::Global(p) => write!(f, "Global: {}", p.display()),
            Self::Embedded => write!(f, "Embedded defaults"),
        }
    }
}

/// Locates the pattern file for a configuration directory.
///
/// Checks each tier in priority order and returns the first that exists:
/// `{dir}/local/`, `{dir}/`, the XDG config directory, then `$HOME/.porkscan/`.
pub fn locate_patterns_file(dir: &Path) -> ConfigSource {
    let local_path = dir.join("local").join(PATTERNS_FILE);
    if local_path.exists() {
        return ConfigSource::LocalOverride(local_path);
    }

    let project_path = dir.join(PATTERNS_FILE);
    if project_path.exists() {
        return ConfigSource::Project(project_path);
    }

    if let Some(xdg_dir) = xdg_config_dir() {
        let xdg_path = xdg_dir.join(PATTERNS_FILE);
        if xdg_path.exists() {
            return ConfigSource::Xdg(xdg_path);
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_path = home_dir.join(".porkscan").join(PATTERNS_FILE);
        if home_path.exists() {
            return ConfigSource::Global(home_path);
        }
    }

    ConfigSource::Embedded
}

/// Loads the detector configuration through the resolution chain.
///
/// An explicit file always wins; otherwise the first tier found by
/// [`locate_patterns_file`] is merged over the embedded defaults.
pub fn load_detector_config(
    explicit: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<(DetectorConfig, ConfigSource)> {
    let source = match explicit {
        Some(path) => ConfigSource::Explicit(path.to_path_buf()),
        None => locate_patterns_file(&resolve_config_dir(config_dir)),
    };

    debug!(source = %source, "Resolved pattern configuration");

    let config = match source.path() {
        Some(path) => DetectorConfig::load_from_path(path)?,
        None => DetectorConfig::embedded()?,
    };

    Ok((config, source))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn local_override_wins() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let base = dir.path();

        std::fs::create_dir_all(base.join("local"))?;
        std::fs::write(base.join("local").join(PATTERNS_FILE), "{}")?;
        std::fs::write(base.join(PATTERNS_FILE), "{}")?;

        let source = locate_patterns_file(base);
        assert_eq!(
            source,
            ConfigSource::LocalOverride(base.join("local").join(PATTERNS_FILE))
        );
        Ok(())
    }

    #[test]
    fn project_fallback() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let base = dir.path();

        std::fs::write(base.join(PATTERNS_FILE), "{}")?;

        let source = locate_patterns_file(base);
        assert_eq!(source, ConfigSource::Project(base.join(PATTERNS_FILE)));
        Ok(())
    }

    #[test]
    fn missing_project_files_skip_project_tiers() {
        let dir = TempDir::new().unwrap();
        let source = locate_patterns_file(dir.path());
        // A global file on the host may still be found; project tiers must not be.
        assert!(!matches!(
            source,
            ConfigSource::LocalOverride(_) | ConfigSource::Project(_)
        ));
    }

    #[test]
    fn override_dir_takes_priority() {
        let resolved = resolve_config_dir(Some(Path::new("/custom/dir")));
        assert_eq!(resolved, PathBuf::from("/custom/dir"));
    }

    #[test]
    fn explicit_file_is_loaded() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("mine.yaml");
        std::fs::write(&path, "suspicion:\n  high_at: 6\n")?;

        let (config, source) = load_detector_config(Some(&path), None)?;
        assert_eq!(config.suspicion.high_at, 6);
        assert_eq!(source, ConfigSource::Explicit(path));
        Ok(())
    }

    #[test]
    fn project_file_is_merged_over_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(
            dir.path().join(PATTERNS_FILE),
            "confidence:\n  per_indicator: 10\n",
        )?;

        let (config, source) = load_detector_config(None, Some(dir.path()))?;
        assert_eq!(config.confidence.per_indicator, 10);
        assert_eq!(config.confidence.item_base, 70);
        assert!(matches!(source, ConfigSource::Project(_)));
        Ok(())
    }

    #[test]
    fn explicit_missing_file_fails() {
        let result = load_detector_config(Some(Path::new("/nonexistent/patterns.yaml")), None);
        assert!(result.is_err());
    }

    #[test]
    fn source_labels() {
        assert_eq!(ConfigSource::Embedded.to_string(), "Embedded defaults");
        assert_eq!(
            ConfigSource::Project(PathBuf::from(".porkscan/patterns.yaml")).to_string(),
            "Project: .porkscan/patterns.yaml"
        );
        assert!(ConfigSource::Embedded.path().is_none());
    }
}
