//! Settings file lookup and parsing.
//!
//! `config.toml` lives in the platform config dir (e.g. `~/.config/gridcalc/` on
//! Linux). Every key is optional:
//!
//! ```toml
//! rows = 20
//! cols = 8
//! slot = "budget"
//! recalc = "dependency"      # or "linear"
//! unresolved_refs = "error"  # or "zero"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;

use gridcalc_core::Settings;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "gridcalc")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.config_dir().join("config.toml"))
}

/// Directory holding one `<slot>.json` per saved grid.
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.data_dir().to_path_buf())
}

/// Load settings from `explicit` if given, else from the default config file.
/// A missing default file means defaults; a missing explicit file is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return read_settings(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => read_settings(&path),
        _ => {
            debug!("No config file, using default settings");
            Ok(Settings::default())
        }
    }
}

pub fn read_settings(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let settings = parse_settings(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

pub fn parse_settings(text: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::{RecalcMode, UnresolvedRefs};

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_settings("").unwrap(), Settings::default());
    }

    #[test]
    fn test_full_config() {
        let settings = parse_settings(
            r#"
            rows = 20
            cols = 8
            slot = "budget"
            recalc = "dependency"
            unresolved_refs = "error"
            "#,
        )
        .unwrap();
        assert_eq!(settings.rows, 20);
        assert_eq!(settings.cols, 8);
        assert_eq!(settings.slot, "budget");
        assert_eq!(settings.recalc, RecalcMode::Dependency);
        assert_eq!(settings.unresolved_refs, UnresolvedRefs::Error);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let settings = parse_settings("recalc = \"linear\"\nrows = 3").unwrap();
        assert_eq!(settings.rows, 3);
        assert_eq!(settings.cols, 10);
        assert_eq!(settings.slot, "spreadsheet");
    }

    #[test]
    fn test_rejects_unknown_keys_and_values() {
        assert!(parse_settings("colour = \"red\"").is_err());
        assert!(parse_settings("recalc = \"eager\"").is_err());
        assert!(parse_settings("rows = -1").is_err());
    }

    #[test]
    fn test_read_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "cols = 4\n").unwrap();
        assert_eq!(read_settings(&path).unwrap().cols, 4);

        let missing = dir.path().join("missing.toml");
        assert!(load_settings(Some(&missing)).is_err());
    }
}
