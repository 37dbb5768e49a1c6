use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::adapt::resolution::{ExportConstraints, InteractiveBudget};
use crate::fonts::catalog::FontCatalog;
use crate::foundation::error::{BehindError, BehindResult};

/// Extra font directories, separated like `PATH`.
pub const ENV_FONT_DIRS: &str = "BEHINDTEXT_FONT_DIRS";
/// Set to `1` (or `true`) to skip loading system fonts.
pub const ENV_NO_SYSTEM_FONTS: &str = "BEHINDTEXT_NO_SYSTEM_FONTS";

/// Engine configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical font name table and fallback chains.
    pub fonts: FontCatalog,
    pub interactive: InteractiveBudget,
    /// Default export bounds when a caller does not pass its own.
    pub export: ExportConstraints,
    /// Directories scanned for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fonts: FontCatalog::default(),
            interactive: InteractiveBudget::default(),
            export: ExportConstraints::default(),
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BehindResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BehindError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BehindResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BehindError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `BEHINDTEXT_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    pub(crate) fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<std::ffi::OsString>,
    ) -> Self {
        if let Some(dirs) = lookup(ENV_FONT_DIRS) {
            self.font_dirs
                .extend(std::env::split_paths(&dirs).filter(|p| !p.as_os_str().is_empty()));
        }
        if let Some(v) = lookup(ENV_NO_SYSTEM_FONTS) {
            let v = v.to_string_lossy();
            if matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                self.load_system_fonts = false;
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
