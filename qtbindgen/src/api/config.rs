use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Everything one run needs to know about the Qt installation being wrapped.
///
/// The values come from the caller (typically probed out of `qmake -query` by
/// the launcher), either built in code or loaded from a TOML file with
/// [`QtConfig::from_file`].
///
/// # Example
///
/// ```
/// let config = qtbindgen::QtConfig {
///     lib_files: vec!["libQt5Core.so".into(), "libQt5Widgets.so".into()],
///     target: "x86_64-unknown-linux-gnu".into(),
///     ..Default::default()
/// };
/// assert!(config.lib_files.len() == 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QtConfig {
    /// Path to the qmake binary, used by the inlines compilation step.
    pub qmake: PathBuf,
    /// Path to the make binary, used by the inlines compilation step.
    pub make: PathBuf,
    /// Qt binaries directory (import libraries live here on Windows).
    pub bins: PathBuf,
    /// Qt libraries directory (framework bundles on macOS).
    pub libs: PathBuf,
    /// Shared headers root of the traditional layout.
    pub headers: PathBuf,
    /// Root of the Qt documentation tree, consumed by the doc-mining pass.
    pub docs: PathBuf,
    /// One native library file per toolkit module, e.g. `libQt5Core.so`.
    pub lib_files: Vec<String>,
    /// System include directories forwarded to the parser.
    pub system_include_dirs: Vec<PathBuf>,
    /// Framework search directories (macOS only).
    pub framework_dirs: Vec<PathBuf>,
    /// Target triple, e.g. `x86_64-pc-windows-msvc`.
    pub target: String,
    /// Directory the generator writes its artifacts into.
    pub output_dir: PathBuf,
    /// Directory holding the hand-written support code files attached to the
    /// core module.
    pub support_files: PathBuf,
}

impl QtConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
