//! Track and validate the output artifact pairs of generated modules.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::api::options::Module;
use crate::utils::platform::Platform;

/// The two artifacts wrapping one module: the import library produced for
/// the generated bindings and the compiled inlines library they link
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrappedModulePair {
    /// Import library filename, produced in the working directory on the
    /// primary platform.
    pub import_library: PathBuf,
    /// Full path of the compiled inlines library under the output directory.
    pub inlines_library: PathBuf,
}

/// Artifact pairs, recorded speculatively per module after generation and
/// verified lazily on demand.
#[derive(Debug, Default)]
pub struct WrappedModules {
    pairs: Vec<WrappedModulePair>,
}

impl WrappedModules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the expected artifact pair for every module. The inlines
    /// library lands in a `release` subdirectory on the primary platform and
    /// directly in the output directory elsewhere.
    pub fn record(&mut self, modules: &[Module], output_dir: &Path, platform: Platform) {
        for module in modules {
            let inlines_file = format!(
                "{}{}{}",
                platform.library_prefix(),
                module.inlines_library_name(),
                platform.shared_library_extension()
            );
            let inlines_library = if platform.is_windows() {
                output_dir.join("release").join(inlines_file)
            } else {
                output_dir.join(inlines_file)
            };
            self.pairs.push(WrappedModulePair {
                import_library: PathBuf::from(module.import_library_file()),
                inlines_library,
            });
        }
    }

    /// All recorded pairs, verified or not.
    pub fn pairs(&self) -> &[WrappedModulePair] {
        &self.pairs
    }

    /// Drop every pair whose two files are not both present on disk, then
    /// return the survivors. Destructive: a dropped pair is never restored,
    /// even if the missing file reappears later. Must not be called before
    /// generation and compilation have finished, since the artifacts may
    /// simply not exist yet.
    pub fn verified(&mut self) -> &[WrappedModulePair] {
        self.pairs.retain(|pair| {
            let complete = pair.import_library.exists() && pair.inlines_library.exists();
            if !complete {
                debug!(import = %pair.import_library.display(), "dropping unverified module pair");
            }
            complete
        });
        &self.pairs
    }
}

impl FromIterator<WrappedModulePair> for WrappedModules {
    fn from_iter<T: IntoIterator<Item = WrappedModulePair>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Extend<WrappedModulePair> for WrappedModules {
    fn extend<T: IntoIterator<Item = WrappedModulePair>>(&mut self, iter: T) {
        self.pairs.extend(iter);
    }
}
