use target_lexicon::{OperatingSystem, Triple};

use crate::error::{Error, Result};

/// The platform families the toolkit layout differs between: the primary
/// platform (import libraries, `release/` output layout), the framework-bundle
/// layout, and the traditional headers layout everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOS,
    Unix,
}

impl Platform {
    /// Parse a target triple string like "x86_64-pc-windows-msvc".
    pub fn from_target(target: &str) -> Result<Self> {
        let triple = target.parse::<Triple>().map_err(|e| Error::Target {
            triple: target.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_triple(&triple))
    }

    /// Classify an already-parsed triple.
    pub fn from_triple(triple: &Triple) -> Self {
        match triple.operating_system {
            OperatingSystem::Windows => Platform::Windows,
            OperatingSystem::Darwin(_) | OperatingSystem::MacOSX(_) => Platform::MacOS,
            _ => Platform::Unix,
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    pub fn is_macos(self) -> bool {
        self == Platform::MacOS
    }

    /// Filename prefix of native libraries.
    pub fn library_prefix(self) -> &'static str {
        match self {
            Platform::Windows => "",
            Platform::MacOS | Platform::Unix => "lib",
        }
    }

    /// Extension of shared libraries, dot included.
    pub fn shared_library_extension(self) -> &'static str {
        match self {
            Platform::Windows => ".dll",
            Platform::MacOS => ".dylib",
            Platform::Unix => ".so",
        }
    }
}
