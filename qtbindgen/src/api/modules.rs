//! Partition the toolkit into generation units, one per native library.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::api::config::QtConfig;
use crate::api::options::Module;
use crate::error::Result;
use crate::utils::platform::Platform;
use crate::MODULE_NAME_PREFIX;

/// Derive the module name from a native library filename.
///
/// On the primary platform the vendor prefix carries a version digit
/// (`Qt5Core.lib`) which is collapsed back to the canonical `Qt` token; on
/// the other platforms the filename prefix is stripped (`libQt5Core.so` and
/// `libQtCore.so` both keep their stem past `lib`).
pub fn module_name_from_lib_file(lib_file: &str, platform: Platform) -> String {
    let stem = Path::new(lib_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(lib_file);
    if platform.is_windows() {
        match stem.get(MODULE_NAME_PREFIX.len() + 1..) {
            Some(rest) => format!("{MODULE_NAME_PREFIX}{rest}"),
            None => stem.to_string(),
        }
    } else {
        stem.strip_prefix(platform.library_prefix())
            .unwrap_or(stem)
            .to_string()
    }
}

/// Per-module special cases, looked up by short module name.
struct ModuleExtras {
    /// Short module name, without the `Qt` prefix.
    module: &'static str,
    /// Sibling frameworks whose bundle and headers dirs are added on the
    /// framework-bundle platform.
    sibling_frameworks: &'static [&'static str],
    /// Extra subdirectories of the shared headers root on the traditional
    /// layout.
    header_subdirs: &'static [&'static str],
    /// Register every header file found in the last include directory as an
    /// input header, not just the primary one.
    enumerate_headers: bool,
    /// Hand-written support code bundled with the module.
    code_files: &'static [&'static str],
}

const MODULE_EXTRAS: &[ModuleExtras] = &[
    ModuleExtras {
        module: "UiPlugin",
        sibling_frameworks: &["QtUiPlugin"],
        header_subdirs: &[],
        enumerate_headers: false,
        code_files: &[],
    },
    // The designer module consumes the UI-plugin headers directly.
    ModuleExtras {
        module: "Designer",
        sibling_frameworks: &[],
        header_subdirs: &["QtUiPlugin"],
        enumerate_headers: true,
        code_files: &[],
    },
    ModuleExtras {
        module: "Core",
        sibling_frameworks: &[],
        header_subdirs: &[],
        enumerate_headers: false,
        code_files: &["QObject.cs", "QChar.cs", "QEvent.cs", "_iobuf.cs"],
    },
];

fn extras_for(short_name: &str) -> Option<&'static ModuleExtras> {
    MODULE_EXTRAS.iter().find(|e| e.module == short_name)
}

/// Build the generation units for every configured native library.
///
/// The returned list is complete and immutable; nothing mutates it after
/// setup. Missing directories are not errors, they just contribute nothing.
pub fn partition_modules(config: &QtConfig, platform: Platform) -> Result<Vec<Module>> {
    let mut modules = Vec::with_capacity(config.lib_files.len());
    for lib_file in &config.lib_files {
        let name = module_name_from_lib_file(lib_file, platform);
        let mut module = Module::new(&name);
        let short_name = name.strip_prefix(MODULE_NAME_PREFIX).unwrap_or(&name);
        let extras = extras_for(short_name);

        if platform.is_macos() {
            add_framework_dirs(&mut module, &config.libs, &name);
            if let Some(extras) = extras {
                for framework in extras.sibling_frameworks {
                    add_framework_dirs(&mut module, &config.libs, framework);
                }
            }
        } else {
            let module_include = config.headers.join(&name);
            if module_include.is_dir() {
                module.include_dirs.push(module_include);
            }
            if let Some(extras) = extras {
                for subdir in extras.header_subdirs {
                    module.include_dirs.push(config.headers.join(subdir));
                }
            }
        }

        if extras.is_some_and(|e| e.enumerate_headers) {
            if let Some(dir) = module.include_dirs.last() {
                module.headers.extend(enumerate_headers(dir)?);
            }
        }
        if let Some(extras) = extras {
            for file in extras.code_files {
                module.code_files.push(config.support_files.join(file));
            }
        }
        module.libraries.push(lib_file.clone());

        debug!(module = %module.name, includes = module.include_dirs.len(), "partitioned module");
        modules.push(module);
    }
    Ok(modules)
}

fn add_framework_dirs(module: &mut Module, libs: &Path, name: &str) {
    let framework = libs.join(format!("{name}.framework"));
    // A sibling framework can coincide with the module's own bundle.
    for dir in [framework.clone(), framework.join("Headers")] {
        if !module.include_dirs.contains(&dir) {
            module.include_dirs.push(dir);
        }
    }
}

/// Header files of a directory, sorted for deterministic module manifests.
fn enumerate_headers(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    Ok(fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".h"))
        .sorted()
        .collect())
}
