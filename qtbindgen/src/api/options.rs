use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{IMPORT_LIBRARY_EXTENSION, INLINES_LIBRARY_SUFFIX, LIBRARY_NAME_SUFFIX};

/// One generation unit, corresponding to one native library of the toolkit.
///
/// Modules are uniquely keyed by their derived name; one native library file
/// maps to exactly one module. The list built during setup is immutable
/// afterwards and handed to the external generator as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Derived module name, e.g. `QtCore`. Doubles as the output namespace.
    pub name: String,
    /// Name of the generated binding library, e.g. `QtCoreSharp`.
    pub library_name: String,
    /// Input headers, starting with the module-named primary header.
    pub headers: Vec<String>,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    /// Native libraries to link, as passed in the configuration.
    pub libraries: Vec<String>,
    /// Hand-written code files bundled into the generated library.
    pub code_files: Vec<PathBuf>,
}

impl Module {
    /// Create a module from its derived name, deriving the library name and
    /// the primary header.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            library_name: format!("{name}{LIBRARY_NAME_SUFFIX}"),
            headers: vec![name.clone()],
            include_dirs: Vec::new(),
            library_dirs: Vec::new(),
            libraries: Vec::new(),
            code_files: Vec::new(),
            name,
        }
    }

    /// Namespace the module's declarations are generated into.
    pub fn output_namespace(&self) -> &str {
        &self.name
    }

    /// Name of the auxiliary library holding the compiled header inlines.
    pub fn inlines_library_name(&self) -> String {
        format!("{}{INLINES_LIBRARY_SUFFIX}", self.library_name)
    }

    /// Filename of the import library produced for this module on the
    /// primary platform.
    pub fn import_library_file(&self) -> String {
        format!("{}{IMPORT_LIBRARY_EXTENSION}", self.library_name)
    }
}

/// Driver switches forwarded to the external parser/generator.
///
/// The defaults are the settings the wrapping of Qt is known to need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorFlags {
    pub verbose: bool,
    pub no_builtin_includes: bool,
    pub ignore_parse_warnings: bool,
    pub check_symbols: bool,
    pub unity_build: bool,
    pub single_output_file: bool,
    pub generate_inlines: bool,
    pub compile_code: bool,
    pub generate_properties: bool,
    pub generate_conversion_operators: bool,
    pub generate_default_values: bool,
    pub interfaces_for_multiple_inheritance: bool,
    pub marshal_char_as_managed_char: bool,
}

impl Default for GeneratorFlags {
    fn default() -> Self {
        Self {
            verbose: true,
            no_builtin_includes: true,
            ignore_parse_warnings: true,
            check_symbols: true,
            unity_build: true,
            single_output_file: true,
            generate_inlines: true,
            compile_code: true,
            generate_properties: true,
            generate_conversion_operators: true,
            generate_default_values: true,
            interfaces_for_multiple_inheritance: true,
            marshal_char_as_managed_char: true,
        }
    }
}

/// Everything the external parser/generator needs for one run: the immutable
/// module list plus the global search paths and switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub target: String,
    pub modules: Vec<Module>,
    pub include_dirs: Vec<PathBuf>,
    pub system_include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    /// Extra compiler arguments, e.g. `-F` framework search paths on macOS.
    pub compiler_arguments: Vec<String>,
    pub output_dir: PathBuf,
    pub flags: GeneratorFlags,
}
