//! # qtbindgen
//!
//! Prepares the declaration graph of the Qt C++ API for mechanical
//! translation into safe bindings in a managed target language.
//!
//! ## Problem
//!
//! Qt's API surface is large, irregular, and split across a dozen optional
//! native libraries. A parser can turn its headers into a declaration graph,
//! and a generator can turn a declaration graph into bindings. But the graph
//! as parsed is not the API as intended: private implementation classes leak
//! through, value-like types parse as reference types, the string class needs
//! no wrapper at all, protected enums belong to the public contract, and
//! optional modules reference each other in ways the generated bindings must
//! not.
//!
//! ## Solution
//!
//! `qtbindgen` sits between the external parser and the external generator.
//! It partitions the toolkit into one generation unit per native library and
//! runs an ordered set of rule-based passes over the parsed graph: before
//! generation to correct misclassifications and prune private surface, after
//! generation to sweep up members other passes synthesized, and finally to
//! verify which output artifact pairs actually materialized.
//!
//! ## Usage example
//!
//! ```rust,ignore
//! let config = qtbindgen::QtConfig::from_file("qt.toml")?;
//! let mut pipeline = qtbindgen::Pipeline::builder(config)
//!     .postprocess_pass(doc_miner)
//!     .postprocess_pass(case_renamer)
//!     .build()?;
//!
//! let options = pipeline.setup()?;
//! let mut ast = parser.parse(&options)?;      // external collaborator
//!
//! pipeline.preprocess(&mut ast)?;
//! generator.generate(&mut ast, &options)?;    // external collaborator
//! pipeline.postprocess(&mut ast, &options)?;
//! compiler.compile(&options)?;                // external collaborator
//!
//! for pair in pipeline.verified_wrapped_modules() {
//!     package(pair);
//! }
//! ```

/// Canonical module-name token, e.g. the `Qt` of `QtCore`.
pub const MODULE_NAME_PREFIX: &str = "Qt";

/// Suffix appended to a module name to form its generated library name.
pub const LIBRARY_NAME_SUFFIX: &str = "Sharp";

/// Suffix of the auxiliary library holding compiled header inlines.
pub(crate) const INLINES_LIBRARY_SUFFIX: &str = "-inlines";

/// Extension of the import libraries produced on the primary platform.
pub(crate) const IMPORT_LIBRARY_EXTENSION: &str = ".dll";

pub(crate) mod api;
pub mod ast;
mod error;
pub(crate) mod utils;

pub use crate::api::config::QtConfig;
pub use crate::api::modules::{module_name_from_lib_file, partition_modules};
pub use crate::api::options::{GeneratorFlags, GeneratorOptions, Module};
pub use crate::api::pipeline::{AstPass, Pipeline};
pub use crate::api::verify::{WrappedModulePair, WrappedModules};
pub use crate::error::{Error, Result};
pub use crate::utils::platform::Platform;

/// Transformation passes over the declaration graph, applied by
/// [`Pipeline`] in fixed order and usable individually.
pub mod passes {
    pub use crate::api::passes::private_filter::PrivateFilter;
    pub mod private_filter {
        pub use crate::api::passes::private_filter::Builder;
    }
    pub use crate::api::passes::value_types::ValueTypeOverride;
    pub mod value_types {
        pub use crate::api::passes::value_types::Builder;
    }
    pub use crate::api::passes::method_exclusions::MethodExclusions;
    pub mod method_exclusions {
        pub use crate::api::passes::method_exclusions::Builder;
    }
    pub use crate::api::passes::type_mapped::TypeMappedSurface;
    pub mod type_mapped {
        pub use crate::api::passes::type_mapped::Builder;
    }
    pub use crate::api::passes::conversion_ops::ConversionOperatorFilter;
    pub mod conversion_ops {
        pub use crate::api::passes::conversion_ops::Builder;
    }
    pub use crate::api::passes::cross_module::CrossModuleFilter;
    pub mod cross_module {
        pub use crate::api::passes::cross_module::{Builder, CrossModuleRule};
    }
    pub use crate::api::passes::enum_access::EnumAccessCorrection;
    pub mod enum_access {
        pub use crate::api::passes::enum_access::Builder;
    }
    pub use crate::api::passes::anonymous_enums::AnonymousEnumNamer;
    pub mod anonymous_enums {
        pub use crate::api::passes::anonymous_enums::Builder;
    }
}
