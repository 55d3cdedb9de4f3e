//! The driver tying setup, the transformation passes, and verification
//! together.

use std::time::Instant;

use tracing::{debug, info};

use crate::api::config::QtConfig;
use crate::api::modules::partition_modules;
use crate::api::options::{GeneratorFlags, GeneratorOptions};
use crate::api::passes::anonymous_enums::AnonymousEnumNamer;
use crate::api::passes::conversion_ops::ConversionOperatorFilter;
use crate::api::passes::cross_module::{CrossModuleFilter, CrossModuleRule};
use crate::api::passes::enum_access::EnumAccessCorrection;
use crate::api::passes::method_exclusions::MethodExclusions;
use crate::api::passes::private_filter::PrivateFilter;
use crate::api::passes::type_mapped::TypeMappedSurface;
use crate::api::passes::value_types::ValueTypeOverride;
use crate::api::verify::{WrappedModulePair, WrappedModules};
use crate::ast::{AstContext, OperatorKind, Primitive};
use crate::error::Result;
use crate::utils::platform::Platform;

/// Classes generated with copy semantics: small, freely copied handle and
/// geometry types whose identity never matters.
const VALUE_TYPE_CLASSES: &[&str] = &[
    "QByteArray",
    "QListData",
    "QListData::Data",
    "QLocale",
    "QModelIndex",
    "QPoint",
    "QPointF",
    "QSize",
    "QSizeF",
    "QRect",
    "QRectF",
    "QGenericArgument",
    "QGenericReturnArgument",
    "QVariant",
];

/// Nested enums declared in protected sections but referenced from public
/// method signatures.
const PUBLIC_ENUMS: &[(&str, &str)] = &[
    ("QGraphicsItem", "Extension"),
    ("QAbstractSlider", "SliderChange"),
    ("QAbstractItemView", "CursorAction"),
    ("QAbstractItemView", "State"),
    ("QAbstractItemView", "DropIndicatorPosition"),
];

/// Graphics item classes carrying an anonymous `{ Type = ... }` enum.
const TYPE_ENUM_CLASSES: &[&str] = &[
    "QGraphicsEllipseItem",
    "QGraphicsItemGroup",
    "QGraphicsLineItem",
    "QGraphicsPathItem",
    "QGraphicsPixmapItem",
    "QGraphicsPolygonItem",
    "QGraphicsProxyWidget",
    "QGraphicsRectItem",
    "QGraphicsSimpleTextItem",
    "QGraphicsTextItem",
    "QGraphicsWidget",
    "QGraphicsSvgItem",
];

/// A pass over the declaration graph supplied by an external collaborator,
/// e.g. comment clearing, documentation mining, or case renaming.
pub trait AstPass {
    fn name(&self) -> &str;
    fn run(&mut self, ast: &mut AstContext) -> Result<()>;
}

/// Builder for configuring [`Pipeline`] instances.
///
/// # Example
///
/// ```no_run
/// let config = qtbindgen::QtConfig {
///     lib_files: vec!["libQt5Core.so".into()],
///     target: "x86_64-unknown-linux-gnu".into(),
///     ..Default::default()
/// };
/// let pipeline = qtbindgen::Pipeline::builder(config).build().unwrap();
/// let options = pipeline.setup().unwrap();
/// ```
pub struct Builder {
    config: QtConfig,
    postprocess_passes: Vec<Box<dyn AstPass>>,
}

impl Builder {
    pub fn new(config: QtConfig) -> Self {
        Self {
            config,
            postprocess_passes: Vec::new(),
        }
    }

    /// Register an external pass to run at the start of postprocessing, in
    /// registration order.
    pub fn postprocess_pass(mut self, pass: impl AstPass + 'static) -> Self {
        self.postprocess_passes.push(Box::new(pass));
        self
    }

    /// Build the Pipeline instance. Fails if the configured target triple
    /// does not parse.
    pub fn build(self) -> Result<Pipeline> {
        let platform = Platform::from_target(&self.config.target)?;
        Ok(Pipeline {
            config: self.config,
            platform,
            postprocess_passes: self.postprocess_passes,
            wrapped_modules: WrappedModules::new(),
        })
    }
}

/// Sequential driver for one wrapping run:
/// [`setup`](Self::setup) → external parse →
/// [`preprocess`](Self::preprocess) → external generate →
/// [`postprocess`](Self::postprocess) → external compile →
/// [`verified_wrapped_modules`](Self::verified_wrapped_modules).
///
/// The declaration graph is owned by the external parser and mutated here in
/// a fixed, single-threaded pass order; nothing in the pipeline blocks or
/// retries.
pub struct Pipeline {
    config: QtConfig,
    platform: Platform,
    postprocess_passes: Vec<Box<dyn AstPass>>,
    wrapped_modules: WrappedModules,
}

impl Pipeline {
    /// Create a builder for configuring a pipeline instance.
    pub fn builder(config: QtConfig) -> Builder {
        Builder::new(config)
    }

    pub fn config(&self) -> &QtConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Partition the toolkit into generation units and assemble the options
    /// handed to the external parser/generator. The returned value is not
    /// touched again by the pipeline except for reading.
    pub fn setup(&self) -> Result<GeneratorOptions> {
        let modules = partition_modules(&self.config, self.platform)?;

        let mut compiler_arguments = Vec::new();
        if self.platform.is_macos() {
            for dir in &self.config.framework_dirs {
                compiler_arguments.push(format!("-F{}", dir.display()));
            }
            compiler_arguments.push(format!("-F{}", self.config.libs.display()));
        }
        // Import libraries live next to the binaries on the primary platform.
        let library_dirs = vec![if self.platform.is_windows() {
            self.config.bins.clone()
        } else {
            self.config.libs.clone()
        }];

        info!(modules = modules.len(), "setup complete");
        Ok(GeneratorOptions {
            target: self.config.target.clone(),
            modules,
            include_dirs: vec![self.config.headers.clone()],
            system_include_dirs: self.config.system_include_dirs.clone(),
            library_dirs,
            compiler_arguments,
            output_dir: self.config.output_dir.clone(),
            flags: GeneratorFlags::default(),
        })
    }

    /// Run the transformation passes that must see the graph before
    /// generation, in fixed order.
    pub fn preprocess(&self, ast: &mut AstContext) -> Result<()> {
        PrivateFilter::builder().build().run(ast);

        let mut value_types = ValueTypeOverride::builder();
        for class in VALUE_TYPE_CLASSES {
            value_types = value_types.value_type(*class);
        }
        value_types.build().run(ast)?;

        // The wide-string conversions are redundant once the class itself is
        // type-mapped.
        MethodExclusions::builder()
            .method("QString", "fromStdWString")
            .method("QString", "toStdWString")
            .build()
            .run(ast)?;
        qstring_surface().run(ast)?;

        CrossModuleFilter::builder()
            .rule(CrossModuleRule::new("QSignalMapper", "QtWidgets").remove_overload("mapped"))
            .rule(
                CrossModuleRule::new("QCamera", "QtMultimediaWidgets").declared_in("QtMultimedia"),
            )
            .rule(CrossModuleRule::new("QMediaPlayer", "QtMultimediaWidgets"))
            .build()
            .run(ast)?;

        // QActionEvent's widget-action members reference a type from a
        // sibling module through its return type; only the plain constructor
        // survives.
        MethodExclusions::builder()
            .method_with_arity("QActionEvent", "QActionEvent", 3)
            .method("QActionEvent", "action")
            .method("QActionEvent", "before")
            .build()
            .run(ast)?;

        let mut enum_access = EnumAccessCorrection::builder();
        for (class, enumeration) in PUBLIC_ENUMS {
            enum_access = enum_access.public_enum(*class, *enumeration);
        }
        enum_access.build().run(ast)?;

        let mut anonymous = AnonymousEnumNamer::builder("TypeEnum");
        for class in TYPE_ENUM_CLASSES {
            anonymous = anonymous.class(*class);
        }
        anonymous.build().run(ast)?;

        info!("preprocess complete");
        Ok(())
    }

    /// Run the external postprocess passes and the corrections that must see
    /// the graph after generation, then record the expected output artifacts.
    pub fn postprocess(&mut self, ast: &mut AstContext, options: &GeneratorOptions) -> Result<()> {
        for pass in &mut self.postprocess_passes {
            let started = Instant::now();
            pass.run(ast)?;
            info!(pass = pass.name(), elapsed = ?started.elapsed(), "external pass finished");
        }

        // Generated conversion operators to the character and integer types
        // resolve ambiguously against each other.
        ConversionOperatorFilter::builder("QChar")
            .exclude_operator(OperatorKind::ExplicitConversion, Primitive::Char)
            .exclude_operator(OperatorKind::Conversion, Primitive::Int)
            .build()
            .run(ast)?;

        // Second sweep: generation relocates free operators onto the
        // type-mapped class.
        qstring_surface().run(ast)?;

        self.wrapped_modules
            .record(&options.modules, &options.output_dir, self.platform);
        debug!(pairs = self.wrapped_modules.pairs().len(), "recorded wrapped module pairs");

        info!("postprocess complete");
        Ok(())
    }

    /// The recorded artifact pairs, without verification.
    pub fn wrapped_modules(&self) -> &WrappedModules {
        &self.wrapped_modules
    }

    /// The artifact pairs whose files both exist on disk. Destructive, see
    /// [`WrappedModules::verified`].
    pub fn verified_wrapped_modules(&mut self) -> &[WrappedModulePair] {
        self.wrapped_modules.verified()
    }
}

/// The string class is type-mapped to the target's native string; only the
/// UTF-16 conversion pair is needed to cross the boundary.
fn qstring_surface() -> TypeMappedSurface {
    TypeMappedSurface::builder("QString")
        .keep_method("utf16")
        .keep_method("fromUtf16")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: &str) -> QtConfig {
        QtConfig {
            bins: "qt/bin".into(),
            libs: "qt/lib".into(),
            headers: "qt/include".into(),
            framework_dirs: vec!["/Library/Frameworks".into()],
            lib_files: vec![],
            target: target.into(),
            ..Default::default()
        }
    }

    #[test]
    fn setup_links_against_bins_on_the_primary_platform() {
        let pipeline = Pipeline::builder(config("x86_64-pc-windows-msvc"))
            .build()
            .unwrap();
        let options = pipeline.setup().unwrap();
        assert_eq!(options.library_dirs, vec![std::path::PathBuf::from("qt/bin")]);
        assert!(options.compiler_arguments.is_empty());
    }

    #[test]
    fn setup_adds_framework_arguments_on_macos() {
        let pipeline = Pipeline::builder(config("aarch64-apple-darwin"))
            .build()
            .unwrap();
        let options = pipeline.setup().unwrap();
        assert_eq!(
            options.compiler_arguments,
            vec!["-F/Library/Frameworks".to_string(), "-Fqt/lib".to_string()]
        );
        assert_eq!(options.library_dirs, vec![std::path::PathBuf::from("qt/lib")]);
    }

    #[test]
    fn invalid_target_fails_to_build() {
        assert!(Pipeline::builder(config("definitely not a triple"))
            .build()
            .is_err());
    }
}
