//! Force value semantics on classes the generator would wrap by reference.

use tracing::debug;

use crate::ast::{AstContext, TypeRepresentation};
use crate::error::Result;

/// Builder for configuring [`ValueTypeOverride`] instances.
///
/// # Example
///
/// ```
/// let pass = qtbindgen::passes::value_types::Builder::new()
///     .value_type("QPoint")
///     .value_type("QSize")
///     .build();
/// ```
pub struct Builder {
    classes: Vec<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Generate the class with copy semantics instead of identity semantics.
    /// Nested classes are addressed as `Outer::Inner`.
    pub fn value_type(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Build the ValueTypeOverride instance.
    pub fn build(self) -> ValueTypeOverride {
        ValueTypeOverride { builder: self }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Overrides the parser-inferred representation of an explicit allow-list of
/// classes with a value-type representation. A class missing from the graph
/// means the rules are stale and the run aborts.
pub struct ValueTypeOverride {
    builder: Builder,
}

impl ValueTypeOverride {
    /// Create a builder for configuring a value type override instance.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        for name in &self.builder.classes {
            let class = ast.complete_class(name)?;
            ast.set_representation(class, TypeRepresentation::Value);
            debug!(class = %name, "switched to value semantics");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Declaration;
    use crate::error::Error;

    #[test]
    fn overrides_listed_classes_only() {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("qpoint.h", "QtCore");
        let point = ast.add_decl(unit, None, Declaration::class("QPoint"));
        let object = ast.add_decl(unit, None, Declaration::class("QObject"));

        ValueTypeOverride::builder()
            .value_type("QPoint")
            .build()
            .run(&mut ast)
            .unwrap();

        let repr = |id| ast.decl(id).as_class().unwrap().representation;
        assert_eq!(repr(point), TypeRepresentation::Value);
        assert_eq!(repr(object), TypeRepresentation::Reference);
    }

    #[test]
    fn missing_class_is_fatal() {
        let mut ast = AstContext::new();
        ast.add_unit("empty.h", "QtCore");

        let result = ValueTypeOverride::builder()
            .value_type("QModelIndex")
            .build()
            .run(&mut ast);
        assert!(matches!(result, Err(Error::ClassNotFound(_))));
    }
}
