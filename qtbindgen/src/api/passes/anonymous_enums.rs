//! Name anonymous nested enums so generated code can reference them.

use crate::ast::{AstContext, DeclId, DeclKind};
use crate::error::Result;

/// Builder for configuring [`AnonymousEnumNamer`] instances.
///
/// # Example
///
/// ```
/// let pass = qtbindgen::passes::anonymous_enums::Builder::new("TypeEnum")
///     .class("QGraphicsRectItem")
///     .class("QGraphicsTextItem")
///     .build();
/// ```
pub struct Builder {
    name: String,
    classes: Vec<String>,
}

impl Builder {
    /// `name` is the synthetic name assigned to each anonymous enum. The
    /// same name can be shared across classes since each enum is scoped to
    /// its own class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
        }
    }

    /// Name the anonymous nested enums of this class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Build the AnonymousEnumNamer instance.
    pub fn build(self) -> AnonymousEnumNamer {
        AnonymousEnumNamer { builder: self }
    }
}

/// Assigns a synthetic canonical name to every unnamed nested enum of a fixed
/// list of classes. A listed class without anonymous enums is a no-op, not an
/// error; a listed class missing from the graph aborts the run.
pub struct AnonymousEnumNamer {
    builder: Builder,
}

impl AnonymousEnumNamer {
    /// Create a builder for configuring an anonymous enum namer instance.
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        for class in &self.builder.classes {
            let class = ast.complete_class(class)?;
            let anonymous: Vec<DeclId> = ast
                .children(class)
                .iter()
                .copied()
                .filter(|&child| {
                    let decl = ast.decl(child);
                    matches!(decl.kind, DeclKind::Enum) && decl.is_anonymous()
                })
                .collect();
            for target in anonymous {
                ast.set_name(target, &self.builder.name);
            }
        }
        Ok(())
    }
}
