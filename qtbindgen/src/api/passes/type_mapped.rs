//! Collapse a type-mapped class down to its conversion surface.

use std::collections::HashSet;

use crate::ast::{AstContext, DeclId, GenerationState, TypeRepresentation};
use crate::error::Result;

/// Builder for configuring [`TypeMappedSurface`] instances.
///
/// # Example
///
/// ```
/// let pass = qtbindgen::passes::type_mapped::Builder::new("QString")
///     .keep_method("utf16")
///     .keep_method("fromUtf16")
///     .build();
/// ```
pub struct Builder {
    class: String,
    keep: HashSet<String>,
}

impl Builder {
    /// `class` is the type represented by a built-in target type instead of a
    /// generated wrapper.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            keep: HashSet::new(),
        }
    }

    /// Keep a conversion method, matched on its original name.
    pub fn keep_method(mut self, original_name: impl Into<String>) -> Self {
        self.keep.insert(original_name.into());
        self
    }

    /// Build the TypeMappedSurface instance.
    pub fn build(self) -> TypeMappedSurface {
        TypeMappedSurface { builder: self }
    }
}

/// Excludes everything on a type-mapped class except the reserved conversion
/// methods: the class is rendered as a built-in target type, so only the
/// to/from conversions are needed.
///
/// The same pass value runs before generation (original members) and again
/// after it (members synthesized meanwhile, e.g. free operators relocated
/// onto the class). Only members still included are touched, so re-running
/// causes no redundant mutation.
pub struct TypeMappedSurface {
    builder: Builder,
}

impl TypeMappedSurface {
    /// Create a builder for configuring a type mapped surface instance.
    pub fn builder(class: impl Into<String>) -> Builder {
        Builder::new(class)
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        let class = ast.complete_class(&self.builder.class)?;
        ast.set_representation(class, TypeRepresentation::TypeMapped);

        let nested: Vec<DeclId> = ast.children(class).to_vec();
        for child in nested {
            ast.exclude(child);
        }

        let methods: Vec<DeclId> = ast
            .methods(class)
            .iter()
            .copied()
            .filter(|&method| {
                let decl = ast.decl(method);
                decl.state == GenerationState::Included
                    && !self.builder.keep.contains(decl.original_name.as_str())
            })
            .collect();
        for method in methods {
            ast.exclude(method);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Declaration;

    fn qstring_surface() -> TypeMappedSurface {
        TypeMappedSurface::builder("QString")
            .keep_method("utf16")
            .keep_method("fromUtf16")
            .build()
    }

    fn included_method_names(ast: &AstContext, class: DeclId) -> Vec<String> {
        ast.methods(class)
            .iter()
            .filter(|&&m| ast.decl(m).state == GenerationState::Included)
            .map(|&m| ast.decl(m).name.clone())
            .collect()
    }

    #[test]
    fn keeps_exactly_the_conversion_pair() {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("qstring.h", "QtCore");
        let class = ast.add_decl(unit, None, Declaration::class("QString"));
        for name in ["utf16", "fromUtf16", "append", "toLower", "split"] {
            ast.add_decl(unit, Some(class), Declaration::method(name, Vec::new()));
        }
        let nested = ast.add_decl(unit, Some(class), Declaration::class("Null"));

        qstring_surface().run(&mut ast).unwrap();

        assert_eq!(
            included_method_names(&ast, class),
            vec!["utf16".to_string(), "fromUtf16".to_string()]
        );
        assert_eq!(ast.decl(nested).state, GenerationState::Excluded);
        assert_eq!(
            ast.decl(class).as_class().unwrap().representation,
            TypeRepresentation::TypeMapped
        );
    }

    #[test]
    fn second_run_sweeps_members_added_in_between() {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("qstring.h", "QtCore");
        let class = ast.add_decl(unit, None, Declaration::class("QString"));
        ast.add_decl(unit, Some(class), Declaration::method("utf16", Vec::new()));
        ast.add_decl(unit, Some(class), Declaration::method("append", Vec::new()));

        let pass = qstring_surface();
        pass.run(&mut ast).unwrap();

        // Generation relocates a free operator onto the class.
        let relocated = ast.add_decl(
            unit,
            Some(class),
            Declaration::method("operator+", Vec::new()),
        );
        pass.run(&mut ast).unwrap();

        assert_eq!(ast.decl(relocated).state, GenerationState::Excluded);
        assert_eq!(included_method_names(&ast, class), vec!["utf16".to_string()]);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("qstring.h", "QtCore");
        let class = ast.add_decl(unit, None, Declaration::class("QString"));
        ast.add_decl(unit, Some(class), Declaration::method("utf16", Vec::new()));
        ast.add_decl(unit, Some(class), Declaration::method("append", Vec::new()));

        let pass = qstring_surface();
        pass.run(&mut ast).unwrap();
        let first: Vec<GenerationState> =
            ast.methods(class).iter().map(|&m| ast.decl(m).state).collect();
        pass.run(&mut ast).unwrap();
        let second: Vec<GenerationState> =
            ast.methods(class).iter().map(|&m| ast.decl(m).state).collect();
        assert_eq!(first, second);
    }
}
