//! Exclude private-implementation declarations from generation.

use crate::ast::{AstContext, DeclId};

/// Builder for configuring [`PrivateFilter`] instances.
///
/// # Example
///
/// ```
/// let filter = qtbindgen::passes::private_filter::Builder::new()
///     .marker("Impl")
///     .build();
/// ```
pub struct Builder {
    marker: String,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            marker: "Private".to_string(),
        }
    }

    /// Override the marker token identifying private-implementation
    /// declarations (default `Private`).
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Build the PrivateFilter instance.
    pub fn build(self) -> PrivateFilter {
        PrivateFilter { builder: self }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Excludes every declaration whose name starts or ends with the private
/// marker token. The walk does not descend into an excluded declaration: its
/// children are transitively excluded through the parent, and the generator
/// skips the whole subtree anyway. Anonymous declarations are ordinary
/// contexts and are recursed into. Re-running is a no-op.
pub struct PrivateFilter {
    builder: Builder,
}

impl PrivateFilter {
    /// Create a builder for configuring a private filter instance.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Walk every valid translation unit and flag private declarations.
    pub fn run(&self, ast: &mut AstContext) {
        let roots: Vec<DeclId> = ast
            .unit_ids()
            .filter(|&unit| !ast.unit(unit).is_invalid())
            .flat_map(|unit| ast.unit(unit).decls.iter().copied().collect::<Vec<_>>())
            .collect();
        for root in roots {
            self.visit(ast, root);
        }
    }

    fn visit(&self, ast: &mut AstContext, id: DeclId) {
        let name = &ast.decl(id).name;
        if name.starts_with(&self.builder.marker) || name.ends_with(&self.builder.marker) {
            ast.exclude(id);
            return;
        }
        let children: Vec<DeclId> = ast.children(id).to_vec();
        for child in children {
            self.visit(ast, child);
        }
        let methods: Vec<DeclId> = ast.methods(id).to_vec();
        for method in methods {
            self.visit(ast, method);
        }
    }
}
