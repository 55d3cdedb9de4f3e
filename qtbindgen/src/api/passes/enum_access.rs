//! Promote enums to public access.
//!
//! Some nested enums are declared in a protected section but belong to the
//! public contract, being referenced from public method signatures; the
//! parser reports them with the access level as written.

use crate::ast::{Access, AstContext};
use crate::error::Result;

/// Builder for configuring [`EnumAccessCorrection`] instances.
///
/// # Example
///
/// ```
/// let pass = qtbindgen::passes::enum_access::Builder::new()
///     .public_enum("QGraphicsItem", "Extension")
///     .build();
/// ```
pub struct Builder {
    entries: Vec<(String, String)>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Force the named nested enum to public access.
    pub fn public_enum(
        mut self,
        class: impl Into<String>,
        enumeration: impl Into<String>,
    ) -> Self {
        self.entries.push((class.into(), enumeration.into()));
        self
    }

    /// Build the EnumAccessCorrection instance.
    pub fn build(self) -> EnumAccessCorrection {
        EnumAccessCorrection { builder: self }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Forces a fixed list of nested enums to public access. A missing class or
/// enum means the rules are stale and aborts the run.
pub struct EnumAccessCorrection {
    builder: Builder,
}

impl EnumAccessCorrection {
    /// Create a builder for configuring an enum access correction instance.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        for (class, enumeration) in &self.builder.entries {
            let class = ast.complete_class(class)?;
            let target = ast.find_enum(class, enumeration)?;
            ast.set_access(target, Access::Public);
        }
        Ok(())
    }
}
