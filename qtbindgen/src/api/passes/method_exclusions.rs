//! Exclude individual methods by class, name, and optionally arity.

use crate::ast::{AstContext, DeclId};
use crate::error::Result;

struct Rule {
    class: String,
    method: String,
    arity: Option<usize>,
}

/// Builder for configuring [`MethodExclusions`] instances.
///
/// # Example
///
/// ```
/// let pass = qtbindgen::passes::method_exclusions::Builder::new()
///     .method("QString", "toStdWString")
///     .method_with_arity("QActionEvent", "QActionEvent", 3)
///     .build();
/// ```
pub struct Builder {
    rules: Vec<Rule>,
}

impl Builder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Exclude every method of `class` named `method`.
    pub fn method(mut self, class: impl Into<String>, method: impl Into<String>) -> Self {
        self.rules.push(Rule {
            class: class.into(),
            method: method.into(),
            arity: None,
        });
        self
    }

    /// Exclude only the overload of `method` taking exactly `arity`
    /// parameters. Needed to single out one constructor overload.
    pub fn method_with_arity(
        mut self,
        class: impl Into<String>,
        method: impl Into<String>,
        arity: usize,
    ) -> Self {
        self.rules.push(Rule {
            class: class.into(),
            method: method.into(),
            arity: Some(arity),
        });
        self
    }

    /// Build the MethodExclusions instance.
    pub fn build(self) -> MethodExclusions {
        MethodExclusions { builder: self }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Excludes a fixed list of (class, method) pairs from generation.
///
/// A missing class aborts the run; a missing method is expected absence
/// (several of the targeted methods only exist in some toolkit builds) and a
/// no-op.
pub struct MethodExclusions {
    builder: Builder,
}

impl MethodExclusions {
    /// Create a builder for configuring a method exclusions instance.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        for rule in &self.builder.rules {
            let class = ast.complete_class(&rule.class)?;
            let matching: Vec<DeclId> = ast
                .methods(class)
                .iter()
                .copied()
                .filter(|&method| {
                    let decl = ast.decl(method);
                    decl.name == rule.method
                        && rule.arity.map_or(true, |arity| {
                            decl.as_method().is_some_and(|info| info.params.len() == arity)
                        })
                })
                .collect();
            for method in matching {
                ast.exclude(method);
            }
        }
        Ok(())
    }
}
