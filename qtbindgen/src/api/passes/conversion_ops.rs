//! Exclude conversion operators that make generated overload resolution
//! ambiguous.

use crate::ast::{AstContext, OperatorKind, Primitive};
use crate::error::Result;

struct Rule {
    operator: OperatorKind,
    operand: Primitive,
}

/// Builder for configuring [`ConversionOperatorFilter`] instances.
///
/// # Example
///
/// ```
/// use qtbindgen::ast::{OperatorKind, Primitive};
///
/// let pass = qtbindgen::passes::conversion_ops::Builder::new("QChar")
///     .exclude_operator(OperatorKind::Conversion, Primitive::Int)
///     .build();
/// ```
pub struct Builder {
    class: String,
    rules: Vec<Rule>,
}

impl Builder {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            rules: Vec::new(),
        }
    }

    /// Exclude the conversion operator of the given kind whose first
    /// parameter has the given primitive type.
    pub fn exclude_operator(mut self, operator: OperatorKind, operand: Primitive) -> Self {
        self.rules.push(Rule { operator, operand });
        self
    }

    /// Build the ConversionOperatorFilter instance.
    pub fn build(self) -> ConversionOperatorFilter {
        ConversionOperatorFilter { builder: self }
    }
}

/// Excludes specific conversion operator overloads of one class. Each
/// operator is excluded only if present: which conversions a class carries
/// varies across toolkit versions, so absence is not an error.
pub struct ConversionOperatorFilter {
    builder: Builder,
}

impl ConversionOperatorFilter {
    /// Create a builder for configuring a conversion operator filter
    /// instance.
    pub fn builder(class: impl Into<String>) -> Builder {
        Builder::new(class)
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        let class = ast.complete_class(&self.builder.class)?;
        for rule in &self.builder.rules {
            let found = ast.methods(class).iter().copied().find(|&method| {
                ast.decl(method).as_method().is_some_and(|info| {
                    info.operator == Some(rule.operator)
                        && info
                            .params
                            .first()
                            .is_some_and(|p| p.ty.is_primitive(rule.operand))
                })
            });
            if let Some(method) = found {
                ast.exclude(method);
            }
        }
        Ok(())
    }
}
