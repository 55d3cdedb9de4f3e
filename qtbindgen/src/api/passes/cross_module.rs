//! Keep optional-module boundaries clean: a method whose signature pulls a
//! higher-tier module's type into a lower-tier module must not survive.

use std::collections::HashSet;

use tracing::debug;

use crate::ast::{AstContext, DeclId};
use crate::error::Result;

/// One audited boundary: methods of `class` whose last parameter resolves,
/// after stripping one level of indirection, to a class generated into
/// `forbidden_namespace`.
pub struct CrossModuleRule {
    class: String,
    declared_in: Option<String>,
    forbidden_namespace: String,
    remove_overloads: HashSet<String>,
}

impl CrossModuleRule {
    pub fn new(class: impl Into<String>, forbidden_namespace: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            declared_in: None,
            forbidden_namespace: forbidden_namespace.into(),
            remove_overloads: HashSet::new(),
        }
    }

    /// Resolve the class in a specific output namespace. Needed when other
    /// modules carry forward declarations of the same name.
    pub fn declared_in(mut self, namespace: impl Into<String>) -> Self {
        self.declared_in = Some(namespace.into());
        self
    }

    /// Offending overloads of this name are removed from the member list
    /// outright instead of excluded: an equivalently-named counterpart stays
    /// behind, and a merely-excluded sibling would still collide with it in
    /// diagnostics and metadata.
    pub fn remove_overload(mut self, name: impl Into<String>) -> Self {
        self.remove_overloads.insert(name.into());
        self
    }
}

/// Builder for configuring [`CrossModuleFilter`] instances.
///
/// # Example
///
/// ```
/// use qtbindgen::passes::cross_module::CrossModuleRule;
///
/// let pass = qtbindgen::passes::cross_module::Builder::new()
///     .rule(CrossModuleRule::new("QSignalMapper", "QtWidgets").remove_overload("mapped"))
///     .build();
/// ```
pub struct Builder {
    rules: Vec<CrossModuleRule>,
}

impl Builder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a boundary rule.
    pub fn rule(mut self, rule: CrossModuleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the CrossModuleFilter instance.
    pub fn build(self) -> CrossModuleFilter {
        CrossModuleFilter { builder: self }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops methods that would create a dependency from a lower-tier module on
/// an optional higher-tier one. Offending methods are either removed from
/// their owner (overload families listed on the rule) or marked excluded,
/// never left untouched.
pub struct CrossModuleFilter {
    builder: Builder,
}

impl CrossModuleFilter {
    /// Create a builder for configuring a cross module filter instance.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn run(&self, ast: &mut AstContext) -> Result<()> {
        for rule in &self.builder.rules {
            let class = match &rule.declared_in {
                Some(namespace) => ast.complete_class_in_namespace(&rule.class, namespace)?,
                None => ast.complete_class(&rule.class)?,
            };

            let mut removed: Vec<DeclId> = Vec::new();
            let mut excluded: Vec<DeclId> = Vec::new();
            for &method in ast.methods(class) {
                let decl = ast.decl(method);
                let Some(info) = decl.as_method() else {
                    continue;
                };
                let Some(last) = info.params.last() else {
                    continue;
                };
                let Some(target) = last.ty.pointee().as_class() else {
                    continue;
                };
                if ast.output_namespace(target) != rule.forbidden_namespace {
                    continue;
                }
                if rule.remove_overloads.contains(&decl.name) {
                    removed.push(method);
                } else {
                    excluded.push(method);
                }
            }

            for method in removed {
                debug!(
                    class = %rule.class,
                    method = %ast.decl(method).name,
                    "removed cross-module overload"
                );
                ast.remove_method(class, method);
            }
            for method in excluded {
                debug!(
                    class = %rule.class,
                    method = %ast.decl(method).name,
                    "excluded cross-module method"
                );
                ast.exclude(method);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Declaration, GenerationState, Parameter, Primitive, Type};

    fn widget_fixture() -> (AstContext, DeclId, DeclId, DeclId, DeclId) {
        let mut ast = AstContext::new();
        let widgets = ast.add_unit("qwidget.h", "QtWidgets");
        let widget = ast.add_decl(widgets, None, Declaration::class("QWidget"));

        let core = ast.add_unit("qsignalmapper.h", "QtCore");
        let mapper = ast.add_decl(core, None, Declaration::class("QSignalMapper"));
        let mapped_widget = ast.add_decl(
            core,
            Some(mapper),
            Declaration::method(
                "mapped",
                vec![Parameter::new(
                    "widget",
                    Type::Pointer(Box::new(Type::Class(widget))),
                )],
            ),
        );
        let set_mapping = ast.add_decl(
            core,
            Some(mapper),
            Declaration::method(
                "setMapping",
                vec![
                    Parameter::new("sender", Type::Primitive(Primitive::Int)),
                    Parameter::new("widget", Type::Pointer(Box::new(Type::Class(widget)))),
                ],
            ),
        );
        let mapped_int = ast.add_decl(
            core,
            Some(mapper),
            Declaration::method(
                "mapped",
                vec![Parameter::new("id", Type::Primitive(Primitive::Int))],
            ),
        );
        (ast, mapper, mapped_widget, set_mapping, mapped_int)
    }

    fn qsignalmapper_rule() -> CrossModuleRule {
        CrossModuleRule::new("QSignalMapper", "QtWidgets").remove_overload("mapped")
    }

    #[test]
    fn removes_listed_overloads_and_excludes_the_rest() {
        let (mut ast, mapper, mapped_widget, set_mapping, mapped_int) = widget_fixture();

        CrossModuleFilter::builder()
            .rule(qsignalmapper_rule())
            .build()
            .run(&mut ast)
            .unwrap();

        // The widget overload of the "mapped" family is gone from the owner.
        assert!(!ast.methods(mapper).contains(&mapped_widget));
        assert_eq!(ast.decl(mapped_widget).state, GenerationState::Removed);
        // Other offenders stay visible to diagnostics, merely excluded.
        assert_eq!(ast.decl(set_mapping).state, GenerationState::Excluded);
        // The overload staying within the module is untouched.
        assert_eq!(ast.decl(mapped_int).state, GenerationState::Included);
    }

    #[test]
    fn only_the_last_parameter_is_inspected() {
        let mut ast = AstContext::new();
        let widgets = ast.add_unit("qwidget.h", "QtWidgets");
        let widget = ast.add_decl(widgets, None, Declaration::class("QWidget"));
        let core = ast.add_unit("qsignalmapper.h", "QtCore");
        let mapper = ast.add_decl(core, None, Declaration::class("QSignalMapper"));
        let method = ast.add_decl(
            core,
            Some(mapper),
            Declaration::method(
                "setMapping",
                vec![
                    Parameter::new("widget", Type::Pointer(Box::new(Type::Class(widget)))),
                    Parameter::new("id", Type::Primitive(Primitive::Int)),
                ],
            ),
        );

        CrossModuleFilter::builder()
            .rule(qsignalmapper_rule())
            .build()
            .run(&mut ast)
            .unwrap();

        assert_eq!(ast.decl(method).state, GenerationState::Included);
    }

    #[test]
    fn scoped_lookup_skips_foreign_declarations() {
        let mut ast = AstContext::new();
        let widgets = ast.add_unit("qvideowidget.h", "QtMultimediaWidgets");
        let video_widget = ast.add_decl(widgets, None, Declaration::class("QVideoWidget"));

        // A stale forward declaration of the same class in another module.
        let stale = ast.add_unit("fwd.h", "QtCore");
        ast.add_decl(stale, None, Declaration::class("QCamera").incomplete());

        let media = ast.add_unit("qcamera.h", "QtMultimedia");
        let camera = ast.add_decl(media, None, Declaration::class("QCamera"));
        let set_viewfinder = ast.add_decl(
            media,
            Some(camera),
            Declaration::method(
                "setViewfinder",
                vec![Parameter::new(
                    "viewfinder",
                    Type::Pointer(Box::new(Type::Class(video_widget))),
                )],
            ),
        );

        CrossModuleFilter::builder()
            .rule(CrossModuleRule::new("QCamera", "QtMultimediaWidgets").declared_in("QtMultimedia"))
            .build()
            .run(&mut ast)
            .unwrap();

        assert_eq!(ast.decl(set_viewfinder).state, GenerationState::Excluded);
    }
}
