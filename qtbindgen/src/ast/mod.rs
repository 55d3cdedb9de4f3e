//! The declaration graph consumed by the transformation passes.
//!
//! The graph is produced by an external C++ parser; this module is the
//! interface contract between that parser and the passes, plus an arena
//! implementation the parser populates. Passes mutate flags and attributes on
//! declarations, never their identity: the only structural mutation is the
//! deliberate removal of a method from its owner's member list
//! ([`AstContext::remove_method`]).

mod decl;
mod types;

pub use decl::{
    Access, ClassInfo, DeclKind, Declaration, GenerationState, MethodInfo, OperatorKind,
    TypeRepresentation,
};
pub use types::{Parameter, Primitive, Type};

use crate::error::{Error, Result};

/// File path the parser assigns to translation units it synthesized itself.
/// Tree passes skip such units.
pub const INVALID_UNIT_PATH: &str = "<invalid>";

/// Handle to a declaration stored in an [`AstContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

/// Handle to a translation unit stored in an [`AstContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(u32);

/// A parsed header, together with the generation unit it belongs to.
#[derive(Debug)]
pub struct TranslationUnit {
    pub file_path: String,
    /// Output namespace of the module this unit was partitioned into.
    pub output_namespace: String,
    /// Top-level declarations of the unit.
    pub decls: Vec<DeclId>,
}

impl TranslationUnit {
    /// Units the parser could not attribute to a real header are skipped by
    /// tree traversals.
    pub fn is_invalid(&self) -> bool {
        self.file_path == INVALID_UNIT_PATH
    }
}

/// Arena holding every declaration of the parsed API surface.
#[derive(Debug, Default)]
pub struct AstContext {
    units: Vec<TranslationUnit>,
    decls: Vec<Declaration>,
}

impl AstContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation unit.
    pub fn add_unit(
        &mut self,
        file_path: impl Into<String>,
        output_namespace: impl Into<String>,
    ) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(TranslationUnit {
            file_path: file_path.into(),
            output_namespace: output_namespace.into(),
            decls: Vec::new(),
        });
        id
    }

    /// Insert a declaration under `parent` (or at unit scope when `parent` is
    /// `None`). Methods inserted under a class land in the class's method
    /// list; everything else lands in the parent's nested declarations.
    pub fn add_decl(
        &mut self,
        unit: UnitId,
        parent: Option<DeclId>,
        mut decl: Declaration,
    ) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        decl.unit = unit;
        let is_method = matches!(decl.kind, DeclKind::Method(_));
        self.decls.push(decl);
        match parent {
            Some(parent) => {
                if is_method {
                    if let Some(class) = self.decls[parent.0 as usize].as_class_mut() {
                        class.methods.push(id);
                        return id;
                    }
                }
                self.decls[parent.0 as usize].children.push(id);
            }
            None => self.units[unit.0 as usize].decls.push(id),
        }
        id
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0 as usize]
    }

    pub fn unit(&self, id: UnitId) -> &TranslationUnit {
        &self.units[id.0 as usize]
    }

    pub fn units(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.units.iter()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> {
        (0..self.units.len()).map(|i| UnitId(i as u32))
    }

    pub fn all_decls(&self) -> impl Iterator<Item = DeclId> {
        (0..self.decls.len()).map(|i| DeclId(i as u32))
    }

    /// Nested declarations of a context (methods of a class live in its
    /// [`ClassInfo`] instead, see [`Self::methods`]).
    pub fn children(&self, id: DeclId) -> &[DeclId] {
        &self.decl(id).children
    }

    /// Methods of a class; empty for any other declaration kind.
    pub fn methods(&self, id: DeclId) -> &[DeclId] {
        self.decl(id).as_class().map_or(&[], |class| &class.methods)
    }

    /// Output namespace of the module owning the declaration's unit.
    pub fn output_namespace(&self, id: DeclId) -> &str {
        &self.unit(self.decl(id).unit).output_namespace
    }

    /// All classes with the given unqualified name, complete or not.
    pub fn find_classes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = DeclId> + 'a {
        self.all_decls().filter(move |&id| {
            let decl = self.decl(id);
            matches!(decl.kind, DeclKind::Class(_)) && decl.name == name
        })
    }

    /// Resolve a complete class by name. Nested classes are addressed with
    /// `Outer::Inner` paths. Absence is a fatal precondition violation.
    pub fn complete_class(&self, path: &str) -> Result<DeclId> {
        let mut current: Option<DeclId> = None;
        for segment in path.split("::") {
            let next = match current {
                None => self
                    .find_classes(segment)
                    .find(|&id| !self.is_incomplete(id)),
                Some(parent) => self.children(parent).iter().copied().find(|&id| {
                    let decl = self.decl(id);
                    matches!(decl.kind, DeclKind::Class(_))
                        && decl.name == segment
                        && !self.is_incomplete(id)
                }),
            };
            current = Some(next.ok_or_else(|| Error::ClassNotFound(path.to_string()))?);
        }
        current.ok_or_else(|| Error::ClassNotFound(path.to_string()))
    }

    /// Resolve a complete class declared in a specific output namespace.
    /// Needed where the same name is forward-declared in several modules.
    pub fn complete_class_in_namespace(&self, name: &str, namespace: &str) -> Result<DeclId> {
        self.find_classes(name)
            .find(|&id| !self.is_incomplete(id) && self.output_namespace(id) == namespace)
            .ok_or_else(|| Error::ClassNotFound(format!("{namespace}::{name}")))
    }

    /// Find a nested enum of a class by name. Absence is a fatal
    /// precondition violation.
    pub fn find_enum(&self, class: DeclId, name: &str) -> Result<DeclId> {
        self.children(class)
            .iter()
            .copied()
            .find(|&id| {
                let decl = self.decl(id);
                matches!(decl.kind, DeclKind::Enum) && decl.name == name
            })
            .ok_or_else(|| Error::EnumNotFound {
                class: self.decl(class).name.clone(),
                enumeration: name.to_string(),
            })
    }

    fn is_incomplete(&self, id: DeclId) -> bool {
        self.decl(id)
            .as_class()
            .is_some_and(|class| class.is_incomplete)
    }

    /// Exclude a declaration from generation. Monotonic: an excluded
    /// declaration never becomes included again, and a removed one stays
    /// removed.
    pub fn exclude(&mut self, id: DeclId) {
        let decl = self.decl_mut(id);
        if decl.state == GenerationState::Included {
            decl.state = GenerationState::Excluded;
        }
    }

    /// Remove a method from its owner's member list. Unlike [`Self::exclude`]
    /// the method disappears from the generated surface *and* from
    /// diagnostics; the declaration itself stays in the arena, marked
    /// [`GenerationState::Removed`].
    pub fn remove_method(&mut self, class: DeclId, method: DeclId) {
        if let Some(info) = self.decls[class.0 as usize].as_class_mut() {
            info.methods.retain(|&m| m != method);
        }
        self.decl_mut(method).state = GenerationState::Removed;
    }

    pub fn set_representation(&mut self, class: DeclId, representation: TypeRepresentation) {
        if let Some(info) = self.decl_mut(class).as_class_mut() {
            info.representation = representation;
        }
    }

    pub fn set_access(&mut self, id: DeclId, access: Access) {
        self.decl_mut(id).access = access;
    }

    /// Rename a declaration. The original name is kept as parsed.
    pub fn set_name(&mut self, id: DeclId, name: impl Into<String>) {
        self.decl_mut(id).name = name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_nested_class() -> (AstContext, DeclId, DeclId) {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("qlist.h", "QtCore");
        let outer = ast.add_decl(unit, None, Declaration::class("QListData"));
        let inner = ast.add_decl(unit, Some(outer), Declaration::class("Data"));
        (ast, outer, inner)
    }

    #[test]
    fn resolves_qualified_class_path() {
        let (ast, outer, inner) = context_with_nested_class();
        assert_eq!(ast.complete_class("QListData").unwrap(), outer);
        assert_eq!(ast.complete_class("QListData::Data").unwrap(), inner);
        assert!(matches!(
            ast.complete_class("QListData::Missing"),
            Err(Error::ClassNotFound(_))
        ));
    }

    #[test]
    fn incomplete_classes_are_not_resolved() {
        let mut ast = AstContext::new();
        let unit = ast.add_unit("fwd.h", "QtCore");
        ast.add_decl(unit, None, Declaration::class("QCamera").incomplete());
        assert!(ast.complete_class("QCamera").is_err());

        let media = ast.add_unit("qcamera.h", "QtMultimedia");
        let complete = ast.add_decl(media, None, Declaration::class("QCamera"));
        assert_eq!(
            ast.complete_class_in_namespace("QCamera", "QtMultimedia")
                .unwrap(),
            complete
        );
    }

    #[test]
    fn exclude_is_monotonic() {
        let (mut ast, outer, _) = context_with_nested_class();
        let method = ast.add_decl(
            UnitId(0),
            Some(outer),
            Declaration::method("detach", Vec::new()),
        );
        ast.remove_method(outer, method);
        assert_eq!(ast.decl(method).state, GenerationState::Removed);

        // A removed declaration never downgrades to merely excluded.
        ast.exclude(method);
        assert_eq!(ast.decl(method).state, GenerationState::Removed);
    }

    #[test]
    fn remove_method_detaches_from_owner() {
        let (mut ast, outer, _) = context_with_nested_class();
        let kept = ast.add_decl(
            UnitId(0),
            Some(outer),
            Declaration::method("size", Vec::new()),
        );
        let dropped = ast.add_decl(
            UnitId(0),
            Some(outer),
            Declaration::method("detach", Vec::new()),
        );
        ast.remove_method(outer, dropped);
        assert_eq!(ast.methods(outer), &[kept]);
    }
}
