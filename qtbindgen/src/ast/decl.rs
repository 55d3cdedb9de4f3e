use super::{DeclId, UnitId};
use crate::ast::types::Parameter;

/// C++ access level as parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// Whether a declaration still takes part in generation.
///
/// `Excluded` keeps the declaration visible to diagnostics and metadata;
/// `Removed` means it was detached from its owner's member list outright.
/// Both are terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Included,
    Excluded,
    Removed,
}

/// How a class is rendered in the target language.
///
/// Once overridden by a pass, the representation is authoritative over the
/// parser-inferred default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeRepresentation {
    /// Generated wrapper with identity semantics (the default).
    #[default]
    Reference,
    /// Generated wrapper with copy semantics.
    Value,
    /// Represented by a built-in target type; no wrapper is generated.
    TypeMapped,
}

/// Conversion operator flavors the passes care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Conversion,
    ExplicitConversion,
}

#[derive(Debug, Default)]
pub struct ClassInfo {
    /// Methods, kept separate from nested declarations as the parser
    /// delivers them.
    pub methods: Vec<DeclId>,
    /// True for forward declarations without a definition.
    pub is_incomplete: bool,
    pub representation: TypeRepresentation,
}

#[derive(Debug, Default)]
pub struct MethodInfo {
    pub params: Vec<Parameter>,
    /// Set when the method is a conversion operator.
    pub operator: Option<OperatorKind>,
}

#[derive(Debug)]
pub enum DeclKind {
    Namespace,
    Class(ClassInfo),
    Method(MethodInfo),
    Enum,
    Field,
    Variable,
}

/// A named entity in the declaration graph.
#[derive(Debug)]
pub struct Declaration {
    /// Current name; empty for anonymous declarations. May diverge from
    /// `original_name` after renaming passes.
    pub name: String,
    /// Name as parsed from the headers.
    pub original_name: String,
    pub access: Access,
    pub state: GenerationState,
    /// Owning translation unit, assigned on insertion.
    pub unit: UnitId,
    /// Nested declarations (namespaces, classes, enums, fields).
    pub children: Vec<DeclId>,
    pub kind: DeclKind,
}

impl Declaration {
    fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            access: Access::Public,
            state: GenerationState::Included,
            unit: UnitId(0),
            children: Vec::new(),
            kind,
        }
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Namespace)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Class(ClassInfo::default()))
    }

    pub fn method(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self::new(
            name,
            DeclKind::Method(MethodInfo {
                params,
                operator: None,
            }),
        )
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Enum)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Field)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Variable)
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = original_name.into();
        self
    }

    pub fn with_operator(mut self, operator: OperatorKind) -> Self {
        if let DeclKind::Method(ref mut info) = self.kind {
            info.operator = Some(operator);
        }
        self
    }

    pub fn incomplete(mut self) -> Self {
        if let DeclKind::Class(ref mut info) = self.kind {
            info.is_incomplete = true;
        }
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn as_class(&self) -> Option<&ClassInfo> {
        match &self.kind {
            DeclKind::Class(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassInfo> {
        match &mut self.kind {
            DeclKind::Class(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodInfo> {
        match &self.kind {
            DeclKind::Method(info) => Some(info),
            _ => None,
        }
    }
}
