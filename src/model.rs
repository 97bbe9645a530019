//! Plain data records produced by the external source parser.
//!
//! Types are deliberately loose: every type reference is the string the parser
//! saw (simple or qualified, possibly generic). Resolution happens later in
//! [`crate::index::MetadataIndex`].

use serde::{Deserialize, Serialize};

// ─── Type Kind ───────────────────────────────────────────────────────

/// Classification tag assigned by the entry-point classifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Controller,
    Soap,
    Service,
    Repository,
    Entity,
    Interface,
    #[default]
    Class,
    #[serde(other)]
    Other,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Soap => "soap",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Entity => "entity",
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Other => "other",
        }
    }

    /// Controller and SOAP types are the roots of every flow.
    pub fn is_entry_point(&self) -> bool {
        matches!(self, Self::Controller | Self::Soap)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "controller" => Ok(Self::Controller),
            "soap" => Ok(Self::Soap),
            "service" => Ok(Self::Service),
            "repository" => Ok(Self::Repository),
            "entity" => Ok(Self::Entity),
            "interface" => Ok(Self::Interface),
            "class" => Ok(Self::Class),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown type kind: '{}'", other)),
        }
    }
}

// ─── Records ─────────────────────────────────────────────────────────

/// A declared name with its declared type: a parameter or a local variable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub type_name: String,
    pub name: String,
}

impl Variable {
    pub fn new(type_name: &str, name: &str) -> Self {
        Self { type_name: type_name.to_string(), name: name.to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    pub name: String,
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Variable>,
    #[serde(default)]
    pub locals: Vec<Variable>,
    /// Raw call expressions in body order. Each is either a resolved
    /// qualified signature or the best-effort source text of the call.
    #[serde(default)]
    pub calls: Vec<String>,
}

impl MethodRecord {
    /// Parameter types joined the way every display signature shows them.
    pub fn param_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    #[serde(default)]
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
}

impl TypeRecord {
    /// `package.Name`, or the simple name when the parser gave no package.
    pub fn fqn(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name == name)
    }
}
