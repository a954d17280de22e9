use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;

/// The parsed header description produced by dear_bindings.
///
/// Element order inside every sequence is significant: emitters walk them front to back and the
/// generated file mirrors that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrDocument {
    #[serde(default)]
    pub defines: Vec<Define>,
    #[serde(default)]
    pub enums: Vec<EnumGroup>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
    #[serde(default)]
    pub typedefs: Vec<TypedefDef>,
}

impl IrDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default)]
    pub preceding: Vec<String>,
    #[serde(default)]
    pub attached: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Define {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumGroup {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<EnumElement>,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumElement {
    pub name: String,
    #[serde(default)]
    pub value_expression: Option<String>,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub return_type: TypeInfo,
    #[serde(default)]
    pub arguments: Vec<ArgumentDef>,
    #[serde(default)]
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDef {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeInfo>,
    #[serde(default)]
    pub is_varargs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default)]
    pub comments: Comments,
}

/// A C type as written in the header (`declaration`) plus its structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub declaration: String,
    pub description: TypeDescription,
    #[serde(default)]
    pub type_details: Option<TypeDetails>,
}

impl TypeInfo {
    pub fn new(declaration: impl Into<String>, description: TypeDescription) -> Self {
        Self {
            declaration: declaration.into(),
            description,
            type_details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flavour", rename_all = "snake_case")]
pub enum TypeDetails {
    FunctionPointer {
        return_type: Box<TypeInfo>,
        #[serde(default)]
        arguments: Vec<ArgumentDef>,
    },
    #[serde(other)]
    Unknown,
}

/// Recursive structured type. Pointer and array always own exactly one inner description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDescription {
    Builtin {
        builtin_type: String,
    },
    User {
        name: String,
    },
    Pointer {
        inner_type: Box<TypeDescription>,
    },
    Array {
        inner_type: Box<TypeDescription>,
        #[serde(default)]
        bounds: Option<String>,
    },
    /// A named declarator wrapper, used by dear_bindings for function parameters.
    #[serde(rename = "Type")]
    Named {
        #[serde(default)]
        name: Option<String>,
        inner_type: Box<TypeDescription>,
    },
    #[serde(rename = "Function")]
    FunctionPointer {
        return_type: Box<TypeDescription>,
        #[serde(default)]
        parameters: Vec<TypeDescription>,
    },
    #[serde(other)]
    Unknown,
}

impl TypeDescription {
    pub fn builtin(name: impl Into<String>) -> Self {
        TypeDescription::Builtin {
            builtin_type: name.into(),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        TypeDescription::User { name: name.into() }
    }

    pub fn pointer(inner: TypeDescription) -> Self {
        TypeDescription::Pointer {
            inner_type: Box::new(inner),
        }
    }

    pub fn array(inner: TypeDescription, bounds: Option<&str>) -> Self {
        TypeDescription::Array {
            inner_type: Box::new(inner),
            bounds: bounds.map(str::to_string),
        }
    }

    /// Name of a builtin or user type, `None` for every structural kind.
    pub fn named_type(&self) -> Option<&str> {
        match self {
            TypeDescription::Builtin { builtin_type } => Some(builtin_type),
            TypeDescription::User { name } => Some(name),
            TypeDescription::Named { inner_type, .. } => inner_type.named_type(),
            _ => None,
        }
    }

    /// Peels off `Type` declarator wrappers.
    pub fn unwrap_named(&self) -> &TypeDescription {
        match self {
            TypeDescription::Named { inner_type, .. } => inner_type.unwrap_named(),
            other => other,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDescription::Builtin { .. } => "Builtin",
            TypeDescription::User { .. } => "User",
            TypeDescription::Pointer { .. } => "Pointer",
            TypeDescription::Array { .. } => "Array",
            TypeDescription::Named { .. } => "Type",
            TypeDescription::FunctionPointer { .. } => "Function",
            TypeDescription::Unknown => "unknown",
        }
    }
}
