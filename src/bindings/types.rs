//! Type definitions for parsed C headers.
//!
//! These types represent the FFI-relevant information extracted from C
//! headers, plus the two projections of a resolved C type: the ctypes
//! call-ABI descriptor and the Python annotation type.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A parsed C header file containing all FFI-relevant information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedHeader {
    /// Source file path
    pub source: PathBuf,

    /// Parsed enumerations
    pub enums: Vec<EnumDecl>,

    /// Parsed structures
    pub structs: Vec<StructDecl>,

    /// Parsed typedefs, in declaration order
    pub typedefs: Vec<TypedefDecl>,

    /// Parsed functions
    pub functions: Vec<FunctionDecl>,
}

impl ParsedHeader {
    /// Create a new empty parsed header.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        ParsedHeader {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Build the alias -> base-type map consulted during resolution.
    ///
    /// A duplicated alias keeps the last entry encountered.
    pub fn typedef_map(&self) -> HashMap<&str, &str> {
        self.typedefs
            .iter()
            .map(|t| (t.alias.as_str(), t.base.as_str()))
            .collect()
    }

    /// True if no declaration of any kind was extracted.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.structs.is_empty()
            && self.typedefs.is_empty()
            && self.functions.is_empty()
    }
}

/// A C enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    /// Enum name
    pub name: String,

    /// Members in declaration order
    pub members: Vec<EnumMember>,
}

impl EnumDecl {
    /// Create a new enum.
    pub fn new(name: impl Into<String>) -> Self {
        EnumDecl {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Value emitted for the member at `index`: the explicit expression
    /// when one was declared, otherwise the member's zero-based position
    /// within this enum.
    pub fn member_value(&self, index: usize) -> String {
        match self.members[index].value {
            Some(ref expr) => expr.clone(),
            None => index.to_string(),
        }
    }
}

/// An enum member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name
    pub name: String,

    /// Explicit value expression, verbatim and unevaluated (if any)
    pub value: Option<String>,
}

impl EnumMember {
    /// Create a new member without an explicit value.
    pub fn new(name: impl Into<String>) -> Self {
        EnumMember {
            name: name.into(),
            value: None,
        }
    }

    /// Set the value expression.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A C structure definition.
///
/// Fields are kept as opaque text and only ever reproduced as
/// documentation in the generated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDecl {
    /// Struct name
    pub name: String,

    /// Raw field-block text as captured from the header
    pub body: String,
}

impl StructDecl {
    /// Create a new struct.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        StructDecl {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Cleaned field declaration fragments: blank lines and `//`/`*`
    /// comment lines dropped, trailing semicolons stripped.
    pub fn field_lines(&self) -> Vec<String> {
        self.body
            .lines()
            .map(str::trim)
            .filter(|line| {
                !line.is_empty()
                    && !line.starts_with("//")
                    && !line.starts_with('*')
                    && line.contains(';')
            })
            .map(|line| line.trim_end_matches(';').trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// A C typedef, as written: `typedef <base> <alias>;`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedefDecl {
    /// Base type text, possibly itself an alias or a pointer form
    pub base: String,

    /// New type name
    pub alias: String,
}

impl TypedefDecl {
    /// Create a new typedef.
    pub fn new(base: impl Into<String>, alias: impl Into<String>) -> Self {
        TypedefDecl {
            base: base.into(),
            alias: alias.into(),
        }
    }
}

/// A C function declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name
    pub name: String,

    /// Return type text
    pub return_type: String,

    /// Parameters in call-signature order
    pub params: Vec<ParamDecl>,
}

impl FunctionDecl {
    /// Create a new function with the given name and return type.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        FunctionDecl {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

/// A function parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Type text, as inferred from the declaration fragment
    pub ty: String,

    /// Inferred parameter name (`arg` when no name could be inferred)
    pub name: String,

    /// The original raw declaration fragment, kept for documentation
    pub raw: String,
}

impl ParamDecl {
    /// Create a new parameter.
    pub fn new(
        ty: impl Into<String>,
        name: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        ParamDecl {
            ty: ty.into(),
            name: name.into(),
            raw: raw.into(),
        }
    }
}

/// Call-ABI type descriptor for the ctypes call site.
///
/// This is a total mapping target: every resolved C type lands on one of
/// these variants, with `Opaque` as the explicit unknown-primitive
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbiType {
    /// `void`
    Void,

    /// `char`
    Char,

    /// `char*`, the dedicated string pointer
    CharPtr,

    /// `int`
    Int,

    /// Fixed-width integers
    Int32,
    Int64,
    UInt32,
    UInt64,

    /// `uintptr_t`, pointer-sized unsigned
    UIntPtr,

    /// `bool`
    Bool,

    /// `size_t`
    Size,

    /// Floating point
    Float,
    Double,

    /// Pointer to a resolved base type
    Pointer(Box<AbiType>),

    /// Unknown primitive, degraded to a pointer-sized opaque value
    Opaque,
}

impl AbiType {
    /// Look up a non-pointer primitive name in the fixed table.
    ///
    /// Unknown names fall back to `Opaque` rather than failing.
    pub fn from_primitive(name: &str) -> AbiType {
        match name {
            "void" => AbiType::Void,
            "char" => AbiType::Char,
            "int" => AbiType::Int,
            "int32_t" => AbiType::Int32,
            "int64_t" => AbiType::Int64,
            "uint32_t" => AbiType::UInt32,
            "uint64_t" => AbiType::UInt64,
            "uintptr_t" => AbiType::UIntPtr,
            "bool" => AbiType::Bool,
            "size_t" => AbiType::Size,
            "float" => AbiType::Float,
            "double" => AbiType::Double,
            _ => AbiType::Opaque,
        }
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        matches!(self, AbiType::Pointer(_) | AbiType::CharPtr)
    }

    /// Check if this is a void type.
    pub fn is_void(&self) -> bool {
        matches!(self, AbiType::Void)
    }

    /// Get the ctypes source text for this descriptor.
    ///
    /// `Pointer(Void)` renders as `c_void_p` (ctypes has no
    /// pointer-to-None) and `Opaque` as `c_void_p`.
    pub fn as_ctypes(&self) -> String {
        match self {
            AbiType::Void => "None".to_string(),
            AbiType::Char => "c_char".to_string(),
            AbiType::CharPtr => "c_char_p".to_string(),
            AbiType::Int => "c_int".to_string(),
            AbiType::Int32 => "c_int32".to_string(),
            AbiType::Int64 => "c_int64".to_string(),
            AbiType::UInt32 => "c_uint32".to_string(),
            AbiType::UInt64 => "c_uint64".to_string(),
            AbiType::UIntPtr => "c_size_t".to_string(),
            AbiType::Bool => "c_bool".to_string(),
            AbiType::Size => "c_size_t".to_string(),
            AbiType::Float => "c_float".to_string(),
            AbiType::Double => "c_double".to_string(),
            AbiType::Pointer(inner) if inner.is_void() => "c_void_p".to_string(),
            AbiType::Pointer(inner) => format!("POINTER({})", inner.as_ctypes()),
            AbiType::Opaque => "c_void_p".to_string(),
        }
    }
}

/// Semantic type for the generated wrapper's user-facing signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PyType {
    /// Character-pointer text
    Str,

    /// All integer-like primitives and enum names
    Int,

    /// `float` / `double`
    Float,

    /// `bool`
    Bool,

    /// Non-string pointers and anything unrecognized
    Any,
}

impl PyType {
    /// Get the Python annotation text.
    pub fn as_py(&self) -> &'static str {
        match self {
            PyType::Str => "str",
            PyType::Int => "int",
            PyType::Float => "float",
            PyType::Bool => "bool",
            PyType::Any => "Any",
        }
    }
}
