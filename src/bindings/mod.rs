//! FFI binding generation for C libraries.
//!
//! This module provides parsing, typedef resolution, and code generation
//! for creating Python ctypes bindings from C header files.

pub mod parser;
pub mod python;
pub mod resolve;
pub mod types;

pub use parser::HeaderParser;
pub use python::PythonGenerator;
pub use resolve::{ResolveError, TypeResolver};
pub use types::{
    AbiType, EnumDecl, EnumMember, FunctionDecl, ParamDecl, ParsedHeader, PyType, StructDecl,
    TypedefDecl,
};
