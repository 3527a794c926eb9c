//! Python ctypes binding generation.
//!
//! Assembles the generated module from a parsed header: enum mirrors,
//! struct documentation blocks, recognized-pattern typedef mirrors,
//! per-function argtypes/restype declarations, and one wrapper method
//! per function.

use std::path::Path;

use anyhow::{Context, Result};

use super::resolve::{ResolveError, TypeResolver};
use super::types::{AbiType, ParsedHeader, TypedefDecl};

/// Generator for Python ctypes bindings.
pub struct PythonGenerator {
    /// Library name, used for the default shared-object path
    lib_name: String,
    /// Name of the generated interface class
    class_name: String,
    /// Fixed library path baked into the loader instead of the default
    lib_path: Option<String>,
}

impl PythonGenerator {
    /// Create a new generator for the given library name.
    pub fn new(lib_name: impl Into<String>) -> Self {
        let lib_name = lib_name.into();
        let class_name = default_class_name(&lib_name);
        PythonGenerator {
            lib_name,
            class_name,
            lib_path: None,
        }
    }

    /// Override the generated class name.
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    /// Bake a fixed library path into the generated loader.
    pub fn with_lib_path(mut self, path: impl Into<String>) -> Self {
        self.lib_path = Some(path.into());
        self
    }

    /// Generate the Python module text.
    ///
    /// A header with zero declarations still produces a minimal, loadable
    /// module. A typedef cycle is fatal for the whole run.
    pub fn generate(&self, header: &ParsedHeader) -> Result<String, ResolveError> {
        let resolver = TypeResolver::new(header);
        let mut out = String::new();

        self.emit_prelude(&mut out);
        self.emit_enums(&mut out, header);
        self.emit_structs(&mut out, header);
        self.emit_typedefs(&mut out, header, &resolver)?;
        self.emit_setup_functions(&mut out, header, &resolver)?;
        self.emit_wrappers(&mut out, header, &resolver)?;
        self.emit_trailer(&mut out);

        Ok(out)
    }

    /// Generate and write the module to a file.
    pub fn generate_to_file(&self, header: &ParsedHeader, path: &Path) -> Result<()> {
        let code = self.generate(header)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, code)
            .with_context(|| format!("failed to write bindings: {}", path.display()))?;

        Ok(())
    }

    fn emit_prelude(&self, out: &mut String) {
        out.push_str(&format!(
            r#"#!/usr/bin/env python3
"""
Python interface for the {lib} C library.

Generated automatically - DO NOT EDIT
"""

from ctypes import *
from enum import IntEnum
from typing import Any
import os


class {class_name}:
    """
    Python interface to the {lib} C library.
    """

    def __init__(self, lib_path=None):
        """
        Initialize the {lib} interface.

        Args:
            lib_path: Path to the {lib} shared library. If None, the
                default location is used.
        """
        if lib_path is None:
            lib_path = {default_path}

        self.lib = CDLL(lib_path)
        self._setup_functions()
"#,
            lib = self.lib_name,
            class_name = self.class_name,
            default_path = match self.lib_path {
                Some(ref p) => format!("'{p}'"),
                None => format!(
                    "os.path.join(os.path.dirname(__file__), 'lib{}.so')",
                    self.lib_name
                ),
            },
        ));
    }

    fn emit_enums(&self, out: &mut String, header: &ParsedHeader) {
        for decl in &header.enums {
            out.push_str(&format!("\n    # {} enum\n", decl.name));
            out.push_str(&format!("    class {}(IntEnum):\n", decl.name));

            if decl.members.is_empty() {
                out.push_str("        pass\n");
                continue;
            }

            for (index, member) in decl.members.iter().enumerate() {
                out.push_str(&format!(
                    "        {} = {}\n",
                    member.name,
                    decl.member_value(index)
                ));
            }
        }
    }

    fn emit_structs(&self, out: &mut String, header: &ParsedHeader) {
        for decl in &header.structs {
            out.push_str(&format!("\n    # {} struct\n", decl.name));
            out.push_str(&format!("    class {}(Structure):\n", decl.name));
            out.push_str("        _fields_ = [\n");

            for field in decl.field_lines() {
                out.push_str(&format!("            # {field}\n"));
            }

            out.push_str("        ]\n");
        }
    }

    fn emit_typedefs(
        &self,
        out: &mut String,
        header: &ParsedHeader,
        resolver: &TypeResolver,
    ) -> Result<(), ResolveError> {
        for decl in &header.typedefs {
            out.push_str(&format!("\n    # {} {}\n", decl.base, decl.alias));

            if let Some(mirror) = typedef_mirror(decl, resolver)? {
                out.push_str(&format!("    {} = {}\n", decl.alias, mirror));
            }
        }

        Ok(())
    }

    fn emit_setup_functions(
        &self,
        out: &mut String,
        header: &ParsedHeader,
        resolver: &TypeResolver,
    ) -> Result<(), ResolveError> {
        out.push_str(
            r#"
    def _setup_functions(self):
        """
        Set up the argument and return types for every library function.
        """
"#,
        );

        for func in &header.functions {
            let mut argtypes = Vec::new();
            for param in &func.params {
                argtypes.push(resolver.resolve_abi(&param.ty)?.as_ctypes());
            }
            let restype = resolver.resolve_abi(&func.return_type)?.as_ctypes();

            out.push_str(&format!("        # {}\n", func.name));
            out.push_str(&format!(
                "        self.lib.{}.argtypes = [{}]\n",
                func.name,
                argtypes.join(", ")
            ));
            out.push_str(&format!(
                "        self.lib.{}.restype = {}\n",
                func.name, restype
            ));
        }

        Ok(())
    }

    fn emit_wrappers(
        &self,
        out: &mut String,
        header: &ParsedHeader,
        resolver: &TypeResolver,
    ) -> Result<(), ResolveError> {
        for func in &header.functions {
            let mut sig = vec!["self".to_string()];
            let mut forwarded = Vec::new();
            let mut docs = Vec::new();

            for param in &func.params {
                let py = resolver.resolve_py(&param.ty)?;
                sig.push(format!("{}: {}", param.name, py.as_py()));
                forwarded.push(param.name.clone());
                docs.push(format!("            {} ({}): Parameter", param.name, param.raw));
            }

            let ret = resolver.resolve_py(&func.return_type)?;

            out.push_str(&format!(
                "\n    def {}({}) -> {}:\n",
                func.name,
                sig.join(", "),
                ret.as_py()
            ));
            out.push_str("        \"\"\"\n");
            out.push_str(&format!("        Wrapper for {}.\n", func.name));
            if !docs.is_empty() {
                out.push_str("\n        Args:\n");
                for doc in &docs {
                    out.push_str(doc);
                    out.push('\n');
                }
            }
            out.push_str("\n        Returns:\n");
            out.push_str(&format!(
                "            {} result from the C function\n",
                ret.as_py()
            ));
            out.push_str("        \"\"\"\n");
            out.push_str(&format!(
                "        return self.lib.{}({})\n",
                func.name,
                forwarded.join(", ")
            ));
        }

        Ok(())
    }

    fn emit_trailer(&self, out: &mut String) {
        out.push_str(&format!(
            r#"

if __name__ == "__main__":
    # Example usage
    lib = {class_name}()
    print("{class_name} interface initialized successfully")
"#,
            class_name = self.class_name
        ));
    }
}

/// Executable mirror for a recognized typedef pattern, or `None` for the
/// comment-only case.
fn typedef_mirror(
    decl: &TypedefDecl,
    resolver: &TypeResolver,
) -> Result<Option<String>, ResolveError> {
    // Pointer-indirection markers: a pointer base, or an alias named as a
    // pointer. The mirror is the ABI projection of the base.
    if decl.base.contains('*') || decl.alias.ends_with("Ptr") {
        return Ok(Some(resolver.resolve_abi(&decl.base)?.as_ctypes()));
    }

    // Known primitive bases mirror the primitive directly.
    let prim = AbiType::from_primitive(&decl.base);
    if prim != AbiType::Opaque && prim != AbiType::Void {
        return Ok(Some(prim.as_ctypes()));
    }

    // Callback-function markers: pointer-sized opaque value, since no
    // signature is recoverable from the `<base> <alias>;` shape.
    if decl.alias.contains("Callback") || decl.alias.contains("FFI") {
        return Ok(Some("c_void_p".to_string()));
    }

    Ok(None)
}

/// Derive a Python class name from a library name: `my_lib` -> `MyLib`.
fn default_class_name(lib_name: &str) -> String {
    lib_name
        .split(['_', '-'])
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::parser::HeaderParser;

    fn generate(content: &str) -> String {
        let header = HeaderParser::new().parse_content(content, Path::new("test.h"));
        PythonGenerator::new("testlib").generate(&header).unwrap()
    }

    #[test]
    fn test_default_class_name() {
        assert_eq!(default_class_name("econfmanager"), "Econfmanager");
        assert_eq!(default_class_name("my_lib"), "MyLib");
        assert_eq!(default_class_name("sensor-hub"), "SensorHub");
    }

    #[test]
    fn test_round_trip_scenario() {
        let code = generate(
            "typedef enum { RED, GREEN=10, BLUE } Color;\n\
             int32_t get_value(Color c, const char* label);\n",
        );

        // Enum mirror with positional fallback values.
        assert!(code.contains("class Color(IntEnum):"));
        assert!(code.contains("        RED = 0\n"));
        assert!(code.contains("        GREEN = 10\n"));
        assert!(code.contains("        BLUE = 2\n"));

        // ABI declaration: enum argument as c_int, string pointer,
        // integer return.
        assert!(code.contains("self.lib.get_value.argtypes = [c_int, c_char_p]"));
        assert!(code.contains("self.lib.get_value.restype = c_int32"));

        // Wrapper with semantic-type signature forwarding in order.
        assert!(code.contains("def get_value(self, c: int, label: str) -> int:"));
        assert!(code.contains("return self.lib.get_value(c, label)"));
    }

    #[test]
    fn test_empty_header_is_minimal_module() {
        let code = generate("// nothing to see here\n");

        assert!(code.contains("class Testlib:"));
        assert!(code.contains("self.lib = CDLL(lib_path)"));
        assert!(code.contains("def _setup_functions(self):"));
        assert!(!code.contains("argtypes"));
    }

    #[test]
    fn test_struct_fields_are_comments_only() {
        let code = generate(
            "typedef struct Point_s {\n    int32_t x;\n    int32_t y;\n} Point;\n",
        );

        assert!(code.contains("class Point(Structure):"));
        assert!(code.contains("            # int32_t x\n"));
        assert!(code.contains("            # int32_t y\n"));
        // No real field tuples are materialized.
        assert!(!code.contains("(\"x\""));
    }

    #[test]
    fn test_typedef_mirrors() {
        let code = generate(
            "typedef int32_t device_id_t;\n\
             typedef Instance* InstancePtr;\n\
             typedef uint64_t SomethingElse;\n\
             typedef Instance UpdateCallbackFFI;\n\
             typedef Widget gadget_t;\n",
        );

        // Primitive base mirrors the primitive.
        assert!(code.contains("    device_id_t = c_int32\n"));
        assert!(code.contains("    SomethingElse = c_uint64\n"));
        // Pointer base mirrors the ABI projection.
        assert!(code.contains("    InstancePtr = POINTER(c_void_p)\n"));
        // Callback marker mirrors an opaque pointer.
        assert!(code.contains("    UpdateCallbackFFI = c_void_p\n"));
        // Unrecognized typedefs are comment-only.
        assert!(code.contains("    # Widget gadget_t\n"));
        assert!(!code.contains("    gadget_t ="));
    }

    #[test]
    fn test_param_order_preserved_in_forwarding() {
        let code = generate("void shuffle(int32_t z, int32_t a, int32_t m);");

        assert!(code.contains("self.lib.shuffle.argtypes = [c_int32, c_int32, c_int32]"));
        assert!(code.contains("def shuffle(self, z: int, a: int, m: int) -> Any:"));
        assert!(code.contains("return self.lib.shuffle(z, a, m)"));
    }

    #[test]
    fn test_cycle_fails_generation() {
        let header = HeaderParser::new().parse_content(
            "typedef B A;\ntypedef A B;\nvoid use_it(A value);\n",
            Path::new("test.h"),
        );

        let err = PythonGenerator::new("testlib").generate(&header);
        assert!(err.is_err());
    }

    #[test]
    fn test_lib_path_override() {
        let header = HeaderParser::new().parse_content("", Path::new("test.h"));
        let code = PythonGenerator::new("testlib")
            .with_lib_path("/opt/lib/libtestlib.so")
            .generate(&header)
            .unwrap();

        assert!(code.contains("lib_path = '/opt/lib/libtestlib.so'"));
        assert!(!code.contains("os.path.dirname"));
    }

    #[test]
    fn test_class_name_override() {
        let header = HeaderParser::new().parse_content("", Path::new("test.h"));
        let code = PythonGenerator::new("testlib")
            .with_class_name("Bindings")
            .generate(&header)
            .unwrap();

        assert!(code.contains("class Bindings:"));
        assert!(code.contains("lib = Bindings()"));
    }
}
