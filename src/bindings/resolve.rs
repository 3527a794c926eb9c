//! Typedef resolution for C type strings.
//!
//! Given a type as written in a declaration (possibly an alias, possibly
//! carrying one or two pointer markers, possibly an enum name), chase it
//! through the typedef map to its non-aliased form and project it onto
//! the ctypes call-ABI descriptor or the Python annotation type. The two
//! projections chase the same alias chains and agree on the underlying
//! primitive a type resolves to.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{AbiType, ParsedHeader, PyType};

/// Pointer wrapping deeper than this can only come from an alias chain
/// that re-enters itself through a pointer form.
const MAX_POINTER_DEPTH: usize = 16;

/// Semantic integer-like primitives.
const INT_LIKE: &[&str] = &[
    "int", "int32_t", "int64_t", "uint32_t", "uint64_t", "uintptr_t", "size_t",
];

/// Error during typedef resolution.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("typedef cycle detected while resolving `{name}`: {}", chain.join(" -> "))]
    CyclicTypedef { name: String, chain: Vec<String> },
}

/// Resolver for type strings appearing in one parsed header.
///
/// Borrows the header's typedef map and enum names; construction is cheap
/// and resolution never mutates anything.
pub struct TypeResolver<'a> {
    typedef_map: HashMap<&'a str, &'a str>,
    enum_names: HashSet<&'a str>,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over a parsed header.
    pub fn new(header: &'a ParsedHeader) -> Self {
        TypeResolver {
            typedef_map: header.typedef_map(),
            enum_names: header.enums.iter().map(|e| e.name.as_str()).collect(),
        }
    }

    /// Resolve a type string to its call-ABI descriptor.
    pub fn resolve_abi(&self, ty: &str) -> Result<AbiType, ResolveError> {
        self.resolve_abi_at(ty, 0)
    }

    fn resolve_abi_at(&self, ty: &str, depth: usize) -> Result<AbiType, ResolveError> {
        if depth > MAX_POINTER_DEPTH {
            return Err(ResolveError::CyclicTypedef {
                name: ty.to_string(),
                chain: vec![ty.to_string()],
            });
        }

        let t = strip_const(ty);

        if let Some(base) = t.strip_suffix("**") {
            let base = base.trim();
            let target = self.typedef_map.get(base).copied().unwrap_or(base);
            let inner = self.resolve_abi_at(target, depth + 1)?;
            return Ok(AbiType::Pointer(Box::new(inner)));
        }

        if let Some(base) = t.strip_suffix('*') {
            let base = base.trim();
            // A char pointer is the dedicated string type whether `char`
            // appears directly or at the end of an alias chain.
            if self.chase(base)? == "char" {
                return Ok(AbiType::CharPtr);
            }
            let target = self.typedef_map.get(base).copied().unwrap_or(base);
            let inner = self.resolve_abi_at(target, depth + 1)?;
            return Ok(AbiType::Pointer(Box::new(inner)));
        }

        let t = self.chase(t)?;

        if self.enum_names.contains(t) {
            return Ok(AbiType::Int);
        }

        Ok(AbiType::from_primitive(t))
    }

    /// Resolve a type string to its semantic Python type.
    pub fn resolve_py(&self, ty: &str) -> Result<PyType, ResolveError> {
        let t = strip_const(ty);

        if let Some(base) = t.strip_suffix('*') {
            if self.chase(base.trim())? == "char" {
                return Ok(PyType::Str);
            }
            return Ok(PyType::Any);
        }

        let t = self.chase(t)?;

        if self.enum_names.contains(t) || INT_LIKE.contains(&t) {
            return Ok(PyType::Int);
        }
        if t == "float" || t == "double" {
            return Ok(PyType::Float);
        }
        if t == "bool" {
            return Ok(PyType::Bool);
        }

        Ok(PyType::Any)
    }

    /// Substitute a name through the typedef map until it is no longer an
    /// alias. Fails instead of looping when the chain revisits a name.
    fn chase<'s>(&'s self, name: &'s str) -> Result<&'s str, ResolveError>
    where
        'a: 's,
    {
        let mut current = name;
        let mut seen: Vec<&str> = vec![current];

        while let Some(&next) = self.typedef_map.get(current) {
            if seen.contains(&next) {
                let mut chain: Vec<String> = seen.iter().map(|s| s.to_string()).collect();
                chain.push(next.to_string());
                return Err(ResolveError::CyclicTypedef {
                    name: name.to_string(),
                    chain,
                });
            }
            seen.push(next);
            current = next;
        }

        Ok(current)
    }
}

/// Strip a leading `const` qualifier; other qualifiers are ignored.
fn strip_const(ty: &str) -> &str {
    let t = ty.trim();
    t.strip_prefix("const ").map(str::trim).unwrap_or(t)
}
