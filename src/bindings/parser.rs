//! C header parser for Python binding generation.
//!
//! Parses C header files to extract enums, structs, typedefs, and
//! function declarations. This is a pattern-based extractor, not a C
//! grammar: it recognizes four specific declaration shapes and silently
//! skips any text that matches none of them.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use super::types::{
    EnumDecl, EnumMember, FunctionDecl, ParamDecl, ParsedHeader, StructDecl, TypedefDecl,
};

/// Parser for C header files.
#[derive(Debug, Default)]
pub struct HeaderParser {}

impl HeaderParser {
    /// Create a new header parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header file.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedHeader> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read header: {}", path.display()))?;

        Ok(self.parse_content(&content, path))
    }

    /// Parse header content.
    pub fn parse_content(&self, content: &str, path: &Path) -> ParsedHeader {
        let mut header = ParsedHeader::new(path);

        header.enums = self.parse_enums(content);
        header.structs = self.parse_structs(content);
        header.typedefs = self.parse_typedefs(content);
        header.functions = self.parse_functions(content);

        tracing::debug!(
            functions = header.functions.len(),
            structs = header.structs.len(),
            enums = header.enums.len(),
            typedefs = header.typedefs.len(),
            "parsed {}",
            path.display()
        );

        header
    }

    /// Parse enum definitions.
    ///
    /// Matches `typedef enum { items } Name;`. Items are comma-separated;
    /// an item with `=` keeps its right-hand expression verbatim, so
    /// enumerators like bit-shift expressions pass through unevaluated.
    fn parse_enums(&self, content: &str) -> Vec<EnumDecl> {
        let mut enums = Vec::new();

        let re = Regex::new(r"typedef\s+enum\s*\{([^}]*)\}\s*(\w+)\s*;").unwrap();

        for cap in re.captures_iter(content) {
            let body = cap.get(1).map_or("", |m| m.as_str());
            let name = cap.get(2).map_or("", |m| m.as_str());

            let mut decl = EnumDecl::new(name);

            for item in body.split(',') {
                let item = item.trim();
                if item.is_empty() {
                    continue;
                }

                let member = if let Some((name, value)) = item.split_once('=') {
                    let name = name.trim();
                    let value = value.trim().trim_end_matches(',').trim();
                    EnumMember::new(name).with_value(value)
                } else {
                    EnumMember::new(item.trim_end_matches(',').trim())
                };

                // A duplicated member name keeps its first position; only
                // the stored value is replaced.
                match decl.members.iter().position(|m| m.name == member.name) {
                    Some(index) => decl.members[index].value = member.value,
                    None => decl.members.push(member),
                }
            }

            enums.push(decl);
        }

        enums
    }

    /// Parse struct definitions.
    ///
    /// Matches `typedef struct Tag { body } Name;`. The field block is
    /// kept as opaque text for documentation only; no field records are
    /// extracted. Empty blocks are skipped.
    fn parse_structs(&self, content: &str) -> Vec<StructDecl> {
        let mut structs = Vec::new();

        let re = Regex::new(r"typedef\s+struct\s+(\w+)\s*\{([^}]*)\}\s*(\w+)\s*;").unwrap();

        for cap in re.captures_iter(content) {
            let body = cap.get(2).map_or("", |m| m.as_str()).trim();
            let name = cap.get(3).map_or("", |m| m.as_str());

            if body.is_empty() {
                continue;
            }

            structs.push(StructDecl::new(name, body));
        }

        structs
    }

    /// Parse typedef definitions.
    ///
    /// Matches `typedef <base> <alias>;` where the base is a single token
    /// with an optional embedded pointer marker. Multi-word bases
    /// (`unsigned int`) and struct/enum block typedefs do not match.
    fn parse_typedefs(&self, content: &str) -> Vec<TypedefDecl> {
        let mut typedefs = Vec::new();

        let re = Regex::new(r"typedef\s+(\S+(?:\s*\*)?)\s+(\w+)\s*;").unwrap();

        for cap in re.captures_iter(content) {
            let base = cap.get(1).map_or("", |m| m.as_str()).trim();
            let alias = cap.get(2).map_or("", |m| m.as_str());

            typedefs.push(TypedefDecl::new(base, alias));
        }

        typedefs
    }

    /// Parse function declarations.
    ///
    /// Matches `<return-type> <name>(<params>);`.
    fn parse_functions(&self, content: &str) -> Vec<FunctionDecl> {
        let mut functions = Vec::new();

        let re = Regex::new(r"(\w+)\s+(\w+)\(([^)]*)\)\s*;").unwrap();

        for cap in re.captures_iter(content) {
            let return_type = cap.get(1).map_or("", |m| m.as_str());
            let name = cap.get(2).map_or("", |m| m.as_str());
            let params_str = cap.get(3).map_or("", |m| m.as_str());

            let mut func = FunctionDecl::new(name, return_type);
            func.params = self.parse_params(params_str);

            functions.push(func);
        }

        functions
    }

    /// Parse function parameters.
    fn parse_params(&self, params_str: &str) -> Vec<ParamDecl> {
        let params_str = params_str.trim();

        if params_str.is_empty() || params_str == "void" {
            return Vec::new();
        }

        params_str
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| self.parse_param(p))
            .collect()
    }

    /// Infer type and name for a single parameter fragment.
    ///
    /// This is heuristic, token-position-based inference: it assumes
    /// well-formed `type name` or `type *name` fragments and makes no
    /// attempt to tokenize array brackets or qualifier stacks.
    fn parse_param(&self, raw: &str) -> ParamDecl {
        // Split on spaces and stars, keeping empty tokens, so that the
        // const-char check sees the same shape for `const char* s` and
        // `const char *s`.
        let parts: Vec<&str> = raw.split([' ', '*']).collect();

        // `const char` fast path: always the string-pointer type, name
        // from the final token.
        if parts.len() >= 4 && parts[0] == "const" && parts[1] == "char" {
            let name = parts.last().copied().unwrap_or("arg");
            let name = if name.is_empty() { "arg" } else { name };
            return ParamDecl::new("const char*", name, raw);
        }

        if let Some(star) = raw.find('*') {
            // Name is everything after the last space preceding the
            // marker, with marker characters stripped.
            if let Some(space) = raw[..star].rfind(' ') {
                let name = raw[space + 1..].trim().replace('*', "");
                let ty = raw[..space].trim();
                return ParamDecl::new(ty, name, raw);
            }

            // No space before the marker: no inferable name, and the type
            // degrades to a pointer to the stripped base token.
            let base = raw
                .replace('*', " ")
                .split_whitespace()
                .next()
                .unwrap_or("void")
                .to_string();
            return ParamDecl::new(format!("{base}*"), "arg", raw);
        }

        // No pointer marker: second-to-last token is the type, last is
        // the name. A single-token parameter has no inferable name.
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() >= 2 {
            ParamDecl::new(tokens[tokens.len() - 2], tokens[tokens.len() - 1], raw)
        } else {
            ParamDecl::new(raw, "arg", raw)
        }
    }
}
