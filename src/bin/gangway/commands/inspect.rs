//! `gangway inspect` command
//!
//! Shows what the extractor recognizes in a header without generating
//! anything, either as a human summary or as JSON.

use anyhow::{Context, Result};

use crate::cli::InspectArgs;
use gangway::bindings::HeaderParser;

pub fn execute(args: InspectArgs) -> Result<()> {
    let parser = HeaderParser::new();
    let header = parser.parse_file(&args.header)?;

    if args.json {
        let json = serde_json::to_string_pretty(&header)
            .context("failed to serialize parsed header")?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", args.header.display());
    println!();

    if header.is_empty() {
        println!("  (no recognized declarations)");
        return Ok(());
    }

    if !header.enums.is_empty() {
        println!("Enums:");
        for decl in &header.enums {
            println!("  {} ({} members)", decl.name, decl.members.len());
        }
        println!();
    }

    if !header.structs.is_empty() {
        println!("Structs:");
        for decl in &header.structs {
            println!("  {} ({} fields)", decl.name, decl.field_lines().len());
        }
        println!();
    }

    if !header.typedefs.is_empty() {
        println!("Typedefs:");
        for decl in &header.typedefs {
            println!("  {} -> {}", decl.alias, decl.base);
        }
        println!();
    }

    if !header.functions.is_empty() {
        println!("Functions:");
        for func in &header.functions {
            let params: Vec<&str> = func.params.iter().map(|p| p.raw.as_str()).collect();
            println!("  {} {}({})", func.return_type, func.name, params.join(", "));
        }
    }

    Ok(())
}
