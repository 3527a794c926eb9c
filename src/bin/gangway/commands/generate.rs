//! `gangway generate` command
//!
//! Parses a C header and writes the Python ctypes binding module.

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use gangway::bindings::{HeaderParser, PythonGenerator};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let lib_name = match args.lib_name {
        Some(name) => name,
        None => args
            .header
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("cannot derive a library name from {}", args.header.display()))?,
    };

    let parser = HeaderParser::new();
    let header = parser.parse_file(&args.header)?;

    println!(
        "Parsed {}: {} functions, {} structs, {} enums, {} typedefs",
        args.header.display(),
        header.functions.len(),
        header.structs.len(),
        header.enums.len(),
        header.typedefs.len()
    );

    let mut generator = PythonGenerator::new(lib_name.as_str());
    if let Some(class_name) = args.class_name {
        generator = generator.with_class_name(class_name);
    }
    if let Some(lib_path) = args.lib_path {
        generator = generator.with_lib_path(lib_path);
    }

    generator.generate_to_file(&header, &args.output)?;

    println!("Generated Python bindings: {}", args.output.display());

    Ok(())
}
