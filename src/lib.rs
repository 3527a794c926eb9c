//! Gangway - A Python ctypes binding generator for C libraries
//!
//! This crate provides the core library functionality for Gangway:
//! parsing C header declarations, resolving typedef chains, and
//! generating a Python ctypes interface module.

pub mod bindings;

pub use bindings::{HeaderParser, ParsedHeader, PythonGenerator, TypeResolver};
