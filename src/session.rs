//! Session state handling.
//!
//! Structure parsing with Python-literal fallback and the payload transforms
//! that turn a structure into the bytes a token carries.

pub mod payload;
pub mod pyliteral;
mod structure;

pub use structure::{parse_structure, render, SessionStructure};
