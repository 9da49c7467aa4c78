//! Token forging command.
//!
//! Parses or interactively builds a session structure, signs it, and prints
//! the finished token on stdout. Prompts and previews go to stderr so the
//! token stays pipeable.

use std::io::{self, BufRead, Write};

use serde_json::Value;

use cookieforge::session::{parse_structure, render, SessionStructure};
use cookieforge::{ForgeError, Result, SessionSigner, SignerConfig};

use crate::cli::EncodeArgs;

/// Structure argument that switches input to the interactive builder.
const INTERACTIVE_KEYWORD: &str = "auto";

pub fn run(args: &EncodeArgs, mut config: SignerConfig) -> Result<()> {
    config.compression = args.compress.parse().unwrap_or_default();

    let structure = if args.structure.trim().eq_ignore_ascii_case(INTERACTIVE_KEYWORD) {
        let stdin = io::stdin();
        let structure = build_from_lines(&mut stdin.lock().lines())?;
        eprintln!("[*] session structure: {}", render(&structure, false)?);
        structure
    } else {
        parse_structure(&args.structure)?
    };

    let signer = SessionSigner::new(&args.secret, config);
    let token = signer.sign(&structure)?;
    println!("{token}");
    Ok(())
}

/// Builds a structure field by field from an input stream.
///
/// A blank field name or end of input finishes the structure. Values are
/// inferred: digit runs become integers, `true`/`false` in any casing
/// becomes a boolean, everything else stays text.
fn build_from_lines(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<SessionStructure> {
    let mut structure = SessionStructure::new();
    loop {
        let Some(name) = prompt(lines, "field name (blank to finish)> ")? else {
            break;
        };
        if name.is_empty() {
            break;
        }
        let Some(value) = prompt(lines, "value> ")? else {
            break;
        };
        structure.insert(name, infer_value(&value));
    }
    Ok(structure)
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<Option<String>> {
    eprint!("{label}");
    let _ = io::stderr().flush();
    match lines.next() {
        Some(line) => {
            let line = line
                .map_err(|e| ForgeError::InvalidStructure(format!("interactive input: {e}")))?;
            Ok(Some(line.trim().to_string()))
        }
        None => Ok(None),
    }
}

fn infer_value(raw: &str) -> Value {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::from(n);
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(raw.to_string())
    }
}
