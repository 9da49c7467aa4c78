//! Token decoding command.
//!
//! With a secret: verify the token and print the decoded structure. Without
//! one: extract the payload bytes unauthenticated and say so on stderr.

use serde_json::Value;

use cookieforge::session::render;
use cookieforge::{Result, SessionSigner, SignerConfig};

use crate::cli::DecodeArgs;

pub fn run(args: &DecodeArgs, mut config: SignerConfig) -> Result<()> {
    config.max_age = args.max_age;

    match &args.secret {
        Some(secret) => {
            let signer = SessionSigner::new(secret, config);
            let structure = signer.verify(&args.cookie)?;
            println!("{}", render(&structure, args.pretty)?);
        }
        None => {
            let bytes = SessionSigner::decode_raw(&args.cookie)?;
            let text = String::from_utf8_lossy(&bytes);
            match serde_json::from_str::<Value>(&text) {
                Ok(value) if args.pretty => {
                    println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
                }
                _ => println!("{text}"),
            }
            eprintln!("[*] decoded without verification; contents are untrusted");
        }
    }
    Ok(())
}
