//! Cookie retrieval command.
//!
//! Fetches the session cookie from a live URL, echoes a short preview, then
//! hands the token to the decode path.

use cookieforge::{fetch_session_cookie, Result, SignerConfig};

use crate::cli::{DecodeArgs, GuessArgs};
use crate::commands::decode;

/// Longest cookie prefix echoed back to the operator.
const PREVIEW_CHARS: usize = 60;

pub fn run(args: &GuessArgs, config: SignerConfig) -> Result<()> {
    let cookie = fetch_session_cookie(&args.url, &args.name, args.timeout)?;

    let preview: String = cookie.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if cookie.chars().count() > PREVIEW_CHARS {
        "..."
    } else {
        ""
    };
    eprintln!("[+] retrieved '{}' cookie: {preview}{ellipsis}", args.name);

    decode::run(
        &DecodeArgs {
            cookie,
            secret: args.secret.clone(),
            max_age: None,
            pretty: args.pretty,
        },
        config,
    )
}
