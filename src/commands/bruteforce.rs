//! Secret recovery command.
//!
//! Loads the wordlist, runs the parallel search with a progress bar, and
//! prints the recovered secret on stdout.

use indicatif::{ProgressBar, ProgressStyle};

use cookieforge::session::render;
use cookieforge::{load_candidates, ForgeError, Result, SearchOutcome, SecretSearch, SignerConfig};

use crate::cli::BruteforceArgs;

pub fn run(args: &BruteforceArgs, config: SignerConfig) -> Result<()> {
    let candidates = load_candidates(&args.wordlist)?;
    eprintln!(
        "[*] loaded {} candidate secrets from {}",
        candidates.len(),
        args.wordlist.display()
    );

    let search = SecretSearch::new(config);
    let outcome = if args.quiet {
        search.run(&args.cookie, &candidates)
    } else {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA {eta})",
            )
            .expect("progress template is well-formed")
            .progress_chars("#>-"),
        );
        let outcome = search.run_with_progress(&args.cookie, &candidates, || bar.inc(1));
        bar.finish_and_clear();
        outcome
    };

    match outcome {
        SearchOutcome::Found {
            secret,
            structure,
            attempts,
        } => {
            eprintln!("[+] secret found after {attempts} attempts");
            println!("{secret}");
            eprintln!("[+] decoded session: {}", render(&structure, false)?);
            Ok(())
        }
        SearchOutcome::Exhausted { attempts } => {
            eprintln!("[!] exhausted all {attempts} candidates without a match");
            Err(ForgeError::SecretNotFound)
        }
        SearchOutcome::Cancelled { attempts } => {
            eprintln!("[!] search cancelled after {attempts} attempts");
            Ok(())
        }
    }
}
