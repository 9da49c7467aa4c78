//! Secret recovery search.
//!
//! Runs candidate secrets from a wordlist against an intercepted token until
//! one verifies. Candidates shard across a rayon pool; the winner is always
//! the first match in input order, regardless of which worker finds it.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::config::{ForgeError, Result, SignerConfig};
use crate::security::signer::SessionSigner;
use crate::session::SessionStructure;

/// Cloneable handle that aborts a running search between attempts.
///
/// Every attempt is a pure computation, so stopping between attempts leaves
/// no state to clean up.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an untripped flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Attempts already in flight finish; no further
    /// candidates are started.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A candidate verified the token.
    Found {
        secret: String,
        structure: SessionStructure,
        attempts: u64,
    },
    /// Every candidate was tried; none verified.
    Exhausted { attempts: u64 },
    /// The cancel flag tripped before the list was exhausted.
    Cancelled { attempts: u64 },
}

/// Bruteforce driver for one codec configuration.
pub struct SecretSearch {
    config: SignerConfig,
    cancel: CancelFlag,
}

impl SecretSearch {
    #[must_use]
    pub fn new(config: SignerConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Returns a handle that can cancel this search from another thread.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Runs the search over `candidates` in order.
    #[must_use]
    pub fn run(&self, token: &str, candidates: &[String]) -> SearchOutcome {
        self.run_with_progress(token, candidates, || {})
    }

    /// Runs the search, invoking `progress` once per attempted candidate.
    ///
    /// The hook keeps rendering out of the search: the caller can drive a
    /// progress bar without this module knowing about terminals.
    pub fn run_with_progress(
        &self,
        token: &str,
        candidates: &[String],
        progress: impl Fn() + Sync,
    ) -> SearchOutcome {
        debug!("searching {} candidate secrets", candidates.len());
        let attempts = AtomicU64::new(0);
        let hit = candidates.par_iter().find_map_first(|secret| {
            if self.cancel.is_cancelled() {
                return None;
            }
            attempts.fetch_add(1, Ordering::Relaxed);
            progress();
            // Any verification failure means "try the next candidate"; only
            // a full decode to a session mapping counts as a hit.
            let signer = SessionSigner::new(secret, self.config.clone());
            signer
                .verify(token)
                .ok()
                .map(|structure| (secret.clone(), structure))
        });
        let attempts = attempts.load(Ordering::Relaxed);
        match hit {
            Some((secret, structure)) => {
                debug!("secret found after {attempts} attempts");
                SearchOutcome::Found {
                    secret,
                    structure,
                    attempts,
                }
            }
            None if self.cancel.is_cancelled() => SearchOutcome::Cancelled { attempts },
            None => SearchOutcome::Exhausted { attempts },
        }
    }
}

/// Loads a newline-delimited wordlist, trimming surrounding whitespace from
/// each line.
///
/// Order is preserved. Blank lines pass through as the empty secret and
/// duplicates are kept; filtering them would change the attempt count the
/// operator sees against their own list.
///
/// # Errors
///
/// Returns [`ForgeError::Wordlist`] when the file cannot be read.
pub fn load_candidates(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| ForgeError::Wordlist {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    Ok(contents
        .lines()
        .map(|line| line.trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn structure(value: Value) -> SessionStructure {
        let Value::Object(map) = value else {
            panic!("test structure must be a mapping")
        };
        map
    }

    fn candidates(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    fn forge(secret: &str) -> (String, SessionStructure) {
        let session = structure(json!({"user": "alice", "admin": false}));
        let token = SessionSigner::new(secret, SignerConfig::default())
            .sign(&session)
            .unwrap();
        (token, session)
    }

    #[test]
    fn test_finds_planted_secret() {
        let (token, session) = forge("s3cr3t");
        let list = candidates(&["password", "admin", "s3cr3t", "letmein"]);
        let outcome = SecretSearch::new(SignerConfig::default()).run(&token, &list);
        match outcome {
            SearchOutcome::Found {
                secret,
                structure,
                attempts,
            } => {
                assert_eq!(secret, "s3cr3t");
                assert_eq!(structure, session);
                assert!(attempts <= list.len() as u64);
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_finds_empty_secret() {
        let (token, _) = forge("");
        let list = candidates(&["password", "", "admin"]);
        let outcome = SecretSearch::new(SignerConfig::default()).run(&token, &list);
        assert!(matches!(
            outcome,
            SearchOutcome::Found { secret, .. } if secret.is_empty()
        ));
    }

    #[test]
    fn test_exhausts_when_absent() {
        let (token, _) = forge("nowhere-in-list");
        let list = candidates(&["password", "admin", "letmein"]);
        let outcome = SecretSearch::new(SignerConfig::default()).run(&token, &list);
        assert_eq!(outcome, SearchOutcome::Exhausted { attempts: 3 });
    }

    #[test]
    fn test_empty_list_exhausts_immediately() {
        let (token, _) = forge("whatever");
        let outcome = SecretSearch::new(SignerConfig::default()).run(&token, &[]);
        assert_eq!(outcome, SearchOutcome::Exhausted { attempts: 0 });
    }

    #[test]
    fn test_pretripped_flag_cancels() {
        let (token, _) = forge("s3cr3t");
        let list = candidates(&["password", "s3cr3t"]);
        let search = SecretSearch::new(SignerConfig::default());
        search.cancel_flag().cancel();
        let outcome = search.run(&token, &list);
        assert_eq!(outcome, SearchOutcome::Cancelled { attempts: 0 });
    }

    #[test]
    fn test_progress_fires_once_per_attempt() {
        let (token, _) = forge("absent");
        let list = candidates(&["a", "b", "c", "d"]);
        let calls = AtomicU64::new(0);
        let outcome = SecretSearch::new(SignerConfig::default()).run_with_progress(
            &token,
            &list,
            || {
                calls.fetch_add(1, Ordering::Relaxed);
            },
        );
        assert_eq!(outcome, SearchOutcome::Exhausted { attempts: 4 });
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_garbage_candidates_do_not_abort() {
        // Wrong keys produce undecodable payloads and bad signatures alike;
        // every failure class must mean "keep going".
        let (token, _) = forge("final");
        let list = candidates(&["", "\u{1F512}", "x".repeat(500).as_str(), "final"]);
        let outcome = SecretSearch::new(SignerConfig::default()).run(&token, &list);
        assert!(matches!(
            outcome,
            SearchOutcome::Found { secret, .. } if secret == "final"
        ));
    }

    #[test]
    fn test_load_candidates_preserves_order_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlist.txt");
        fs::write(&path, "alpha\n\n  beta  \nalpha\n").unwrap();
        let words = load_candidates(&path).unwrap();
        assert_eq!(words, ["alpha", "", "beta", "alpha"]);
    }

    #[test]
    fn test_load_candidates_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_candidates(&path).unwrap_err();
        assert!(matches!(err, ForgeError::Wordlist { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }
}
