//! Subcommand implementations.

pub mod bruteforce;
pub mod decode;
pub mod encode;
pub mod guess;
