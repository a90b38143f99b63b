//! # Binder CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/binder/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - logging setup + dispatch (commands.rs)                │
//! │  - terminal rendering (render.rs, styles.rs)             │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  binderapp: API facade, commands, slot arithmetic, store │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in `binderapp` is UI agnostic. The CLI owns argument parsing, where
//! logs go, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
