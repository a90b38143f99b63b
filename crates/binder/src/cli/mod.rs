//! # CLI Behavior
//!
//! This is **one possible UI client** for binderapp. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! Running `binder` with no arguments lists the binders.
//!
//! Binders are picked by their number in `binder list` or by name. Slots are given
//! as an absolute number (`14`) or as `page:slot` (`2:5`), both counted from 1.

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
