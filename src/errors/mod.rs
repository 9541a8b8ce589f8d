//! Diagnostics raised by the static checker.
//!
//! Every rule violation produces a single `Error` carrying:
//!
//! - The violated rule (`ErrorImpl`), whose message is the diagnostic text
//! - The position of the offending token, when one is available
//! - A short category name and an optional suggestion for rendering
//!
//! Checking is fail-fast, so the first `Error` ends the pass.

pub mod errors;
