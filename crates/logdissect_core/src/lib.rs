//! Typed-field dissectors for web server access logs.

/// Dissection contract, record context, and the bundled dissectors.
pub mod dissect;
