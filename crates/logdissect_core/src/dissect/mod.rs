mod casts;
mod clock;
mod cookie;
mod declarative;
mod dissector;
mod error;
mod output;
mod record;

/// Value representations and cast sets.
pub use casts::{Cast, Casts};
/// Reference time source for time-relative outputs.
pub use clock::ReferenceClock;
/// Set-Cookie grammar and decomposer.
pub use cookie::{SetCookie, SetCookieDissector, TypeNaming, parse_set_cookie, quote_cookie_value};
/// Table-driven dissector and its shared output table.
pub use declarative::{DeclarativeDissector, OutputTable};
/// Dissection contract and the closed set of dissector variants.
pub use dissector::{Dissect, Dissector};
/// Error and result aliases.
pub use error::{CookieError, DissectError, Result};
/// Output declaration types and name helpers.
pub use output::{OutputDeclaration, extract_field_name};
/// Record context trait and the in-memory implementation.
pub use record::{Dissection, FieldValue, ParsedRecord, Record};
