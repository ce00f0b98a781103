/// Raw value dissection command.
pub mod dissect;
/// Cast negotiation command.
pub mod negotiate;
/// Output declaration listing command.
pub mod outputs;
/// Shared dissector construction and output helpers.
pub mod util;

/// Error type at the binary edge.
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Command result type.
pub type Result<T> = std::result::Result<T, DynError>;
