use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DissectError>;

/// Errors produced while configuring dissectors or dissecting records.
#[derive(Debug, Error)]
pub enum DissectError {
	/// Configuration was attempted after `prepare_for_run`.
	#[error("{dissector}: cannot reconfigure after prepare_for_run")]
	AlreadyPrepared {
		/// Identity of the dissector.
		dissector: &'static str,
	},
	/// Raw value was present but could not be interpreted.
	#[error("{dissector}: dissection failure for {input_name}: {source}")]
	DissectionFailure {
		/// Identity of the dissector.
		dissector: &'static str,
		/// Input field whose value failed.
		input_name: String,
		/// Underlying grammar error of the failing dissector.
		source: Box<dyn std::error::Error + Send + Sync>,
	},
	/// Output name is not of the form `<TYPE>:<name>`.
	#[error("invalid output name {name:?} (expected <TYPE>:<name>)")]
	InvalidOutputName {
		/// Offending qualified name.
		name: String,
	},
	/// Output table declares the same name twice.
	#[error("duplicate output {name}")]
	DuplicateOutput {
		/// Repeated output name.
		name: String,
	},
	/// Output table declares nothing.
	#[error("output table is empty")]
	EmptyOutputTable,
	/// Cast name is not one of `STRING`, `LONG`, `DOUBLE` or a known set.
	#[error("unknown cast {name:?}")]
	UnknownCast {
		/// Offending cast name.
		name: String,
	},
	/// Cast list for an output was empty.
	#[error("empty cast set")]
	EmptyCasts,
}

impl DissectError {
	/// Whether the error concerns one record only and processing may continue.
	///
	/// Every other error is a configuration error and must stop the pipeline.
	pub fn is_recoverable(&self) -> bool {
		matches!(self, Self::DissectionFailure { .. })
	}
}

/// Syntax errors in a `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
	/// A double quote was opened and never closed.
	#[error("unterminated quoted value starting at byte {at}")]
	UnterminatedQuote {
		/// Byte offset of the opening quote.
		at: usize,
	},
	/// The leading `name=value` pair of a cookie has no `=`.
	#[error("missing name=value pair at byte {at}")]
	MissingNameValue {
		/// Byte offset where the cookie starts.
		at: usize,
	},
	/// Cookie name is empty, not a token, or reserved.
	#[error("illegal cookie name {name:?}")]
	InvalidName {
		/// Offending cookie name.
		name: String,
	},
	/// `Max-Age` value is not a decimal integer.
	#[error("illegal max-age {value:?}")]
	InvalidMaxAge {
		/// Offending attribute value.
		value: String,
	},
}
