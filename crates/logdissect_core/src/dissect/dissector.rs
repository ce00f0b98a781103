use std::sync::Arc;

use crate::dissect::{Casts, DeclarativeDissector, OutputDeclaration, OutputTable, Record, Result, SetCookieDissector};

/// Contract every dissector variant implements.
///
/// Lifecycle: construct, call [`Dissect::initialize_from_settings`] once,
/// call [`Dissect::prepare_for_run`] once, then [`Dissect::dissect`] once per
/// matching input value. The instance keeps configuration only; every
/// per-record effect goes into the [`Record`] passed in.
pub trait Dissect {
	/// Stable identity used in diagnostics.
	fn name(&self) -> &'static str;

	/// Type tag of the values this instance consumes.
	fn input_type(&self) -> &str;

	/// Every output the instance can ever emit, in emission order.
	///
	/// Derived from configuration alone; never empty, names are unique.
	fn possible_outputs(&self) -> &[OutputDeclaration];

	/// One-time configuration from a raw settings string.
	///
	/// An error is a configuration error: the pipeline must not start.
	fn initialize_from_settings(&mut self, settings: &str) -> Result<()>;

	/// Casts supported by `output_name` below `input_name`, or `None` when the
	/// output is never produced.
	fn prepare_for_dissect(&self, input_name: &str, output_name: &str) -> Option<Casts>;

	/// Mark the instance ready; configuration is frozen afterwards.
	fn prepare_for_run(&mut self);

	/// Decompose the current value of `input_name` into `record`.
	///
	/// Absent or empty input emits nothing and succeeds.
	fn dissect(&self, record: &mut dyn Record, input_name: &str) -> Result<()>;

	/// Fresh, unprepared instance with the same configuration.
	fn new_instance(&self) -> Self
	where
		Self: Sized;
}

/// The closed set of dissector variants.
#[derive(Debug, Clone)]
pub enum Dissector {
	/// Output contract from a static table, no decomposition.
	Declarative(DeclarativeDissector),
	/// `Set-Cookie` header decomposition.
	SetCookie(SetCookieDissector),
}

impl Dissector {
	/// Set-Cookie decomposer with default settings.
	pub fn set_cookie() -> Self {
		Self::SetCookie(SetCookieDissector::new())
	}

	/// Declarative dissector over `table`.
	pub fn declarative(table: Arc<OutputTable>) -> Self {
		Self::Declarative(DeclarativeDissector::new(table))
	}

	/// Declarative dissector over [`OutputTable::ultimate`].
	pub fn ultimate_dummy() -> Self {
		Self::declarative(OutputTable::ultimate())
	}

	fn inner(&self) -> &dyn Dissect {
		match self {
			Self::Declarative(inner) => inner,
			Self::SetCookie(inner) => inner,
		}
	}

	fn inner_mut(&mut self) -> &mut dyn Dissect {
		match self {
			Self::Declarative(inner) => inner,
			Self::SetCookie(inner) => inner,
		}
	}
}

impl From<DeclarativeDissector> for Dissector {
	fn from(value: DeclarativeDissector) -> Self {
		Self::Declarative(value)
	}
}

impl From<SetCookieDissector> for Dissector {
	fn from(value: SetCookieDissector) -> Self {
		Self::SetCookie(value)
	}
}

impl Dissect for Dissector {
	fn name(&self) -> &'static str {
		self.inner().name()
	}

	fn input_type(&self) -> &str {
		self.inner().input_type()
	}

	fn possible_outputs(&self) -> &[OutputDeclaration] {
		self.inner().possible_outputs()
	}

	fn initialize_from_settings(&mut self, settings: &str) -> Result<()> {
		self.inner_mut().initialize_from_settings(settings)
	}

	fn prepare_for_dissect(&self, input_name: &str, output_name: &str) -> Option<Casts> {
		self.inner().prepare_for_dissect(input_name, output_name)
	}

	fn prepare_for_run(&mut self) {
		self.inner_mut().prepare_for_run();
	}

	fn dissect(&self, record: &mut dyn Record, input_name: &str) -> Result<()> {
		self.inner().dissect(record, input_name)
	}

	fn new_instance(&self) -> Self {
		match self {
			Self::Declarative(inner) => Self::Declarative(inner.new_instance()),
			Self::SetCookie(inner) => Self::SetCookie(inner.new_instance()),
		}
	}
}
