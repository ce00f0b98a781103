use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::dissect::{Casts, Dissect, DissectError, OutputDeclaration, Record, Result, extract_field_name};

const NAME: &str = "declarative";

static ULTIMATE: LazyLock<Arc<OutputTable>> = LazyLock::new(|| {
	Arc::new(OutputTable {
		entries: vec![
			OutputDeclaration::new("ANY", "any", Casts::STRING_OR_LONG_OR_DOUBLE),
			OutputDeclaration::new("STRING", "string", Casts::STRING_ONLY),
			OutputDeclaration::new("INT", "int", Casts::STRING_OR_LONG),
			OutputDeclaration::new("LONG", "long", Casts::STRING_OR_LONG),
			OutputDeclaration::new("FLOAT", "float", Casts::STRING_OR_DOUBLE),
			OutputDeclaration::new("DOUBLE", "double", Casts::STRING_OR_DOUBLE),
		],
	})
});

/// Ordered, immutable `<TYPE>:<name> -> casts` table.
#[derive(Debug, PartialEq, Eq)]
pub struct OutputTable {
	entries: Vec<OutputDeclaration>,
}

impl OutputTable {
	/// Build a table from qualified names and their casts, keeping input order.
	pub fn build<'a>(entries: impl IntoIterator<Item = (&'a str, Casts)>) -> Result<Self> {
		let mut seen = HashSet::new();
		let mut out = Vec::new();
		for (qualified, casts) in entries {
			let decl = OutputDeclaration::parse(qualified, casts)?;
			if !seen.insert(decl.name.clone()) {
				return Err(DissectError::DuplicateOutput { name: decl.name.into() });
			}
			out.push(decl);
		}
		if out.is_empty() {
			return Err(DissectError::EmptyOutputTable);
		}
		Ok(Self { entries: out })
	}

	/// Process-wide table covering every cast combination.
	///
	/// Built on first use; every call returns the same allocation.
	pub fn ultimate() -> Arc<Self> {
		Arc::clone(&ULTIMATE)
	}

	/// Declarations in table order.
	pub fn entries(&self) -> &[OutputDeclaration] {
		&self.entries
	}

	/// Declaration for a bare output name.
	pub fn lookup(&self, name: &str) -> Option<&OutputDeclaration> {
		self.entries.iter().find(|decl| decl.name.as_ref() == name)
	}

	/// Number of declarations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table declares nothing.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Dissector whose whole output contract comes from an [`OutputTable`].
///
/// It never decomposes anything; it exists so cast negotiation can be
/// exercised against every combination of casts.
#[derive(Debug, Clone)]
pub struct DeclarativeDissector {
	input_type: String,
	table: Arc<OutputTable>,
	prepared: bool,
}

impl DeclarativeDissector {
	/// Input type used until settings override it.
	pub const DEFAULT_INPUT_TYPE: &'static str = "INPUT";

	/// Dissector over `table` consuming [`Self::DEFAULT_INPUT_TYPE`].
	pub fn new(table: Arc<OutputTable>) -> Self {
		Self::with_input_type(table, Self::DEFAULT_INPUT_TYPE)
	}

	/// Dissector over `table` consuming `input_type`.
	pub fn with_input_type(table: Arc<OutputTable>, input_type: &str) -> Self {
		Self {
			input_type: input_type.to_owned(),
			table,
			prepared: false,
		}
	}

	/// Shared output table.
	pub fn table(&self) -> &Arc<OutputTable> {
		&self.table
	}
}

impl Dissect for DeclarativeDissector {
	fn name(&self) -> &'static str {
		NAME
	}

	fn input_type(&self) -> &str {
		&self.input_type
	}

	fn possible_outputs(&self) -> &[OutputDeclaration] {
		self.table.entries()
	}

	/// The settings string becomes the input type, unvalidated.
	fn initialize_from_settings(&mut self, settings: &str) -> Result<()> {
		if self.prepared {
			return Err(DissectError::AlreadyPrepared { dissector: NAME });
		}
		self.input_type = settings.to_owned();
		Ok(())
	}

	fn prepare_for_dissect(&self, input_name: &str, output_name: &str) -> Option<Casts> {
		self.table.lookup(extract_field_name(input_name, output_name)).map(|decl| decl.casts)
	}

	fn prepare_for_run(&mut self) {
		self.prepared = true;
	}

	fn dissect(&self, record: &mut dyn Record, input_name: &str) -> Result<()> {
		match record.value_as_text(&self.input_type, input_name) {
			Some(raw) if !raw.is_empty() => {
				tracing::trace!(dissector = NAME, input_name, len = raw.len(), "declarative dissector emits nothing");
			}
			_ => tracing::debug!(dissector = NAME, input_name, "empty input, nothing to dissect"),
		}
		Ok(())
	}

	fn new_instance(&self) -> Self {
		Self {
			input_type: self.input_type.clone(),
			table: Arc::clone(&self.table),
			prepared: false,
		}
	}
}
