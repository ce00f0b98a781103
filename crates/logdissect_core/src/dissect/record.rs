use std::collections::HashMap;
use std::fmt;

/// Value attached to one emitted sub-field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Textual value.
	Text(Box<str>),
	/// Integer value.
	Long(i64),
	/// Floating point value.
	Double(f64),
}

impl FieldValue {
	/// Render as text regardless of variant.
	pub fn as_text(&self) -> String {
		self.to_string()
	}

	/// Borrow the text of a [`FieldValue::Text`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Long(value) => write!(f, "{value}"),
			Self::Double(value) => write!(f, "{value}"),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.into())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value.into_boxed_str())
	}
}

/// Record context a dissector reads its input from and emits into.
///
/// The engine owns the record; dissectors borrow it for one call only.
pub trait Record {
	/// Current raw value of `input_name` when it was stored under `input_type`.
	fn value_as_text(&self, input_type: &str, input_name: &str) -> Option<String>;

	/// Store one sub-field found below `input_name`.
	fn emit(&mut self, input_name: &str, output_type: &str, output_name: &str, value: FieldValue);
}

/// One emitted `(name, type, value)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Dissection {
	/// Input field the value was found in.
	pub input_name: Box<str>,
	/// Declared type tag of the output.
	pub output_type: Box<str>,
	/// Output name below the input.
	pub output_name: Box<str>,
	/// Emitted value.
	pub value: FieldValue,
}

impl Dissection {
	/// Dotted path `input.output`.
	pub fn qualified_name(&self) -> String {
		if self.input_name.is_empty() {
			return self.output_name.to_string();
		}
		format!("{}.{}", self.input_name, self.output_name)
	}
}

/// In-memory [`Record`] holding raw inputs and emitted dissections in order.
#[derive(Debug, Default, Clone)]
pub struct ParsedRecord {
	inputs: HashMap<(Box<str>, Box<str>), Box<str>>,
	dissections: Vec<Dissection>,
}

impl ParsedRecord {
	/// Create an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`ParsedRecord::set_input`].
	pub fn with_input(mut self, input_type: &str, input_name: &str, value: &str) -> Self {
		self.set_input(input_type, input_name, value);
		self
	}

	/// Store a raw input value, replacing any previous one.
	pub fn set_input(&mut self, input_type: &str, input_name: &str, value: &str) {
		self.inputs.insert((input_type.into(), input_name.into()), value.into());
	}

	/// Emitted dissections in emission order.
	pub fn dissections(&self) -> &[Dissection] {
		&self.dissections
	}

	/// Drain emitted dissections, keeping inputs.
	pub fn take_dissections(&mut self) -> Vec<Dissection> {
		std::mem::take(&mut self.dissections)
	}

	/// First value emitted for `input_name`/`output_name`.
	pub fn first(&self, input_name: &str, output_name: &str) -> Option<&FieldValue> {
		self.dissections
			.iter()
			.find(|item| item.input_name.as_ref() == input_name && item.output_name.as_ref() == output_name)
			.map(|item| &item.value)
	}

	/// Every value emitted for `input_name`/`output_name`, in order.
	pub fn values<'a>(&'a self, input_name: &'a str, output_name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
		self.dissections
			.iter()
			.filter(move |item| item.input_name.as_ref() == input_name && item.output_name.as_ref() == output_name)
			.map(|item| &item.value)
	}
}

impl Record for ParsedRecord {
	fn value_as_text(&self, input_type: &str, input_name: &str) -> Option<String> {
		self.inputs
			.get(&(Box::<str>::from(input_type), Box::<str>::from(input_name)))
			.map(|value| value.to_string())
	}

	fn emit(&mut self, input_name: &str, output_type: &str, output_name: &str, value: FieldValue) {
		self.dissections.push(Dissection {
			input_name: input_name.into(),
			output_type: output_type.into(),
			output_name: output_name.into(),
			value,
		});
	}
}
