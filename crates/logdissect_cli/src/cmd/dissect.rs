use logdissect::dissect::{Dissect, ParsedRecord};
use serde::Serialize;

use crate::cmd::Result;
use crate::cmd::util::{DissectorArgs, build_dissector, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub dissector: DissectorArgs,
	/// Name the raw values are stored under.
	#[arg(long, default_value = "input")]
	pub input_name: String,
	/// Raw values; each one is dissected as a separate record.
	#[arg(required = true, allow_hyphen_values = true)]
	pub values: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct DissectJson {
	dissector: &'static str,
	input_type: String,
	records: Vec<RecordJson>,
}

#[derive(Serialize)]
struct RecordJson {
	input: String,
	dissections: Vec<DissectionJson>,
	error: Option<String>,
}

#[derive(Serialize)]
struct DissectionJson {
	name: String,
	r#type: String,
	value: String,
}

/// Dissect every value as its own record.
///
/// A value that fails to dissect is reported and skipped; configuration
/// errors stop the run.
pub fn run(args: Args) -> Result<()> {
	let Args {
		dissector,
		input_name,
		values,
		json,
	} = args;
	let dissector = build_dissector(&dissector)?;

	let mut records = Vec::with_capacity(values.len());
	for (idx, value) in values.into_iter().enumerate() {
		let mut record = ParsedRecord::new().with_input(dissector.input_type(), &input_name, &value);
		let error = match dissector.dissect(&mut record, &input_name) {
			Ok(()) => None,
			Err(err) if err.is_recoverable() => {
				tracing::warn!(record = idx, error = %err, "skipping record");
				Some(err.to_string())
			}
			Err(err) => return Err(err.into()),
		};

		records.push(RecordJson {
			input: value,
			dissections: record
				.dissections()
				.iter()
				.map(|item| DissectionJson {
					name: item.qualified_name(),
					r#type: item.output_type.to_string(),
					value: item.value.as_text(),
				})
				.collect(),
			error,
		});
	}

	if json {
		return emit_json(&DissectJson {
			dissector: dissector.name(),
			input_type: dissector.input_type().to_owned(),
			records,
		});
	}

	for (idx, record) in records.iter().enumerate() {
		println!("record {idx}: {}", record.input);
		if let Some(error) = &record.error {
			println!("  error: {error}");
		}
		for item in &record.dissections {
			println!("  {} {} = {}", item.name, item.r#type, item.value);
		}
	}
	Ok(())
}
