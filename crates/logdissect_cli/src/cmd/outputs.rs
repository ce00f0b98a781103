use logdissect::dissect::Dissect;
use serde::Serialize;

use crate::cmd::Result;
use crate::cmd::util::{DissectorArgs, build_dissector, cast_names, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub dissector: DissectorArgs,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct OutputsJson {
	dissector: &'static str,
	input_type: String,
	outputs: Vec<OutputJson>,
}

#[derive(Serialize)]
struct OutputJson {
	name: String,
	r#type: String,
	field: String,
	casts: Vec<&'static str>,
}

/// Print the input type and every declared output with its casts.
pub fn run(args: Args) -> Result<()> {
	let Args { dissector, json } = args;
	let dissector = build_dissector(&dissector)?;

	if json {
		let payload = OutputsJson {
			dissector: dissector.name(),
			input_type: dissector.input_type().to_owned(),
			outputs: dissector
				.possible_outputs()
				.iter()
				.map(|decl| OutputJson {
					name: decl.qualified(),
					r#type: decl.type_tag.to_string(),
					field: decl.name.to_string(),
					casts: cast_names(decl.casts),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("dissector: {}", dissector.name());
	println!("input_type: {}", dissector.input_type());
	println!("outputs:");
	for decl in dissector.possible_outputs() {
		println!("  {decl} {}", decl.casts);
	}
	Ok(())
}
