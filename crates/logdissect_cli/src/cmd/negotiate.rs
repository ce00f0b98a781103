use logdissect::dissect::Dissect;
use serde::Serialize;

use crate::cmd::Result;
use crate::cmd::util::{DissectorArgs, build_dissector, cast_names, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub dissector: DissectorArgs,
	/// Output name, bare (`value`) or below the input (`cookie.value`).
	pub output: String,
	#[arg(long, default_value = "input")]
	pub input_name: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct NegotiateJson<'a> {
	dissector: &'static str,
	input_name: &'a str,
	output: &'a str,
	casts: Vec<&'static str>,
}

/// Print the casts the dissector supports for one output.
pub fn run(args: Args) -> Result<()> {
	let Args {
		dissector,
		output,
		input_name,
		json,
	} = args;
	let dissector = build_dissector(&dissector)?;

	let casts = dissector
		.prepare_for_dissect(&input_name, &output)
		.ok_or_else(|| format!("{} does not produce output {output:?}", dissector.name()))?;

	if json {
		return emit_json(&NegotiateJson {
			dissector: dissector.name(),
			input_name: &input_name,
			output: &output,
			casts: cast_names(casts),
		});
	}

	println!("{output}: {casts}");
	Ok(())
}
