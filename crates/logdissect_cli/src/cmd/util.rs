use std::path::{Path, PathBuf};
use std::sync::Arc;

use logdissect::dissect::{Casts, Dissect, Dissector, OutputTable, ReferenceClock, SetCookieDissector};
use serde::{Deserialize, Serialize};

use crate::cmd::Result;

/// Dissector variants selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DissectorKind {
	/// `Set-Cookie` header decomposer.
	SetCookie,
	/// Declarative dissector over the built-in or a `--table` output table.
	Dummy,
}

/// Arguments shared by every command that builds a dissector.
#[derive(Debug, clap::Args)]
pub struct DissectorArgs {
	/// Dissector to run.
	#[arg(value_enum)]
	pub kind: DissectorKind,
	/// Settings string handed to the dissector once before the run.
	#[arg(long)]
	pub settings: Option<String>,
	/// JSON output table (`{"TYPE:name": ["STRING", ...]}`) for `dummy`.
	#[arg(long)]
	pub table: Option<PathBuf>,
	/// Fixed reference time in seconds since the epoch for `set-cookie`.
	#[arg(long, allow_hyphen_values = true)]
	pub now: Option<i64>,
}

/// Build, configure, and prepare the selected dissector.
pub(crate) fn build_dissector(args: &DissectorArgs) -> Result<Dissector> {
	let mut dissector = match args.kind {
		DissectorKind::SetCookie => {
			if args.table.is_some() {
				tracing::warn!("--table only applies to the dummy dissector");
			}
			let clock = args.now.map_or(ReferenceClock::System, ReferenceClock::Fixed);
			Dissector::from(SetCookieDissector::new().with_clock(clock))
		}
		DissectorKind::Dummy => {
			if args.now.is_some() {
				tracing::warn!("--now only applies to the set-cookie dissector");
			}
			let table = match &args.table {
				Some(path) => Arc::new(load_table(path)?),
				None => OutputTable::ultimate(),
			};
			Dissector::declarative(table)
		}
	};

	if let Some(settings) = args.settings.as_deref() {
		dissector.initialize_from_settings(settings)?;
	}
	dissector.prepare_for_run();
	tracing::debug!(dissector = dissector.name(), input_type = dissector.input_type(), "dissector ready");
	Ok(dissector)
}

/// Cast list of one table entry: either a single set name or member names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CastSpec {
	One(String),
	Many(Vec<String>),
}

/// Read an output table from a JSON object, keeping file order.
pub(crate) fn load_table(path: &Path) -> Result<OutputTable> {
	let bytes = std::fs::read(path).map_err(|err| format!("reading {}: {err}", path.display()))?;
	parse_table(&bytes).map_err(|err| format!("table {}: {err}", path.display()).into())
}

pub(crate) fn parse_table(bytes: &[u8]) -> Result<OutputTable> {
	let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(bytes)?;
	let mut entries = Vec::with_capacity(object.len());
	for (name, spec) in object {
		let casts = match serde_json::from_value::<CastSpec>(spec)? {
			CastSpec::One(item) => Casts::from_names([item.as_str()])?,
			CastSpec::Many(items) => Casts::from_names(items.iter().map(String::as_str))?,
		};
		entries.push((name, casts));
	}
	Ok(OutputTable::build(entries.iter().map(|(name, casts)| (name.as_str(), *casts)))?)
}

/// Cast names in fixed order.
pub(crate) fn cast_names(casts: Casts) -> Vec<&'static str> {
	casts.iter().map(|cast| cast.as_str()).collect()
}

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

#[cfg(test)]
mod tests;
