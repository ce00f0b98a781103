#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cmd;

#[derive(Parser)]
#[command(name = "logdissect", about = "Run typed-field log dissectors on raw values")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List the input type and every declared output.
	Outputs(cmd::outputs::Args),
	/// Show the casts a dissector supports for one output.
	Negotiate(cmd::negotiate::Args),
	/// Dissect raw values, one record per value.
	Dissect(cmd::dissect::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Outputs(args) => cmd::outputs::run(args),
		Commands::Negotiate(args) => cmd::negotiate::run(args),
		Commands::Dissect(args) => cmd::dissect::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
