#![allow(missing_docs)]

use clap::{CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::EnvFilter;

mod cmd;

use cmd::request::{Config, Request};

/// Build a request URL from flags generated out of a configuration record.
#[derive(Parser)]
#[command(name = "simplecurl", about = "Build a GET request from flags bound to a configuration record")]
struct Cli {
	/// Print compact JSON instead of pretty-printed JSON.
	#[arg(long)]
	compact: bool,
	/// Also print the full configuration record.
	#[arg(long = "show-config")]
	show_config: bool,
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let mut config = Config::default();
	let values = jsonflag::recursive(&mut config, &[]);

	let matches = cmd::flags::register(Cli::command(), &values).get_matches();
	let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
	cmd::flags::apply(&matches, &values)?;
	drop(values);

	let request = Request::from_config(&config);
	let output = if cli.show_config {
		serde_json::json!({ "request": request, "config": config })
	} else {
		serde_json::to_value(&request)?
	};
	let text = if cli.compact { serde_json::to_string(&output)? } else { serde_json::to_string_pretty(&output)? };
	println!("{text}");
	Ok(())
}
