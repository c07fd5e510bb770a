use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use jsonflag::{Value, dash_case, json_name, usage};
use tracing::debug;

use crate::cmd::{CliError, Result};

/// Long flag name for a node: its JSON path in dash case.
pub fn flag_name(value: &Value<'_>) -> String {
	dash_case(&json_name(value.path()))
}

fn arg_id(position: usize) -> String {
	format!("jsonflag-{position}")
}

/// Add one argument per node to `command`.
///
/// Booleans accept `--name` alone or `--name=<bool>`. Every other node takes
/// one value per occurrence and may repeat; lists grow by one element each time.
pub fn register(command: Command, values: &[Value<'_>]) -> Command {
	let args = values.iter().enumerate().map(|(position, value)| {
		let mut help = usage(value.path()).to_owned();
		let current = value.string();
		if !current.is_empty() {
			if !help.is_empty() {
				help.push(' ');
			}
			help.push_str(&format!("[default: {current}]"));
		}

		let arg = Arg::new(arg_id(position))
			.long(flag_name(value))
			.value_name(value.type_name())
			.help(help)
			.action(ArgAction::Append);
		if value.is_bool_flag() {
			arg.num_args(0..=1).require_equals(true).default_missing_value("true")
		} else {
			arg.num_args(1)
		}
	});
	command.args(args)
}

/// Apply every command-line occurrence to its node, in command-line order.
pub fn apply(matches: &ArgMatches, values: &[Value<'_>]) -> Result<()> {
	let mut occurrences: Vec<(usize, usize, &str)> = Vec::new();
	for position in 0..values.len() {
		let id = arg_id(position);
		if matches.value_source(&id) != Some(ValueSource::CommandLine) {
			continue;
		}
		let indices: Vec<usize> = matches.indices_of(&id).map(Iterator::collect).unwrap_or_default();
		let texts = matches.get_many::<String>(&id).into_iter().flatten();
		for (nth, text) in texts.enumerate() {
			let at = indices.get(nth).copied().unwrap_or(usize::MAX);
			occurrences.push((at, position, text.as_str()));
		}
	}
	occurrences.sort_by_key(|(at, _, _)| *at);

	for (_, position, text) in occurrences {
		let value = &values[position];
		debug!(flag = %flag_name(value), input = text, "applying flag");
		value.set(text).map_err(|source| CliError::InvalidFlag {
			flag: flag_name(value),
			input: text.to_owned(),
			source,
		})?;
	}
	Ok(())
}
