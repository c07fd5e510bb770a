use crate::flag::FieldInfo;

const ROOT_NAME: &str = "input";

/// Dot-joined field names along `path`; `input` for the root.
pub fn name(path: &[FieldInfo]) -> String {
	if path.is_empty() {
		return ROOT_NAME.to_owned();
	}
	path.iter().map(|field| field.name).collect::<Vec<_>>().join(".")
}

/// Dot-joined JSON names along `path`, as serde would name the fields.
///
/// A field whose JSON name is `-` contributes no segment. Falls back to
/// `input` when nothing is left.
pub fn json_name(path: &[FieldInfo]) -> String {
	let joined = path.iter().map(json_field_name).filter(|segment| !segment.is_empty()).collect::<Vec<_>>().join(".");
	if joined.is_empty() { ROOT_NAME.to_owned() } else { joined }
}

fn json_field_name(field: &FieldInfo) -> &'static str {
	let Some(tag) = field.tags.lookup("json") else {
		return field.name;
	};
	match tag.split(',').next().unwrap_or_default() {
		"" => field.name,
		"-" => "",
		renamed => renamed,
	}
}

/// Help text of the last field on `path`: `usage`, then `description`, then `desc`.
pub fn usage(path: &[FieldInfo]) -> &'static str {
	let Some(last) = path.last() else {
		return "";
	};
	["usage", "description", "desc"]
		.into_iter()
		.map(|key| last.tags.get(key))
		.find(|text| !text.is_empty())
		.unwrap_or("")
}

/// Lower-case the first character of every dot-separated segment: `Foo.FooBar` becomes `foo.fooBar`.
pub fn json_camel_case(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut need_lower = true;
	for ch in text.chars() {
		if ch == '.' {
			out.push(ch);
			need_lower = true;
			continue;
		}
		if need_lower {
			out.extend(ch.to_lowercase());
			need_lower = false;
		} else {
			out.push(ch);
		}
	}
	out
}

/// `Foo.FooBar` becomes `foo.foo_bar`.
pub fn snake_case(text: &str) -> String {
	separate_words(text, '_')
}

/// `Foo.FooBar` becomes `foo.foo-bar`.
pub fn dash_case(text: &str) -> String {
	separate_words(text, '-')
}

/// Lower-case everything and put `separator` before an upper-case character
/// that sits between two lower-case ones. Acronyms therefore stay glued.
fn separate_words(text: &str, separator: char) -> String {
	let chars: Vec<char> = text.chars().collect();
	let mut out = String::with_capacity(text.len() + 4);
	for (pos, ch) in chars.iter().enumerate() {
		if ch.is_uppercase() {
			let after_lower = pos > 0 && chars[pos - 1].is_lowercase();
			let before_lower = chars.get(pos + 1).is_some_and(|next| next.is_lowercase());
			if after_lower && before_lower {
				out.push(separator);
			}
			out.extend(ch.to_lowercase());
		} else {
			out.push(*ch);
		}
	}
	out
}

#[cfg(test)]
mod tests;
