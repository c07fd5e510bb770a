mod paths {
	use rstest::rstest;

	use crate::flag::{FieldInfo, json_name, name, usage};

	fn field(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> FieldInfo {
		FieldInfo::named(name).with_tags(tags)
	}

	#[test]
	fn name_joins_identifiers() {
		assert_eq!(name(&[]), "input");
		assert_eq!(name(&[field("Foo", &[])]), "Foo");
		assert_eq!(name(&[field("Foo", &[]), field("Bar", &[("json", "bar")])]), "Foo.Bar");
	}

	#[rstest]
	#[case::empty_path(vec![], "input")]
	#[case::tag(vec![field("Foo", &[("json", "foo")])], "foo")]
	#[case::tag_with_options(vec![field("Foo", &[("json", "foo,omitempty")])], "foo")]
	#[case::tag_skips_field(vec![field("Foo", &[("json", "-")])], "input")]
	#[case::tag_empty_name(vec![field("Foo", &[("json", "")])], "Foo")]
	#[case::missing_tag(vec![field("Foo", &[])], "Foo")]
	#[case::nested_tags(vec![field("Foo", &[("json", "foo")]), field("Bar", &[("json", "bar,omitempty")])], "foo.bar")]
	#[case::nested_skip(vec![field("Foo", &[("json", "foo")]), field("Bar", &[("json", "-")])], "foo")]
	#[case::skipped_parent(vec![field("Foo", &[("json", "-")]), field("Bar", &[("json", "bar")])], "bar")]
	#[case::nested_missing_tag(vec![field("Foo", &[("json", "foo")]), field("Bar", &[])], "foo.Bar")]
	fn json_name_follows_json_tags(#[case] path: Vec<FieldInfo>, #[case] expected: &str) {
		assert_eq!(json_name(&path), expected);
	}

	#[rstest]
	#[case::empty_path(vec![], "")]
	#[case::no_tag(vec![field("Foo", &[])], "")]
	#[case::usage(vec![field("Foo", &[("usage", "usageString")])], "usageString")]
	#[case::description(vec![field("Foo", &[("description", "descriptionString")])], "descriptionString")]
	#[case::desc(vec![field("Foo", &[("desc", "descString")])], "descString")]
	#[case::usage_wins(vec![field("Foo", &[("desc", "descString"), ("usage", "usageString")])], "usageString")]
	#[case::only_last_field(vec![field("Foo", &[("usage", "fooUsage")]), field("Bar", &[])], "")]
	#[case::last_field_usage(vec![field("Foo", &[("usage", "fooUsage")]), field("Bar", &[("usage", "barUsage")])], "barUsage")]
	fn usage_reads_last_field(#[case] path: Vec<FieldInfo>, #[case] expected: &str) {
		assert_eq!(usage(&path), expected);
	}
}

mod cases {
	use rstest::rstest;

	use crate::flag::{dash_case, json_camel_case, snake_case};

	#[rstest]
	#[case("", "")]
	#[case("Foo", "foo")]
	#[case("FooBar", "fooBar")]
	#[case("Foo.Bar", "foo.bar")]
	#[case("FooBar.FooBaz", "fooBar.fooBaz")]
	fn camel(#[case] given: &str, #[case] expected: &str) {
		assert_eq!(json_camel_case(given), expected);
	}

	#[rstest]
	#[case("", "")]
	#[case("Foo", "foo")]
	#[case("FooBar", "foo_bar")]
	#[case("Foo.Bar", "foo.bar")]
	#[case("FooBar.FooBaz", "foo_bar.foo_baz")]
	#[case("HTTPServer", "httpserver")]
	#[case("already_snake", "already_snake")]
	fn snake(#[case] given: &str, #[case] expected: &str) {
		assert_eq!(snake_case(given), expected);
	}

	#[rstest]
	#[case("", "")]
	#[case("Foo", "foo")]
	#[case("FooBar", "foo-bar")]
	#[case("Foo.Bar", "foo.bar")]
	#[case("FooBar.FooBaz", "foo-bar.foo-baz")]
	#[case("maxTime", "max-time")]
	fn dash(#[case] given: &str, #[case] expected: &str) {
		assert_eq!(dash_case(given), expected);
	}
}
