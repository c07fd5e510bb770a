mod nodes {
	use serde::{Deserialize, Serialize};

	use crate::flag::{FlagError, Value, recursive};

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct Inner {
		pub count: i32,
		pub label: Option<String>,
	}

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct Outer {
		pub name: String,
		pub inner: Option<Box<Inner>>,
		pub tags: Vec<String>,
	}

	fn find<'v, 'a>(values: &'v [Value<'a>], path: &str) -> &'v Value<'a> {
		values.iter().find(|value| crate::flag::name(value.path()) == path).expect("node exists")
	}

	#[test]
	fn set_writes_through_to_root() {
		let mut outer = Outer::default();
		{
			let values = recursive(&mut outer, &[]);
			find(&values, "name").set("alpha").expect("string sets");
			find(&values, "tags").set("x").expect("first tag");
			find(&values, "tags").set("y").expect("second tag");
			assert_eq!(find(&values, "name").string(), "alpha");
			assert_eq!(find(&values, "tags").string(), r#"["x","y"]"#);
		}
		assert_eq!(outer.name, "alpha");
		assert_eq!(outer.tags, vec!["x".to_owned(), "y".to_owned()]);
	}

	#[test]
	fn string_does_not_allocate_through_empty_pointers() {
		let mut outer = Outer::default();
		{
			let values = recursive(&mut outer, &[]);
			assert_eq!(find(&values, "inner.count").string(), "");
			assert_eq!(find(&values, "inner").string(), "");
		}
		assert!(outer.inner.is_none());
	}

	#[test]
	fn set_allocates_parent_records() {
		let mut outer = Outer::default();
		{
			let values = recursive(&mut outer, &[]);
			find(&values, "inner.count").set("3").expect("count sets");
			assert_eq!(find(&values, "inner").string(), r#"{"count":3,"label":null}"#);
		}
		assert_eq!(outer.inner.as_ref().map(|inner| inner.count), Some(3));
		assert_eq!(outer.inner.as_ref().and_then(|inner| inner.label.clone()), None);
	}

	#[test]
	fn failed_set_keeps_value_and_optional_leaf() {
		let mut outer = Outer::default();
		{
			let values = recursive(&mut outer, &[]);
			let count = find(&values, "inner.count");
			count.set("7").expect("count sets");
			let err = count.set("seven").expect_err("not a number");
			assert!(err.is_format());
			assert_eq!(count.string(), "7");

			let inner = find(&values, "inner");
			assert!(inner.set("{").expect_err("truncated object").is_format());
		}
		assert_eq!(outer.inner.as_ref().map(|inner| inner.count), Some(7));

		let mut empty: Option<i32> = None;
		{
			let node = crate::flag::new(&mut empty).expect("optional int binds");
			assert!(node.set("x").is_err());
		}
		assert_eq!(empty, None);
	}

	#[test]
	fn with_gives_typed_access() {
		let mut outer = Outer::default();
		let values = recursive(&mut outer, &[]);
		let count = find(&values, "inner.count");
		count.with(|value: &mut i32| *value = 11).expect("i32 position");
		assert_eq!(count.string(), "11");
		assert!(count.with(|_: &mut String| ()).is_none());
	}

	#[test]
	fn get_allocates_an_empty_optional_leaf() {
		let mut outer = Outer::default();
		{
			let values = recursive(&mut outer, &[]);
			let label = find(&values, "inner.label");
			let slot = label.get().expect("position reachable");
			assert!(slot.as_any().downcast_ref::<Option<String>>().is_some_and(Option::is_some));
		}
		let inner = outer.inner.expect("parent allocated");
		assert_eq!(inner.label, Some(String::new()));
		assert_eq!(inner.count, 0);
	}

	#[test]
	fn get_allocates_an_empty_optional_root() {
		let mut root: Option<Inner> = None;
		{
			let node = crate::flag::new(&mut root).expect("optional record binds");
			assert_eq!(node.type_name(), "JSON object");
			assert!(node.get().is_some());
		}
		assert_eq!(root, Some(Inner::default()));
	}

	#[test]
	fn get_is_none_while_root_is_borrowed() {
		let mut outer = Outer::default();
		let values = recursive(&mut outer, &[]);
		let name = find(&values, "name");
		let guard = name.get().expect("root available");
		assert!(find(&values, "tags").get().is_none());
		assert!(matches!(find(&values, "tags").set("x"), Err(FlagError::Borrowed)));
		drop(guard);
		find(&values, "tags").set("x").expect("root released");
	}

	#[test]
	fn detached_node_is_inert() {
		let mut node = Value::default();
		assert_eq!(node.string(), "");
		assert_eq!(node.type_name(), "");
		assert!(node.path().is_empty());
		assert!(node.get().is_none());
		node.set("anything").expect("ignored");
		node.set_encoder(|_| Ok("never".to_owned()));
		assert_eq!(node.to_string(), "");
	}
}

mod overrides {
	use serde::{Deserialize, Serialize};

	use crate::flag::{BoxError, FlagError, Reflect, recursive};

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct Settings {
		pub level: Option<u8>,
	}

	fn level_name(value: &dyn Reflect) -> Result<String, BoxError> {
		let level = value.as_any().downcast_ref::<Option<u8>>().ok_or("unexpected type")?;
		Ok(match level {
			None => "unset".to_owned(),
			Some(0) => "quiet".to_owned(),
			Some(_) => "loud".to_owned(),
		})
	}

	fn parse_level(text: &str, target: &mut dyn Reflect) -> Result<(), BoxError> {
		let level = target.as_any_mut().downcast_mut::<u8>().ok_or("unexpected type")?;
		*level = match text {
			"quiet" => 0,
			"loud" => 9,
			other => return Err(format!("unknown level {other}").into()),
		};
		Ok(())
	}

	#[test]
	fn encoder_sees_position_and_decoder_sees_pointee() {
		let mut settings = Settings::default();
		{
			let mut values = recursive(&mut settings, &[]);
			let level = values.iter_mut().find(|value| !value.path().is_empty()).expect("level node");
			level.set_encoder(level_name);
			level.set_decoder(parse_level);
			assert_eq!(level.string(), "unset");
			level.set("loud").expect("decoder accepts");
			assert_eq!(level.string(), "loud");

			let err = level.set("medium").expect_err("decoder rejects");
			assert!(matches!(err, FlagError::Decode(_)));
			assert_eq!(err.to_string(), "unknown level medium");
		}
		assert_eq!(settings.level, Some(9));
	}

	#[test]
	fn encoder_error_renders_empty() {
		let mut settings = Settings { level: Some(1) };
		let mut values = recursive(&mut settings, &[]);
		let level = values.iter_mut().find(|value| !value.path().is_empty()).expect("level node");
		assert_eq!(level.string(), "1");
		level.set_encoder(|_| Err("broken".into()));
		assert_eq!(level.string(), "");
	}
}
