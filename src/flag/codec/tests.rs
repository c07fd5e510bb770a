mod selection {
	use std::collections::HashMap;

	use crate::flag::{Codec, Reflect, ScalarKind};

	#[test]
	fn pointers_are_looked_through() {
		assert_eq!(Codec::for_shape(&<Option<Box<i16>>>::shape()), Some(Codec::Scalar(ScalarKind::I16)));
		assert_eq!(Codec::for_shape(&<Option<Vec<u8>>>::shape()), Some(Codec::Bytes));
	}

	#[test]
	fn byte_lists_need_direct_u8_elements() {
		assert_eq!(Codec::for_shape(&<Vec<u8>>::shape()), Some(Codec::Bytes));
		assert_eq!(Codec::for_shape(&<Vec<Option<u8>>>::shape()), Some(Codec::ScalarList(ScalarKind::U8)));
		assert_eq!(Codec::for_shape(&<Vec<Vec<u8>>>::shape()), Some(Codec::BytesList));
		assert_eq!(Codec::for_shape(&<Vec<Option<Vec<u8>>>>::shape()), Some(Codec::BytesList));
		assert_eq!(Codec::for_shape(&<Vec<Vec<Option<u8>>>>::shape()), Some(Codec::ListList));
	}

	#[test]
	fn containers_of_containers() {
		assert_eq!(Codec::for_shape(&<Vec<Vec<String>>>::shape()), Some(Codec::ListList));
		assert_eq!(Codec::for_shape(&<Vec<HashMap<String, i32>>>::shape()), Some(Codec::MapList));
		assert_eq!(Codec::for_shape(&<HashMap<String, i32>>::shape()), Some(Codec::Map));
	}

	#[test]
	fn opaque_kinds_have_no_codec() {
		assert_eq!(Codec::for_shape(&char::shape()), None);
		assert_eq!(Codec::for_shape(&<Option<char>>::shape()), None);
		assert_eq!(Codec::for_shape(&<Vec<char>>::shape()), None);
	}

	#[test]
	fn labels() {
		assert_eq!(Codec::Bytes.label(), "base64");
		assert_eq!(Codec::BytesList.label(), "base64 (JSON list)");
		assert_eq!(Codec::ScalarList(ScalarKind::String).label(), "string (JSON list)");
		assert_eq!(Codec::ListList.label(), "JSON list");
		assert_eq!(Codec::RecordList.label(), "JSON object (JSON list)");
		assert_eq!(Codec::Map.label(), "JSON object");
		assert!(Codec::Scalar(ScalarKind::Bool).is_bool());
		assert!(!Codec::ScalarList(ScalarKind::Bool).is_bool());
	}
}

mod lists {
	use num_complex::Complex64;

	use crate::flag::{Codec, ScalarKind};

	#[test]
	fn scalar_list_appends_per_set() {
		let codec = Codec::ScalarList(ScalarKind::String);
		let mut list: Vec<String> = Vec::new();
		assert_eq!(codec.render(&list), "");
		codec.parse(&mut list, "a").expect("first element");
		codec.parse(&mut list, "b").expect("second element");
		assert_eq!(list, vec!["a".to_owned(), "b".to_owned()]);
		assert_eq!(codec.render(&list), r#"["a","b"]"#);
	}

	#[test]
	fn failed_element_is_not_appended() {
		let codec = Codec::ScalarList(ScalarKind::I8);
		let mut list: Vec<i8> = vec![1];
		assert!(codec.parse(&mut list, "300").expect_err("too wide").is_overflow());
		assert_eq!(list, vec![1]);
	}

	#[test]
	fn pointer_elements_are_allocated() {
		let codec = Codec::ScalarList(ScalarKind::I32);
		let mut list: Vec<Option<i32>> = Vec::new();
		codec.parse(&mut list, "4").expect("element parses");
		assert_eq!(list, vec![Some(4)]);
		assert_eq!(codec.render(&list), "[4]");
	}

	#[test]
	fn complex_lists_render_as_strings() {
		let codec = Codec::ScalarList(ScalarKind::Complex64);
		let mut list: Vec<Complex64> = Vec::new();
		codec.parse(&mut list, "1+2i").expect("element parses");
		codec.parse(&mut list, "").expect("empty is zero");
		assert_eq!(codec.render(&list), r#"["1+2i","0+0i"]"#);
	}

	#[test]
	fn bytes_lists_use_base64_elements() {
		let codec = Codec::BytesList;
		let mut list: Vec<Vec<u8>> = Vec::new();
		codec.parse(&mut list, "AQI=").expect("base64 decodes");
		assert_eq!(list, vec![vec![1, 2]]);
		assert_eq!(codec.render(&list), r#"["AQI="]"#);
		assert!(codec.parse(&mut list, "!!").expect_err("bad base64").is_format());
		assert_eq!(list.len(), 1);
	}

	#[test]
	fn nested_lists_decode_json_elements() {
		let codec = Codec::ListList;
		let mut list: Vec<Vec<i32>> = Vec::new();
		codec.parse(&mut list, "[1,2]").expect("json element");
		codec.parse(&mut list, "[]").expect("empty json element");
		assert_eq!(list, vec![vec![1, 2], vec![]]);
		assert_eq!(codec.render(&list), "[[1,2],[]]");
	}
}

mod bytes_maps_records {
	use std::collections::BTreeMap;

	use serde::{Deserialize, Serialize};

	use crate::flag::Codec;

	#[test]
	fn bytes_replace_and_render_base64() {
		let mut bytes = vec![9_u8];
		Codec::Bytes.parse(&mut bytes, "aGk=").expect("base64 decodes");
		assert_eq!(bytes, b"hi".to_vec());
		assert_eq!(Codec::Bytes.render(&bytes), "aGk=");
		assert!(Codec::Bytes.parse(&mut bytes, "@").is_err());
		assert_eq!(bytes, b"hi".to_vec());
		assert_eq!(Codec::Bytes.render(&Vec::<u8>::new()), "");
	}

	#[test]
	fn maps_are_replaced_wholesale() {
		let mut map = BTreeMap::from([("a".to_owned(), 1_i32)]);
		Codec::Map.parse(&mut map, r#"{"b":2}"#).expect("object decodes");
		assert_eq!(map, BTreeMap::from([("b".to_owned(), 2)]));
		assert_eq!(Codec::Map.render(&map), r#"{"b":2}"#);
		assert_eq!(Codec::Map.render(&BTreeMap::<String, i32>::new()), "");
	}

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct Point {
		pub x: i32,
		pub y: i32,
	}

	#[test]
	fn records_decode_json_objects() {
		let mut point = Point::default();
		Codec::Record.parse(&mut point, r#"{"x":1,"y":2}"#).expect("object decodes");
		assert_eq!(point, Point { x: 1, y: 2 });
		assert_eq!(Codec::Record.render(&point), r#"{"x":1,"y":2}"#);
		assert!(Codec::Record.parse(&mut point, r#"{"x":"#).is_err());
		assert_eq!(point, Point { x: 1, y: 2 });
	}

	#[derive(Debug, Default, Serialize, Deserialize, crate::Reflect)]
	struct Empty {}

	#[test]
	fn degenerate_record_json_renders_empty() {
		assert_eq!(Codec::Record.render(&Empty {}), "");
	}
}
