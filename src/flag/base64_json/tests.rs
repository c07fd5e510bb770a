mod records {
	use serde::{Deserialize, Serialize};

	use crate::flag::{Value, name, recursive};

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct Upload {
		#[serde(with = "crate::flag::base64_json")]
		pub body: Vec<u8>,
		#[serde(default, with = "crate::flag::base64_json::option")]
		pub digest: Option<Vec<u8>>,
	}

	#[derive(Debug, Default, PartialEq, Serialize, Deserialize, crate::Reflect)]
	struct PlainUpload {
		pub body: Vec<u8>,
	}

	fn find<'v, 'a>(values: &'v [Value<'a>], path: &str) -> &'v Value<'a> {
		values.iter().find(|value| name(value.path()) == path).expect("node exists")
	}

	#[test]
	fn record_render_matches_its_byte_fields() {
		let mut upload = Upload::default();
		let values = recursive(&mut upload, &[]);
		find(&values, "body").set("Ag==").expect("valid base64");
		assert_eq!(find(&values, "body").string(), "Ag==");
		assert_eq!(find(&values, "input").string(), r#"{"body":"Ag==","digest":null}"#);

		find(&values, "digest").set("AQI=").expect("valid base64");
		assert_eq!(find(&values, "input").string(), r#"{"body":"Ag==","digest":"AQI="}"#);
	}

	#[test]
	fn record_set_accepts_the_rendered_form() {
		let mut upload = Upload::default();
		{
			let values = recursive(&mut upload, &[]);
			find(&values, "input").set(r#"{"body":"AQI="}"#).expect("base64 body decodes");
			assert_eq!(find(&values, "body").string(), "AQI=");
			assert!(find(&values, "input").set(r#"{"body":"%%%"}"#).expect_err("bad base64").is_format());
		}
		assert_eq!(upload, Upload { body: vec![1, 2], digest: None });
	}

	#[test]
	fn without_the_adapter_records_use_number_arrays() {
		let mut plain = PlainUpload::default();
		let values = recursive(&mut plain, &[]);
		find(&values, "body").set("Ag==").expect("valid base64");
		assert_eq!(find(&values, "body").string(), "Ag==");
		assert_eq!(find(&values, "input").string(), r#"{"body":[2]}"#);
	}
}
