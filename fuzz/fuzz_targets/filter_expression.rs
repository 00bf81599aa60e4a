#![no_main]

use insight_blueprint::{
	models::{EventFilterField, Filters, QueryOptions},
	services::source::encode_query,
	utils::parsing::parse_filter_expression,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let Ok(expr) = std::str::from_utf8(data) else {
		return;
	};

	if let Ok((field, filter)) = parse_filter_expression::<EventFilterField>(expr) {
		let options = QueryOptions::new().filters(Filters::new().with(field, filter));
		let params = encode_query(&options);
		assert_eq!(params.len(), 1);
		let _ = params.to_query_string();
	}
});
