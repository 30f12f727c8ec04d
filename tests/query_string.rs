use serde_json::json;
use urlform::{parse_query_string, ParameterMap};

fn map(pairs: &[(&str, &str)]) -> ParameterMap {
    pairs.iter().copied().collect()
}

#[test]
fn empty_query_string_yields_empty_map() {
    assert_eq!(parse_query_string(""), ParameterMap::new());
}

#[test]
fn name_without_value_gets_empty_string() {
    assert_eq!(parse_query_string("f"), map(&[("f", "")]));
    assert_eq!(parse_query_string("f="), map(&[("f", "")]));
}

#[test]
fn repeated_name_preserves_order() {
    let params = parse_query_string("f=b&f=bar2");
    assert_eq!(params, map(&[("f", "b"), ("f", "bar2")]));
    assert_eq!(params.get_all("f"), ["b", "bar2"]);
}

#[test]
fn incomplete_escape_drops_only_the_malformed_pair() {
    assert_eq!(parse_query_string("foo=%2"), ParameterMap::new());
    assert_eq!(parse_query_string("foo=bar&foo=%2"), map(&[("foo", "bar")]));
}

#[test]
fn leading_equals_token_is_discarded() {
    assert_eq!(parse_query_string("=x=y&f"), map(&[("f", "")]));
}

#[test]
fn embedded_equals_is_part_of_value() {
    assert_eq!(parse_query_string("f=b=j"), map(&[("f", "b=j")]));
}

#[test]
fn plus_decodes_to_space() {
    assert_eq!(parse_query_string("foo=+"), map(&[("foo", " ")]));
}

#[test]
fn parsed_map_serializes_to_json() {
    let params = parse_query_string("q=rust+lang&tag=a&tag=b&empty");
    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!({"empty": [""], "q": ["rust lang"], "tag": ["a", "b"]})
    );
}

#[test]
fn formatted_query_parses_back_to_the_same_map() {
    let codec = urlform::default_codec();
    let original = parse_query_string("a=1&b=x%26y&a=2&c&d=%E2%82%AC+%2B&e=f%3Dg");
    let formatted = codec.format_query(&original).unwrap();
    assert_eq!(formatted, "a=1&a=2&b=x%26y&c=&d=%E2%82%AC+%2B&e=f%3Dg");
    assert_eq!(parse_query_string(&formatted), original);
}

#[test]
fn agrees_with_serde_urlencoded_on_well_formed_input() {
    let queries = [
        "a=1&b=2",
        "name=J%C3%BCrgen+M%C3%BCller&city=K%C3%B6ln",
        "x=&y&z=%2B%26%3D",
        "emoji=%F0%9F%98%8A&emoji=%E2%9C%93",
        "k=v=w&&k=",
    ];

    for query in queries {
        let expected: ParameterMap = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(parse_query_string(query), expected, "query: {}", query);
    }
}
