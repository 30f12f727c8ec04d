use std::iter;

use super::params::ParameterMap;
use crate::codec::Decoder;
use crate::utils::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Between tokens; initial state and the state after every `&`.
    Lookup,
    ParamName,
    ParamValue,
    /// Token started with `=`; skipped up to the next `&`.
    InvalidChunk,
}

/// Single pass over a query string, one character at a time.
///
/// A token whose name or value fails to decode is dropped and logged; the rest
/// of the string is still parsed.
pub struct QueryStringParser<'a> {
    decoder: &'a Decoder,
}

impl<'a> QueryStringParser<'a> {
    pub fn new(decoder: &'a Decoder) -> Self {
        Self { decoder }
    }

    pub fn parse(&self, query: &str) -> ParameterMap {
        let mut params = ParameterMap::new();
        let mut state = State::Lookup;
        let mut token_start = 0;
        let mut name = "";

        // A trailing '&' flushes the last token
        let chars = query.char_indices().chain(iter::once((query.len(), '&')));

        for (pos, ch) in chars {
            state = match (state, ch) {
                (State::Lookup, '&') => State::Lookup,
                (State::Lookup, '=') => {
                    token_start = pos;
                    State::InvalidChunk
                }
                (State::Lookup, _) => {
                    token_start = pos;
                    State::ParamName
                }

                (State::ParamName, '&') => {
                    self.append(&mut params, &query[token_start..pos], "");
                    State::Lookup
                }
                (State::ParamName, '=') => {
                    name = &query[token_start..pos];
                    token_start = pos + 1;
                    State::ParamValue
                }
                (State::ParamName, _) => State::ParamName,

                (State::ParamValue, '&') => {
                    self.append(&mut params, name, &query[token_start..pos]);
                    State::Lookup
                }
                (State::ParamValue, _) => State::ParamValue,

                (State::InvalidChunk, '&') => {
                    log::debug(
                        "query",
                        &format!("dropped token without a name: {:?}", &query[token_start..pos]),
                    );
                    State::Lookup
                }
                (State::InvalidChunk, _) => State::InvalidChunk,
            };
        }

        params
    }

    /// Decode and record one pair, or drop it if either side is malformed.
    fn append(&self, params: &mut ParameterMap, raw_name: &str, raw_value: &str) {
        let name = match self.decoder.decode(raw_name) {
            Ok(name) => name,
            Err(e) => {
                log::debug(
                    "query",
                    &format!("dropped parameter with undecodable name {:?}: {}", raw_name, e),
                );
                return;
            }
        };

        let value = match self.decoder.decode(raw_value) {
            Ok(value) => value,
            Err(e) => {
                log::debug(
                    "query",
                    &format!(
                        "dropped parameter {:?} with undecodable value {:?}: {}",
                        name, raw_value, e
                    ),
                );
                return;
            }
        };

        params.append(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::default_codec;

    fn parse(query: &str) -> ParameterMap {
        QueryStringParser::new(default_codec().decoder()).parse(query)
    }

    fn map(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_query_is_empty_map() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn bare_name_and_empty_value_are_equivalent() {
        assert_eq!(parse("f"), map(&[("f", "")]));
        assert_eq!(parse("f="), map(&[("f", "")]));
    }

    #[test]
    fn repeated_names_keep_value_order() {
        let params = parse("f=b&f=bar2");
        assert_eq!(params.get_all("f"), ["b", "bar2"]);
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(parse("&&a=1&&&b=2&"), map(&[("a", "1"), ("b", "2")]));
        assert!(parse("&&&").is_empty());
    }

    #[test]
    fn token_starting_with_equals_is_discarded() {
        assert_eq!(parse("=x=y&f"), map(&[("f", "")]));
        assert!(parse("=").is_empty());
        assert_eq!(parse("a=1&=2&b=3"), map(&[("a", "1"), ("b", "3")]));
    }

    #[test]
    fn equals_inside_value_is_literal() {
        assert_eq!(parse("f=b=j"), map(&[("f", "b=j")]));
        assert_eq!(parse("f=="), map(&[("f", "=")]));
    }

    #[test]
    fn undecodable_value_drops_only_that_pair() {
        assert!(parse("foo=%2").is_empty());
        assert_eq!(parse("foo=bar&foo=%2"), map(&[("foo", "bar")]));
        assert_eq!(parse("a=%zz&b=ok"), map(&[("b", "ok")]));
    }

    #[test]
    fn undecodable_name_drops_the_pair() {
        assert_eq!(parse("%C3=1&ok=2"), map(&[("ok", "2")]));
        assert_eq!(parse("%&x"), map(&[("x", "")]));
    }

    #[test]
    fn names_and_values_are_decoded() {
        let params = parse("first+name=J%C3%BCrgen&q=a%2Bb+c&path=/x/y");
        assert_eq!(params.get("first name"), Some("Jürgen"));
        assert_eq!(params.get("q"), Some("a+b c"));
        assert_eq!(params.get("path"), Some("/x/y"));
    }

    #[test]
    fn encoded_separators_do_not_split() {
        assert_eq!(parse("a%3Db=c%26d"), map(&[("a=b", "c&d")]));
    }

    #[test]
    fn strict_decoder_drops_pairs_with_raw_reserved_characters() {
        let codec = crate::UrlCodec::new(
            crate::CodecConfig::default().with_mode(crate::DecodeMode::Strict),
        )
        .unwrap();
        let params = codec.parse_query("path=/x&ok=1");
        assert_eq!(params, map(&[("ok", "1")]));
    }
}
