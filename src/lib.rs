//! `application/x-www-form-urlencoded` codec and query-string parser.
//!
//! ```
//! let params = urlform::parse_query_string("q=caf%C3%A9&tag=a&tag=b");
//! assert_eq!(params.get("q"), Some("café"));
//! assert_eq!(params.get_all("tag"), ["a", "b"]);
//!
//! assert_eq!(urlform::encode("a b&c").unwrap(), "a+b%26c");
//! ```

pub mod charset;
pub mod codec;
pub mod config;
pub mod error;
pub mod query;
pub mod utils;

pub use charset::CodePointEncodingTable;
pub use codec::{default_codec, DecodeMode, UrlCodec};
pub use config::{CodecConfig, CodecSettings};
pub use error::{CodecError, ConfigError, MalformedKind};
pub use query::{ParameterMap, QueryStringParser};

/// Encode with the shared UTF-8 codec.
pub fn encode(text: &str) -> Result<String, CodecError> {
    default_codec().encode(text)
}

/// Decode leniently with the shared UTF-8 codec.
pub fn decode(text: &str) -> Result<String, CodecError> {
    default_codec().decode(text)
}

/// Parse with the shared lenient UTF-8 codec; malformed tokens are dropped.
pub fn parse_query_string(query: &str) -> ParameterMap {
    default_codec().parse_query(query)
}
