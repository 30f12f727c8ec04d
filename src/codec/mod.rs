mod decoder;
mod encoder;
mod hex_table;
mod trie;

use std::sync::OnceLock;

use encoding_rs::Encoding;

pub use decoder::{DecodeMode, Decoder};
pub use encoder::{is_literal_safe, Encoder};
pub use hex_table::HexPairTable;
pub use trie::{BranchId, DecodeTrie, Slot};

use crate::charset::CodePointEncodingTable;
use crate::config::CodecConfig;
use crate::error::{CodecError, ConfigError};
use crate::query::{ParameterMap, QueryStringParser};
use crate::utils::log;

/// All tables for one encoding, built once and read-only afterwards.
/// Share it freely between threads.
pub struct UrlCodec {
    table: CodePointEncodingTable,
    encoder: Encoder,
    decoder: Decoder,
}

impl UrlCodec {
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        let table = CodePointEncodingTable::build(config.encoding)?;
        Ok(Self::from_table(table, config.mode))
    }

    /// UTF-8, lenient decoding.
    pub fn with_defaults() -> Self {
        Self::from_table(CodePointEncodingTable::utf8(), DecodeMode::default())
    }

    fn from_table(table: CodePointEncodingTable, mode: DecodeMode) -> Self {
        let encoder = Encoder::build(&table);
        let decoder = Decoder::build(&table, mode);

        log::debug(
            "codec",
            &format!(
                "built {} tables: {} encodable scalars, {} trie branches",
                table.encoding().name(),
                table.encodable_count(),
                decoder.trie().branch_count()
            ),
        );
        if decoder.trie().collision_count() > 0 {
            log::debug(
                "codec",
                &format!(
                    "{} byte sequences share a trie path with a lower scalar",
                    decoder.trie().collision_count()
                ),
            );
        }

        Self {
            table,
            encoder,
            decoder,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.table.encoding()
    }

    pub fn mode(&self) -> DecodeMode {
        self.decoder.mode()
    }

    pub fn table(&self) -> &CodePointEncodingTable {
        &self.table
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn encode(&self, text: &str) -> Result<String, CodecError> {
        self.encoder.encode(text)
    }

    pub fn decode(&self, text: &str) -> Result<String, CodecError> {
        self.decoder.decode(text)
    }

    /// Parse a raw query string. Tokens that fail to decode are dropped, never
    /// reported.
    pub fn parse_query(&self, query: &str) -> ParameterMap {
        QueryStringParser::new(&self.decoder).parse(query)
    }

    /// Serialize a map back into `name=value&...` form.
    pub fn format_query(&self, params: &ParameterMap) -> Result<String, CodecError> {
        params.to_query_string(&self.encoder)
    }
}

/// Process-wide UTF-8 lenient codec, built on first use.
pub fn default_codec() -> &'static UrlCodec {
    static DEFAULT: OnceLock<UrlCodec> = OnceLock::new();
    DEFAULT.get_or_init(UrlCodec::with_defaults)
}
