use encoding_rs::{EncoderResult, Encoding, UTF_8};

use crate::error::ConfigError;

/// Highest scalar value covered by the tables.
pub const MAX_SCALAR: u32 = 0x10FFFD;

/// Maps every scalar in `[0, MAX_SCALAR]` to the bytes a single-character
/// encode produces. An empty slice marks the scalar as unencodable.
///
/// All sequences live in one flat buffer; `offsets[c]..offsets[c + 1]` is the
/// slice for scalar `c`.
pub struct CodePointEncodingTable {
    encoding: &'static Encoding,
    offsets: Vec<u32>,
    bytes: Vec<u8>,
}

impl CodePointEncodingTable {
    pub fn build(encoding: &'static Encoding) -> Result<Self, ConfigError> {
        // UTF-16 variants and `replacement` report a different output encoding.
        if encoding.output_encoding() != encoding {
            return Err(ConfigError::UnsupportedEncoding(encoding.name()));
        }
        Ok(Self::fill(encoding))
    }

    pub fn utf8() -> Self {
        Self::fill(UTF_8)
    }

    fn fill(encoding: &'static Encoding) -> Self {
        let scalar_count = MAX_SCALAR as usize + 1;
        let mut offsets = Vec::with_capacity(scalar_count + 1);
        let mut bytes = Vec::with_capacity(scalar_count * 4);
        let mut scratch = Vec::new();

        offsets.push(0);
        for scalar in 0..=MAX_SCALAR {
            if let Some(ch) = char::from_u32(scalar).filter(|&ch| !is_private_use(ch)) {
                encode_scalar(encoding, ch, &mut scratch);
                bytes.extend_from_slice(&scratch);
            }
            offsets.push(bytes.len() as u32);
        }

        Self {
            encoding,
            offsets,
            bytes,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Bytes for a raw scalar value; empty for surrogates, private use and
    /// anything above `MAX_SCALAR`.
    pub fn bytes_for_scalar(&self, scalar: u32) -> &[u8] {
        if scalar > MAX_SCALAR {
            return &[];
        }
        let start = self.offsets[scalar as usize] as usize;
        let end = self.offsets[scalar as usize + 1] as usize;
        &self.bytes[start..end]
    }

    pub fn bytes_for(&self, ch: char) -> &[u8] {
        self.bytes_for_scalar(ch as u32)
    }

    pub fn is_encodable(&self, ch: char) -> bool {
        !self.bytes_for(ch).is_empty()
    }

    /// Encodable scalars in ascending order, with their byte sequences.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[u8])> + '_ {
        (0..=MAX_SCALAR).filter_map(move |scalar| {
            let bytes = self.bytes_for_scalar(scalar);
            if bytes.is_empty() {
                return None;
            }
            char::from_u32(scalar).map(|ch| (ch, bytes))
        })
    }

    pub fn encodable_count(&self) -> usize {
        self.offsets.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// Private Use Area code points in the BMP and in planes 15 and 16.
pub fn is_private_use(ch: char) -> bool {
    matches!(ch as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

fn encode_scalar(encoding: &'static Encoding, ch: char, out: &mut Vec<u8>) {
    out.clear();

    let mut buf = [0u8; 4];
    let text = ch.encode_utf8(&mut buf);

    if encoding == UTF_8 {
        out.extend_from_slice(text.as_bytes());
        return;
    }

    let mut encoder = encoding.new_encoder();
    let Some(needed) = encoder.max_buffer_length_from_utf8_without_replacement(text.len()) else {
        return;
    };
    out.reserve(needed);

    match encoder.encode_from_utf8_to_vec_without_replacement(text, out, true) {
        (EncoderResult::InputEmpty, _) => {}
        // Unmappable (or a buffer we sized wrong): treat as unencodable
        _ => out.clear(),
    }
}
