use crate::charset::{CodePointEncodingTable, MAX_SCALAR};
use crate::error::{CodecError, MalformedKind};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Characters written through unescaped.
pub fn is_literal_safe(ch: char) -> bool {
    matches!(ch, 'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '-' | '*' | '_')
}

/// Precomputed output text for every scalar: the character itself, `+` for
/// space, or one `%XX` group per encoded byte. Unencodable scalars map to an
/// empty entry.
pub struct Encoder {
    offsets: Vec<u32>,
    text: String,
}

impl Encoder {
    pub fn build(table: &CodePointEncodingTable) -> Self {
        let scalar_count = MAX_SCALAR as usize + 1;
        let mut offsets = Vec::with_capacity(scalar_count + 1);
        let mut text = String::with_capacity(scalar_count * 4);

        offsets.push(0);
        for scalar in 0..=MAX_SCALAR {
            let bytes = table.bytes_for_scalar(scalar);
            match char::from_u32(scalar) {
                _ if bytes.is_empty() => {}
                Some(' ') => text.push('+'),
                Some(ch) if is_literal_safe(ch) => text.push(ch),
                _ => {
                    for &b in bytes {
                        text.push('%');
                        text.push(HEX[(b >> 4) as usize] as char);
                        text.push(HEX[(b & 0x0F) as usize] as char);
                    }
                }
            }
            offsets.push(text.len() as u32);
        }

        Self { offsets, text }
    }

    /// The literal output for one character, `None` if it cannot be encoded.
    pub fn representation(&self, ch: char) -> Option<&str> {
        let scalar = ch as usize;
        if scalar > MAX_SCALAR as usize {
            return None;
        }
        let start = self.offsets[scalar] as usize;
        let end = self.offsets[scalar + 1] as usize;
        if start == end {
            return None;
        }
        Some(&self.text[start..end])
    }

    pub fn encode(&self, input: &str) -> Result<String, CodecError> {
        // Worst case for ASCII input is "%XX" per character
        let mut out = String::with_capacity(input.len() * 3);
        self.encode_into(input, &mut out)?;
        Ok(out)
    }

    /// Append the encoded form of `input` to `out`. On error `out` may hold a
    /// partial result.
    pub fn encode_into(&self, input: &str, out: &mut String) -> Result<(), CodecError> {
        for (offset, ch) in input.char_indices() {
            match self.representation(ch) {
                Some(rep) => out.push_str(rep),
                None => {
                    return Err(CodecError::malformed(offset, MalformedKind::Unencodable(ch)));
                }
            }
        }
        Ok(())
    }
}
