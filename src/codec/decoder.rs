use super::encoder::is_literal_safe;
use super::hex_table::HexPairTable;
use super::trie::{DecodeTrie, Slot};
use crate::charset::CodePointEncodingTable;
use crate::error::{CodecError, MalformedKind};

/// How the decoder treats characters outside the literal-safe set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Pass them through unchanged.
    #[default]
    Lenient,
    /// Reject them as malformed input.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    AsIs,
    Space,
    Escape,
    Invalid,
}

/// Turns encoded text back into characters, reassembling multi-byte
/// sequences from consecutive `%XX` groups by walking a [`DecodeTrie`].
pub struct Decoder {
    trie: DecodeTrie,
    hex: HexPairTable,
    classes: [CharClass; 256],
    mode: DecodeMode,
}

impl Decoder {
    pub fn build(table: &CodePointEncodingTable, mode: DecodeMode) -> Self {
        let mut classes = [CharClass::Invalid; 256];
        for (byte, class) in classes.iter_mut().enumerate() {
            *class = match byte as u8 {
                b'+' => CharClass::Space,
                b'%' => CharClass::Escape,
                b if is_literal_safe(b as char) => CharClass::AsIs,
                _ => CharClass::Invalid,
            };
        }

        Self {
            trie: DecodeTrie::build(table),
            hex: HexPairTable::new(),
            classes,
            mode,
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn trie(&self) -> &DecodeTrie {
        &self.trie
    }

    pub fn decode(&self, input: &str) -> Result<String, CodecError> {
        let bytes = input.as_bytes();
        let mut out = String::with_capacity(input.len());
        let mut pos = 0;

        while pos < bytes.len() {
            let byte = bytes[pos];
            match self.classes[byte as usize] {
                CharClass::AsIs => {
                    out.push(byte as char);
                    pos += 1;
                }
                CharClass::Space => {
                    out.push(' ');
                    pos += 1;
                }
                CharClass::Escape => {
                    let (ch, next) = self.decode_escape(bytes, pos)?;
                    out.push(ch);
                    pos = next;
                }
                CharClass::Invalid => {
                    // pos is always on a char boundary: we only step over
                    // ASCII bytes, whole escapes, or whole characters
                    let Some(ch) = input[pos..].chars().next() else {
                        break;
                    };
                    if self.mode == DecodeMode::Strict {
                        return Err(CodecError::malformed(
                            pos,
                            MalformedKind::UnexpectedCharacter(ch),
                        ));
                    }
                    out.push(ch);
                    pos += ch.len_utf8();
                }
            }
        }

        Ok(out)
    }

    /// Resolve the escaped character starting at `start` (which holds `%`).
    /// Returns it together with the position just past the consumed groups.
    fn decode_escape(&self, bytes: &[u8], start: usize) -> Result<(char, usize), CodecError> {
        let mut node = self.trie.root();
        let mut pos = start;

        loop {
            if bytes.get(pos) != Some(&b'%') {
                return Err(CodecError::malformed(start, MalformedKind::IncompleteSequence));
            }
            let (Some(&hi), Some(&lo)) = (bytes.get(pos + 1), bytes.get(pos + 2)) else {
                return Err(CodecError::malformed(pos, MalformedKind::TruncatedEscape));
            };
            let Some(byte) = self.hex.get(hi, lo) else {
                return Err(CodecError::malformed(pos, MalformedKind::InvalidHexDigits));
            };
            pos += 3;

            match self.trie.child(node, byte) {
                Slot::Leaf(ch) => return Ok((ch, pos)),
                Slot::Branch(next) => node = next,
                Slot::Vacant => {
                    return Err(CodecError::malformed(start, MalformedKind::UnmappedSequence));
                }
            }
        }
    }
}
