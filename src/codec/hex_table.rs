/// Two ASCII hex characters to the byte they spell, indexed by `(hi << 8) | lo`.
pub struct HexPairTable {
    pairs: Box<[Option<u8>]>,
}

impl HexPairTable {
    pub fn new() -> Self {
        let mut pairs = vec![None; 256 * 256].into_boxed_slice();
        for hi in 0..=255u8 {
            for lo in 0..=255u8 {
                let mut byte = [0u8; 1];
                if hex::decode_to_slice([hi, lo], &mut byte).is_ok() {
                    pairs[pair_index(hi, lo)] = Some(byte[0]);
                }
            }
        }
        Self { pairs }
    }

    /// `None` if either character is not a hex digit.
    pub fn get(&self, hi: u8, lo: u8) -> Option<u8> {
        self.pairs[pair_index(hi, lo)]
    }
}

impl Default for HexPairTable {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_index(hi: u8, lo: u8) -> usize {
    ((hi as usize) << 8) | lo as usize
}
