use crate::error::{PressError, Result};

/// Ordered bits (0 or 1), MSB-first within each source byte.
///
/// Built only from whole bytes, so the length is always a multiple of 8.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Expand bytes into bits, most significant bit first
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }

    /// Pack the bits back into bytes (MSB first)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
            .collect()
    }
}

/// Strip all whitespace and lower-case the payload.
///
/// Does not validate; see [`hex_to_bits`].
pub fn clean_hex(hex: &str) -> String {
    hex.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Decode a hex payload into its bit sequence.
///
/// Whitespace is ignored and case does not matter. An odd number of digits
/// is read as if a leading `0` nibble were present, so `"abc"` decodes like
/// `"0abc"`.
pub fn hex_to_bits(hex: &str) -> Result<BitSequence> {
    let cleaned = clean_hex(hex);

    if let Some((position, ch)) = cleaned
        .chars()
        .enumerate()
        .find(|&(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(PressError::InvalidHex { ch, position });
    }

    let padded = if cleaned.len() % 2 == 1 {
        format!("0{}", cleaned)
    } else {
        cleaned
    };

    // Digits and length were checked above
    let bytes = hex::decode(&padded).map_err(|e| PressError::InvalidConfig(e.to_string()))?;

    Ok(BitSequence::from_bytes(&bytes))
}
