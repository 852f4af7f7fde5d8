//! CRC-8 used by every Sensirion I²C word.
//!
//! Polynomial 0x31 (x⁸ + x⁵ + x⁴ + 1), initialization 0xFF, no reflection and
//! no final XOR.

use sensirion_i2c::crc8 as sensirion_crc;

/// Number of bytes in one CRC-protected word on the wire.
pub const CHUNK_LEN: usize = 3;

/// Calculates the CRC-8 checksum over `data`.
pub fn crc8(data: &[u8]) -> u8 {
    sensirion_crc::calculate(data)
}

/// Writes `word` big-endian followed by its checksum into `chunk`.
pub(crate) fn frame_word(chunk: &mut [u8], word: u16) {
    let [hi, lo] = word.to_be_bytes();
    chunk[0] = hi;
    chunk[1] = lo;
    chunk[2] = sensirion_crc::calculate(&[hi, lo]);
}

/// Index of the first `(hi, lo, crc)` chunk whose checksum does not match.
pub(crate) fn first_bad_chunk(buffer: &[u8]) -> Option<usize> {
    buffer
        .chunks_exact(CHUNK_LEN)
        .position(|chunk| sensirion_crc::calculate(&chunk[..2]) != chunk[2])
}
