//! Error types for the huff compressor.
//!
//! Every failure is fatal for the file being processed. The variants carry enough
//! detail (which byte, where) to tell a file written by a different tool apart
//! from a corrupted one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuffError {
    /// One of the four leading bytes does not match the container magic number.
    #[error("bad magic number: 0x{found:02x} does not match required 0x{expected:02x} at byte {offset}")]
    MagicMismatch { found: u8, expected: u8, offset: usize },

    /// The input ran out while a header field or the bitstream was being read.
    #[error("unexpected end of input while reading the {field} (byte offset {offset})")]
    TruncatedInput { field: &'static str, offset: usize },

    /// The frequency width byte is outside 1..=4.
    #[error("invalid frequency byte width {0}, expected 1 to 4")]
    InvalidByteWidth(u8),

    /// The presence bitmap marks a symbol whose stored frequency is zero.
    #[error("symbol 0x{symbol:02x} is marked present but has a frequency of 0")]
    ZeroFrequency { symbol: u8 },

    /// A symbol occurs more often than a 4 byte frequency field can record.
    #[error("symbol 0x{symbol:02x} occurs {count} times, more than a 4 byte frequency can hold")]
    FrequencyOverflow { symbol: u8, count: u64 },

    /// The encoder met a byte with no code. The frequency count and the code table disagree.
    #[error("no huffman code was built for symbol 0x{symbol:02x}")]
    MissingCode { symbol: u8 },

    /// Underlying read, write, open or close failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;

#[cfg(test)]
mod test {
    use super::HuffError;

    #[test]
    fn magic_message_names_the_offset() {
        let e = HuffError::MagicMismatch {
            found: 0x00,
            expected: 0xf0,
            offset: 2,
        };
        assert_eq!(
            e.to_string(),
            "bad magic number: 0x00 does not match required 0xf0 at byte 2"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let e: HuffError = io.into();
        assert!(matches!(e, HuffError::Io(_)));
    }
}
