//! Huff: a byte oriented huffman file compressor.
//!
//! Builds one huffman tree from the byte frequencies of the whole input and writes a
//! small self-describing container: a header with the frequency table, then the packed
//! codes. The decoder rebuilds the identical tree from the header.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huff test.txt`
//!
//! This will create the file test.txt.huff. `huff -d test.txt.huff` restores test.txt.
//!
//! The library entry points work on any reader and writer:
//!
//! ```
//! let mut packed = vec![];
//! huff::compress(b"AAAAABBBCC", &mut packed).unwrap();
//! let mut restored = vec![];
//! huff::decompress(packed.as_slice(), &mut restored, &mut huff::Silent).unwrap();
//! assert_eq!(restored, b"AAAAABBBCC");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, CompressStats};
pub use compression::container::{Diagnostics, Header, Silent, MAGIC};
pub use compression::decompress::decompress;
pub use error::{HuffError, Result};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use huffman_coding::huffman::HuffmanTree;
pub use tools::freq_count::FreqTable;
pub use tools::symbol_map::PresenceMap;
