//! The compression module manages both directions of huff.
//!
//! Compression happens in the following steps:
//! - Count how often each byte value occurs in the whole input.
//! - Write the container header: magic number, presence map, frequency width and frequencies.
//! - Build the huffman tree and its code table from the counts.
//! - Write the code of every input byte, in input order, and pad the last byte with zeros.
//!
//! Decompression reads the header, rebuilds the same tree from the stored counts and
//! walks it bit by bit until the total of all counts has been decoded.
//!

pub mod compress;
pub mod container;
pub mod decompress;
