//! The huffman module builds the prefix code used by huff.
//!
//! One tree covers the whole input. Ties between equal weights are broken the same
//! way every time, so the decoder can rebuild the encoder's tree from the frequency
//! table alone and no code lengths need to be stored.
//!

pub mod code_table;
pub mod huffman;
