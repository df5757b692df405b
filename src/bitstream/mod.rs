//! The bitstream module is the I/O subsystem for huff.
//!
//! Codes are packed most significant bit first. The last byte of a stream is padded
//! with zero bits. Readers keep their own cursor, so nothing here is shared between
//! threads or between streams.
//!
pub mod bitpacker;
pub mod bitreader;
