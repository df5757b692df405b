//! The tools module provides several helper functions for huff.
//!
//! The tools are:
//! - cli: Command line interface for huff.
//! - data_out: Output files that vanish unless finished.
//! - freq_count: Frequency count of the input bytes.
//! - report: Log report of what the decoder finds.
//! - symbol_map: The 256 bit presence map stored in the header.
//!
pub mod cli;
pub mod data_out;
pub mod freq_count;
pub mod report;
pub mod symbol_map;
