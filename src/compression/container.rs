//! The `.huff` container header.
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `4C 70 F0 7C` |
//! | 4 | 32 | presence map, bit order reversed in each byte |
//! | 36 | 1 | frequency width W (1-4) |
//! | 37 | W per present symbol | frequencies, ascending symbol order, big-endian |
//!
//! The packed bitstream follows immediately.

use log::{debug, error, info};
use std::io::{self, Read};

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::Code;
use crate::tools::freq_count::FreqTable;
use crate::tools::symbol_map::{PresenceMap, MAP_BYTES};

pub const MAGIC: [u8; 4] = [0x4C, 0x70, 0xF0, 0x7C];

/// Bytes in a header before the frequency list.
pub const FIXED_HEADER_LEN: usize = MAGIC.len() + MAP_BYTES + 1;

/// Receives what the decoder learns while reading a container. Every method does
/// nothing by default; the events are for reporting only.
pub trait Diagnostics {
    /// A symbol was found in the presence map.
    fn symbol_present(&mut self, _sym: u8) {}
    /// The width of every stored frequency.
    fn byte_width(&mut self, _width: u8) {}
    /// A symbol, its frequency and the code the rebuilt tree gives it.
    fn symbol_code(&mut self, _sym: u8, _freq: u32, _code: &Code) {}
    /// One symbol was decoded. `index` counts from 1.
    fn symbol_decoded(&mut self, _index: u64, _sym: u8, _code: &Code) {}
    /// The whole body was decoded.
    fn end_of_stream(&mut self, _symbols: u64) {}
}

/// Diagnostics that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {}

/// Everything the header says about the data that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub freqs: FreqTable,
    pub width: u8,
}

impl Header {
    /// Header for data with these frequencies, using the smallest width that fits.
    pub fn new(freqs: FreqTable) -> Self {
        let width = freqs.byte_width();
        Self { freqs, width }
    }

    /// Size of the encoded header in bytes.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.width as usize * self.freqs.symbols()
    }

    /// Append the encoded header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.freqs.presence().to_wire());
        out.push(self.width);
        for (sym, count) in self.freqs.present() {
            let bytes = count.to_be_bytes();
            out.extend_from_slice(&bytes[4 - self.width as usize..]);
            debug!("Frequency of 0x{:02x} is {}", sym, count);
        }
    }

    /// Read and validate a header, leaving the reader at the first body byte.
    pub fn read_from<R: Read, D: Diagnostics>(
        br: &mut BitReader<R>,
        report: &mut D,
    ) -> Result<Self> {
        // Check the magic number one byte at a time so we can say which byte is wrong.
        for (offset, &expected) in MAGIC.iter().enumerate() {
            let found = need(br.byte(), "magic number", br.offset())?;
            if found != expected {
                error!(
                    "Bad magic number: 0x{:x} does not match required 0x{:x} at byte {}",
                    found, expected, offset
                );
                return Err(HuffError::MagicMismatch {
                    found,
                    expected,
                    offset,
                });
            }
        }
        info!("Found a valid huff signature.");

        let mut wire = [0_u8; MAP_BYTES];
        for byte in wire.iter_mut() {
            *byte = need(br.byte(), "presence map", br.offset())?;
        }
        let map = PresenceMap::from_wire(&wire);
        map.symbols().for_each(|sym| report.symbol_present(sym));

        let width = need(br.byte(), "frequency width", br.offset())?;
        // Older encoders wrote a width of 0 for empty files.
        if !(1..=4).contains(&width) && !(width == 0 && map.is_empty()) {
            error!("Fatal error: found invalid frequency width {}.", width);
            return Err(HuffError::InvalidByteWidth(width));
        }
        report.byte_width(width);

        let mut counts = [0_u32; 256];
        for sym in map.symbols() {
            let count = need(br.bint(width as usize * 8), "frequency table", br.offset())?;
            if count == 0 {
                error!("Fatal error: symbol 0x{:02x} is present with no count.", sym);
                return Err(HuffError::ZeroFrequency { symbol: sym });
            }
            counts[sym as usize] = count;
        }
        let freqs = FreqTable::from_counts(counts);
        info!(
            "Found {} symbols, {} byte frequencies, {} symbols to decode.",
            map.len(),
            width,
            freqs.total()
        );

        Ok(Self { freqs, width })
    }
}

/// Turn the end of input into a TruncatedInput error naming what was being read.
pub(crate) fn need<T>(
    read: io::Result<Option<T>>,
    field: &'static str,
    offset: usize,
) -> Result<T> {
    match read? {
        Some(value) => Ok(value),
        None => {
            error!("Unexpected end of input reading the {} at byte {}", field, offset);
            Err(HuffError::TruncatedInput { field, offset })
        }
    }
}
