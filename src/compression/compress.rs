use log::{debug, info, trace};
use std::fs;
use std::io::{self, Read, Write};

use super::container::Header;
use crate::bitstream::bitpacker::BitPacker;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::HuffOpts;
use crate::tools::data_out::DataOut;
use crate::tools::freq_count::FreqTable;

/// Packed bytes are handed to the sink in chunks of about this size.
const FLUSH_SIZE: usize = 64 * 1024;

/// What a compression run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    pub input_bytes: u64,
    pub header_bytes: u64,
    pub body_bytes: u64,
    /// Distinct byte values in the input.
    pub symbols: usize,
    pub max_code_len: usize,
}

impl CompressStats {
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.body_bytes
    }

    /// Output size as a fraction of input size (0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes() as f64 / self.input_bytes as f64
    }
}

/// Compress `data` into a complete container written to `sink`.
pub fn compress<W: Write>(data: &[u8], mut sink: W) -> Result<CompressStats> {
    // Count the symbols and write the header.
    let header = Header::new(FreqTable::from_bytes(data)?);
    let mut head = Vec::with_capacity(header.encoded_len());
    header.write_to(&mut head);
    sink.write_all(&head)?;
    debug!(
        "Wrote {} byte header: {} symbols, {} byte frequencies",
        head.len(),
        header.freqs.symbols(),
        header.width
    );

    // Build the codes. Encoder and decoder build the same tree from the same counts.
    let tree = HuffmanTree::build(&header.freqs);
    let codes = CodeTable::from_tree(&tree);
    for (sym, code) in codes.iter() {
        trace!("0x{:02x}: {:>8} <{}>", sym, header.freqs.count(sym), code);
    }

    // Pack each input byte's code in input order.
    let body_bits = codes.encoded_bits(&header.freqs);
    let mut bw = BitPacker::new(FLUSH_SIZE.min((body_bits / 8) as usize + 1));
    for &byte in data {
        let code = codes
            .get(byte)
            .ok_or(HuffError::MissingCode { symbol: byte })?;
        bw.out_code(code);
        if bw.output.len() >= FLUSH_SIZE {
            bw.drain_to(&mut sink)?;
        }
    }
    bw.flush();
    bw.drain_to(&mut sink)?;
    sink.flush()?;
    debug!(
        "Packed {} bits into {} bytes ({} bits in the last byte)",
        body_bits,
        bw.packed_len(),
        bw.last_bits
    );

    Ok(CompressStats {
        input_bytes: data.len() as u64,
        header_bytes: head.len() as u64,
        body_bytes: bw.packed_len(),
        symbols: header.freqs.symbols(),
        max_code_len: codes.max_len(),
    })
}

/// Compress one file (or stdin when `input` is None) as directed by the options.
pub fn compress_file(opts: &HuffOpts, input: Option<&str>) -> Result<CompressStats> {
    let data = match input {
        Some(path) => fs::read(path)?,
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            data
        }
    };
    let name = input.unwrap_or("(stdin)");

    let mut out = match input.and_then(|path| opts.output_name(path)) {
        Some(path) => DataOut::create(&path, opts.force_overwrite)?,
        None => DataOut::stdout(),
    };
    let stats = compress(&data, &mut out)?;
    out.finish()?;

    info!(
        "{}: {} bytes in, {} bytes out ({:.1}%), {} symbols, longest code {} bits",
        name,
        stats.input_bytes,
        stats.output_bytes(),
        stats.ratio() * 100.0,
        stats.symbols,
        stats.max_code_len
    );
    Ok(stats)
}
