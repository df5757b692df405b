use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};

use super::container::{need, Diagnostics, Header};
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::{HuffOpts, Mode};
use crate::tools::data_out::DataOut;
use crate::tools::report::LogReport;

/// Decoded bytes are collected into chunks of this size before going to the sink.
const CHUNK_SIZE: usize = 64 * 1024;

/// Decode one container from `source` into `sink`, telling `report` what was found.
/// Returns the number of bytes written. Anything after the last symbol is ignored.
pub fn decompress<R, W, D>(source: R, mut sink: W, report: &mut D) -> Result<u64>
where
    R: Read,
    W: Write,
    D: Diagnostics,
{
    let mut br = BitReader::new(source);
    let header = Header::read_from(&mut br, report)?;

    // Rebuild the tree the encoder used.
    let tree = HuffmanTree::build(&header.freqs);
    let codes = CodeTable::from_tree(&tree);
    debug!(
        "Rebuilt the tree for {} symbols, longest code {} bits",
        header.freqs.symbols(),
        tree.depth()
    );
    for (sym, freq) in header.freqs.present() {
        let code = codes.get(sym).ok_or(HuffError::MissingCode { symbol: sym })?;
        report.symbol_code(sym, freq, code);
    }

    let total = header.freqs.total();
    let mut chunk = Vec::with_capacity(CHUNK_SIZE.min(total as usize));
    for index in 1..=total {
        let sym = need(tree.decode_symbol(&mut br), "bitstream", br.offset())?;
        if let Some(code) = codes.get(sym) {
            report.symbol_decoded(index, sym, code);
        }
        chunk.push(sym);
        if chunk.len() == CHUNK_SIZE {
            sink.write_all(&chunk)?;
            chunk.clear();
        }
    }
    sink.write_all(&chunk)?;
    sink.flush()?;

    debug!("Stopped reading at {}", br.loc());
    report.end_of_stream(total);
    Ok(total)
}

/// Decompress (or test) one file, or stdin when `input` is None, as directed by the options.
pub fn decompress_file(opts: &HuffOpts, input: Option<&str>) -> Result<u64> {
    let source: Box<dyn Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let name = input.unwrap_or("(stdin)");

    let mut out = if opts.op_mode == Mode::Test {
        DataOut::discard()
    } else {
        match input.and_then(|path| opts.output_name(path)) {
            Some(path) => DataOut::create(&path, opts.force_overwrite)?,
            None => DataOut::stdout(),
        }
    };
    let written = decompress(source, &mut out, &mut LogReport::new())?;
    out.finish()?;

    if opts.op_mode == Mode::Test {
        info!("{}: ok, {} bytes", name, written);
    } else {
        info!("{}: {} bytes decoded", name, written);
    }
    Ok(written)
}
