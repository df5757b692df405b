use log::info;

use crate::compression::container::Diagnostics;
use crate::huffman_coding::code_table::Code;

/// Names used for the control characters and space.
const ASCII: [&str; 33] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "NL", "VT", "NP", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US", "SP",
];

/// How many decoded symbols are listed one by one before the report gives up.
pub const TRANSLATION_LIMIT: u64 = 50;

/// Printable name for a symbol. Bytes above 127 have no name.
pub fn symbol_name(sym: u8) -> String {
    match sym {
        0..=32 => ASCII[sym as usize].to_string(),
        33..=126 => (sym as char).to_string(),
        127 => "DEL".to_string(),
        _ => String::new(),
    }
}

fn times(n: u32) -> &'static str {
    if n == 1 {
        "time"
    } else {
        "times"
    }
}

/// Reports what the decoder finds through the logger at info level: the symbols in
/// the header, their codes, and the first few translations.
#[derive(Debug)]
pub struct LogReport {
    limit: u64,
}

impl LogReport {
    pub fn new() -> Self {
        Self {
            limit: TRANSLATION_LIMIT,
        }
    }
}

impl Default for LogReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for LogReport {
    fn symbol_present(&mut self, sym: u8) {
        info!("Character {:>3} (0x{:02x}) is in the file", symbol_name(sym), sym);
    }

    fn byte_width(&mut self, width: u8) {
        info!(
            "Each char frequency count will be {} {} long",
            width,
            if width == 1 { "byte" } else { "bytes" }
        );
    }

    fn symbol_code(&mut self, sym: u8, freq: u32, code: &Code) {
        info!(
            "Character {:>3} (0x{:02x}) occurred {:>3} {:<5} in the file.  Expected encoding is <{}>",
            symbol_name(sym),
            sym,
            freq,
            times(freq),
            code
        );
    }

    fn symbol_decoded(&mut self, index: u64, sym: u8, code: &Code) {
        if index <= self.limit {
            info!(
                "{:>2}. Translating bits <{}> to character {:>3} (0x{:02x})",
                index,
                code,
                symbol_name(sym),
                sym
            );
        } else if index == self.limit + 1 {
            info!("etc...");
        }
    }

    fn end_of_stream(&mut self, symbols: u64) {
        info!("Decoded {} symbols.", symbols);
        info!("Normal end of file reached");
    }
}

#[test]
fn symbol_name_test() {
    assert_eq!(symbol_name(0), "NUL");
    assert_eq!(symbol_name(b'\n'), "NL");
    assert_eq!(symbol_name(b' '), "SP");
    assert_eq!(symbol_name(b'A'), "A");
    assert_eq!(symbol_name(b'~'), "~");
    assert_eq!(symbol_name(127), "DEL");
    assert_eq!(symbol_name(200), "");
    assert_eq!(times(1), "time");
    assert_eq!(times(2), "times");
}
