use std::io::Write;

use crate::huffman_coding::code_table::Code;

/// Packs huffman codes into bytes, most significant bit first. Whole bytes collect
/// in `output` until they are drained to a writer.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of real bits in the final byte after flush() (0 means the byte was full).
    pub last_bits: u8,
    /// Pending bits, right aligned. Fewer than 8 between calls.
    pending: u64,
    pending_bits: u8,
    drained: u64,
}

impl BitPacker {
    /// Create a BitPacker whose output buffer starts with room for `size` bytes.
    /// Call flush() after the last code so the partial byte is written.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            pending: 0,
            pending_bits: 0,
            drained: 0,
        }
    }

    /// Move every complete byte from the pending bits to the output.
    fn emit_bytes(&mut self) {
        while self.pending_bits >= 8 {
            self.pending_bits -= 8;
            self.output.push((self.pending >> self.pending_bits) as u8);
        }
        self.pending &= (1 << self.pending_bits) - 1;
    }

    /// Puts a whole huffman code on the stream, first bit first. Codes of any length
    /// are accepted.
    pub fn out_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.pending = self.pending << 1 | bit as u64;
            self.pending_bits += 1;
            if self.pending_bits == 8 {
                self.emit_bytes();
            }
        }
    }

    /// Writes out the last partial byte, zero filled in its low bits.
    pub fn flush(&mut self) {
        self.last_bits = self.pending_bits;
        if self.pending_bits > 0 {
            self.pending <<= 8 - self.pending_bits;
            self.pending_bits = 8;
            self.emit_bytes();
        }
    }

    /// Move the packed bytes to the writer, keeping any partial byte pending.
    pub fn drain_to<W: Write>(&mut self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.output)?;
        self.drained += self.output.len() as u64;
        self.output.clear();
        Ok(())
    }

    /// Total number of whole bytes packed so far, drained or not.
    pub fn packed_len(&self) -> u64 {
        self.drained + self.output.len() as u64
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;
    use crate::huffman_coding::code_table::Code;

    fn code(bits: &str) -> Code {
        let mut code = Code::new();
        bits.chars().for_each(|c| code.push(c == '1'));
        code
    }

    #[test]
    fn whole_bytes_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&code("00100001"));
        bw.out_code(&code("00100000"));
        bw.flush();
        assert_eq!(bw.output, "! ".as_bytes());
        assert_eq!(bw.last_bits, 0);
    }

    #[test]
    fn msb_first_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&code("1"));
        bw.out_code(&code("000000"));
        bw.out_code(&code("1"));
        assert_eq!(bw.output, vec![0b1000_0001]);
    }

    #[test]
    fn padding_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&code("11111111"));
        bw.out_code(&code("101"));
        assert_eq!(bw.output, vec![0xff]);
        bw.flush();
        assert_eq!(bw.output, vec![0xff, 0b1010_0000]);
        assert_eq!(bw.last_bits, 3);
        assert_eq!(bw.packed_len(), 2);
    }

    #[test]
    fn long_code_test() {
        // A 20 bit code spans three bytes.
        let mut bw = BitPacker::new(100);
        bw.out_code(&code("11110000111100001111"));
        bw.flush();
        assert_eq!(bw.output, vec![0xf0, 0xf0, 0xf0]);
    }

    #[test]
    fn empty_code_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&Code::new());
        bw.flush();
        assert!(bw.output.is_empty());
        assert_eq!(bw.last_bits, 0);
    }

    #[test]
    fn drain_test() {
        let mut bw = BitPacker::new(100);
        let mut sink = Vec::new();
        bw.out_code(&code("000000011"));
        bw.drain_to(&mut sink).unwrap();
        assert_eq!(sink, vec![1]);
        assert!(bw.output.is_empty());
        bw.flush();
        bw.drain_to(&mut sink).unwrap();
        assert_eq!(sink, vec![1, 0b1000_0000]);
        assert_eq!(bw.packed_len(), 2);
    }
}
