//! BitReader: reads a container one bit or one byte at a time.
//!
//! The read position (buffer cursor plus bit index) lives in the reader, so any
//! number of readers can be active at once. All reads return `Ok(None)` at the end
//! of the source and `Err` only for a failure of the source itself.
//!
//! Any `std::io::Read` source works. Short reads and `Interrupted` are handled here.
use std::io::{self, Read};

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads a packed bitstream, most significant bit of each byte first.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    /// Bytes held by buffers that have already been used up.
    base: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader. Nothing is read until the first request.
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            bit_index: 0,
            base: 0,
            source,
        }
    }

    /// Refill the buffer once it is used up. Returns false at the end of the source.
    fn have_data(&mut self) -> io::Result<bool> {
        if self.cursor == self.buffer.len() {
            // Retire the used buffer first, so a failed read leaves nothing behind.
            self.base += self.buffer.len();
            self.buffer.clear();
            self.cursor = 0;
            self.bit_index = 0;

            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.buffer.clear();
                        return Err(e);
                    }
                }
            };
            self.buffer.truncate(size);
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit, or None if there is no more data to read
    pub fn bit(&mut self) -> io::Result<Option<bool>> {
        // If bit_index is == 0, check if we have a byte to read.
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 0x01;
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Ok(Some(bit == 1))
    }

    /// Returns the next 8 bits as a byte. Takes the whole byte straight from the
    /// buffer when the reader is byte aligned.
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        if self.bit_index == 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            return Ok(Some(byte));
        }
        let mut byte = 0_u8;
        for _ in 0..8 {
            match self.bit()? {
                Some(bit) => byte = byte << 1 | bit as u8,
                None => return Ok(None),
            }
        }
        Ok(Some(byte))
    }

    /// Return the next n bits (n <= 32) as a big-endian integer, or None if the
    /// source ends first.
    pub fn bint(&mut self, mut n: usize) -> io::Result<Option<u32>> {
        debug_assert!(n <= 32, "bint can return at most 32 bits");
        let mut result = 0_u32;

        // Full bytes first, then whatever bits are still needed.
        while n >= 8 {
            match self.byte()? {
                Some(byte) => result = result << 8 | byte as u32,
                None => return Ok(None),
            }
            n -= 8;
        }
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Offset of the byte the next read starts in.
    pub fn offset(&self) -> usize {
        self.base + self.cursor
    }

    /// Debugging function. Report current position as bytes.bits.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.offset(), self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use std::io::{self, Read};

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(true));
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), Some(false));
        }
        assert_eq!(br.bit().unwrap(), Some(true));
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn bint_test() {
        let x = [0b00011011].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(5).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), Some(0));
        assert_eq!(br.bint(2).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), None);
    }

    #[test]
    fn bint_big_endian_test() {
        let x = [0x01, 0x02, 0x03, 0x04, 0xff].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(24).unwrap(), Some(0x01_02_03));
        assert_eq!(br.bint(8).unwrap(), Some(0x04));
        assert_eq!(br.bint(16).unwrap(), None);

        let x = [0xde, 0xad, 0xbe, 0xef].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(32).unwrap(), Some(0xdead_beef));
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.byte().unwrap(), Some(b'e'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1010_1010, 0b1111_0000].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(true));
        assert_eq!(br.byte().unwrap(), Some(0b0101_0101));
        assert_eq!(br.loc(), "[1.1]");
    }

    #[test]
    fn end_of_data_test() {
        let x = "Hi".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.bint(16).unwrap(), None);
        assert_eq!(br.byte().unwrap(), None);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..5 {
            br.byte().unwrap();
        }
        br.bit().unwrap();
        assert_eq!(br.loc(), "[5.1]");
        assert_eq!(br.offset(), 5);
    }

    /// Hands out one byte per read() call, to force many buffer refills.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn refill_offset_test() {
        let data = [1_u8, 2, 3, 4, 5, 6];
        let mut br = BitReader::new(Trickle(&data));
        assert_eq!(br.bint(32).unwrap(), Some(0x0102_0304));
        assert_eq!(br.offset(), 4);
        assert_eq!(br.bint(16).unwrap(), Some(0x0506));
        assert_eq!(br.bit().unwrap(), None);
        assert_eq!(br.offset(), 6);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn read_error_test() {
        let mut br = BitReader::new(Broken);
        assert!(br.bit().is_err());
        assert!(br.byte().is_err());
        assert_eq!(br.offset(), 0);
    }

    /// Fails the first read, then reports the end of the data.
    struct FailOnce(bool);

    impl Read for FailOnce {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            if self.0 {
                return Ok(0);
            }
            self.0 = true;
            Err(io::Error::new(io::ErrorKind::Other, "transient failure"))
        }
    }

    #[test]
    fn no_data_after_read_error_test() {
        let mut br = BitReader::new(FailOnce(false));
        assert!(br.byte().is_err());
        assert_eq!(br.byte().unwrap(), None);
        assert_eq!(br.bit().unwrap(), None);
        assert_eq!(br.offset(), 0);
    }

    #[test]
    fn read_error_after_data_test() {
        // One byte of data, then the source fails.
        let mut br = BitReader::new(Trickle(&[0xab]).chain(Broken));
        assert_eq!(br.byte().unwrap(), Some(0xab));
        assert!(br.bit().is_err());
        assert_eq!(br.offset(), 1);
    }
}
