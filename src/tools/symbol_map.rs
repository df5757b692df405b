//! The presence map records which of the 256 byte values occur in the input.
//!
//! In memory symbol `i` lives in bit `i % 8` (value `1 << (i % 8)`) of byte `i / 8`.
//! On the wire every one of the 32 bytes is written with its bit order reversed,
//! so symbol 0 is the most significant bit of the first byte. Files written by
//! older encoders depend on that layout.

/// Size of the presence map in bytes.
pub const MAP_BYTES: usize = 32;

/// A 256 bit set of present symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresenceMap {
    bits: [u8; MAP_BYTES],
}

impl PresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a symbol present.
    pub fn insert(&mut self, sym: u8) {
        self.bits[sym as usize / 8] |= 1 << (sym % 8);
    }

    pub fn contains(&self, sym: u8) -> bool {
        (self.bits[sym as usize / 8] >> (sym % 8)) & 0x01 == 1
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Number of symbols present.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Present symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255_u8).filter(move |&sym| self.contains(sym))
    }

    /// Encode for the container header (bit order reversed within each byte).
    pub fn to_wire(&self) -> [u8; MAP_BYTES] {
        let mut wire = [0_u8; MAP_BYTES];
        for (out, &byte) in wire.iter_mut().zip(self.bits.iter()) {
            *out = byte.reverse_bits();
        }
        wire
    }

    /// Decode the 32 bytes read from a container header.
    pub fn from_wire(wire: &[u8; MAP_BYTES]) -> Self {
        let mut bits = [0_u8; MAP_BYTES];
        for (out, &byte) in bits.iter_mut().zip(wire.iter()) {
            *out = byte.reverse_bits();
        }
        Self { bits }
    }
}

#[cfg(test)]
fn map_of(symbols: impl IntoIterator<Item = u8>) -> PresenceMap {
    let mut map = PresenceMap::new();
    symbols.into_iter().for_each(|sym| map.insert(sym));
    map
}

#[test]
fn wire_layout_test() {
    // Symbol 0 is the top bit of byte 0, symbol 7 the bottom bit.
    let map = map_of([0_u8, 9]);
    let wire = map.to_wire();
    assert_eq!(wire[0], 0b1000_0000);
    assert_eq!(wire[1], 0b0100_0000);
    assert!(wire[2..].iter().all(|&b| b == 0));

    let map = map_of([7_u8, 255]);
    let wire = map.to_wire();
    assert_eq!(wire[0], 0b0000_0001);
    assert_eq!(wire[31], 0b0000_0001);
}

#[test]
fn from_wire_test() {
    let mut wire = [0_u8; MAP_BYTES];
    // "ABC" is 0x41..=0x43: byte 8, logical bits 1-3, wire bits 6-4.
    wire[8] = 0b0111_0000;
    let map = PresenceMap::from_wire(&wire);
    assert_eq!(map.symbols().collect::<Vec<u8>>(), b"ABC".to_vec());
    assert_eq!(map.len(), 3);
    assert_eq!(map.to_wire(), wire);
}

#[test]
fn full_map_test() {
    let map = map_of(0..=255_u8);
    assert_eq!(map.to_wire(), [0xff; MAP_BYTES]);
    assert_eq!(map.len(), 256);
    assert_eq!(map.symbols().collect::<Vec<u8>>(), (0..=255).collect::<Vec<u8>>());
    assert!(PresenceMap::new().is_empty());
}
