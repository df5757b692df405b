use crate::error::{HuffError, Result};
use crate::tools::symbol_map::PresenceMap;

/// Per-symbol occurrence counts for all 256 byte values. Absent symbols count 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqTable {
    counts: [u32; 256],
}

impl FreqTable {
    /// Count every byte of the input. Fails only if a symbol occurs more often
    /// than a 4 byte frequency field can hold.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut wide = [0_u64; 256];
        data.iter().for_each(|&el| wide[el as usize] += 1);

        let mut counts = [0_u32; 256];
        for (sym, &count) in wide.iter().enumerate() {
            counts[sym] = u32::try_from(count).map_err(|_| HuffError::FrequencyOverflow {
                symbol: sym as u8,
                count,
            })?;
        }
        Ok(Self { counts })
    }

    /// Build a table directly from counts, as recovered from a container header.
    pub fn from_counts(counts: [u32; 256]) -> Self {
        Self { counts }
    }

    /// Count for one symbol.
    pub fn count(&self, sym: u8) -> u32 {
        self.counts[sym as usize]
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Number of distinct symbols present.
    pub fn symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts. This is the number of symbols a decoder must emit.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// The set of symbols with a non-zero count.
    pub fn presence(&self) -> PresenceMap {
        let mut map = PresenceMap::new();
        self.present().for_each(|(sym, _)| map.insert(sym));
        map
    }

    /// Smallest number of bytes (1-4) that holds every count unsigned. An empty
    /// table still uses 1.
    pub fn byte_width(&self) -> u8 {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        match max {
            0..=0xff => 1,
            0x100..=0xffff => 2,
            0x1_0000..=0xff_ffff => 3,
            _ => 4,
        }
    }
}

impl Default for FreqTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}
