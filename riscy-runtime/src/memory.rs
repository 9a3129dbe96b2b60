//! Paged memory subsystem
//!
//! 256 pages of 256 bytes, addressed by `(page, offset)`. There are no
//! protection regions: every cell is readable and writable.

use riscy_spec::{MEMORY_SIZE, PAGE_SIZE};
use std::fmt::Write as _;

/// Columns per row in a page dump
pub const DUMP_COLUMNS: usize = 16;

#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Memory").field("nonzero_cells", &used).finish()
    }
}

impl Memory {
    /// Zero-filled memory
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEMORY_SIZE],
        }
    }

    #[inline]
    fn index(page: u8, offset: u8) -> usize {
        page as usize * PAGE_SIZE + offset as usize
    }

    #[inline]
    pub fn read(&self, page: u8, offset: u8) -> u8 {
        self.cells[Self::index(page, offset)]
    }

    #[inline]
    pub fn write(&mut self, page: u8, offset: u8, value: u8) {
        self.cells[Self::index(page, offset)] = value;
    }

    /// Borrow one page
    pub fn page(&self, page: u8) -> &[u8] {
        let start = Self::index(page, 0);
        &self.cells[start..start + PAGE_SIZE]
    }

    /// Zero every cell
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Render one page as a 16-column hex grid, rows labelled by offset.
    ///
    /// ```text
    /// XX | 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f
    /// ---+------------------------------------------------
    /// 00 | 01 00 00 ...
    /// 10 | ...
    /// ```
    pub fn dump_page(&self, page: u8) -> String {
        let mut out = String::with_capacity(64 * 18);

        out.push_str("XX |");
        for col in 0..DUMP_COLUMNS {
            let _ = write!(out, " {col:02x}");
        }
        out.push('\n');
        out.push_str("---+-");
        out.push_str(&"-".repeat(3 * DUMP_COLUMNS - 1));

        for (row, chunk) in self.page(page).chunks(DUMP_COLUMNS).enumerate() {
            let _ = write!(out, "\n{:02x} |", row * DUMP_COLUMNS);
            for cell in chunk {
                let _ = write!(out, " {cell:02x}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_initialized() {
        let mem = Memory::new();
        assert_eq!(mem.read(0, 0), 0);
        assert_eq!(mem.read(0xFF, 0xFF), 0);
        assert!(mem.page(7).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pages_are_independent() {
        let mut mem = Memory::new();
        mem.write(1, 0x10, 0xAA);
        mem.write(2, 0x10, 0xBB);
        assert_eq!(mem.read(1, 0x10), 0xAA);
        assert_eq!(mem.read(2, 0x10), 0xBB);
        assert_eq!(mem.read(0, 0x10), 0x00);
    }

    #[test]
    fn test_last_cell() {
        let mut mem = Memory::new();
        mem.write(0xFF, 0xFF, 0x5A);
        assert_eq!(mem.read(0xFF, 0xFF), 0x5A);
        assert_eq!(mem.page(0xFF)[0xFF], 0x5A);
    }

    #[test]
    fn test_clear() {
        let mut mem = Memory::new();
        mem.write(3, 3, 3);
        mem.clear();
        assert_eq!(mem.read(3, 3), 0);
    }

    #[test]
    fn test_dump_layout() {
        let mut mem = Memory::new();
        mem.write(1, 0x00, 0x01);
        mem.write(1, 0xFE, 0x02);
        let dump = mem.dump_page(1);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "XX | 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f");
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[2].starts_with("00 | 01 00"));
        assert!(lines[17].starts_with("f0 |"));
        assert!(lines[17].ends_with("02 00"));
    }
}
