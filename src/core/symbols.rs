use crate::core::constants::{DIGIPIN_GRID, GRID_SIZE};

const NO_POSITION: u8 = u8::MAX;

/// Inverse of `DIGIPIN_GRID`, indexed by ASCII byte. Each entry packs
/// `row * GRID_SIZE + col`, or `NO_POSITION` for non-members.
const SYMBOL_LOOKUP: [u8; 128] = build_lookup();

const fn build_lookup() -> [u8; 128] {
    let mut table = [NO_POSITION; 128];
    let mut row = 0;
    while row < GRID_SIZE {
        let mut col = 0;
        while col < GRID_SIZE {
            let symbol = DIGIPIN_GRID[row][col] as usize;
            table[symbol] = (row * GRID_SIZE + col) as u8;
            col += 1;
        }
        row += 1;
    }
    table
}

/// Returns the symbol at `(row, col)` in the grid.
///
/// Both indices must be below `GRID_SIZE`.
pub fn symbol_at(row: usize, col: usize) -> char {
    DIGIPIN_GRID[row][col]
}

/// Looks up the `(row, col)` grid position of a symbol.
///
/// Matching is exact: lowercase letters and any character outside the 16-symbol
/// alphabet return `None`.
pub fn symbol_position(symbol: char) -> Option<(usize, usize)> {
    if !symbol.is_ascii() {
        return None;
    }
    match SYMBOL_LOOKUP[symbol as usize] {
        NO_POSITION => None,
        packed => {
            let packed = packed as usize;
            Some((packed / GRID_SIZE, packed % GRID_SIZE))
        }
    }
}

/// Returns true if `symbol` is one of the 16 grid symbols.
pub fn is_symbol(symbol: char) -> bool {
    symbol_position(symbol).is_some()
}
