use crate::error::{FormatError, Result};

/// Values by grid size: 4x4 uses `1-4`, 9x9 `1-9`, 16x16 `1-9A-G`, 25x25 `1-9A-P`.
pub const SYMBOLS: &str = "123456789ABCDEFGHIJKLMNOP";
pub const BLANKS: [char; 2] = ['.', '0'];

/// Rows, columns and boxes of a square board, with each cell's peers.
#[derive(Debug)]
pub struct Board {
    pub size: usize,
    symbols: Vec<char>,
    units: Vec<Vec<usize>>,
    units_of: Vec<[usize; 3]>,
    peers: Vec<Vec<usize>>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        let b = size.isqrt();
        if b < 2 || b * b != size || size > SYMBOLS.len() {
            return Err(FormatError::UnsupportedGridSize { size });
        }

        let mut units = Vec::with_capacity(3 * size);
        for r in 0..size {
            units.push((0..size).map(|c| r * size + c).collect());
        }
        for c in 0..size {
            units.push((0..size).map(|r| r * size + c).collect());
        }
        for br in 0..b {
            for bc in 0..b {
                let mut cells = Vec::with_capacity(size);
                for r in br * b..(br + 1) * b {
                    for c in bc * b..(bc + 1) * b {
                        cells.push(r * size + c);
                    }
                }
                units.push(cells);
            }
        }

        let units_of: Vec<[usize; 3]> = (0..size * size)
            .map(|cell| {
                let (r, c) = (cell / size, cell % size);
                [r, size + c, 2 * size + (r / b) * b + c / b]
            })
            .collect();

        let peers = units_of
            .iter()
            .enumerate()
            .map(|(cell, owned)| {
                let mut peers: Vec<usize> = owned
                    .iter()
                    .flat_map(|&u| units[u].iter().copied())
                    .filter(|&other| other != cell)
                    .collect();
                peers.sort_unstable();
                peers.dedup();
                peers
            })
            .collect();

        Ok(Self {
            size,
            symbols: SYMBOLS.chars().take(size).collect(),
            units,
            units_of,
            peers,
        })
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn units_of(&self, cell: usize) -> impl Iterator<Item = &[usize]> {
        self.units_of[cell].iter().map(|&u| self.units[u].as_slice())
    }

    pub fn peers(&self, cell: usize) -> &[usize] {
        &self.peers[cell]
    }

    pub fn symbol(&self, value: usize) -> char {
        self.symbols[value]
    }

    pub fn value_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol.to_ascii_uppercase())
    }
}
