use crate::error::{FormatError, Result};
use crate::ui::theme;
use std::fs;
use std::path::Path;

/// A square puzzle grid, as read back from a formatted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
    cells: Vec<char>,
}

impl Grid {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FormatError::Io(path.to_path_buf(), e))?;
        Self::parse(&text)
    }

    /// The first row fixes the size; every other character fills cells in
    /// row-major order.
    pub fn parse(text: &str) -> Result<Self> {
        let size = text
            .lines()
            .next()
            .map_or(0, |l| l.chars().filter(|c| !c.is_whitespace()).count());
        let cells: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

        if size == 0 || cells.len() != size * size {
            return Err(FormatError::MalformedGrid { size, cells: cells.len() });
        }
        Ok(Self { size, cells })
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn row(&self, r: usize) -> &[char] {
        &self.cells[r * self.size..(r + 1) * self.size]
    }

    /// Side of the sub-boxes, when the grid divides evenly into them.
    pub fn box_size(&self) -> Option<usize> {
        let b = self.size.isqrt();
        (b > 1 && b * b == self.size).then_some(b)
    }

    pub fn render(&self) -> String {
        self.layout(|c| c.to_string(), |s| s.to_string())
    }

    pub fn print(&self) {
        let width = self.render().lines().map(|l| l.chars().count()).max().unwrap_or(0);
        println!("{}", theme::rule(width));
        println!(
            "{}",
            self.layout(|c| theme::cell(c).to_string(), |s| theme::box_separator(s).to_string())
        );
        println!("{}", theme::rule(width));
    }

    fn layout<C, S>(&self, paint_cell: C, paint_sep: S) -> String
    where
        C: Fn(char) -> String,
        S: Fn(&str) -> String,
    {
        let boxed = self.box_size();
        let mut rows = Vec::with_capacity(self.size);

        for r in 0..self.size {
            let mut line = String::new();
            for (c, &cell) in self.row(r).iter().enumerate() {
                if c > 0 {
                    match boxed {
                        Some(b) if c % b == 0 => line.push_str(&paint_sep(" | ")),
                        _ => line.push(' '),
                    }
                }
                line.push_str(&paint_cell(cell));
            }
            if let Some(b) = boxed {
                if r > 0 && r % b == 0 {
                    rows.push(String::new());
                }
            }
            rows.push(line);
        }
        rows.join("\n")
    }
}
