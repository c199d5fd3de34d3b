use colored::{ColoredString, Colorize};

// Palette (r, g, b)
pub const ACCENT_PURPLE: (u8, u8, u8) = (181, 101, 216); // #B565D8
pub const ACCENT_PURPLE_LIGHT: (u8, u8, u8) = (232, 196, 240); // #E8C4F0
pub const SKY_BLUE: (u8, u8, u8) = (135, 206, 235); // #87CEEB

fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> ColoredString {
    text.truecolor(r, g, b)
}

pub fn rule(width: usize) -> ColoredString {
    paint(&"─".repeat(width), ACCENT_PURPLE)
}

pub fn box_separator(text: &str) -> ColoredString {
    paint(text, ACCENT_PURPLE_LIGHT)
}

/// Blanks (`.` or `0`) are dimmed, givens stand out.
pub fn cell(c: char) -> ColoredString {
    let s = c.to_string();
    if c == '.' || c == '0' {
        s.dimmed()
    } else {
        paint(&s, SKY_BLUE).bold()
    }
}
