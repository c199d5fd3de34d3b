pub struct Chunker;

impl Chunker {
    /// Side length of the square grid for a puzzle string of `len` characters.
    pub fn chunk_size(len: usize) -> usize {
        len.isqrt()
    }

    /// Splits `text` into consecutive pieces of `size` characters. The last
    /// piece may be shorter; an empty `text` gives no pieces.
    pub fn chunk(text: &str, size: usize) -> Vec<&str> {
        assert!(size > 0, "chunk size must be positive");

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (offset, _) in text.char_indices() {
            if count == size {
                chunks.push(&text[start..offset]);
                start = offset;
                count = 0;
            }
            count += 1;
        }
        if count > 0 {
            chunks.push(&text[start..]);
        }
        chunks
    }

    pub fn format_puzzle(text: &str, size: usize) -> String {
        Self::chunk(text, size).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_is_integer_sqrt() {
        assert_eq!(Chunker::chunk_size(81), 9);
        assert_eq!(Chunker::chunk_size(4), 2);
        assert_eq!(Chunker::chunk_size(5), 2);
        assert_eq!(Chunker::chunk_size(8), 2);
        assert_eq!(Chunker::chunk_size(0), 0);
    }

    #[test]
    fn test_format_square_puzzle() {
        assert_eq!(Chunker::format_puzzle("abcdefghi", 3), "abc\ndef\nghi");
        assert_eq!(Chunker::format_puzzle("1234", 2), "12\n34");
    }

    #[test]
    fn test_short_final_chunk_is_not_padded() {
        assert_eq!(Chunker::format_puzzle("abcde", 2), "ab\ncd\ne");
        assert_eq!(Chunker::chunk("abcde", 2), vec!["ab", "cd", "e"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(Chunker::chunk("", 3).is_empty());
        assert_eq!(Chunker::format_puzzle("", 3), "");
    }

    #[test]
    fn test_multibyte_chars_stay_whole() {
        assert_eq!(Chunker::chunk("αβγδ", 2), vec!["αβ", "γδ"]);
    }

    #[test]
    fn test_removing_newlines_restores_input() {
        let line = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let formatted = Chunker::format_puzzle(line, Chunker::chunk_size(line.len()));
        assert_eq!(formatted.replace('\n', ""), line);
        assert_eq!(formatted.lines().count(), 9);
        assert!(formatted.lines().all(|row| row.len() == 9));
    }
}
