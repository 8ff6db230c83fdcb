//! String padding helpers for table and help output.

use crate::constants::{CAPTION_UNDERLINE, PAD_CHAR};

/// Pads `text` to `size` characters. Padding goes after the text unless
/// `before` is set.
pub fn pad(text: &str, size: usize, before: bool, pad_char: char) -> String {
    if text.len() >= size {
        return text.to_string();
    }
    let padding: String = std::iter::repeat(pad_char).take(size - text.len()).collect();
    if before {
        format!("{}{}", padding, text)
    } else {
        format!("{}{}", text, padding)
    }
}

/// Pads `text` from the left to `size` characters
pub fn lpad(text: &str, size: usize) -> String {
    pad(text, size, true, PAD_CHAR)
}

/// Pads `text` from the right to `size` characters
pub fn rpad(text: &str, size: usize) -> String {
    pad(text, size, false, PAD_CHAR)
}

/// Prints a caption with an underline to stdout
pub fn print_caption(name: &str) {
    println!("\n{}\n{}\n", name, CAPTION_UNDERLINE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpad() {
        assert_eq!(rpad("abc", 5), "abc  ");
        assert_eq!(rpad("abcdef", 5), "abcdef");
    }

    #[test]
    fn test_lpad() {
        assert_eq!(lpad("abc", 5), "  abc");
        assert_eq!(lpad("", 3), "   ");
    }

    #[test]
    fn test_pad_custom_char() {
        assert_eq!(pad("7", 3, true, '0'), "007");
    }
}
