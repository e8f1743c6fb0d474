use std::path::Path;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Convert a character offset into a byte offset within `text`.
///
/// Offsets past the end clamp to `text.len()`.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Convert a byte offset into a character offset within `text`.
///
/// Used by the editor widget bridge, whose positions are bytes. A byte
/// offset inside a multi-byte character counts that character as before it.
pub fn byte_to_char(text: &str, byte_offset: usize) -> usize {
    text.char_indices()
        .take_while(|(byte, _)| *byte < byte_offset)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename(Path::new("/home/user/draft.rtf")), "draft.rtf");
        assert_eq!(extract_filename(Path::new("/home/user/notes.txt")), "notes.txt");
        assert_eq!(extract_filename(Path::new("report")), "report");
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename(Path::new("/")), "Unknown");
        assert_eq!(extract_filename(Path::new("")), "Unknown");
    }

    #[test]
    fn test_char_to_byte() {
        assert_eq!(char_to_byte("abc", 0), 0);
        assert_eq!(char_to_byte("abc", 3), 3);
        assert_eq!(char_to_byte("abc", 10), 3);
        assert_eq!(char_to_byte("héllo", 2), 3);
    }

    #[test]
    fn test_byte_to_char() {
        assert_eq!(byte_to_char("héllo", 0), 0);
        assert_eq!(byte_to_char("héllo", 3), 2);
        assert_eq!(byte_to_char("héllo", 100), 5);
    }
}
