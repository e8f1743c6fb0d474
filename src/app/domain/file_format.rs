use std::path::Path;

/// On-disk representation chosen for a document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// RTF, keeps run formatting.
    Styled,
    /// Newline-delimited characters, formatting discarded.
    PlainText,
}

impl FileFormat {
    /// Classify a path. Only the extension is looked at, never the content.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("rtf") => FileFormat::Styled,
            _ => FileFormat::PlainText,
        }
    }

    pub fn preserves_formatting(self) -> bool {
        matches!(self, FileFormat::Styled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Styled => "Styled",
            FileFormat::PlainText => "PlainText",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtf_is_styled() {
        assert_eq!(FileFormat::from_path(Path::new("/tmp/report.rtf")), FileFormat::Styled);
        assert_eq!(FileFormat::from_path(Path::new("REPORT.RTF")), FileFormat::Styled);
        assert!(FileFormat::Styled.preserves_formatting());
    }

    #[test]
    fn test_everything_else_is_plain() {
        for path in ["notes.txt", "README", "archive.rtf.bak", "main.rs", ".rtf"] {
            assert_eq!(
                FileFormat::from_path(Path::new(path)),
                FileFormat::PlainText,
                "{path}"
            );
        }
        assert!(!FileFormat::PlainText.preserves_formatting());
    }
}
