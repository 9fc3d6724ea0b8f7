//! File intake: what counts as a selectable document.

use std::path::{Path, PathBuf};

use crate::CoreError;

/// Size shown as the upload limit. Not enforced; larger files are flagged only.
pub const ADVISORY_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// A PDF chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    /// Validate a single path and capture its name and size.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        if !is_pdf_path(path) {
            return Err(CoreError::NotPdf {
                path: path.to_path_buf(),
            });
        }
        let meta = std::fs::metadata(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(CoreError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }

    /// Size in megabytes with two decimals, e.g. `"1.50 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }

    pub fn exceeds_advisory_limit(&self) -> bool {
        self.size > ADVISORY_MAX_BYTES
    }

    /// Read the whole file for upload.
    pub async fn read(&self) -> Result<Vec<u8>, CoreError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| CoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// True if the path has a `.pdf` extension (any case).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Accept exactly one PDF out of a selection. Several paths reject the whole
/// selection, like a drop zone limited to one file.
pub fn select_one(paths: &[PathBuf]) -> Result<SelectedFile, CoreError> {
    match paths {
        [] => Err(CoreError::NoFile),
        [path] => SelectedFile::from_path(path),
        _ => Err(CoreError::MultipleFiles { count: paths.len() }),
    }
}

/// Split pasted text into paths.
///
/// Terminals paste dropped files as shell-quoted paths (`'/a b.pdf'`,
/// `/a\ b.pdf`) or `file://` URLs, separated by whitespace or newlines.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        paths.push(to_path(&current));
                        current.clear();
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        paths.push(to_path(&current));
    }
    paths
}

fn to_path(token: &str) -> PathBuf {
    match token.strip_prefix("file://") {
        Some(rest) => {
            let decoded = urlencoding::decode_binary(rest.as_bytes());
            PathBuf::from(String::from_utf8_lossy(&decoded).into_owned())
        }
        None => PathBuf::from(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_pdf(bytes: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&vec![b'x'; bytes]).unwrap();
        file
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(is_pdf_path(Path::new("paper.pdf")));
        assert!(is_pdf_path(Path::new("PAPER.PDF")));
        assert!(!is_pdf_path(Path::new("paper.docx")));
        assert!(!is_pdf_path(Path::new("pdf")));
    }

    #[test]
    fn from_path_captures_name_and_size() {
        let file = temp_pdf(1536);
        let selected = SelectedFile::from_path(file.path()).unwrap();
        assert_eq!(selected.size, 1536);
        assert!(selected.name.ends_with(".pdf"));
        assert!(!selected.exceeds_advisory_limit());
    }

    #[test]
    fn non_pdf_is_rejected_before_touching_disk() {
        let err = SelectedFile::from_path(Path::new("/nonexistent/notes.txt")).unwrap_err();
        assert!(matches!(err, CoreError::NotPdf { .. }));
    }

    #[test]
    fn missing_pdf_is_an_io_error() {
        let err = SelectedFile::from_path(Path::new("/nonexistent/paper.pdf")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn size_label_uses_two_decimals() {
        let file = SelectedFile {
            path: PathBuf::from("a.pdf"),
            name: "a.pdf".into(),
            size: 1_572_864,
        };
        assert_eq!(file.size_label(), "1.50 MB");
    }

    #[test]
    fn oversized_file_is_flagged_but_accepted() {
        let file = SelectedFile {
            path: PathBuf::from("big.pdf"),
            name: "big.pdf".into(),
            size: ADVISORY_MAX_BYTES + 1,
        };
        assert!(file.exceeds_advisory_limit());
    }

    #[test]
    fn select_one_rejects_multiple_files() {
        let a = temp_pdf(10);
        let b = temp_pdf(10);
        let err = select_one(&[a.path().to_path_buf(), b.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, CoreError::MultipleFiles { count: 2 }));
        assert!(matches!(select_one(&[]), Err(CoreError::NoFile)));
        assert!(select_one(&[a.path().to_path_buf()]).is_ok());
    }

    #[test]
    fn parse_dropped_paths_handles_quotes_and_escapes() {
        let paths = parse_dropped_paths("'/tmp/my paper.pdf'");
        assert_eq!(paths, vec![PathBuf::from("/tmp/my paper.pdf")]);

        let paths = parse_dropped_paths("/tmp/my\\ paper.pdf\n");
        assert_eq!(paths, vec![PathBuf::from("/tmp/my paper.pdf")]);

        let paths = parse_dropped_paths("\"/a.pdf\" /b.pdf");
        assert_eq!(paths, vec![PathBuf::from("/a.pdf"), PathBuf::from("/b.pdf")]);
    }

    #[test]
    fn parse_dropped_paths_decodes_file_urls() {
        let paths = parse_dropped_paths("file:///home/me/my%20paper.pdf");
        assert_eq!(paths, vec![PathBuf::from("/home/me/my paper.pdf")]);
    }

    #[test]
    fn file_urls_decode_utf8_and_trailing_escapes() {
        let paths = parse_dropped_paths("file:///tmp/r%C3%A9sum%C3%A9%2B.pdf file:///tmp/a%41");
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/résumé+.pdf"), PathBuf::from("/tmp/aA")]
        );
    }

    #[test]
    fn parse_dropped_paths_ignores_blank_input() {
        assert!(parse_dropped_paths("  \n ").is_empty());
    }
}
