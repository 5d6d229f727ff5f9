//! Validation rules backing the HTTP surface.

/// Validates a download file name.
///
/// Requirements:
/// - Base name of letters, digits, underscores, and hyphens
/// - At most one dot, followed by an alphanumeric extension
///
/// Anything containing path separators, parent-directory components,
/// or a second dot fails, so the download handler never resolves a
/// path outside the upload directory.
pub fn is_safe_download_filename(filename: &str) -> bool {
    let (stem, extension) = match filename.split_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (filename, None),
    };

    if stem.is_empty()
        || !stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return false;
    }

    match extension {
        None => true,
        Some(extension) => {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_accepts_generated_names() {
        assert!(is_safe_download_filename("1718443200123-913467281.pdf"));
        assert!(is_safe_download_filename("report_v2.PNG"));
        assert!(is_safe_download_filename("noextension"));
    }

    #[test]
    fn filename_rejects_path_separators() {
        assert!(!is_safe_download_filename("a/b.pdf"));
        assert!(!is_safe_download_filename("..\\secret.pdf"));
        assert!(!is_safe_download_filename("/etc/passwd"));
    }

    #[test]
    fn filename_rejects_parent_components() {
        assert!(!is_safe_download_filename("../../etc/passwd"));
        assert!(!is_safe_download_filename(".."));
    }

    #[test]
    fn filename_rejects_multiple_dots_and_hidden_files() {
        assert!(!is_safe_download_filename("archive.tar.gz"));
        assert!(!is_safe_download_filename(".env"));
        assert!(!is_safe_download_filename("file."));
    }

    #[test]
    fn filename_rejects_empty_and_spaces() {
        assert!(!is_safe_download_filename(""));
        assert!(!is_safe_download_filename("my file.pdf"));
    }
}
