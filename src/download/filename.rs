//! Download target paths: `<root>/<title>/chapter_<n>/image_<i>.jpg`.
//!
//! Title and chapter labels come from remote pages, so each one is
//! sanitized into a single safe path component before it is joined.

use std::path::{Component, Path, PathBuf};

use crate::chapter::ChapterNumber;

/// Replaces characters that are unsafe in a single path component.
///
/// Path separators, `: * ? " < > |` and control characters become `_`.
/// A result that would be empty or resolve to `.`/`..` becomes `_`.
#[must_use]
pub fn sanitize_path_component(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || !is_normal_component(&sanitized) {
        return "_".to_string();
    }
    sanitized
}

fn is_normal_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Directory holding one chapter's images.
#[must_use]
pub fn chapter_directory(output_root: &Path, title: &str, chapter: ChapterNumber) -> PathBuf {
    output_root
        .join(sanitize_path_component(title))
        .join(sanitize_path_component(&format!("chapter_{chapter}")))
}

/// File name for the image at zero-based `index` in the chapter listing.
#[must_use]
pub fn image_file_name(index: usize) -> String {
    format!("image_{index}.jpg")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_titles_verbatim() {
        assert_eq!(sanitize_path_component("One Piece"), "One Piece");
        assert_eq!(
            sanitize_path_component("Kaguya-sama wa Kokurasetai"),
            "Kaguya-sama wa Kokurasetai"
        );
    }

    #[test]
    fn test_sanitize_replaces_separators_and_reserved_chars() {
        assert_eq!(sanitize_path_component("Fate/Zero"), "Fate_Zero");
        assert_eq!(sanitize_path_component("a\\b"), "a_b");
        assert_eq!(sanitize_path_component("Re:Zero?"), "Re_Zero_");
        assert_eq!(sanitize_path_component("x\0y"), "x_y");
    }

    #[test]
    fn test_sanitize_rejects_dot_components() {
        assert_eq!(sanitize_path_component(".."), "_");
        assert_eq!(sanitize_path_component("."), "_");
        assert_eq!(sanitize_path_component("   "), "_");
        assert_eq!(sanitize_path_component(""), "_");
    }

    #[test]
    fn test_sanitize_neutralizes_traversal() {
        let name = sanitize_path_component("../../etc");
        assert!(!name.contains('/'));
        assert_eq!(name, ".._.._etc");
    }

    #[test]
    fn test_chapter_directory_layout() {
        let chapter: ChapterNumber = "10.50".parse().unwrap();
        let dir = chapter_directory(Path::new("out"), "One Piece", chapter);
        assert_eq!(dir, Path::new("out").join("One Piece").join("chapter_10.5"));
    }

    #[test]
    fn test_chapter_directory_stays_under_root() {
        let chapter: ChapterNumber = "1".parse().unwrap();
        let dir = chapter_directory(Path::new("out"), "..", chapter);
        assert!(dir.starts_with("out"));
        assert!(!dir.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_image_file_name_uses_index() {
        assert_eq!(image_file_name(0), "image_0.jpg");
        assert_eq!(image_file_name(12), "image_12.jpg");
    }
}
