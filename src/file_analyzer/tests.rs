use super::*;
use std::fs;
use tempfile::TempDir;

fn create_test_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_category_from_extension() {
    assert_eq!(FileCategory::from_extension(Some("txt")), FileCategory::Text);
    assert_eq!(FileCategory::from_extension(Some("md")), FileCategory::Text);
    assert_eq!(FileCategory::from_extension(Some("pdf")), FileCategory::Pdf);
    assert_eq!(FileCategory::from_extension(Some("doc")), FileCategory::WordDoc);
    assert_eq!(FileCategory::from_extension(Some("docx")), FileCategory::WordDoc);
    assert_eq!(FileCategory::from_extension(Some("png")), FileCategory::Image);
    assert_eq!(FileCategory::from_extension(Some("jpeg")), FileCategory::Image);
    assert_eq!(FileCategory::from_extension(Some("tiff")), FileCategory::Image);
}

#[test]
fn test_category_is_case_insensitive() {
    assert_eq!(FileCategory::from_extension(Some("PDF")), FileCategory::Pdf);
    assert_eq!(FileCategory::from_extension(Some("Jpg")), FileCategory::Image);
    assert_eq!(FileCategory::from_extension(Some("TXT")), FileCategory::Text);
}

#[test]
fn test_unknown_extension_maps_to_binary() {
    assert_eq!(FileCategory::from_extension(Some("xyz")), FileCategory::Binary);
    assert_eq!(FileCategory::from_extension(Some("tar")), FileCategory::Binary);
    assert_eq!(FileCategory::from_extension(None), FileCategory::Binary);
}

#[test]
fn test_only_images_want_an_attachment() {
    assert!(FileCategory::Image.wants_attachment());
    assert!(!FileCategory::Text.wants_attachment());
    assert!(!FileCategory::Pdf.wants_attachment());
    assert!(!FileCategory::Binary.wants_attachment());
}

#[test]
fn test_analyze_text_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "test.txt", b"Hello, world!");

    let analyzed = AnalyzedFile::new(path.clone(), temp_dir.path()).unwrap();

    assert_eq!(analyzed.name, "test.txt");
    assert_eq!(analyzed.extension, Some("txt".to_string()));
    assert_eq!(analyzed.category, FileCategory::Text);
    assert_eq!(analyzed.size, 13);
    assert_eq!(analyzed.relative_path, PathBuf::from("test.txt"));
    assert_eq!(analyzed.path, path);
}

#[test]
fn test_relative_path_of_nested_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    let path = create_test_file(&temp_dir, "docs/notes.md", b"# Notes");

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.relative_path, PathBuf::from("docs/notes.md"));
    assert_eq!(analyzed.category, FileCategory::Text);
}

#[test]
fn test_text_content_is_returned_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let content = "Meeting notes\n\n- item one\n- item two\n";
    let path = create_test_file(&temp_dir, "minutes.txt", content.as_bytes());

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.extract_content(), content);
}

#[test]
fn test_empty_text_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "empty.txt", b"");

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.size, 0);
    assert_eq!(analyzed.extract_content(), "");
}

#[test]
fn test_image_yields_sentinel_text() {
    let temp_dir = TempDir::new().unwrap();
    // Content is irrelevant; images are never parsed for text.
    let path = create_test_file(&temp_dir, "photo.png", &[0x89, 0x50, 0x4E, 0x47]);

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.category, FileCategory::Image);
    assert_eq!(analyzed.extract_content(), IMAGE_SENTINEL);
}

#[test]
fn test_opaque_binary_yields_sentinel_text() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "blob.dat", &[0x00, 0xFF, 0x42, 0x13, 0x37]);

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.category, FileCategory::Binary);
    assert_eq!(analyzed.extract_content(), BINARY_SENTINEL);
}

#[test]
fn test_malformed_pdf_falls_back_to_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "broken.pdf", b"this is not a pdf at all");

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    // Must not panic or error, whatever pdf-extract does internally.
    assert_eq!(analyzed.extract_content(), PDF_FAILURE);
}

#[test]
fn test_malformed_word_doc_falls_back_to_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "broken.docx", b"not a zip archive");

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.extract_content(), WORD_FAILURE);
}

#[test]
fn test_non_utf8_text_file_falls_back_to_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "latin1.txt", &[0x68, 0xE9, 0x6C, 0x6C, 0x6F]);

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.extract_content(), TEXT_FAILURE);
}

#[test]
fn test_multi_part_extension_uses_last_part() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_file(&temp_dir, "archive.tar.gz", b"compressed data");

    let analyzed = AnalyzedFile::new(path, temp_dir.path()).unwrap();

    assert_eq!(analyzed.name, "archive.tar.gz");
    assert_eq!(analyzed.extension, Some("gz".to_string()));
    assert_eq!(analyzed.category, FileCategory::Binary);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.txt");

    assert!(AnalyzedFile::new(path, temp_dir.path()).is_err());
}
