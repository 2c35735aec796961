//! ディスク上のメディアファイルの読み込みと走査

use crate::error::{Result, VisionError};
use spermvision_common::SelectedFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// CLIで扱う選択ファイル（ペイロードはパス）
pub type DiskFile = SelectedFile<PathBuf>;

const VIDEO_EXTENSIONS: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
];

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// 不明な拡張子のMIMEタイプ
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// 拡張子からMIMEタイプを推定（大文字小文字は区別しない）
pub fn mime_from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
        return UNKNOWN_MIME;
    };

    VIDEO_EXTENSIONS
        .iter()
        .chain(IMAGE_EXTENSIONS)
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(UNKNOWN_MIME)
}

/// パスから選択ファイルを作る（種別は問わない）
pub fn load_file(path: &Path) -> Result<DiskFile> {
    if !path.is_file() {
        return Err(VisionError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SelectedFile::new(file_name, size, mime_from_path(path), path.to_path_buf()))
}

/// フォルダ内の動画・画像を列挙（ファイル名順）
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<DiskFile>> {
    if !folder.is_dir() {
        return Err(VisionError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file = load_file(path)?;
        if file.category().is_some() {
            files.push(file);
        } else {
            tracing::debug!(path = %path.display(), "skipped non-media file");
        }
    }

    files.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spermvision_common::MediaCategory;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("a.mp4")), "video/mp4");
        assert_eq!(mime_from_path(Path::new("a.AVI")), "video/x-msvideo");
        assert_eq!(mime_from_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_from_path(Path::new("a.txt")), UNKNOWN_MIME);
        assert_eq!(mime_from_path(Path::new("Makefile")), UNKNOWN_MIME);
    }

    #[test]
    fn test_load_file_reads_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.mp4");
        File::create(&path).unwrap().write_all(&[0u8; 2048]).unwrap();

        let file = load_file(&path).unwrap();
        assert_eq!(file.name(), "sample.mp4");
        assert_eq!(file.size(), 2048);
        assert_eq!(file.category(), Some(MediaCategory::Video));
        assert_eq!(file.payload(), &path);
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_file(Path::new("/nonexistent/sample.mp4"));
        assert!(matches!(result, Err(VisionError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.png")).unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("b.JPG")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("d.webm")).unwrap();

        let flat = scan_folder(dir.path(), false).unwrap();
        let names: Vec<&str> = flat.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a.mp4", "b.JPG", "c.png"]);

        let deep = scan_folder(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 4);
        assert_eq!(deep[3].name(), "d.webm");
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(VisionError::FolderNotFound(_))));
    }
}
