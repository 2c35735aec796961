//! CLI用プレビューバックエンド
//!
//! ブラウザのオブジェクトURLの代わりに、選択ファイルを開いたハンドルを保持する。

use spermvision_common::{PreviewBackend, SelectedFile};
use std::fs::File;
use std::path::{Path, PathBuf};

/// 開いているプレビューハンドル
#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    _file: File,
}

impl FileHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// ファイルを開いてハンドルを貸し出すバックエンド
#[derive(Debug, Default)]
pub struct FileHandleBackend {
    opened: usize,
    released: usize,
}

impl FileHandleBackend {
    pub fn opened(&self) -> usize {
        self.opened
    }

    pub fn released(&self) -> usize {
        self.released
    }

    /// 現在開いているハンドル数
    pub fn alive(&self) -> usize {
        self.opened - self.released
    }
}

impl PreviewBackend for FileHandleBackend {
    type Payload = PathBuf;
    type Handle = FileHandle;

    fn acquire(&mut self, file: &SelectedFile<PathBuf>) -> spermvision_common::Result<FileHandle> {
        let handle = File::open(file.payload())?;
        self.opened += 1;
        Ok(FileHandle {
            path: file.payload().clone(),
            _file: handle,
        })
    }

    fn release(&mut self, handle: FileHandle) {
        tracing::trace!(path = %handle.path.display(), "closing preview handle");
        self.released += 1;
        drop(handle);
    }
}
