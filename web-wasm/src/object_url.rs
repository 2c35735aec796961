//! オブジェクトURLによるプレビューバックエンド

use spermvision_common::{Error, PreviewBackend, Result, SelectedFile};
use web_sys::{File, Url};

/// `URL.createObjectURL` / `URL.revokeObjectURL` でプレビューURLを貸し出す
#[derive(Debug, Default)]
pub struct ObjectUrlBackend {
    live: usize,
}

impl ObjectUrlBackend {
    /// 失効していないURLの数
    pub fn live(&self) -> usize {
        self.live
    }
}

impl PreviewBackend for ObjectUrlBackend {
    type Payload = File;
    type Handle = String;

    fn acquire(&mut self, file: &SelectedFile<File>) -> Result<String> {
        let url = Url::create_object_url_with_blob(file.payload())
            .map_err(|e| Error::Preview(format!("{}: {:?}", file.name(), e)))?;
        self.live += 1;
        Ok(url)
    }

    fn release(&mut self, url: String) {
        if Url::revoke_object_url(&url).is_err() {
            gloo::console::warn!(format!("revokeObjectURL failed: {}", url));
        }
        self.live = self.live.saturating_sub(1);
    }
}
