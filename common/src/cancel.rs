//! 解析タスクのキャンセルトークン

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 共有キャンセルフラグ（クローンはすべて同じフラグを指す）
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
