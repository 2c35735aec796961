//! SpermVision AI CLI
//!
//! 共通コア（spermvision-common）の状態機械を、ディスク上のファイルに対して動かす。

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod preview;
pub mod report;
pub mod runner;
pub mod screen;
