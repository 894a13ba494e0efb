//! rosey-sync
//!
//! 静的サイトの翻訳作業ファイル（ロケールごとの YAML）をキー・ページ一覧と同期する

pub mod config;
pub mod error;
pub mod input;
pub mod markup;
pub mod paths;
pub mod sync;

#[cfg(test)]
mod test_utils;

pub use error::SyncError;
pub use sync::{
    Orchestrator,
    SyncReport,
};
