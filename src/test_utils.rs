//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use crate::input::inventory::{
    KeyEntry,
    KeyInventory,
};
use crate::markup::{
    ConversionError,
    MarkupConverter,
};

/// タグを取り除くだけの決定的なコンバーター
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TagStripConverter;

impl MarkupConverter for TagStripConverter {
    fn convert(&self, markup: &str) -> Result<String, ConversionError> {
        let mut text = String::new();
        let mut in_tag = false;
        for ch in markup.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }
        Ok(text.trim().to_string())
    }
}

/// 常に失敗するコンバーター
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingConverter;

impl MarkupConverter for FailingConverter {
    fn convert(&self, _markup: &str) -> Result<String, ConversionError> {
        Err(ConversionError::ConverterFailed)
    }
}

/// テスト用の `KeyInventory` を作成する
///
/// # Arguments
/// * `entries` - (キー, 原文, ページ一覧)
pub(crate) fn key_inventory(entries: &[(&str, &str, &[&str])]) -> KeyInventory {
    entries
        .iter()
        .map(|(key, original, pages)| {
            ((*key).to_string(), KeyEntry::new(*original, pages.iter().copied()))
        })
        .collect()
}
