//! 保存時整形フック
//!
//! 設定参照 → 外部コマンド実行 → 置換と状態復元（または
//! 診断位置へのカーソル移動）までを束ねる、組み込みの保存前フック。

use crate::config::FormatterConfig;
use crate::error::FormatError;
use crate::formatter::{format_text_with, locate_issue, InvokeOptions};
use crate::hook::document::{CursorPosition, HostDocument};
use crate::hook::registry::SaveHook;
use crate::logging::Logger;
use std::collections::HashSet;

/// 保存時整形フック
///
/// ドキュメントのシンタックスに整形コマンドが設定されていれば
/// 全文を整形する。未設定なら何もしない。
///
/// * 成功: 全文を整形結果で置き換え、カーソルとビューポートを復元
/// * 非ゼロ終了: 本文は一切変更せず、診断出力から位置が取れれば
///   カーソルをそこへ移動（1始まり→0始まりの変換はここで行う）
/// * それ以外の失敗: 本文は変更せずログに残すのみ
pub struct FormatOnSave {
    config: FormatterConfig,
    options: InvokeOptions,
    logger: Logger,
    /// 整形実行中のドキュメント識別子。同一ドキュメントへの
    /// 再入（保存中の保存）を拒否するためのガード
    in_flight: HashSet<usize>,
}

impl FormatOnSave {
    /// 設定とロガーからフックを構築
    pub fn new(config: FormatterConfig, logger: Logger) -> Self {
        Self {
            config,
            options: InvokeOptions::default(),
            logger,
            in_flight: HashSet::new(),
        }
    }

    /// 実行オプション（タイムアウト等）を設定
    pub fn with_options(mut self, options: InvokeOptions) -> Self {
        self.options = options;
        self
    }

    /// 現在の設定への参照
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// 設定を差し替える（ホストの設定再読み込み用）
    pub fn set_config(&mut self, config: FormatterConfig) {
        self.config = config;
    }

    fn format_document(&mut self, document: &mut dyn HostDocument) {
        let Some(syntax) = document.syntax() else {
            return;
        };
        let Some(template) = self.config.command_for(&syntax) else {
            return;
        };

        let id = document.id();
        if !self.in_flight.insert(id) {
            self.logger.warning(
                format!("format already in flight for document {}, skipping", id),
                Some("format_on_save"),
            );
            return;
        }

        let text = document.text();
        match format_text_with(&text, &template, &self.options) {
            Ok(formatted) => {
                let cursor = document.cursor();
                let viewport = document.viewport();
                document.replace_text(&formatted);
                document.set_cursor(cursor);
                document.set_viewport(viewport);
            }
            Err(FormatError::NonZeroExit { status, diagnostic }) => {
                self.logger.error(
                    format!(
                        "formatter exited with status {}: {}",
                        status,
                        String::from_utf8_lossy(&diagnostic).trim_end()
                    ),
                    Some("format_on_save"),
                );
                if let Some(position) = locate_issue(&diagnostic) {
                    document.set_cursor(CursorPosition {
                        row: position.row.saturating_sub(1),
                        column: position.column.saturating_sub(1),
                    });
                }
            }
            Err(err) => {
                self.logger
                    .error(format!("formatter failed: {}", err), Some("format_on_save"));
            }
        }

        self.in_flight.remove(&id);
    }
}

impl SaveHook for FormatOnSave {
    fn on_before_save(&mut self, document: &mut dyn HostDocument) {
        self.format_document(document);
    }
}
