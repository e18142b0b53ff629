//! seikei - 保存時整形エンジン
//!
//! 外部の整形コマンドにドキュメント全文を委譲するライブラリ。
//! ホストエディタの「保存直前」イベントからフック経由で呼び出し、
//! 成功時はバッファを整形結果で置き換え、失敗時は診断出力から
//! エラー位置を推定してカーソル移動を依頼する。
//!
//! 設定例（`formatters.json`）:
//!
//! ```json
//! {
//!     "formatters": {
//!         "JavaScript": ["/usr/local/bin/prettier", "--write", "$1.js"]
//!     }
//! }
//! ```
//!
//! `$1.拡張子` のトークンは、整形対象のテキストを書き込んだ
//! 一時ファイルのパスに置換される。

// コアモジュール
pub mod error;
pub mod logging;

// 整形エンジン
pub mod formatter;

// 設定層
pub mod config;

// ホスト統合層
pub mod hook;

// 公開API
pub use config::FormatterConfig;
pub use error::{ConfigError, FormatError, Result, SeikeiError};
pub use formatter::{
    format_text, format_text_with, locate_issue, CommandTemplate, DiagnosticPosition,
    InvokeOptions,
};
pub use hook::{
    CursorPosition, FormatOnSave, HookId, HostDocument, SaveHook, SaveHookRegistry,
    ViewportPosition,
};
pub use logging::{LogLevel, Logger};
