//! 整形エンジンモジュール
//!
//! 外部整形コマンドの呼び出しと、診断出力からの位置抽出

pub mod invoke;
pub mod locator;
pub mod template;

// 公開API
pub use invoke::{format_text, format_text_with, InvokeOptions};
pub use locator::{locate_issue, DiagnosticPosition};
pub use template::CommandTemplate;
