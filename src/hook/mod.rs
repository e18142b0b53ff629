//! ホスト統合モジュール
//!
//! 保存イベントフックの登録・配信と、ホストエディタが実装する
//! ドキュメント境界。整形コア自体は(テキスト, コマンド)→結果の
//! 純粋な関数であり、エディタ固有の操作はすべてここを経由する。

pub mod document;
pub mod format_on_save;
pub mod registry;

// 公開API
pub use document::{CursorPosition, HostDocument, ViewportPosition};
pub use format_on_save::FormatOnSave;
pub use registry::{HookId, SaveHook, SaveHookRegistry};
