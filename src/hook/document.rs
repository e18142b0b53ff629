//! ホストドキュメント境界
//!
//! ホストエディタが実装する最小限のドキュメント操作。
//! 行・桁はホストAPI準拠の0始まりとし、外部ツールの1始まり座標
//! からの変換はフック側で済ませてから渡す。

/// カーソル位置（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub row: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// ビューポート位置（スクロールオフセット）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportPosition {
    pub x: f64,
    pub y: f64,
}

/// ホスト側ドキュメント操作のトレイト
///
/// 保存フックが必要とする操作だけに絞った狭いインタフェース。
pub trait HostDocument {
    /// ドキュメントの一意識別子
    ///
    /// 同一ドキュメントへの整形の多重起動を防ぐ鍵として使う。
    fn id(&self) -> usize;

    /// シンタックス名（設定参照のキー）。不明なら`None`
    fn syntax(&self) -> Option<String>;

    /// ドキュメント全文
    fn text(&self) -> String;

    /// ドキュメント全文を置き換える
    fn replace_text(&mut self, text: &str);

    /// 現在のカーソル位置
    fn cursor(&self) -> CursorPosition;

    /// カーソルを移動する
    fn set_cursor(&mut self, position: CursorPosition);

    /// 現在のビューポート位置
    fn viewport(&self) -> ViewportPosition;

    /// ビューポートを移動する
    fn set_viewport(&mut self, position: ViewportPosition);
}
