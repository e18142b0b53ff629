//! 整形コマンドテンプレート
//!
//! 設定された引数リストと、スクラッチファイルのパスに置き換える
//! プレースホルダトークン（`$1.拡張子`）の取り扱い。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// プレースホルダトークンのパターン
///
/// トークン全体が `$1` + 拡張子（ASCII）のときだけスロットとみなす。
/// `$1`単体や途中に`$1`を含むトークンはスロットではない。
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\$1(\.[0-9A-Za-z_]+)$").expect("placeholder pattern must compile")
    })
}

/// 整形コマンドテンプレート
///
/// 実行ファイルと引数の順序付きリスト。高々1つのトークンが
/// プレースホルダ（置換スロット）で、それ以外はそのまま渡される。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate {
    tokens: Vec<String>,
}

impl CommandTemplate {
    /// トークン列からテンプレートを構築
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// トークン列を返す
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// トークンが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 実行ファイル名（先頭トークン）
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// プレースホルダトークンから拡張子を抽出
    ///
    /// `"$1.py"` なら `".py"`。スロットがなければ空文字列。
    /// 拡張子つきのスクラッチファイルを作ることで、拡張子で挙動を
    /// 変える整形コマンドにも正しく働かせる。
    pub fn extension(&self) -> String {
        for token in &self.tokens {
            if let Some(captures) = placeholder_pattern().captures(token) {
                return captures[1].to_string();
            }
        }
        String::new()
    }

    /// プレースホルダをスクラッチファイルのパスに置換した引数リストを構築
    ///
    /// 置換されるのは最初のスロットだけ。スロット以外のトークンは
    /// 変更せずそのまま通す。スロットがない場合はパスは注入されない
    /// （設定側の問題であり、実行時エラーにはしない）。
    pub fn materialize(&self, path: &Path) -> Vec<String> {
        let mut substituted = false;
        self.tokens
            .iter()
            .map(|token| {
                if !substituted && placeholder_pattern().is_match(token) {
                    substituted = true;
                    path.to_string_lossy().into_owned()
                } else {
                    token.clone()
                }
            })
            .collect()
    }
}

impl From<Vec<String>> for CommandTemplate {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> FromIterator<&'a str> for CommandTemplate {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(str::to_string).collect())
    }
}
