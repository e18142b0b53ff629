//! 診断出力からの位置抽出
//!
//! 外部ツールのエラー出力は形式がまちまちなので、明示的な
//! 「line X, column Y」形式を優先し、コンパイラ風の「行:桁」表記に
//! フォールバックする2段のヒューリスティクスで推定する。
//! パターンは順序付きリストとして持ち、先頭から試して最初の一致を
//! 採用する。新しい診断形式はリストに追加するだけでよい。

use regex::bytes::{Captures, Regex};
use std::sync::OnceLock;

/// 診断位置
///
/// 外部ツールの報告どおりの1始まり。0始まりへの変換は
/// ホスト統合側（`hook`モジュール）の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticPosition {
    /// 行（1始まり）
    pub row: usize,
    /// 桁（1始まり）
    pub column: usize,
}

/// 位置抽出パターンの順序付きリスト
fn position_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            // 「line 10, column 5」形式。columnは同じ行内で省略可
            Regex::new(r"(?i)\bline (?P<line>\d+)(?:.*\bcolumn (?P<column>\d+))?")
                .expect("line/column pattern must compile"),
            // 「10:5」形式
            Regex::new(r"(?i)\b(?P<line>\d+):(?P<column>\d+)\b")
                .expect("row:col pattern must compile"),
        ]
    })
}

/// 診断バイト列からエラー位置を推定する
///
/// 一致がなければ`None`。これはエラーではなく通常の結果で、
/// 呼び出し側はカーソル移動なしの失敗として扱う。
/// 「行:桁」パターンはタイムスタンプ等の無関係な数字対に
/// 誤一致しうるが、既知のヒューリスティクス上の限界とする。
pub fn locate_issue(diagnostic: &[u8]) -> Option<DiagnosticPosition> {
    for pattern in position_patterns() {
        let Some(captures) = pattern.captures(diagnostic) else {
            continue;
        };
        let Some(row) = group_number(&captures, "line") else {
            continue;
        };
        // 行だけ報告するツールのために桁は1へ既定
        let column = group_number(&captures, "column").unwrap_or(1);
        return Some(DiagnosticPosition { row, column });
    }
    None
}

fn group_number(captures: &Captures<'_>, name: &str) -> Option<usize> {
    let group = captures.name(name)?;
    std::str::from_utf8(group.as_bytes()).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(row: usize, column: usize) -> Option<DiagnosticPosition> {
        Some(DiagnosticPosition { row, column })
    }

    #[test]
    fn finds_line_and_column_phrase() {
        assert_eq!(locate_issue(b"Error on line 10, column 5"), position(10, 5));
    }

    #[test]
    fn column_defaults_to_first() {
        assert_eq!(locate_issue(b"Error on line 7"), position(7, 1));
    }

    #[test]
    fn phrase_match_is_case_insensitive() {
        assert_eq!(
            locate_issue(b"SyntaxError: Line 3 Column 12"),
            position(3, 12)
        );
    }

    #[test]
    fn column_on_next_line_is_ignored() {
        // 「column」節は同じ行内でのみ結び付く
        assert_eq!(
            locate_issue(b"problem at line 4,\ncolumn 9 is irrelevant"),
            position(4, 1)
        );
    }

    #[test]
    fn falls_back_to_row_col_notation() {
        assert_eq!(locate_issue(b"syntax error at 3:12"), position(3, 12));
    }

    #[test]
    fn phrase_pattern_takes_precedence() {
        assert_eq!(
            locate_issue(b"12:34 mentioned, but line 2, column 6 is the issue"),
            position(2, 6)
        );
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(locate_issue(b"unexpected failure"), None);
        assert_eq!(locate_issue(b""), None);
    }

    #[test]
    fn non_utf8_diagnostics_are_searchable() {
        let mut diagnostic = vec![0xff, 0xfe];
        diagnostic.extend_from_slice(b" parse failed at 8:2");
        assert_eq!(locate_issue(&diagnostic), position(8, 2));
    }

    #[test]
    fn absurdly_large_numbers_do_not_match() {
        assert_eq!(locate_issue(b"at line 99999999999999999999999999"), None);
    }
}
