//! エラーハンドリング
//!
//! seikei全体で使用される統一されたエラー型を定義。
//! 整形コマンドの失敗（非ゼロ終了・起動失敗）は呼び出し側で
//! 区別できるよう、明示的なバリアントとして表現する。

use thiserror::Error;

/// ライブラリ全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum SeikeiError {
    /// 整形コマンド実行エラー
    #[error("Format operation failed")]
    Format(#[from] FormatError),

    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),
}

/// 整形コマンド実行固有のエラー
#[derive(Error, Debug, Clone)]
pub enum FormatError {
    /// 外部コマンドは起動したが失敗を報告した
    ///
    /// `diagnostic`は標準エラー出力のバイト列そのまま。
    /// 位置抽出（`locate_issue`）の入力になる。
    #[error("Formatter exited with status {status}")]
    NonZeroExit { status: i32, diagnostic: Vec<u8> },

    /// 外部コマンドを起動できなかった（実行ファイル欠落・権限など）
    #[error("Failed to launch formatter `{program}`: {message}")]
    LaunchFailed { program: String, message: String },

    /// 外部コマンドが制限時間内に終了しなかった
    #[error("Formatter did not finish within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// コマンドテンプレートが空
    #[error("Formatter command is empty")]
    EmptyCommand,

    /// スクラッチファイルの読み書きに失敗
    #[error("Scratch file IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io {
            message: err.to_string(),
        }
    }
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid configuration file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
}

/// ライブラリ標準のResult型
pub type Result<T> = std::result::Result<T, SeikeiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display_includes_status() {
        let err = FormatError::NonZeroExit {
            status: 2,
            diagnostic: b"boom".to_vec(),
        };
        assert_eq!(err.to_string(), "Formatter exited with status 2");
    }

    #[test]
    fn io_error_converts_to_format_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = FormatError::from(io);
        assert!(matches!(err, FormatError::Io { .. }));
    }

    #[test]
    fn errors_wrap_into_seikei_error() {
        let err: SeikeiError = FormatError::EmptyCommand.into();
        assert!(matches!(err, SeikeiError::Format(FormatError::EmptyCommand)));

        let err: SeikeiError = ConfigError::NotFound {
            path: "formatters.json".to_string(),
        }
        .into();
        assert!(matches!(err, SeikeiError::Config(_)));
    }
}
