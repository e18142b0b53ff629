//! 整形コマンド設定
//!
//! シンタックス名ごとの整形コマンドテンプレートを管理する。
//! ホスト側の設定参照（「このドキュメントはどのコマンドで整形するか」）
//! に相当し、未設定は「何もしない」を意味する。

use crate::error::{ConfigError, Result, SeikeiError};
use crate::formatter::CommandTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 整形コマンド設定
///
/// JSON例:
///
/// ```json
/// {
///     "formatters": {
///         "Python": ["black", "-q", "$1.py"],
///         "JavaScript": ["~/.local/bin/prettier", "--write", "$1.js"]
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// シンタックス名 → コマンドトークン列
    #[serde(default)]
    formatters: HashMap<String, Vec<String>>,
}

impl FormatterConfig {
    /// 空の設定を構築
    pub fn new() -> Self {
        Self::default()
    }

    /// 既定の設定ファイルパス（ユーザ設定ディレクトリ配下）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seikei").join("formatters.json"))
    }

    /// JSONファイルから設定を読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(SeikeiError::Config(ConfigError::NotFound {
                path: path.display().to_string(),
            }));
        }

        let content = fs::read_to_string(path).map_err(|err| {
            SeikeiError::Config(ConfigError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            })
        })?;

        let config = serde_json::from_str(&content).map_err(|err| {
            SeikeiError::Config(ConfigError::Parse {
                path: path.display().to_string(),
                message: err.to_string(),
            })
        })?;

        Ok(config)
    }

    /// シンタックスにコマンドを登録
    pub fn set_formatter(&mut self, syntax: impl Into<String>, command: Vec<String>) {
        self.formatters.insert(syntax.into(), command);
    }

    /// 登録済みシンタックス数
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// 登録が1件もないかどうか
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// シンタックス用のコマンドテンプレートを返す
    ///
    /// 未設定・空リストは`None`（整形しないだけでエラーではない）。
    /// 先頭トークンはシェル風に展開する（`~`や環境変数）。
    pub fn command_for(&self, syntax: &str) -> Option<CommandTemplate> {
        let tokens = self.formatters.get(syntax)?;
        if tokens.is_empty() {
            log::warn!("formatter command for `{}` is empty, ignoring", syntax);
            return None;
        }

        let mut tokens = tokens.clone();
        if let Ok(expanded) = shellexpand::full(&tokens[0]) {
            tokens[0] = expanded.into_owned();
        }
        Some(CommandTemplate::new(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formatters_section() {
        let config: FormatterConfig = serde_json::from_str(
            r#"{"formatters": {"Python": ["black", "-q", "$1.py"]}}"#,
        )
        .unwrap();

        let template = config.command_for("Python").unwrap();
        assert_eq!(template.tokens(), ["black", "-q", "$1.py"]);
        assert_eq!(template.extension(), ".py");
    }

    #[test]
    fn missing_section_means_no_formatters() {
        let config: FormatterConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_empty());
        assert_eq!(config.command_for("Python"), None);
    }

    #[test]
    fn empty_command_list_is_treated_as_absent() {
        let mut config = FormatterConfig::new();
        config.set_formatter("Rust", vec![]);
        assert_eq!(config.command_for("Rust"), None);
    }

    #[test]
    fn program_token_is_shell_expanded() {
        let Some(home) = dirs::home_dir() else {
            return; // 展開先がなければ検証できない
        };

        let mut config = FormatterConfig::new();
        config.set_formatter(
            "Rust",
            vec!["~/bin/rustfmt".to_string(), "$1.rs".to_string()],
        );

        let template = config.command_for("Rust").unwrap();
        assert_eq!(
            template.program(),
            Some(home.join("bin/rustfmt").to_string_lossy().as_ref())
        );
        // 引数側のトークンは展開しない
        assert_eq!(template.tokens()[1], "$1.rs");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FormatterConfig::load(dir.path().join("nope.json"));
        assert!(matches!(
            result,
            Err(SeikeiError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn load_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formatters.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FormatterConfig::load(&path),
            Err(SeikeiError::Config(ConfigError::Parse { .. }))
        ));
    }

    #[test]
    fn load_round_trips_written_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formatters.json");

        let mut config = FormatterConfig::new();
        config.set_formatter("Markdown", vec!["mdfmt".to_string(), "$1.md".to_string()]);
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = FormatterConfig::load(&path).unwrap();
        assert_eq!(
            loaded.command_for("Markdown").unwrap().tokens(),
            ["mdfmt", "$1.md"]
        );
    }
}
