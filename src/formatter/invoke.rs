//! 整形コマンド実行
//!
//! ドキュメント全文をスクラッチファイルに書き出し、プレースホルダを
//! そのパスに置換した外部コマンドを同期実行する。外部コマンドは
//! ファイルをその場で書き換えて終了コード0を返す規約
//! （in-place編集プロトコル）。標準出力は結果として扱わない。

use crate::error::FormatError;
use crate::formatter::template::CommandTemplate;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// タイムアウト監視時のポーリング間隔
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// 実行オプション
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// 外部コマンドの最大実行時間。`None`なら従来どおり無制限に待つ
    pub timeout: Option<Duration>,
}

/// 外部整形コマンドを実行し、整形後のテキストを返す
///
/// 終了コードが0以外なら`FormatError::NonZeroExit`として標準エラー
/// 出力をそのまま保持する。スクラッチファイルはどの経路でも必ず
/// 削除される。
pub fn format_text(text: &str, template: &CommandTemplate) -> Result<String, FormatError> {
    format_text_with(text, template, &InvokeOptions::default())
}

/// オプション付きで外部整形コマンドを実行する
pub fn format_text_with(
    text: &str,
    template: &CommandTemplate,
    options: &InvokeOptions,
) -> Result<String, FormatError> {
    if template.is_empty() {
        return Err(FormatError::EmptyCommand);
    }

    let scratch = ScratchFile::create(text, &template.extension())?;
    let argv = template.materialize(scratch.path());

    let output = run_command(&argv, options)?;
    if !output.status.success() {
        log::info!("formatter command failed: {:?}", argv);
        return Err(FormatError::NonZeroExit {
            status: output.status.code().unwrap_or(-1),
            diagnostic: output.stderr,
        });
    }

    // 外部コマンドがその場で書き換えたファイルを読み戻す
    scratch.read()
}

/// スクラッチファイル
///
/// 1回の整形サイクルの間だけ存在する一意な名前の一時ファイル。
/// Dropで必ず削除する。外部コマンドが先に削除・リネームしていた
/// 場合は何もしない。削除失敗は元のエラーを隠さないようログに残す。
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// テキストを書き込んだスクラッチファイルを作成
    ///
    /// 子プロセスが不完全な内容を読まないよう、書き込みと
    /// クローズを終えてからパスを公開する。
    fn create(text: &str, suffix: &str) -> Result<Self, FormatError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("seikei-");
        if !suffix.is_empty() {
            builder.suffix(suffix);
        }

        let file = builder.tempfile()?;
        let (mut handle, path) = file.keep().map_err(|err| FormatError::from(err.error))?;
        let scratch = Self { path };

        handle.write_all(text.as_bytes())?;
        handle.flush()?;
        drop(handle);

        Ok(scratch)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, FormatError> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.path.is_file() {
            if let Err(err) = fs::remove_file(&self.path) {
                log::warn!(
                    "Failed to remove scratch file {}: {}",
                    self.path.display(),
                    err
                );
            }
        }
    }
}

/// 引数リストを子プロセスとして実行し、終了まで待つ
///
/// 標準入出力はすべてパイプにする。入力は使わないため即座に
/// クローズし、端末からの読み取りでブロックさせない。
fn run_command(argv: &[String], options: &InvokeOptions) -> Result<Output, FormatError> {
    let (program, args) = argv.split_first().ok_or(FormatError::EmptyCommand)?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| FormatError::LaunchFailed {
            program: program.clone(),
            message: err.to_string(),
        })?;

    drop(child.stdin.take());

    match options.timeout {
        None => Ok(child.wait_with_output()?),
        Some(timeout) => wait_with_deadline(child, timeout),
    }
}

/// 制限時間つきで子プロセスの終了を待つ
///
/// パイプ詰まりで子プロセスが止まらないよう、出力は別スレッドで
/// 吸い出しながら`try_wait`をポーリングする。期限超過時はkillする。
fn wait_with_deadline(mut child: Child, timeout: Duration) -> Result<Output, FormatError> {
    let stdout_reader = spawn_drain(child.stdout.take());
    let stderr_reader = spawn_drain(child.stderr.take());
    let deadline = Instant::now() + timeout;

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FormatError::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(err) => return Err(FormatError::from(err)),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn spawn_drain<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut source) = source {
            let _ = source.read_to_end(&mut buffer);
        }
        buffer
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_template_is_rejected() {
        let result = format_text("text", &CommandTemplate::default());
        assert!(matches!(result, Err(FormatError::EmptyCommand)));
    }

    #[test]
    fn scratch_file_applies_suffix_and_cleans_up() {
        let path = {
            let scratch = ScratchFile::create("body", ".py").unwrap();
            assert_eq!(
                scratch.path().extension(),
                Some(std::ffi::OsStr::new("py"))
            );
            assert_eq!(fs::read_to_string(scratch.path()).unwrap(), "body");
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn scratch_file_tolerates_external_removal() {
        let scratch = ScratchFile::create("body", "").unwrap();
        fs::remove_file(scratch.path()).unwrap();
        drop(scratch);
    }

    #[test]
    fn scratch_paths_are_unique() {
        let first = ScratchFile::create("a", ".txt").unwrap();
        let second = ScratchFile::create("b", ".txt").unwrap();
        assert_ne!(first.path(), second.path());
    }
}
