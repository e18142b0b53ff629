//! 保存フック登録
//!
//! 「保存直前」イベントに対するフックの登録・解除・配信。
//! ホストアプリケーションは保存処理の直前に
//! `dispatch_before_save`を呼び、登録順（優先度順）に各フックへ
//! ドキュメントを渡す。

use crate::hook::document::HostDocument;
use crate::logging::Logger;
use std::time::Instant;

/// フックの一意識別子
pub type HookId = usize;

/// 保存前フック
pub trait SaveHook {
    /// 保存直前に呼ばれる
    fn on_before_save(&mut self, document: &mut dyn HostDocument);

    /// フックの優先度（大きいほど先に実行）
    fn priority(&self) -> i32 {
        0
    }
}

struct RegisteredHook {
    id: HookId,
    hook: Box<dyn SaveHook>,
}

/// 保存フックレジストリ
pub struct SaveHookRegistry {
    hooks: Vec<RegisteredHook>,
    next_id: HookId,
    dispatch_count: usize,
    logger: Logger,
}

impl SaveHookRegistry {
    /// ロガーを注入してレジストリを構築
    pub fn new(logger: Logger) -> Self {
        Self {
            hooks: Vec::new(),
            next_id: 0,
            dispatch_count: 0,
            logger,
        }
    }

    /// フックを登録し、解除用の識別子を返す
    pub fn register(&mut self, hook: Box<dyn SaveHook>) -> HookId {
        let id = self.next_id;
        self.next_id += 1;
        self.hooks.push(RegisteredHook { id, hook });
        // 優先度降順。同順位は登録順を保つ
        self.hooks
            .sort_by_key(|entry| std::cmp::Reverse(entry.hook.priority()));
        id
    }

    /// フックを解除する。識別子が未登録なら`false`
    pub fn unregister(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|entry| entry.id != id);
        self.hooks.len() != before
    }

    /// 登録済みフック数
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// フックが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// これまでの配信回数
    pub fn dispatch_count(&self) -> usize {
        self.dispatch_count
    }

    /// 保存直前イベントを全フックへ配信する
    pub fn dispatch_before_save(&mut self, document: &mut dyn HostDocument) {
        let started = Instant::now();

        for entry in &mut self.hooks {
            entry.hook.on_before_save(document);
        }

        self.dispatch_count += 1;
        self.logger.info(
            format!(
                "before-save hooks finished in {:.6}s",
                started.elapsed().as_secs_f64()
            ),
            Some("save_hook"),
        );
    }
}
