//! 记录标识生成器
//!
//! 伙伴、阶梯等记录的 id 由调用方注入的生成器产生，核心不持有全局计数器。

use chrono::Utc;

/// 记录 id 来源
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// 顺序计数: `id_0`, `id_1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("id")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// 时间戳 + 计数: `id_<unix 毫秒>_<n>`
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    counter: u64,
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        let id = format!("id_{}_{}", Utc::now().timestamp_millis(), self.counter);
        self.counter += 1;
        id
    }
}
