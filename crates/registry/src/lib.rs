//! # Registry
//!
//! 参考协作者实现。
//!
//! 负责：
//! - `MemoryRegistry`：目的地与默认策略查询（读多写少）
//! - `MemoryAuditSink`：测试用内存审计日志
//! - `JsonlAuditSink`：JSON Lines 追加写审计日志

mod audit;
mod memory;

pub use audit::{JsonlAuditSink, MemoryAuditSink};
pub use memory::MemoryRegistry;
