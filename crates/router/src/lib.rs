//! # Router
//!
//! 事件路由核心。
//!
//! 负责：
//! - 策略求值（封闭枚举 + 注册谓词，不执行任何调用方代码）
//! - 按请求编排：校验 → 策略解析 → 求值 → 逐目的地分发 → 汇总 → 审计
//! - 隔离每个目的地的失败，保证完整的 outcome map

pub mod router;
pub mod strategy;

pub use router::EventRouter;
pub use strategy::{IntentPredicate, StrategyEvaluator};
