//! # Dispatcher
//!
//! 传输分发模块。
//!
//! 负责：
//! - 将 payload 通过目的地的 transport 投递出去
//! - 按目的地隔离失败，单个投递失败不影响其余目的地
//! - 为每个目的地的出站调用设置显式超时

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod transports;

pub use dispatcher::{DeliveryResult, DispatchConfig, TransportDispatcher};
pub use error::DispatchError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
