//! Log transport - structured emission via tracing

use contracts::LogLevel;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Emit the delivery message at the configured severity.
///
/// Levels are a closed enum; an unsupported action segment is rejected when
/// the destination is loaded and never reaches this point.
pub(crate) fn emit(request_id: Uuid, destination: &str, level: LogLevel) {
    match level {
        LogLevel::Debug => debug!(
            request_id = %request_id,
            destination = %destination,
            "payload delivered via log transport"
        ),
        LogLevel::Info => info!(
            request_id = %request_id,
            destination = %destination,
            "payload delivered via log transport"
        ),
        LogLevel::Warn => warn!(
            request_id = %request_id,
            destination = %destination,
            "payload delivered via log transport"
        ),
        LogLevel::Error => error!(
            request_id = %request_id,
            destination = %destination,
            "payload delivered via log transport"
        ),
    }
}
