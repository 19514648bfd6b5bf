//! Audit sinks - append-only request/outcome log

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use contracts::{AuditRecord, AuditSink, RelayError};

/// In-memory audit sink for tests and one-shot runs
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("audit lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), RelayError> {
        self.records
            .lock()
            .map_err(|_| RelayError::audit("audit lock poisoned"))?
            .push(record.clone());
        debug!(request_id = %record.request_id, "Audit record stored");
        Ok(())
    }
}

/// Audit sink appending one JSON line per record
pub struct JsonlAuditSink {
    file: tokio::sync::Mutex<File>,
}

impl JsonlAuditSink {
    /// Open (or create) the audit file in append mode
    #[instrument(name = "jsonl_audit_create", skip(path))]
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, RelayError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await?;

        Ok(Self {
            file: tokio::sync::Mutex::new(file),
        })
    }
}

impl AuditSink for JsonlAuditSink {
    #[instrument(name = "jsonl_audit_record", skip(self, record), fields(request_id = %record.request_id))]
    async fn record(&self, record: &AuditRecord) -> Result<(), RelayError> {
        let mut line = serde_json::to_vec(record)
            .map_err(|e| RelayError::audit(format!("serialize failed: {e}")))?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{EventRequest, OutcomeMap, RoutingIntent};
    use serde_json::json;
    use uuid::Uuid;

    fn sample_record() -> AuditRecord {
        let request = EventRequest {
            payload: json!({"a": 1}),
            routing_intents: vec![RoutingIntent::new("d1", true, 500)],
            strategy: Some("ALL".to_string()),
        };
        AuditRecord::new(Uuid::new_v4(), request, OutcomeMap::new())
    }

    #[tokio::test]
    async fn test_memory_sink_appends() {
        let sink = MemoryAuditSink::new();
        assert!(sink.is_empty());

        sink.record(&sample_record()).await.unwrap();
        sink.record(&sample_record()).await.unwrap();

        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_jsonl_sink_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        let sink = JsonlAuditSink::create(&path).await.unwrap();
        let first = sample_record();
        let second = sample_record();
        sink.record(&first).await.unwrap();
        sink.record(&second).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: AuditRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.request_id, first.request_id);
    }

    #[tokio::test]
    async fn test_jsonl_sink_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let sink = JsonlAuditSink::create(&path).await.unwrap();
            sink.record(&sample_record()).await.unwrap();
        }
        {
            let sink = JsonlAuditSink::create(&path).await.unwrap();
            sink.record(&sample_record()).await.unwrap();
        }

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
