//! Shared, ordered record of calls made against mocks.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One recorded collaborator call.
///
/// Storage calls carry object names. A conversion carries the local paths it
/// was given, since staged files are not named after their objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Download(String),
    Convert { input: PathBuf, output: PathBuf },
    Upload(String),
    DeleteRaw(String),
    DeleteProcessed(String),
}

/// Ordered call log shared between several mocks.
///
/// Cloning yields a handle to the same log, so one log can be handed to a
/// storage mock and a transcoder mock to assert cross-collaborator ordering.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, call: Call) {
        self.calls.write().await.push(call);
    }

    /// Snapshot of every call in the order it was made.
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn clear(&self) {
        self.calls.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_log() {
        let log = CallLog::new();
        let other = log.clone();

        log.record(Call::Download("a.mp4".to_string())).await;
        other.record(Call::Upload("processed-a.mp4".to_string())).await;

        assert_eq!(
            log.calls().await,
            vec![
                Call::Download("a.mp4".to_string()),
                Call::Upload("processed-a.mp4".to_string()),
            ]
        );
    }
}
