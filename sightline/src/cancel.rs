use crate::SearchError;
use tokio_util::sync::CancellationToken;

/// Cooperative cancellation shared between a search and its owner.
///
/// Searches poll the token at chunk boundaries only; an elevation fetch
/// already in flight runs to completion. No async runtime is needed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(CancellationToken);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    pub(crate) fn check(&self) -> Result<(), SearchError> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl From<CancellationToken> for CancelToken {
    fn from(token: CancellationToken) -> Self {
        Self(token)
    }
}
