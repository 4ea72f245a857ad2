use super::orchestrator::CritiqueOrchestrator;
use crate::error::EngineError;
use crate::types::{CritiqueResult, ImageSignals};
use futures::future::{BoxFuture, FutureExt};
use std::task::{Context, Poll};
use tower::Service;

/// One photo to critique, with signals already measured.
#[derive(Debug, Clone)]
pub struct CritiqueRequest {
    pub photo_id: String,
    pub signals: ImageSignals,
}

impl CritiqueRequest {
    pub fn new(photo_id: impl Into<String>, signals: ImageSignals) -> Self {
        Self {
            photo_id: photo_id.into(),
            signals,
        }
    }
}

/// Tower Service so critiques compose with tower middleware.
impl Service<CritiqueRequest> for CritiqueOrchestrator {
    type Response = CritiqueResult;
    type Error = EngineError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: CritiqueRequest) -> Self::Future {
        // analyzers are shared behind Arc, so the clone is cheap
        let orchestrator = self.clone();
        async move { Ok(orchestrator.critique(request.signals, request.photo_id).await) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use tower::ServiceExt;

    #[tokio::test]
    async fn oneshot_returns_full_critique() {
        let request = CritiqueRequest::new(
            "IMG_0042",
            ImageSignals {
                average_brightness: Some(128.0),
                saturation: Some(0.4),
                ..ImageSignals::default()
            },
        );
        let critique = CritiqueOrchestrator::new().oneshot(request).await.unwrap();
        assert_eq!(critique.photo_id(), "IMG_0042");
        assert_eq!(critique.categories().iter().count(), Category::ALL.len());
    }
}
