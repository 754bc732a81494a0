//! Fallback coordinator
//!
//! Holds an ordered renderer chain per format and walks it once per request.
//! The first renderer is the primary; any later success is a degraded result
//! that carries the primary's failure as its reason.

use crate::core::render::{Artifact, RenderContext, Renderer};
use crate::domain::{ExportError, ExportFormat, ExportOutcome, QualitySummary};
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Result of walking one renderer chain
#[derive(Debug, Clone)]
pub enum ChainOutcome {
    /// The primary renderer succeeded
    Primary(Artifact),

    /// A fallback succeeded after the primary failed with `reason`
    Fallback {
        artifact: Artifact,
        reason: ExportError,
    },

    /// Every renderer failed, or the chain was empty
    Exhausted(ExportError),
}

impl ChainOutcome {
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Primary(artifact) | Self::Fallback { artifact, .. } => Some(artifact),
            Self::Exhausted(_) => None,
        }
    }

    /// The export outcome this chain result maps to
    pub fn to_outcome(&self) -> ExportOutcome {
        match self {
            Self::Primary(artifact) => ExportOutcome::Success {
                filename: artifact.filename.clone(),
            },
            Self::Fallback { artifact, reason } => ExportOutcome::Degraded {
                filename: artifact.filename.clone(),
                reason: reason.clone(),
            },
            Self::Exhausted(reason) => ExportOutcome::Failure {
                reason: reason.clone(),
            },
        }
    }
}

/// Render a panic payload as text
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Ordered renderer chains keyed by format
#[derive(Default, Clone)]
pub struct FallbackCoordinator {
    chains: HashMap<ExportFormat, Vec<Arc<dyn Renderer>>>,
}

impl FallbackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain for `format`, primary first
    pub fn with_chain(mut self, format: ExportFormat, chain: Vec<Arc<dyn Renderer>>) -> Self {
        self.chains.insert(format, chain);
        self
    }

    /// Renderer names of the chain for `format`
    pub fn chain_names(&self, format: ExportFormat) -> Vec<&'static str> {
        self.chains
            .get(&format)
            .map(|chain| chain.iter().map(|r| r.name()).collect())
            .unwrap_or_default()
    }

    /// Walk the chain for `format` once
    ///
    /// Renderer errors and panics are captured; nothing escapes this call.
    pub async fn run(
        &self,
        format: ExportFormat,
        summary: &QualitySummary,
        ctx: &RenderContext,
    ) -> ChainOutcome {
        let Some(chain) = self.chains.get(&format).filter(|c| !c.is_empty()) else {
            tracing::error!(format = %format, "No renderer configured");
            return ChainOutcome::Exhausted(ExportError::Unexpected(format!(
                "no renderer configured for {format}"
            )));
        };

        let mut primary_failure: Option<ExportError> = None;
        let mut last_failure: Option<ExportError> = None;

        for (position, renderer) in chain.iter().enumerate() {
            tracing::debug!(
                format = %format,
                renderer = renderer.name(),
                position,
                "Trying renderer"
            );

            let attempt = AssertUnwindSafe(renderer.render(summary, ctx))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    Err(ExportError::Unexpected(format!(
                        "renderer {} panicked: {}",
                        renderer.name(),
                        panic_message(payload.as_ref())
                    )))
                });

            match attempt {
                Ok(artifact) => {
                    tracing::info!(
                        format = %format,
                        renderer = renderer.name(),
                        filename = %artifact.filename,
                        bytes = artifact.len(),
                        "Renderer succeeded"
                    );
                    return match primary_failure {
                        None => ChainOutcome::Primary(artifact),
                        Some(reason) => ChainOutcome::Fallback { artifact, reason },
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        format = %format,
                        renderer = renderer.name(),
                        error_kind = e.kind(),
                        error = %e,
                        "Renderer failed"
                    );
                    if primary_failure.is_none() {
                        primary_failure = Some(e.clone());
                    }
                    last_failure = Some(e);
                }
            }
        }

        ChainOutcome::Exhausted(last_failure.unwrap_or_else(|| {
            ExportError::Unexpected(format!("all renderers failed for {format}"))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Succeed,
        Fail(ExportError),
        Panic,
    }

    struct StubRenderer {
        name: &'static str,
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubRenderer {
        fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                name,
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }

        fn boxed(name: &'static str, behaviour: Behaviour) -> Arc<dyn Renderer> {
            Self::new(name, behaviour)
        }
    }

    #[async_trait]
    impl Renderer for StubRenderer {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn render(
            &self,
            _summary: &QualitySummary,
            _ctx: &RenderContext,
        ) -> Result<Artifact, ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Succeed => Ok(Artifact::download(
                    format!("{}.out", self.name),
                    "text/plain",
                    b"ok".to_vec(),
                )),
                Behaviour::Fail(e) => Err(e.clone()),
                Behaviour::Panic => panic!("stub {} panicked", self.name),
            }
        }
    }

    fn ctx() -> RenderContext {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        RenderContext::new("r", at)
    }

    async fn run(chain: Vec<Arc<dyn Renderer>>) -> ChainOutcome {
        FallbackCoordinator::new()
            .with_chain(ExportFormat::Document, chain)
            .run(
                ExportFormat::Document,
                &QualitySummary::fallback_defaults(),
                &ctx(),
            )
            .await
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = StubRenderer::new("primary", Behaviour::Succeed);
        let fallback = StubRenderer::new("fallback", Behaviour::Succeed);

        let chain: Vec<Arc<dyn Renderer>> = vec![
            primary as Arc<dyn Renderer>,
            fallback.clone() as Arc<dyn Renderer>,
        ];
        let outcome = run(chain).await;

        assert!(matches!(outcome, ChainOutcome::Primary(_)));
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            outcome.to_outcome(),
            ExportOutcome::Success {
                filename: "primary.out".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fallback_carries_primary_reason() {
        let reason = ExportError::CapabilityLoad("engine missing".to_string());
        let outcome = run(vec![
            StubRenderer::boxed("primary", Behaviour::Fail(reason.clone())),
            StubRenderer::boxed("fallback", Behaviour::Succeed),
        ])
        .await;

        assert_eq!(
            outcome.to_outcome(),
            ExportOutcome::Degraded {
                filename: "fallback.out".to_string(),
                reason,
            }
        );
    }

    #[tokio::test]
    async fn test_exhausted_reports_last_failure() {
        let outcome = run(vec![
            StubRenderer::boxed(
                "primary",
                Behaviour::Fail(ExportError::CapabilityLoad("a".to_string())),
            ),
            StubRenderer::boxed("fallback", Behaviour::Fail(ExportError::Render("b".to_string()))),
        ])
        .await;

        assert!(outcome.artifact().is_none());
        assert_eq!(
            outcome.to_outcome(),
            ExportOutcome::Failure {
                reason: ExportError::Render("b".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_panicking_primary_falls_back() {
        let outcome = run(vec![
            StubRenderer::boxed("primary", Behaviour::Panic),
            StubRenderer::boxed("fallback", Behaviour::Succeed),
        ])
        .await;

        match outcome {
            ChainOutcome::Fallback { reason, .. } => {
                assert_eq!(reason.kind(), "unexpected");
                assert!(reason.to_string().contains("stub primary panicked"));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_renderer_failure_is_never_degraded() {
        let outcome = run(vec![StubRenderer::boxed(
            "only",
            Behaviour::Fail(ExportError::Render("x".to_string())),
        )])
        .await;

        assert!(matches!(outcome, ChainOutcome::Exhausted(_)));
    }

    #[tokio::test]
    async fn test_missing_chain_is_failure() {
        let outcome = FallbackCoordinator::new()
            .run(
                ExportFormat::FlatText,
                &QualitySummary::fallback_defaults(),
                &ctx(),
            )
            .await;

        assert!(matches!(
            outcome,
            ChainOutcome::Exhausted(ExportError::Unexpected(_))
        ));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
