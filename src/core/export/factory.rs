//! Orchestrator factory
//!
//! Builds the default renderer chains and wires the orchestrator to its
//! adapters from the configuration.

use super::coordinator::FallbackCoordinator;
use super::orchestrator::{ExportOrchestrator, OrchestratorOptions};
use crate::adapters::delivery::{DownloadSink, FileSystemDownloads};
use crate::adapters::print::{PrintPipeline, SpoolPrintPipeline};
use crate::config::{DocumentEngineKind, PrismConfig};
use crate::core::notify::NotificationSink;
use crate::core::render::{
    BuiltinEngineLoader, DisabledEngineLoader, DocumentEngineLoader, FlatTextRenderer,
    PdfDocumentRenderer, PrintFallbackRenderer, Renderer, SpreadsheetRenderer,
};
use crate::domain::ExportFormat;
use std::sync::Arc;

/// Create the engine loader selected by `document.engine`
pub fn create_engine_loader(kind: DocumentEngineKind) -> Arc<dyn DocumentEngineLoader> {
    match kind {
        DocumentEngineKind::Builtin => Arc::new(BuiltinEngineLoader),
        DocumentEngineKind::Disabled => {
            tracing::info!("Document engine disabled, PDF exports will use the print fallback");
            Arc::new(DisabledEngineLoader)
        }
    }
}

/// Default chains: Document = [pdf, print], Spreadsheet = [spreadsheet],
/// FlatText = [flat-text]
pub fn default_coordinator(
    config: &PrismConfig,
    print_pipeline: Arc<dyn PrintPipeline>,
) -> FallbackCoordinator {
    let pdf = PdfDocumentRenderer::new(create_engine_loader(config.document.engine))
        .with_load_timeout(config.document.load_timeout());

    let document: Vec<Arc<dyn Renderer>> = vec![
        Arc::new(pdf),
        Arc::new(PrintFallbackRenderer::new(print_pipeline)),
    ];
    let spreadsheet: Vec<Arc<dyn Renderer>> = vec![Arc::new(SpreadsheetRenderer::new())];
    let flat_text: Vec<Arc<dyn Renderer>> = vec![Arc::new(FlatTextRenderer::new())];

    FallbackCoordinator::new()
        .with_chain(ExportFormat::Document, document)
        .with_chain(ExportFormat::Spreadsheet, spreadsheet)
        .with_chain(ExportFormat::FlatText, flat_text)
}

/// Build an orchestrator with filesystem downloads and spooled printing
pub fn create_orchestrator(
    config: &PrismConfig,
    notifier: Arc<dyn NotificationSink>,
) -> ExportOrchestrator {
    let print_pipeline: Arc<dyn PrintPipeline> =
        Arc::new(SpoolPrintPipeline::from_config(&config.print));
    let downloads: Arc<dyn DownloadSink> =
        Arc::new(FileSystemDownloads::new(config.export.output_dir.clone()));

    tracing::debug!(
        output_dir = %config.export.output_dir.display(),
        spool_dir = %config.print.spool_dir.display(),
        engine = ?config.document.engine,
        "Creating export orchestrator"
    );

    ExportOrchestrator::new(default_coordinator(config, print_pipeline), downloads, notifier)
        .with_options(OrchestratorOptions {
            strict_summary: config.export.strict_summary,
            dismiss_after: config.notifications.auto_dismiss(),
        })
}
