//! Concurrent export batches.

use assetport_core::{ExportFormat, NodeExporter, NodeId, Result};
use futures::future::try_join_all;

/// One call to the host export capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportJob {
    pub node: NodeId,
    pub format: ExportFormat,
}

impl ExportJob {
    pub fn pdf(node: NodeId) -> Self {
        Self {
            node,
            format: ExportFormat::Pdf,
        }
    }

    pub fn svg(node: NodeId) -> Self {
        Self {
            node,
            format: ExportFormat::Svg,
        }
    }
}

/// Issue every job at once and wait for all of them.
///
/// Payloads come back in job order. The first failure fails the whole batch
/// and drops the calls still in flight.
pub async fn export_batch<E: NodeExporter>(exporter: &E, jobs: &[ExportJob]) -> Result<Vec<Vec<u8>>> {
    tracing::debug!(jobs = jobs.len(), "starting export batch");
    let calls = jobs.iter().map(|job| exporter.export(job.node, job.format));
    try_join_all(calls).await.map_err(|err| {
        tracing::error!(error = %err, "export batch failed");
        err
    })
}
