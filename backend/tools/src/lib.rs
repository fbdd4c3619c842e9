//! Tool implementations for the aB-Agenta operations, plus the dispatcher
//! that routes named calls through them.

pub mod args;
pub mod dispatch;
pub mod documents;
pub mod objecttypes;
pub mod records;
pub mod render;

pub use dispatch::dispatch;

use std::sync::Arc;

use abagenta_client::AgentaBackend;
use abagenta_core::ToolRegistry;

/// Build the full tool catalog in its stable listing order.
pub fn catalog(backend: Arc<dyn AgentaBackend>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(records::GetRecordTool::new(backend.clone())));
    registry.register(Arc::new(records::GetRecordsTool::new(backend.clone())));
    registry.register(Arc::new(records::FilterRecordsTool::new(backend.clone())));
    registry.register(Arc::new(records::CreateRecordTool::new(backend.clone())));
    registry.register(Arc::new(documents::DownloadDocumentTool::new(backend.clone())));
    registry.register(Arc::new(documents::UploadDocumentTool::new(backend.clone())));
    registry.register(Arc::new(objecttypes::GetObjectTypesTool::new(backend.clone())));
    registry.register(Arc::new(objecttypes::FilterObjectTypesTool::new(backend.clone())));
    registry.register(Arc::new(objecttypes::GetObjectTypeTool::new(backend.clone())));
    registry.register(Arc::new(objecttypes::GetPropertiesTool::new(backend)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use abagenta_client::SimulatedBackend;

    #[test]
    fn catalog_lists_all_tools_in_order() {
        let registry = catalog(Arc::new(SimulatedBackend::new()));
        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "get_record",
                "get_records",
                "filter_records",
                "create_record",
                "download_document",
                "upload_document",
                "get_objecttypes",
                "filter_objecttypes",
                "get_objecttype",
                "get_properties",
            ]
        );
    }
}
