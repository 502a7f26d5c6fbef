mod request;
mod response;

pub use request::{ChatRequest, ExportRequest};
pub use response::{
    CatalogEntry, DeleteResponse, HealthResponse, RenderResponse, SchemaResponse, ToggleResponse,
};
