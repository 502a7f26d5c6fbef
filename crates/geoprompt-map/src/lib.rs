//! GeoPrompt Map - Session layers, colors, export and the map controller
//!
//! The session owns an ordered list of result layers and the camera. Render
//! layers and colors are derived from layer positions on demand; export turns
//! selected layers into GeoJSON or CSV documents.

pub mod assembly;
pub mod controller;
pub mod export;
pub mod layer;
pub mod palette;
pub mod session;

pub use assembly::{build_controller, build_engine, build_generator, build_place_resolver, EngineChoice};
pub use controller::{ChatPipeline, ChatReply, MapController, PendingReply, ReplyOutcome};
pub use export::{export, export_csv, export_filename, export_geojson, ExportDocument, ExportFormat};
pub use layer::{Layer, LayerId};
pub use palette::{fill_color, line_color, Rgba, PALETTE};
pub use session::{LayerSummary, RenderLayer, Session, DEFAULT_VIEWPORT_SIZE, PLACE_ZOOM};
