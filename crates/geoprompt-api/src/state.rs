use std::sync::Arc;

use geoprompt_map::{ChatPipeline, MapController, Session};
use tokio::sync::Mutex;

/// Shared server state.
///
/// Chat submissions take the submission lock for their whole run, so they
/// execute one at a time in arrival order. The session lock is only held
/// while a finished result is applied, so layer and viewport requests are
/// answered while a submission is still waiting on the generator or engine.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ChatPipeline,
    pub session: Arc<Mutex<Session>>,
    pub submissions: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(controller: MapController) -> Self {
        let (pipeline, session) = controller.into_parts();
        Self {
            pipeline,
            session: Arc::new(Mutex::new(session)),
            submissions: Arc::new(Mutex::new(())),
        }
    }
}
