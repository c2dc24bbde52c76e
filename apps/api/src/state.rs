use crate::conversation::coach::Coach;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single in-memory conversation. Cheap to clone; all clones share it.
    pub coach: Coach,
}
