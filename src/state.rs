use crate::models::zone::DisplayZone;
use crate::store::StoreReader;

/// Shared handler state, registered once as `web::Data<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: StoreReader,
    pub display_zone: DisplayZone,
}

impl AppState {
    pub fn new(store: StoreReader, display_zone: DisplayZone) -> Self {
        Self { store, display_zone }
    }
}
