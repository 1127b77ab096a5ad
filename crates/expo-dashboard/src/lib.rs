//! Expo attendance dashboard: HTTP routes, page rendering and the dataset cache

pub mod cache;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use cache::{DatasetCache, DatasetKey, Snapshot};
pub use error::DashboardError;
pub use routes::create_router;
pub use state::{AppState, DashboardStatus, Phase};
