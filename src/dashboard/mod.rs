//! Reactive dashboard: filter state, recomputation and the HTTP surface

mod controller;
mod page;
mod server;
mod state;

pub use controller::{Dashboard, DashboardError, DashboardView, ViewStats};
pub use page::render_page;
pub use server::{router, serve, AppState, FilterQuery};
pub use state::{FilterEvent, FilterState};
