pub mod handlers;
mod scheduler;
mod service;
mod state;

pub use scheduler::RefreshScheduler;
pub use service::{DashboardError, DashboardService};
pub use state::ViewState;
