pub mod hourly;
pub mod icons;
pub mod theme;
pub mod view;

pub use theme::Theme;
pub use view::DashboardView;
