use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::classify::{Season, TimeOfDay};
use crate::dashboard::handlers::HealthResponse;
use crate::dashboard::ViewState;
use crate::error::ErrorResponse;
use crate::forecast::{DaySummary, HourSummary};
use crate::presentation::hourly::{HourCard, HourSlot};
use crate::presentation::theme::{Palette, ParticleKind, Theme};
use crate::presentation::view::{CurrentCard, DayCard};
use crate::presentation::DashboardView;
use crate::weather::CurrentConditions;

/// OpenAPI documentation for the Seasonsky API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Seasonsky API",
        version = "1.0.0",
        description = "Seasonally-themed weather dashboard backed by OpenWeatherMap. Serves the aggregated daily/hourly forecast, current conditions and the theme for the current season and time of day.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "dashboard", description = "View state, selection and refresh"),
        (name = "forecast", description = "Daily forecast summaries"),
        (name = "theme", description = "Season and time-of-day styling")
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ViewState,
            DashboardView,
            CurrentCard,
            DayCard,
            HourCard,
            HourSlot,
            DaySummary,
            HourSummary,
            CurrentConditions,
            Theme,
            Palette,
            ParticleKind,
            Season,
            TimeOfDay,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
