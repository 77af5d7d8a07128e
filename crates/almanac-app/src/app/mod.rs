pub mod api;

use std::sync::Arc;

use almanac_calendar::LunarCalendar;
use salvo::Router;

use crate::calendar_handler::LunarCalendarHandler;
use crate::config::{ConfigHandler, Settings};

/// ## Summary
/// The full application router: depot injectors followed by the API routes.
#[must_use]
pub fn router(settings: Settings, calendar: Arc<dyn LunarCalendar>) -> Router {
    Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(LunarCalendarHandler { calendar })
        .push(api::routes())
}
