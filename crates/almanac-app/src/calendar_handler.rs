use std::sync::Arc;

use almanac_calendar::LunarCalendar;
use almanac_core::error::CoreError;
use salvo::async_trait;

use crate::error::AppResult;

/// Shares one lunar calendar with every request.
pub struct LunarCalendarHandler {
    pub calendar: Arc<dyn LunarCalendar>,
}

#[async_trait]
impl salvo::Handler for LunarCalendarHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.calendar));
    }
}

/// ## Summary
/// Retrieves the lunar calendar from the depot.
///
/// ## Errors
/// Returns an error if no calendar was injected.
pub fn get_calendar_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn LunarCalendar>> {
    depot
        .obtain::<Arc<dyn LunarCalendar>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Lunar calendar not found in depot").into())
}
