//! Calendar-date primitives shared by the occurrence generator and the HTTP
//! layer.
//!
//! Everything here works on local calendar dates; nothing is ever shifted
//! through a timezone.

pub mod date;
pub mod error;
pub mod lunar;
pub mod window;

pub use date::{DateParts, format_date, lenient_ymd, monday_of_week};
pub use lunar::{LunarCalendar, LunarTable, NoLunarCalendar, SolarDate};
pub use window::DateWindow;
