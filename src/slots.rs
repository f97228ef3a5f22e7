//! Bookable time-slot grid.
//!
//! The grid is a fixed business-hours assumption for the whole market:
//! 09:00 to 18:00 inclusive at 30-minute steps, 19 slots. It does not
//! vary by provider or by existing bookings; [`slot_grid_within`] offers
//! the stricter opening-hours intersection for callers that want it.

use crate::{consts, models::provider::DayHours};
use chrono::NaiveTime;

/// The ordered slot grid, recomputed per call.
pub fn slot_grid() -> Vec<NaiveTime> {
    let first_minute = consts::FIRST_SLOT_HOUR * 60;
    let last_minute = consts::LAST_SLOT_HOUR * 60;

    (first_minute..=last_minute)
        .step_by(consts::SLOT_STEP_MINUTES as usize)
        .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
        .collect()
}

/// Whether `time` is a member of the slot grid.
pub fn is_bookable_slot(time: NaiveTime) -> bool {
    slot_grid().contains(&time)
}

/// Grid slots falling inside a provider's opening window for one day.
pub fn slot_grid_within(hours: &DayHours) -> Vec<NaiveTime> {
    slot_grid()
        .into_iter()
        .filter(|slot| *slot >= hours.open && *slot <= hours.close)
        .collect()
}
