/// Hour of the first bookable slot of the day.
pub const FIRST_SLOT_HOUR: u32 = 9;
/// Hour of the last bookable slot of the day (inclusive).
pub const LAST_SLOT_HOUR: u32 = 18;
/// Spacing between bookable slots.
pub const SLOT_STEP_MINUTES: u32 = 30;

/// Wire format for booking times and opening hours ("09:30").
pub const SLOT_TIME_FORMAT: &str = "%H:%M";

/// Country code assumed for local phone numbers (single-city market).
pub const DEFAULT_COUNTRY_CODE: &str = "+66";
pub const E164_MIN_DIGITS: usize = 8;
pub const E164_MAX_DIGITS: usize = 15;

pub const MAX_PROVIDER_RATING: f64 = 5.0;
