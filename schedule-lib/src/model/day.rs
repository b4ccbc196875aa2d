//! Day-of-week helpers

/// Number of days in the schedule week.
pub const DAYS_IN_WEEK: u8 = 7;

const DAY_NAMES: [&str; DAYS_IN_WEEK as usize] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Name of a schedule day, where 0 is Monday and 6 is Sunday.
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(day as usize).copied()
}

/// Check if `day` is a valid day index.
pub fn is_valid_day(day: u8) -> bool {
    day < DAYS_IN_WEEK
}
