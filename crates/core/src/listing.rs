//! Query-parameter helpers for the catalog listing endpoints.

/// Default number of characters returned by a listing.
pub const DEFAULT_CHARACTER_LIMIT: i64 = 10;

/// Maximum number of characters returned by a listing.
pub const MAX_CHARACTER_LIMIT: i64 = 100;

/// Maximum number of questions a client may ask for.
pub const MAX_QUESTION_COUNT: i64 = 200;

/// Universe value meaning "do not filter".
pub const ALL_UNIVERSES: &str = "All";

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Turn the `universe` query parameter into an optional filter. Absent,
/// blank and [`ALL_UNIVERSES`] all mean no filter.
pub fn universe_filter(universe: Option<&str>) -> Option<&str> {
    universe
        .map(str::trim)
        .filter(|u| !u.is_empty() && *u != ALL_UNIVERSES)
}
