use ibc_core::primitives::Timestamp;

/// Returns a `Timestamp` representation of beginning of year 2023.
///
/// Contexts built with the default configuration start from this instant,
/// so that two chains created one after the other agree on the time.
pub fn year_2023() -> Timestamp {
    // Sun Jan 01 2023 00:00:00 GMT+0000
    Timestamp::from_unix_timestamp(1_672_531_200, 0).expect("should be a valid time")
}
