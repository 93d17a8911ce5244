//! Participant counting for the packed `name` field.
//!
//! A session name holds either one participant or several joined with
//! [`PARTICIPANT_DELIMITER`]. The count is the number of delimiters plus one,
//! so empty segments still count: `""` is one participant and `"a,,b"` is three.

pub const PARTICIPANT_DELIMITER: char = ',';

/// Number of participants encoded in a session name.
pub fn count_participants(name: &str) -> u64 {
    name.matches(PARTICIPANT_DELIMITER).count() as u64 + 1
}
