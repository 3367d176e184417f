use std::collections::HashSet;

use ulid::Ulid;

use crate::model::{DateWindow, Reservation, Room};

// ── Availability Algorithm ────────────────────────────────────────

/// Room ids touched by any reservation conflicting with the window,
/// under the inclusive-bound overlap test.
pub fn conflicting_room_ids(reservations: &[Reservation], window: &DateWindow) -> HashSet<Ulid> {
    reservations
        .iter()
        .filter(|r| r.conflicts_with(window))
        .map(|r| r.room_id)
        .collect()
}

/// Every room with no conflicting reservation, preserving room storage
/// order. Rooms never referenced by any reservation are always returned.
///
/// A reversed window (`start > end`) is not rejected; the comparison
/// executes as given and the result is whatever the predicate yields.
pub fn available_rooms(
    rooms: Vec<Room>,
    reservations: &[Reservation],
    window: &DateWindow,
) -> Vec<Room> {
    let booked = conflicting_room_ids(reservations, window);
    rooms.into_iter().filter(|r| !booked.contains(&r.id)).collect()
}
