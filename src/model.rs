use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Inclusive calendar-date window `[start, end]` a caller wants a room free for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// No ordering check: a reversed window is passed through to the
    /// comparison as-is and callers are expected to pre-validate.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// A registered guest. Field order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: Ulid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A bookable room. Rooms are seeded up front and mutated only by
/// explicit update; they are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Ulid,
    pub room_number: String,
    pub room_type: String,
    /// Decimal string, e.g. "120.00". Kept as text so it round-trips exactly.
    pub price_per_night: String,
}

/// A confirmed stay on one room by one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub guest_id: Ulid,
    pub room_id: Ulid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: String,
}

impl Reservation {
    /// Inclusive-bound overlap test: a stay ending exactly on `window.start`
    /// or beginning exactly on `window.end` still counts as conflicting.
    /// Same-day turnover is forbidden under this policy.
    pub fn conflicts_with(&self, window: &DateWindow) -> bool {
        self.check_in <= window.end && self.check_out >= window.start
    }
}

// ── Creation payloads ────────────────────────────────────────────

/// Fields of a guest excluding the store-assigned id.
#[derive(Debug, Clone)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Fields of a reservation excluding the store-assigned id.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub guest_id: Ulid,
    pub room_id: Ulid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: String,
}

// ── Partial updates ──────────────────────────────────────────────

/// Partial guest update; unsupplied fields are retained.
#[derive(Debug, Clone, Default)]
pub struct GuestPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl GuestPatch {
    pub fn apply(self, guest: &mut Guest) {
        if let Some(name) = self.name {
            guest.name = name;
        }
        if let Some(email) = self.email {
            guest.email = email;
        }
        if let Some(phone) = self.phone {
            guest.phone = phone;
        }
        if let Some(address) = self.address {
            guest.address = address;
        }
    }
}

/// Partial room update; unsupplied fields are retained.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub price_per_night: Option<String>,
}

impl RoomPatch {
    pub fn apply(self, room: &mut Room) {
        if let Some(room_number) = self.room_number {
            room.room_number = room_number;
        }
        if let Some(room_type) = self.room_type {
            room.room_type = room_type;
        }
        if let Some(price) = self.price_per_night {
            room.price_per_night = price;
        }
    }
}
