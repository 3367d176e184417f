mod availability;

pub use availability::{available_rooms, conflicting_room_ids};

use std::path::PathBuf;

use tracing::{debug, info};
use ulid::Ulid;

use crate::error::Error;
use crate::model::{DateWindow, NewReservation, Reservation, Room};
use crate::repo::{GuestRepo, ReservationRepo, RoomRepo};

/// Availability search and reservation workflow over the three
/// repositories of one data directory.
///
/// Availability search and booking are independent operations: `book`
/// does not re-run the overlap check, so a caller that searched, waited,
/// and then booked can create an overlapping reservation. `book_checked`
/// is the explicit opt-in that closes that gap.
pub struct Engine {
    guests: GuestRepo,
    rooms: RoomRepo,
    reservations: ReservationRepo,
}

impl Engine {
    /// Open (creating if needed) a data directory holding `guests.csv`,
    /// `rooms.csv` and `reservations.csv`. The directory path is the only
    /// configuration surface of the core.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| Error::Storage(format!("{}: {e}", data_dir.display())))?;
        info!(dir = %data_dir.display(), "opening booking core");
        Ok(Self {
            guests: GuestRepo::new(data_dir.join("guests.csv")),
            rooms: RoomRepo::new(data_dir.join("rooms.csv")),
            reservations: ReservationRepo::new(data_dir.join("reservations.csv")),
        })
    }

    pub fn guests(&self) -> &GuestRepo {
        &self.guests
    }

    pub fn rooms(&self) -> &RoomRepo {
        &self.rooms
    }

    pub fn reservations(&self) -> &ReservationRepo {
        &self.reservations
    }

    /// Every room with no reservation conflicting with the window, in
    /// room storage order. The window bounds are trusted as given;
    /// `start > end` is the caller's problem.
    pub fn search_available(&self, window: &DateWindow) -> Result<Vec<Room>, Error> {
        let rooms = self.rooms.list()?;
        let reservations = self.reservations.list()?;
        let free = available_rooms(rooms, &reservations, window);
        debug!(
            start = %window.start,
            end = %window.end,
            free = free.len(),
            "availability search"
        );
        Ok(free)
    }

    /// Create a reservation after verifying the guest and room exist.
    ///
    /// Deliberately does NOT re-check availability: search and book are
    /// separate calls, and the write goes through whether or not the room
    /// is still free. Use [`book_checked`] to reject overlaps instead.
    ///
    /// [`book_checked`]: Engine::book_checked
    pub fn book(&self, new: NewReservation) -> Result<Reservation, Error> {
        self.require_references(&new)?;
        self.reservations.create(new)
    }

    /// Like [`book`], but re-runs the overlap predicate against the latest
    /// reservations under the collection lock and fails with `Conflict`
    /// if the room is taken for any part of the stay.
    ///
    /// [`book`]: Engine::book
    pub fn book_checked(&self, new: NewReservation) -> Result<Reservation, Error> {
        self.require_references(&new)?;
        self.reservations.create_checked(new)
    }

    /// Cancel by id. Always reports success — cancelling an id that does
    /// not exist is a no-op, and cancelling twice equals cancelling once.
    pub fn cancel(&self, reservation_id: Ulid) -> Result<bool, Error> {
        self.reservations.remove(reservation_id)?;
        Ok(true)
    }

    fn require_references(&self, new: &NewReservation) -> Result<(), Error> {
        if self.guests.get(new.guest_id)?.is_none() {
            return Err(Error::NotFound(new.guest_id));
        }
        if self.rooms.get(new.room_id)?.is_none() {
            return Err(Error::NotFound(new.room_id));
        }
        Ok(())
    }
}
