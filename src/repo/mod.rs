mod guests;
mod reservations;
mod rooms;

pub use guests::GuestRepo;
pub use reservations::ReservationRepo;
pub use rooms::RoomRepo;
