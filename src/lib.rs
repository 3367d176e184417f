//! # innkeep
//!
//! Flat-file persistence and booking-conflict core for a room
//! reservation system. Guests, rooms, and reservations live in three
//! header-described CSV collections under one data directory; the engine
//! on top resolves which rooms are free over a requested date range
//! without double-booking.
//!
//! The availability window is inclusive on both bounds: a reservation
//! ending exactly on the window's start date (or starting on its end
//! date) counts as conflicting, so same-day turnover is forbidden.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::{DateWindow, Engine};
//!
//! # fn main() -> Result<(), innkeep::Error> {
//! let engine = Engine::open("./data")?;
//! let window = DateWindow::new(
//!     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
//! );
//! for room in engine.search_available(&window)? {
//!     println!("{} is free", room.room_number);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`store`] — generic load/append/overwrite over one CSV collection
//! - [`ident`] — collision-resistant identifier generation
//! - [`model`] — entity records and the overlap predicate
//! - [`repo`] — typed repositories, one per entity kind
//! - [`engine`] — availability search and the reservation workflow
//! - [`error`] — the crate-wide error type

pub mod engine;
pub mod error;
pub mod ident;
pub mod model;
pub mod repo;
pub mod store;

pub use engine::Engine;
pub use error::Error;
pub use model::{
    DateWindow, Guest, GuestPatch, NewGuest, NewReservation, Reservation, Room, RoomPatch,
};
pub use repo::{GuestRepo, ReservationRepo, RoomRepo};
pub use store::Collection;
