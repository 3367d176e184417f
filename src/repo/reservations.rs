use std::path::PathBuf;

use tracing::debug;
use ulid::Ulid;

use crate::error::Error;
use crate::ident;
use crate::model::{DateWindow, NewReservation, Reservation};
use crate::store::Collection;

/// Typed façade over the reservations collection. Reservations have no
/// update operation — date or price changes are cancel-then-recreate.
pub struct ReservationRepo {
    collection: Collection<Reservation>,
}

fn materialize(new: NewReservation) -> Reservation {
    Reservation {
        id: ident::new_id(),
        guest_id: new.guest_id,
        room_id: new.room_id,
        check_in: new.check_in,
        check_out: new.check_out,
        total_price: new.total_price,
    }
}

impl ReservationRepo {
    pub fn new(path: PathBuf) -> Self {
        Self {
            collection: Collection::new(path),
        }
    }

    /// Allocate an id and append. No overlap check runs here: a caller
    /// that did not re-verify availability can create an overlapping
    /// reservation. See [`create_checked`] for the guarded variant.
    ///
    /// [`create_checked`]: ReservationRepo::create_checked
    pub fn create(&self, new: NewReservation) -> Result<Reservation, Error> {
        let reservation = materialize(new);
        self.collection.append_one(&reservation)?;
        debug!(id = %reservation.id, room = %reservation.room_id, "reservation created");
        Ok(reservation)
    }

    /// Re-run the overlap predicate against the latest rows for the target
    /// room and append only if the stay is still free — one critical
    /// section, so no conflicting write can slip in between check and
    /// append. Fails with `Conflict` naming the blocking reservation.
    pub fn create_checked(&self, new: NewReservation) -> Result<Reservation, Error> {
        let reservation = materialize(new);
        let window = DateWindow::new(reservation.check_in, reservation.check_out);
        self.collection.append_if(&reservation, |rows| {
            match rows
                .iter()
                .find(|r| r.room_id == reservation.room_id && r.conflicts_with(&window))
            {
                Some(existing) => Err(Error::Conflict(existing.id)),
                None => Ok(()),
            }
        })?;
        debug!(id = %reservation.id, room = %reservation.room_id, "reservation created (checked)");
        Ok(reservation)
    }

    pub fn get(&self, id: Ulid) -> Result<Option<Reservation>, Error> {
        Ok(self.collection.load_all()?.into_iter().find(|r| r.id == id))
    }

    pub fn list(&self) -> Result<Vec<Reservation>, Error> {
        self.collection.load_all()
    }

    /// All reservations held by one guest, storage order.
    pub fn for_guest(&self, guest_id: Ulid) -> Result<Vec<Reservation>, Error> {
        Ok(self
            .collection
            .load_all()?
            .into_iter()
            .filter(|r| r.guest_id == guest_id)
            .collect())
    }

    /// Hard-delete by id via full rewrite. Idempotent: removing an id
    /// that matches nothing succeeds and changes nothing.
    pub fn remove(&self, id: Ulid) -> Result<(), Error> {
        self.collection
            .rewrite(|rows| Ok(rows.into_iter().filter(|r| r.id != id).collect()))?;
        debug!(%id, "reservation removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_repo(name: &str) -> ReservationRepo {
        let dir = std::env::temp_dir().join("innkeep_test_reservations");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        ReservationRepo::new(path)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(guest_id: Ulid, room_id: Ulid, from: NaiveDate, to: NaiveDate) -> NewReservation {
        NewReservation {
            guest_id,
            room_id,
            check_in: from,
            check_out: to,
            total_price: "500.00".into(),
        }
    }

    #[test]
    fn create_then_get() {
        let repo = test_repo("create_get.csv");
        let created = repo
            .create(stay(Ulid::new(), Ulid::new(), date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();
        assert_eq!(repo.get(created.id).unwrap(), Some(created));
    }

    #[test]
    fn remove_is_idempotent() {
        let repo = test_repo("remove_idem.csv");
        let created = repo
            .create(stay(Ulid::new(), Ulid::new(), date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();

        // Unknown id: succeeds, nothing changes.
        repo.remove(Ulid::new()).unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);

        // Removing twice lands in the same final state as removing once.
        repo.remove(created.id).unwrap();
        repo.remove(created.id).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn for_guest_filters() {
        let repo = test_repo("for_guest.csv");
        let guest = Ulid::new();
        let other = Ulid::new();
        let a = repo
            .create(stay(guest, Ulid::new(), date(2024, 1, 1), date(2024, 1, 3)))
            .unwrap();
        repo.create(stay(other, Ulid::new(), date(2024, 2, 1), date(2024, 2, 3)))
            .unwrap();
        let b = repo
            .create(stay(guest, Ulid::new(), date(2024, 3, 1), date(2024, 3, 3)))
            .unwrap();
        assert_eq!(repo.for_guest(guest).unwrap(), vec![a, b]);
    }

    #[test]
    fn unchecked_create_allows_overlap() {
        let repo = test_repo("unchecked_overlap.csv");
        let room = Ulid::new();
        repo.create(stay(Ulid::new(), room, date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();
        // Same room, overlapping dates — accepted without complaint.
        repo.create(stay(Ulid::new(), room, date(2024, 1, 12), date(2024, 1, 14)))
            .unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn checked_create_rejects_overlap() {
        let repo = test_repo("checked_overlap.csv");
        let room = Ulid::new();
        let existing = repo
            .create(stay(Ulid::new(), room, date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();

        let result =
            repo.create_checked(stay(Ulid::new(), room, date(2024, 1, 12), date(2024, 1, 14)));
        match result {
            Err(Error::Conflict(id)) => assert_eq!(id, existing.id),
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn checked_create_rejects_same_day_turnover() {
        // Inclusive boundary: a stay ending on the new stay's start date
        // still blocks it.
        let repo = test_repo("checked_turnover.csv");
        let room = Ulid::new();
        repo.create(stay(Ulid::new(), room, date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();
        let result =
            repo.create_checked(stay(Ulid::new(), room, date(2024, 1, 15), date(2024, 1, 18)));
        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[test]
    fn checked_create_accepts_disjoint_stay() {
        let repo = test_repo("checked_disjoint.csv");
        let room = Ulid::new();
        repo.create(stay(Ulid::new(), room, date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();
        repo.create_checked(stay(Ulid::new(), room, date(2024, 1, 16), date(2024, 1, 20)))
            .unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn checked_create_ignores_other_rooms() {
        let repo = test_repo("checked_other_room.csv");
        repo.create(stay(Ulid::new(), Ulid::new(), date(2024, 1, 10), date(2024, 1, 15)))
            .unwrap();
        repo.create_checked(stay(Ulid::new(), Ulid::new(), date(2024, 1, 12), date(2024, 1, 14)))
            .unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
    }
}
