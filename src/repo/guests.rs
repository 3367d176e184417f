use std::path::PathBuf;

use tracing::debug;
use ulid::Ulid;

use crate::error::Error;
use crate::ident;
use crate::model::{Guest, GuestPatch, NewGuest};
use crate::store::Collection;

/// Typed façade over the guests collection.
pub struct GuestRepo {
    collection: Collection<Guest>,
}

impl GuestRepo {
    pub fn new(path: PathBuf) -> Self {
        Self {
            collection: Collection::new(path),
        }
    }

    /// Case-insensitive substring match against `name`; all matches in
    /// storage order, possibly empty.
    pub fn find_by_name(&self, fragment: &str) -> Result<Vec<Guest>, Error> {
        let needle = fragment.to_lowercase();
        Ok(self
            .collection
            .load_all()?
            .into_iter()
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Allocate an id, append the full record, return it. Guests are not
    /// deduplicated — two creates with the same email yield two records.
    pub fn create(&self, new: NewGuest) -> Result<Guest, Error> {
        let guest = Guest {
            id: ident::new_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
        };
        self.collection.append_one(&guest)?;
        debug!(id = %guest.id, "guest created");
        Ok(guest)
    }

    /// First record with the given id. Absence is a normal result here,
    /// not an error — display lookups tolerate missing guests.
    pub fn get(&self, id: Ulid) -> Result<Option<Guest>, Error> {
        Ok(self.collection.load_all()?.into_iter().find(|g| g.id == id))
    }

    pub fn list(&self) -> Result<Vec<Guest>, Error> {
        self.collection.load_all()
    }

    /// Merge the supplied fields over the stored record and rewrite the
    /// collection. The target must pre-exist: `NotFound` otherwise.
    pub fn update(&self, id: Ulid, patch: GuestPatch) -> Result<Guest, Error> {
        let rows = self.collection.rewrite(|mut rows| {
            let Some(guest) = rows.iter_mut().find(|g| g.id == id) else {
                return Err(Error::NotFound(id));
            };
            patch.apply(guest);
            Ok(rows)
        })?;
        debug!(%id, "guest updated");
        rows.into_iter()
            .find(|g| g.id == id)
            .ok_or(Error::NotFound(id))
    }
}
