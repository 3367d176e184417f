use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;
use ulid::Ulid;

use crate::error::Error;
use crate::model::{Room, RoomPatch};
use crate::store::Collection;

/// Typed façade over the rooms collection. Rooms are seeded up front;
/// there is no per-room create and rooms are never deleted.
pub struct RoomRepo {
    collection: Collection<Room>,
}

impl RoomRepo {
    pub fn new(path: PathBuf) -> Self {
        Self {
            collection: Collection::new(path),
        }
    }

    pub fn get(&self, id: Ulid) -> Result<Option<Room>, Error> {
        Ok(self.collection.load_all()?.into_iter().find(|r| r.id == id))
    }

    pub fn list(&self) -> Result<Vec<Room>, Error> {
        self.collection.load_all()
    }

    /// Distinct room types, in order of first appearance.
    pub fn room_types(&self) -> Result<Vec<String>, Error> {
        let mut seen = HashSet::new();
        Ok(self
            .list()?
            .into_iter()
            .map(|r| r.room_type)
            .filter(|t| seen.insert(t.clone()))
            .collect())
    }

    pub fn update(&self, id: Ulid, patch: RoomPatch) -> Result<Room, Error> {
        let rows = self.collection.rewrite(|mut rows| {
            let Some(room) = rows.iter_mut().find(|r| r.id == id) else {
                return Err(Error::NotFound(id));
            };
            patch.apply(room);
            Ok(rows)
        })?;
        debug!(%id, "room updated");
        rows.into_iter()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Replace the catalog wholesale — the seeding path for a fresh data
    /// directory.
    pub fn seed(&self, rooms: &[Room]) -> Result<(), Error> {
        self.collection.overwrite_all(rooms)
    }
}
