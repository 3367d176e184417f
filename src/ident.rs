use ulid::Ulid;

/// Mint an identifier for a new record.
///
/// Random, with no central authority serializing issuance — the generator
/// never consults a collection's existing contents. 80 random bits per
/// ULID make collisions negligible at the catalog sizes this core targets.
pub fn new_id() -> Ulid {
    Ulid::new()
}
