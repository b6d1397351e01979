//! Root of the SeaORM entity modules.
//!
//! The service stores a single flat collection: one row per submitted
//! student record.

pub mod record;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::record::Entity as Record;
}
