//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User records.
    ///
    /// `id` is a generated `SERIAL` primary key. A unique index covers
    /// (`last_name`, `first_name`).
    users (id) {
        /// Store-generated primary key.
        id -> Int4,
        /// Family name.
        last_name -> Varchar,
        /// Given name.
        first_name -> Varchar,
    }
}
