//! Row structs for the catalog and mapping tables.
//!
//! Each submodule contains a `FromRow` struct matching the table and a
//! conversion into the corresponding core domain type. JSONB columns are
//! decoded in the conversion so a malformed row surfaces as
//! [`StoreError::Malformed`](traitmatch_core::store::StoreError::Malformed)
//! instead of a driver error.

pub mod character;
pub mod media_trait;
pub mod question;
