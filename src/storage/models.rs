//! Database models for the key/value store.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::storage::schema;

/// A stored key/value row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::store_entries)]
pub struct StoreEntry {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable row; writes replace any existing row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::store_entries)]
pub struct NewStoreEntry {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
