//! Reducers that bring an in-memory collection in line with a mutation the store has already
//! confirmed, so the whole collection does not need to be fetched again.
//!
//! Each reducer takes the old collection by reference and returns a new one. None of them perform
//! I/O, and an id that is not present leaves the collection as it was.

use crate::model::Record;

/// Adds a newly created record at the front. Collections are kept most-recent-first, the same
/// order the store returns them in.
pub fn insert<R>(records: &[R], record: R) -> Vec<R>
where
    R: Record,
{
    let mut out = Vec::with_capacity(records.len() + 1);
    out.push(record);
    out.extend_from_slice(records);
    out
}

/// Applies `updates` to the record with `id`.
pub fn update<R>(records: &[R], id: &str, updates: &R::Updates) -> Vec<R>
where
    R: Record,
{
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if record.id() == id {
                record.apply(updates);
            }
            record
        })
        .collect()
}

/// Removes the record with `id`.
pub fn delete<R>(records: &[R], id: &str) -> Vec<R>
where
    R: Record,
{
    records
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect()
}
