use rusqlite::Row;

/// Typed decoding of a query row into an entity record.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
