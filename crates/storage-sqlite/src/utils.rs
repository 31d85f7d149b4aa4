//! Helpers for SQLite queries with `IN (...)` lists.

/// SQLite caps bound parameters per statement (SQLITE_MAX_VARIABLE_NUMBER,
/// 999 on older builds). Id lists are split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for one `eq_any` filter each.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ids_means_no_queries() {
        let ids: Vec<String> = vec![];
        assert_eq!(chunk_for_sqlite(&ids).count(), 0);
    }

    #[test]
    fn test_large_id_lists_are_split() {
        let ids: Vec<usize> = (0..1200).collect();
        let sizes: Vec<usize> = chunk_for_sqlite(&ids).map(<[usize]>::len).collect();
        assert_eq!(sizes, vec![500, 500, 200]);
    }
}
