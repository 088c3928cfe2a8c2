//! Utility helpers for SQLite storage operations.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Maximum number of parameters for SQLite `IN (...)` queries, staying
/// safely under `SQLITE_MAX_VARIABLE_NUMBER`.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a `TEXT`-stored decimal column, falling back to zero and logging
/// on malformed data rather than failing the whole query.
pub fn decimal_from_text(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!("failed to parse {field_name} {value:?} as decimal: {e}");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_for_sqlite_splits_large_slices() {
        let items: Vec<i32> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn decimal_from_text_parses_valid_input() {
        assert_eq!(decimal_from_text("12.50", "amount"), Decimal::new(1250, 2));
    }

    #[test]
    fn decimal_from_text_falls_back_to_zero() {
        assert_eq!(decimal_from_text("not-a-number", "amount"), Decimal::ZERO);
    }
}
