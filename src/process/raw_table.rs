/// A table pulled out of an HTML page, before any typing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    /// Cleaned text of the first row's cells.
    pub headers: Vec<String>,
    /// Remaining rows in page order. `None` marks an empty cell; rows may be
    /// shorter or longer than `headers`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build from a grid whose first row is the header row.
    pub fn from_grid(mut grid: Vec<Vec<Option<String>>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let headers = grid
            .remove(0)
            .into_iter()
            .map(|cell| cell.unwrap_or_default())
            .collect();
        Self {
            headers,
            rows: grid,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell `col` of `row`, `None` when empty or past the end of the row.
    pub fn cell(row: &[Option<String>], col: usize) -> Option<&str> {
        row.get(col).and_then(|c| c.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_splits_header() {
        let t = RawTable::from_grid(vec![
            vec![Some("Ticker".into()), None],
            vec![Some("GME".into()), Some("NYSE".into())],
        ]);
        assert_eq!(t.headers, vec!["Ticker".to_string(), String::new()]);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.column_index("Ticker"), Some(0));
        assert_eq!(RawTable::cell(&t.rows[0], 1), Some("NYSE"));
        assert_eq!(RawTable::cell(&t.rows[0], 5), None);
    }

    #[test]
    fn test_from_empty_grid() {
        assert_eq!(RawTable::from_grid(vec![]), RawTable::default());
    }
}
