//! Header-addressed table view over a tab's grid

use super::CellUpdate;
use super::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A fetched tab: header row plus data rows
///
/// Data row `i` sits at grid row `i + 1`; grid row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Split a raw grid into header and data rows
    pub fn from_grid(mut grid: Vec<Vec<CellValue>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let headers = grid
            .remove(0)
            .iter()
            .map(|c| c.text().trim().to_string())
            .collect();
        Self {
            headers,
            rows: grid,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index by header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|cells| Record {
            table: self,
            index,
            cells,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, cells)| Record {
                table: self,
                index,
                cells,
            })
    }

    /// First record whose `column` text equals `value`
    pub fn find(&self, column: &str, value: &str) -> Option<Record<'_>> {
        self.records().find(|r| r.text(column) == value)
    }

    /// Write `value` under `column` at grid row `row`; `None` when the column is absent
    pub fn cell_update(
        &self,
        row: usize,
        column: &str,
        value: impl Into<CellValue>,
    ) -> Option<CellUpdate> {
        self.column(column)
            .map(|col| CellUpdate::new(row, col, value))
    }

    /// Lay out named values in header order; unknown headers get blanks
    pub fn layout_row(&self, values: &[(&str, CellValue)]) -> Vec<CellValue> {
        self.headers
            .iter()
            .map(|h| {
                values
                    .iter()
                    .find(|(name, _)| name == h)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(CellValue::Text(String::new()))
            })
            .collect()
    }
}

/// One data row addressed by header name
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    index: usize,
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// Grid row index (header is row 0)
    pub fn grid_row(&self) -> usize {
        self.index + 1
    }

    /// Cell under `field`; missing columns and short rows read as empty
    pub fn get(&self, field: &str) -> &'a CellValue {
        self.table
            .column(field)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }

    pub fn text(&self, field: &str) -> String {
        self.get(field).text()
    }

    /// First non-empty cell among `fields`
    pub fn first_present(&self, fields: &[&str]) -> &'a CellValue {
        fields
            .iter()
            .map(|f| self.get(f))
            .find(|c| !c.is_empty())
            .unwrap_or(&EMPTY)
    }

    /// Soft-delete flag
    pub fn is_enabled(&self) -> bool {
        self.get("enabled").flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_grid(vec![
            vec!["id".into(), "name".into(), "enabled".into(), "Date".into()],
            vec!["a".into(), "Alpha".into(), true.into(), "2024-01-01".into()],
            vec!["b".into(), "Beta".into(), "FALSE".into()],
        ])
    }

    #[test]
    fn test_lookup_by_header() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.column("name"), Some(1));
        assert_eq!(t.column("missing"), None);

        let b = t.find("id", "b").unwrap();
        assert_eq!(b.grid_row(), 2);
        assert_eq!(b.text("name"), "Beta");
        assert!(!b.is_enabled());
        // short row
        assert_eq!(b.get("Date"), &CellValue::Empty);
    }

    #[test]
    fn test_first_present() {
        let t = table();
        let a = t.find("id", "a").unwrap();
        assert_eq!(
            a.first_present(&["created_at", "createdAt", "Date", "date"]).text(),
            "2024-01-01"
        );
        let b = t.find("id", "b").unwrap();
        assert!(b.first_present(&["created_at", "Date"]).is_empty());
    }

    #[test]
    fn test_layout_row_follows_header() {
        let t = table();
        let row = t.layout_row(&[("name", "Gamma".into()), ("id", "c".into()), ("x", 1i64.into())]);
        assert_eq!(row.len(), 4);
        assert_eq!(row[0], CellValue::Text("c".into()));
        assert_eq!(row[1], CellValue::Text("Gamma".into()));
        assert_eq!(row[3], CellValue::Text(String::new()));
    }

    #[test]
    fn test_cell_update_skips_missing_column() {
        let t = table();
        assert_eq!(
            t.cell_update(2, "name", "Delta"),
            Some(CellUpdate::new(2, 1, "Delta"))
        );
        assert_eq!(t.cell_update(2, "price", 1i64), None);
    }

    #[test]
    fn test_empty_grid() {
        let t = Table::from_grid(vec![]);
        assert!(t.headers().is_empty());
        assert!(t.is_empty());
    }
}
