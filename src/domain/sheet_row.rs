use std::collections::HashMap;

use super::import_report::RowError;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Empty text, zero, NaN and `false` are falsy, so they fall through to the next column name.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Text(t) => !t.is_empty(),
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Bool(b) => *b,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(t) => t.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(t) => t.trim().parse().ok(),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

/// One data row of a sheet, keyed by the header row's text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: HashMap<String, Cell>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn pick(&self, columns: &[&str]) -> Option<&Cell> {
        columns
            .iter()
            .filter_map(|c| self.cells.get(*c))
            .find(|cell| cell.is_truthy())
    }

    pub fn text(&self, columns: &[&str]) -> Option<String> {
        self.pick(columns).map(Cell::to_text)
    }

    pub fn required_text(&self, columns: &[&str]) -> Option<String> {
        self.text(columns)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn number(&self, columns: &[&str]) -> Result<Option<f64>, RowError> {
        match self.pick(columns) {
            None => Ok(None),
            Some(cell) => cell
                .to_number()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| RowError::InvalidNumber(columns[0].to_string())),
        }
    }

    pub fn list(&self, columns: &[&str]) -> Vec<String> {
        self.text(columns)
            .map(|t| {
                t.split(',')
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for SheetRow {
    fn from_iter<T: IntoIterator<Item = (K, Cell)>>(iter: T) -> Self {
        let mut row = SheetRow::new();
        iter.into_iter().for_each(|(k, v)| row.insert(k, v));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, SheetRow};
    use crate::domain::import_report::RowError;

    #[test]
    fn pick_skips_falsy_cells() {
        let row: SheetRow = [
            ("Price", Cell::Number(0.0)),
            ("price", Cell::Text("250".to_string())),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.pick(&["Price", "price"]), Some(&Cell::Text("250".to_string())));
        assert_eq!(row.number(&["Price", "price"]).unwrap(), Some(250.0));
    }

    #[test]
    fn number_reports_first_column_name_on_garbage() {
        let row: SheetRow = [("Rating", Cell::Text("four".to_string()))].into_iter().collect();

        assert_eq!(
            row.number(&["Rating", "rating"]),
            Err(RowError::InvalidNumber("Rating".to_string()))
        );
    }

    #[test]
    fn list_splits_and_drops_blanks() {
        let row: SheetRow = [("Tags", Cell::Text("music, , outdoor ,family".to_string()))]
            .into_iter()
            .collect();

        assert_eq!(row.list(&["Tags", "tags"]), vec!["music", "outdoor", "family"]);
        assert!(row.list(&["Amenities"]).is_empty());
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(500.0).to_text(), "500");
        assert_eq!(Cell::Number(4.5).to_text(), "4.5");
    }
}
