use serde_json::{Map, Value, json};

/// One value returned by the data store.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers widen to floats; text is never coerced.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Integer(value) => json!(value),
            Self::Real(value) => json!(value),
            Self::Text(value) => json!(value),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Rows returned by one metric query.
///
/// Column order is fixed by the query; every row holds exactly one cell per
/// column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width must match the column count"
        );
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }

    /// All cells of one column, top to bottom. Empty when the column is unknown.
    #[must_use]
    pub fn column(&self, name: &str) -> Vec<&Cell> {
        match self.column_index(name) {
            Some(index) => self.rows.iter().map(|row| &row[index]).collect(),
            None => Vec::new(),
        }
    }

    /// Index of the first row whose `column` equals `value`.
    #[must_use]
    pub fn find_row(&self, column: &str, value: &Cell) -> Option<usize> {
        let index = self.column_index(column)?;
        self.rows.iter().position(|row| &row[index] == value)
    }

    #[must_use]
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    record.insert(column.clone(), cell.to_json());
                }
                Value::Object(record)
            })
            .collect()
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "columns": self.columns,
            "rows": self.to_json_rows(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Cell, ResultTable};

    fn sample() -> ResultTable {
        let mut table = ResultTable::new(["date", "count"]);
        table.push_row(vec![Cell::from("2015-03-02"), Cell::from(3)]);
        table.push_row(vec![Cell::from("2015-03-09"), Cell::Null]);
        table
    }

    #[test]
    fn lookups_by_column_name() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "count"), Some(&Cell::Integer(3)));
        assert_eq!(table.cell(1, "missing"), None);
        assert_eq!(table.cell(5, "count"), None);
        assert_eq!(table.column("date").len(), 2);
        assert!(table.column("nope").is_empty());
        assert_eq!(table.find_row("date", &Cell::from("2015-03-09")), Some(1));
    }

    #[test]
    fn json_rows_keep_nulls_and_column_names() {
        let encoded = sample().to_json();
        assert_eq!(encoded["columns"], json!(["date", "count"]));
        assert_eq!(encoded["rows"][0], json!({"date": "2015-03-02", "count": 3}));
        assert_eq!(encoded["rows"][1]["count"], json!(null));
    }

    #[test]
    fn numeric_accessors_widen_integers_only() {
        assert_eq!(Cell::Integer(2).as_f64(), Some(2.0));
        assert_eq!(Cell::Real(0.5).as_f64(), Some(0.5));
        assert_eq!(Cell::Real(0.5).as_i64(), None);
        assert_eq!(Cell::from("7").as_i64(), None);
        assert!(Cell::Null.is_null());
    }

    #[test]
    #[should_panic(expected = "row width must match")]
    fn rejects_ragged_rows() {
        let mut table = ResultTable::new(["a", "b"]);
        table.push_row(vec![Cell::Null]);
    }
}
