//! Tables, documents and extraction results

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A normalized table: rows of cell strings.
///
/// Rows may have different lengths; every consumer tolerates ragged and
/// empty rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from string slices
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, j: usize) -> Option<&[String]> {
        self.rows.get(j).map(Vec::as_slice)
    }

    pub fn cell(&self, j: usize, k: usize) -> Option<&str> {
        self.rows.get(j)?.get(k).map(String::as_str)
    }

    /// Resolve an offset relative to the anchor `(j, k)`, clamping to the
    /// table boundary. Returns `None` only when the clamped row has no cells.
    pub fn resolve(&self, j: usize, k: usize, dj: isize, dk: isize) -> Option<(usize, usize)> {
        let height = self.rows.len();
        if height == 0 {
            return None;
        }
        let jj = clamp_offset(j, dj, height - 1);
        let width = self.rows[jj].len();
        if width == 0 {
            return None;
        }
        let kk = clamp_offset(k, dk, width - 1);
        Some((jj, kk))
    }
}

fn clamp_offset(origin: usize, delta: isize, max: usize) -> usize {
    let target = origin as isize + delta;
    target.clamp(0, max as isize) as usize
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// Tables of one source document with pass-through metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableDocument {
    /// Source file name
    pub file: String,
    pub tables: Vec<Table>,
    /// Classification labels of the document
    pub classification: Vec<String>,
}

impl TableDocument {
    pub fn new(file: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            file: file.into(),
            tables,
            classification: Vec::new(),
        }
    }
}

/// Text pages of one source document, keyed by page number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextDocument {
    pub file: String,
    pub pages: IndexMap<u32, String>,
    pub classification: Vec<String>,
}

impl TextDocument {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: u32, text: impl Into<String>) -> Self {
        self.pages.insert(page, text.into());
        self
    }
}

/// Where a tuple was found
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Context {
    /// The table row holding the key
    Row(Vec<String>),
    /// Text surrounding the key
    Text(String),
}

impl Context {
    /// Flat text of the context
    pub fn text(&self) -> String {
        match self {
            Context::Row(cells) => cells.join(" "),
            Context::Text(text) => text.clone(),
        }
    }
}

/// One extracted key-value-unit tuple
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KvuTuple {
    pub file: String,
    pub main_key: String,
    pub matched_synonym: String,
    pub value: String,
    /// Empty when the key takes no unit
    pub unit: String,
    pub context: Context,
    /// Table index (table engine) or page number (text engine)
    pub index: usize,
    pub classification: Vec<String>,
}

impl KvuTuple {
    /// Fields that identify a tuple when merging results
    pub fn identity(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.file,
            &self.main_key,
            &self.matched_synonym,
            &self.value,
            &self.unit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged() -> Table {
        Table::from_rows(vec![
            vec!["a", "b", "c"],
            vec!["d"],
            vec![],
            vec!["e", "f"],
        ])
    }

    #[test]
    fn test_resolve_clamps_to_boundary() {
        let table = ragged();
        assert_eq!(table.resolve(0, 0, -5, -5), Some((0, 0)));
        assert_eq!(table.resolve(0, 2, 10, 0), Some((3, 1)));
        assert_eq!(table.resolve(0, 2, 1, 0), Some((1, 0)));
    }

    #[test]
    fn test_resolve_empty_row() {
        let table = ragged();
        assert_eq!(table.resolve(1, 0, 1, 0), None);
        assert_eq!(Table::default().resolve(0, 0, 0, 0), None);
    }

    #[test]
    fn test_context_text() {
        let row = Context::Row(vec!["voltage".into(), "230".into(), "v".into()]);
        assert_eq!(row.text(), "voltage 230 v");
        assert_eq!(Context::Text("x".into()).text(), "x");
    }
}
