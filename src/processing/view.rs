//! Presentation helpers over a row sequence: paging and column visibility.
//!
//! Neither helper changes what the pipeline computes; they slice and project its output for
//! display.

use crate::types::Row;

/// Rows shown per page unless the caller picks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One page of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Rows on this page.
    pub rows: &'a [Row],
    /// 1-based page number actually served (after clamping).
    pub page: usize,
    /// Number of pages; zero for an empty input.
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
    /// Index of the first row on this page.
    pub start: usize,
    /// One past the index of the last row on this page.
    pub end: usize,
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out 1-based `page` of `rows`.
///
/// `page` is clamped into `1..=total_pages` (page 1 for an empty input) and a `page_size` of zero
/// is treated as one.
pub fn paginate(rows: &[Row], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size);
    let page = page.min(total_pages).max(1);

    let start = ((page - 1) * page_size).min(total_rows);
    let end = (start + page_size).min(total_rows);

    Page {
        rows: &rows[start..end],
        page,
        total_pages,
        total_rows,
        start,
        end,
    }
}

/// Tracks which columns of a table are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    columns: Vec<String>,
    visible: Vec<String>,
}

impl ColumnVisibility {
    /// Start with every column visible.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        Self {
            visible: columns.clone(),
            columns,
        }
    }

    /// Hide a visible column, or show a hidden one (appended to the end of the toggle list).
    ///
    /// Unknown names are ignored.
    pub fn toggle(&mut self, column: &str) {
        if let Some(pos) = self.visible.iter().position(|c| c == column) {
            self.visible.remove(pos);
        } else if self.columns.iter().any(|c| c == column) {
            self.visible.push(column.to_owned());
        }
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.iter().any(|c| c == column)
    }

    /// Visible column names in the order they were toggled on.
    pub fn toggled_on(&self) -> &[String] {
        &self.visible
    }

    /// Visible column names in table order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.is_visible(c))
            .map(String::as_str)
            .collect()
    }

    /// Copy `rows` keeping only visible columns, in table order.
    pub fn project(&self, rows: &[Row]) -> Vec<Row> {
        let visible = self.visible_columns();
        rows.iter()
            .map(|row| {
                let mut out = Row::with_capacity(visible.len());
                for column in &visible {
                    if let Some(v) = row.get(column) {
                        out.insert(*column, v.clone());
                    }
                }
                out
            })
            .collect()
    }
}
