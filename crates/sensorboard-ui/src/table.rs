//! Resource-agnostic table renderer
//!
//! A table is described by an ordered list of [`ColumnDescriptor`]s. The
//! renderer knows nothing about the rows it draws: every cell comes from the
//! descriptor's render function. Whether an action column is present is
//! decided by the caller before the descriptors are handed over.

use sensorboard_core::{PageEnvelope, PageRequest};

/// Content of one table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Actions(Vec<RowAction>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Text content, empty for action cells
    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Actions(_) => "",
        }
    }

    /// Row actions, empty for text cells
    pub fn actions(&self) -> &[RowAction] {
        match self {
            Cell::Text(_) => &[],
            Cell::Actions(actions) => actions,
        }
    }
}

/// A per-row control in the action column
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    /// Link to an edit form
    Edit { href: String },
    /// Form posting the row identifier to a delete endpoint
    Delete {
        action: String,
        field: &'static str,
        id: String,
    },
}

impl RowAction {
    pub fn is_delete(&self) -> bool {
        matches!(self, RowAction::Delete { .. })
    }

    /// Link target or form action
    pub fn target(&self) -> &str {
        match self {
            RowAction::Edit { href } => href,
            RowAction::Delete { action, .. } => action,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            RowAction::Edit { .. } => "",
            RowAction::Delete { field, .. } => field,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RowAction::Edit { .. } => "",
            RowAction::Delete { id, .. } => id,
        }
    }
}

type RenderFn<T> = Box<dyn Fn(&T, usize) -> Cell + Send + Sync>;

/// Title plus per-cell render function for one column
pub struct ColumnDescriptor<T> {
    pub title: String,
    pub is_action_column: bool,
    render: RenderFn<T>,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(
        title: impl Into<String>,
        render: impl Fn(&T, usize) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            is_action_column: false,
            render: Box::new(render),
        }
    }

    pub fn action(
        title: impl Into<String>,
        render: impl Fn(&T, usize) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            is_action_column: true,
            ..Self::new(title, render)
        }
    }

    pub fn render(&self, row: &T, index: usize) -> Cell {
        (self.render)(row, index)
    }
}

impl<T> std::fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("title", &self.title)
            .field("is_action_column", &self.is_action_column)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub title: String,
    pub is_action: bool,
}

/// Page position derived from the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based current page
    pub current: u64,
    pub page_count: u64,
    pub total_items: u64,
}

/// Output of [`render_table`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
    pub pagination: Pagination,
}

impl RenderedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column span of the "no data" row
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Render one header per descriptor and `columns.len()` cells per item
pub fn render_table<T>(columns: &[ColumnDescriptor<T>], envelope: &PageEnvelope<T>) -> RenderedTable {
    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            title: column.title.clone(),
            is_action: column.is_action_column,
        })
        .collect();

    let rows = envelope
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| columns.iter().map(|column| column.render(item, index)).collect())
        .collect();

    RenderedTable {
        headers,
        rows,
        pagination: Pagination {
            current: envelope.page,
            page_count: envelope.page_count(),
            total_items: envelope.total_items,
        },
    }
}

/// Link to one page of the list
#[derive(Debug, Clone, PartialEq)]
pub struct PageLink {
    /// One-based label, empty for gaps
    pub label: String,
    pub href: String,
    pub current: bool,
    pub gap: bool,
}

/// Pages always shown on each side of the current one
const WINDOW: u64 = 2;

/// Build pagination links that repeat the request's filters
///
/// Long page ranges are shortened to the first page, the last page and a
/// window around the current page.
pub fn page_links(route: &str, request: &PageRequest, pagination: &Pagination) -> Vec<PageLink> {
    let mut links = Vec::new();
    let last = match pagination.page_count.checked_sub(1) {
        Some(last) => last,
        None => return links,
    };

    let mut previous: Option<u64> = None;
    for page in 0..=last {
        let visible =
            page == 0 || page == last || page.abs_diff(pagination.current) <= WINDOW;
        if !visible {
            continue;
        }
        if previous.is_some_and(|prev| page > prev + 1) {
            links.push(PageLink {
                label: String::new(),
                href: String::new(),
                current: false,
                gap: true,
            });
        }
        links.push(PageLink {
            label: (page + 1).to_string(),
            href: page_href(route, &request.with_page(page)),
            current: page == pagination.current,
            gap: false,
        });
        previous = Some(page);
    }

    links
}

/// `route?search=..&size=..&page=..` for the given request
pub fn page_href(route: &str, request: &PageRequest) -> String {
    match serde_urlencoded::to_string(request.link_params()) {
        Ok(query) if !query.is_empty() => format!("{}?{}", route, query),
        _ => route.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        name: &'static str,
        value: u32,
    }

    fn columns() -> Vec<ColumnDescriptor<Row>> {
        vec![
            ColumnDescriptor::new("No", |_: &Row, i| Cell::text((i + 1).to_string())),
            ColumnDescriptor::new("Name", |row: &Row, _| Cell::text(row.name)),
            ColumnDescriptor::new("Value", |row: &Row, _| Cell::text(row.value.to_string())),
        ]
    }

    fn envelope(count: usize, total: u64) -> PageEnvelope<Row> {
        let items = (0..count)
            .map(|i| Row {
                name: "row",
                value: i as u32 * 10,
            })
            .collect();
        PageEnvelope::new(items, total, 0, 10)
    }

    #[test]
    fn test_rows_times_columns_cells() {
        let table = render_table(&columns(), &envelope(4, 4));
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows.len(), 4);
        assert!(table.rows.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_cells_follow_descriptor_order() {
        let table = render_table(&columns(), &envelope(2, 2));
        let titles: Vec<_> = table.headers.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["No", "Name", "Value"]);
        assert_eq!(
            table.rows[1],
            vec![Cell::text("2"), Cell::text("row"), Cell::text("10")]
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let columns = columns();
        let envelope = envelope(3, 3);
        assert_eq!(render_table(&columns, &envelope), render_table(&columns, &envelope));
    }

    #[test]
    fn test_empty_envelope_keeps_headers() {
        let table = render_table(&columns(), &envelope(0, 0));
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.pagination.page_count, 0);
    }

    #[test]
    fn test_action_column_flag() {
        let mut columns = columns();
        columns.push(ColumnDescriptor::action("Aksi", |row: &Row, _| {
            Cell::Actions(vec![RowAction::Delete {
                action: "/rows/delete".to_string(),
                field: "rowId",
                id: row.value.to_string(),
            }])
        }));
        let table = render_table(&columns, &envelope(1, 1));
        assert!(table.headers[3].is_action);
        let actions = table.rows[0][3].actions();
        assert_eq!(actions.len(), 1);
        assert!(actions[0].is_delete());
        assert_eq!(actions[0].field(), "rowId");
        assert_eq!(table.rows[0][3].as_text(), "");
    }

    #[test]
    fn test_page_count_for_partial_last_page() {
        let mut last_page = envelope(5, 25);
        last_page.page = 2;
        let table = render_table(&columns(), &last_page);
        assert_eq!(table.pagination.page_count, 3);
        assert_eq!(table.pagination.current, 2);
        assert_eq!(table.rows.len(), 5);
    }

    #[test]
    fn test_page_links_keep_filters() {
        let request = PageRequest {
            search: "hot day".to_string(),
            ..PageRequest::default()
        };
        let pagination = Pagination {
            current: 0,
            page_count: 3,
            total_items: 25,
        };
        let links = page_links("/data-sensors", &request, &pagination);
        assert_eq!(links.len(), 3);
        assert!(links[0].current);
        assert_eq!(links[2].label, "3");
        assert_eq!(
            links[2].href,
            "/data-sensors?search=hot+day&size=10&page=2&range=all"
        );
    }

    #[test]
    fn test_page_links_collapse_long_ranges() {
        let pagination = Pagination {
            current: 10,
            page_count: 20,
            total_items: 200,
        };
        let links = page_links("/income", &PageRequest::default(), &pagination);
        let labels: Vec<_> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "", "9", "10", "11", "12", "13", "", "20"]);
        assert!(links[1].gap);
        assert!(links[4].current);
    }

    #[test]
    fn test_no_links_without_pages() {
        let pagination = Pagination {
            current: 0,
            page_count: 0,
            total_items: 0,
        };
        assert!(page_links("/income", &PageRequest::default(), &pagination).is_empty());
    }
}
