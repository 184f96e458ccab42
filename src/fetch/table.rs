// src/fetch/table.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::schedule::Row;

/// Id of the element wrapping the release table on the schedule page.
pub const CHART_CONTAINER: &str = "page_filling_chart";

static CHART_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!("div#{} table", CHART_CONTAINER))
        .expect("CSS selector for the chart table should be valid")
});
static ANY_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("CSS selector for tables should be valid"));
static TABLE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("CSS selector for rows should be valid"));

/// Locate the release table in `html` and return its rows as cell text.
///
/// The table inside `#page_filling_chart` is preferred. Failing that, the
/// table with the most rows anywhere on the page is used. Only a page with
/// no table at all is an error; a table without rows gives an empty list.
pub fn extract_rows(html: &str) -> Result<Vec<Row>, ScrapeError> {
    let doc = Html::parse_document(html);

    let table = match doc.select(&CHART_TABLE).next() {
        Some(table) => table,
        None => {
            let fallback = doc
                .select(&ANY_TABLE)
                .max_by_key(|t| own_rows(*t).count())
                .ok_or(ScrapeError::TableNotFound)?;
            warn!(
                container = CHART_CONTAINER,
                "chart container missing, using the largest table on the page"
            );
            fallback
        }
    };

    let rows: Vec<Row> = own_rows(table).map(row_cells).collect();
    debug!(rows = rows.len(), "extracted table rows");
    Ok(rows)
}

/// `<tr>` elements belonging to `table` itself, skipping rows of any table
/// nested inside one of its cells.
fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let table_id = table.id();
    table.select(&TABLE_ROW).filter(move |tr| {
        tr.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "table")
            .map(|el| el.id() == table_id)
            .unwrap_or(false)
    })
}

/// Text of each direct `<td>` child, whitespace collapsed.
fn row_cells(tr: ElementRef<'_>) -> Row {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .map(|cell| cell_text(cell))
        .collect()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_chart_table() {
        let html = r#"
            <html><body>
              <table><tr><td>nav</td></tr><tr><td>a</td></tr><tr><td>b</td></tr><tr><td>c</td></tr></table>
              <div id="page_filling_chart">
                <table>
                  <tr><th>Date</th><th>Movie</th><th>Distributor</th></tr>
                  <tr><td colspan="3">February 2026</td></tr>
                  <tr><td>15th</td><td><b><a href="/m/a">Movie&nbsp;A</a></b></td><td>Studio   X</td></tr>
                  <tr><td></td><td>Movie B</td><td>Studio Y</td></tr>
                </table>
              </div>
            </body></html>
        "#;
        let rows = extract_rows(html).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![],
                vec!["February 2026".to_string()],
                vec!["15th".into(), "Movie A".into(), "Studio X".into()],
                vec!["".into(), "Movie B".into(), "Studio Y".into()],
            ]
        );
    }

    #[test]
    fn falls_back_to_the_largest_table() {
        let html = r#"
            <table><tr><td>menu</td></tr></table>
            <table>
              <tr><td>March 2026</td></tr>
              <tr><td>6</td><td>Movie A</td></tr>
            </table>
        "#;
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["6".to_string(), "Movie A".to_string()]);
    }

    #[test]
    fn nested_table_rows_stay_with_their_table() {
        let html = r#"
            <div id="page_filling_chart"><table>
              <tr><td>7</td><td><table><tr><td>inner</td></tr></table>Movie A</td></tr>
            </table></div>
        "#;
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "7");
        assert_eq!(rows[0][1], "inner Movie A");
    }

    #[test]
    fn no_table_is_an_error() {
        let err = extract_rows("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound));
    }

    #[test]
    fn empty_table_is_not_an_error() {
        let rows = extract_rows(r#"<div id="page_filling_chart"><table></table></div>"#).unwrap();
        assert!(rows.is_empty());
    }
}
