use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

pub const HEADING_TAG: &str = "h2";

/// Table belonging to a section heading.
///
/// The first `<table>` among all following siblings wins, even one past the
/// next heading. Only when there is none is a table nested inside the
/// siblings up to the next heading used.
pub fn locate_table(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    following(heading)
        .find(|el| el.value().name() == "table")
        .or_else(|| {
            following(heading)
                .take_while(|el| el.value().name() != HEADING_TAG)
                .find_map(|el| el.select(&TABLE).next())
        })
}

fn following(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Cell texts of every data row; the first `<tr>` is the header and is dropped.
pub fn body_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    table
        .select(&ROW)
        .skip(1)
        .map(|row| row.select(&CELL).map(element_text).collect())
        .collect()
}

/// Concatenated descendant text, trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
