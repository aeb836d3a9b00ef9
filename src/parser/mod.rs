pub mod fields;
pub mod sections;
pub mod tables;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::error::{ScrapeError, StructureFailure};
use crate::model::{Chamber, PoliticianRecord};
use crate::validate::{self, Warning};
use sections::SectionYearResolver;

static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse(tables::HEADING_TAG).unwrap());

/// Result of parsing one chamber's page.
#[derive(Debug)]
pub struct Extraction {
    pub chamber: Chamber,
    pub records: Vec<PoliticianRecord>,
    /// Distinct valid election years, in the order their headings appeared.
    pub election_years: Vec<i32>,
    pub warnings: Vec<Warning>,
}

/// Headings → sections → rows → records, then validation.
///
/// `max_year` is the latest election year accepted (normally the current year).
pub fn extract_chamber(chamber: Chamber, html: &str, max_year: i32) -> Result<Extraction, ScrapeError> {
    let document = Html::parse_document(html);
    let headings: Vec<_> = document.select(&HEADING).collect();

    validate::require_headings(headings.len()).map_err(|f| ScrapeError::structure(chamber, f))?;

    let mut resolver = SectionYearResolver::new(max_year);
    let mut records = Vec::new();
    let mut last_section = None;

    for heading in &headings {
        let title = tables::element_text(*heading);
        let Some(year) = resolver.observe(&title).year() else {
            debug!(title = %title, "section skipped: no valid election year");
            continue;
        };
        last_section = Some(title.clone());

        let Some(table) = tables::locate_table(*heading) else {
            debug!(title = %title, "section skipped: no table");
            continue;
        };
        let rows = tables::body_rows(table);
        if rows.is_empty() {
            debug!(title = %title, "section skipped: table has no data rows");
            continue;
        }

        let before = records.len();
        for cells in &rows {
            match fields::split_row(cells, chamber, year) {
                Some(record) => records.push(record),
                None => debug!(cells = cells.len(), title = %title, "row skipped"),
            }
        }
        info!(
            %chamber,
            year,
            title = %title,
            politicians = records.len() - before,
            "section extracted"
        );
    }

    let election_years = resolver.into_discovered();
    let warnings = validate::check(chamber, &records, &election_years, headings.len(), last_section)
        .map_err(|f| ScrapeError::structure(chamber, f))?;
    for warning in &warnings {
        warn!(%chamber, "{}", warning);
    }

    info!(
        %chamber,
        politicians = records.len(),
        years = ?election_years,
        "extraction completed"
    );
    for (year, count) in year_distribution(&records) {
        debug!(%chamber, year, count, "election year distribution");
    }

    Ok(Extraction {
        chamber,
        records,
        election_years,
        warnings,
    })
}

fn year_distribution(records: &[PoliticianRecord]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.election_year).or_insert(0) += 1;
    }
    counts
}

// ── Tests ──
