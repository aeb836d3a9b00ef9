use thiserror::Error;

use crate::model::Chamber;

/// Fatal conditions for one chamber's extraction.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetching {chamber} page {url} returned HTTP {status}")]
    HttpStatus {
        chamber: Chamber,
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("fetching {chamber} page {url} failed")]
    Transport {
        chamber: Chamber,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{chamber} page has an unexpected structure: {failure}")]
    Structure {
        chamber: Chamber,
        failure: StructureFailure,
    },
}

impl ScrapeError {
    pub fn structure(chamber: Chamber, failure: StructureFailure) -> Self {
        ScrapeError::Structure { chamber, failure }
    }
}

/// The page parsed, but not into something usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureFailure {
    #[error("no section headings found; cannot determine election years")]
    NoHeadings,
    #[error("no valid election year found in any of {headings} section headings")]
    NoElectionYear { headings: usize },
    #[error("no politicians found in sections for election years {years:?} (last section: {last_section:?})")]
    NoRecords {
        years: Vec<i32>,
        last_section: Option<String>,
    },
}
