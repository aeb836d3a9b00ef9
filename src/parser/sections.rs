use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]{4})年").unwrap());

/// Earliest year is exclusive: post-war elections only.
pub const MIN_ELECTION_YEAR: i32 = 1945;

/// Election year carried from one heading to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearState {
    #[default]
    NoYear,
    Year(i32),
}

impl YearState {
    /// State after reading `title`. A title without a year marker keeps the
    /// current state; a marker outside `(1945, max_year]` clears it.
    pub fn advance(self, title: &str, max_year: i32) -> YearState {
        match heading_year(title) {
            None => self,
            Some(year) if is_valid_year(year, max_year) => YearState::Year(year),
            Some(_) => YearState::NoYear,
        }
    }

    pub fn year(self) -> Option<i32> {
        match self {
            YearState::Year(y) => Some(y),
            YearState::NoYear => None,
        }
    }
}

/// First "NNNN年" in a heading, if any.
pub fn heading_year(title: &str) -> Option<i32> {
    YEAR_RE.captures(title)?.get(1)?.as_str().parse().ok()
}

pub fn is_valid_year(year: i32, max_year: i32) -> bool {
    year > MIN_ELECTION_YEAR && year <= max_year
}

/// Linear scan over headings in document order, tracking the current
/// election year and every distinct valid year seen.
#[derive(Debug)]
pub struct SectionYearResolver {
    max_year: i32,
    state: YearState,
    discovered: Vec<i32>,
}

impl SectionYearResolver {
    pub fn new(max_year: i32) -> Self {
        SectionYearResolver {
            max_year,
            state: YearState::NoYear,
            discovered: Vec::new(),
        }
    }

    /// Feed the next heading and return the state its section is processed under.
    pub fn observe(&mut self, title: &str) -> YearState {
        let next = self.state.advance(title, self.max_year);
        match (heading_year(title), next) {
            (Some(year), YearState::Year(_)) => {
                info!(year, title, "section resolved");
                if !self.discovered.contains(&year) {
                    self.discovered.push(year);
                }
            }
            (Some(year), YearState::NoYear) => {
                info!(year, title, max_year = self.max_year, "invalid election year");
            }
            (None, state) => debug!(?state, title, "heading without year, carrying state"),
        }
        self.state = next;
        next
    }

    /// Distinct valid years, in the order first seen.
    pub fn into_discovered(self) -> Vec<i32> {
        self.discovered
    }
}
