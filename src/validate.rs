use std::fmt;

use crate::error::StructureFailure;
use crate::model::{Chamber, PoliticianRecord};

/// Member counts below which a chamber's page looks incomplete.
pub const REPRESENTATIVES_MIN: usize = 400;
pub const REPRESENTATIVES_EXPECTED: usize = 465;
pub const COUNCILLORS_MIN: usize = 200;
pub const COUNCILLORS_EXPECTED: usize = 245;

/// Councillor sets larger than this are expected to span several elections.
pub const SINGLE_YEAR_RECORD_LIMIT: usize = 100;

/// Non-fatal oddities; extraction output is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    LowCount {
        chamber: Chamber,
        found: usize,
        expected: usize,
    },
    SingleElectionYear { year: i32, records: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LowCount {
                chamber,
                found,
                expected,
            } => write!(
                f,
                "small number of {} found: {} (expected around {})",
                chamber, found, expected
            ),
            Warning::SingleElectionYear { year, records } => write!(
                f,
                "only one election year ({}) detected across {} councillors; \
                 councillors are normally elected in staggered years",
                year, records
            ),
        }
    }
}

pub fn require_headings(count: usize) -> Result<(), StructureFailure> {
    if count == 0 {
        return Err(StructureFailure::NoHeadings);
    }
    Ok(())
}

/// Hard and soft checks over a chamber's complete record set.
pub fn check(
    chamber: Chamber,
    records: &[PoliticianRecord],
    election_years: &[i32],
    headings: usize,
    last_section: Option<String>,
) -> Result<Vec<Warning>, StructureFailure> {
    if election_years.is_empty() {
        return Err(StructureFailure::NoElectionYear { headings });
    }
    if records.is_empty() {
        return Err(StructureFailure::NoRecords {
            years: election_years.to_vec(),
            last_section,
        });
    }

    let mut warnings = Vec::new();
    let (min, expected) = match chamber {
        Chamber::Representatives => (REPRESENTATIVES_MIN, REPRESENTATIVES_EXPECTED),
        Chamber::Councillors => (COUNCILLORS_MIN, COUNCILLORS_EXPECTED),
    };
    if records.len() < min {
        warnings.push(Warning::LowCount {
            chamber,
            found: records.len(),
            expected,
        });
    }

    if let (Chamber::Councillors, [year]) = (chamber, election_years) {
        if records.len() > SINGLE_YEAR_RECORD_LIMIT {
            warnings.push(Warning::SingleElectionYear {
                year: *year,
                records: records.len(),
            });
        }
    }

    Ok(warnings)
}
