use std::fmt;

use serde::{Deserialize, Serialize};

pub const AGREE: &str = "賛成";
pub const DISAGREE: &str = "反対";
pub const NO_ANSWER: &str = "無回答";

/// One house of the Diet. Extraction only ever produces these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Representatives,
    Councillors,
}

impl Chamber {
    pub fn as_str(self) -> &'static str {
        match self {
            Chamber::Representatives => "representatives",
            Chamber::Councillors => "councillors",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a statistics object covers. `All` only appears on aggregated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsScope {
    Representatives,
    Councillors,
    All,
}

impl From<Chamber> for StatsScope {
    fn from(chamber: Chamber) -> Self {
        match chamber {
            Chamber::Representatives => StatsScope::Representatives,
            Chamber::Councillors => StatsScope::Councillors,
        }
    }
}

/// A member's entry as recovered from one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoliticianRecord {
    pub chamber: Chamber,
    pub district: String,
    pub name: String,
    pub party: String,
    pub separate_last_name: String,
    pub same_sex_marriage: String,
    pub election_year: i32,
}
