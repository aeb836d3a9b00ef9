use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{PoliticianRecord, StatsScope};

/// Stance value -> number of members holding it. Only values that occur are keys.
pub type StanceCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub chamber: StatsScope,
    pub total: usize,
    pub separate_last_name: StanceCounts,
    pub same_sex_marriage: StanceCounts,
    pub by_election_year: BTreeMap<i32, YearStats>,
    pub by_party: BTreeMap<String, PartyStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    pub total: usize,
    pub separate_last_name: StanceCounts,
    pub same_sex_marriage: StanceCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyStats {
    pub count: usize,
    pub separate_last_name: StanceCounts,
    pub same_sex_marriage: StanceCounts,
}

/// Both stance breakdowns over one group of records.
struct Breakdown {
    total: usize,
    separate_last_name: StanceCounts,
    same_sex_marriage: StanceCounts,
}

impl Breakdown {
    fn of<'a>(records: impl IntoIterator<Item = &'a PoliticianRecord>) -> Self {
        let mut b = Breakdown {
            total: 0,
            separate_last_name: StanceCounts::new(),
            same_sex_marriage: StanceCounts::new(),
        };
        for r in records {
            b.total += 1;
            *b.separate_last_name.entry(r.separate_last_name.clone()).or_insert(0) += 1;
            *b.same_sex_marriage.entry(r.same_sex_marriage.clone()).or_insert(0) += 1;
        }
        b
    }
}

/// Count breakdowns by stance, election year and party. Group keys come from
/// the records themselves, so an empty input gives empty maps.
pub fn generate(records: &[PoliticianRecord], scope: StatsScope) -> Statistics {
    let mut years: BTreeMap<i32, Vec<&PoliticianRecord>> = BTreeMap::new();
    let mut parties: BTreeMap<&str, Vec<&PoliticianRecord>> = BTreeMap::new();
    for r in records {
        years.entry(r.election_year).or_default().push(r);
        parties.entry(r.party.as_str()).or_default().push(r);
    }

    let overall = Breakdown::of(records);

    Statistics {
        chamber: scope,
        total: overall.total,
        separate_last_name: overall.separate_last_name,
        same_sex_marriage: overall.same_sex_marriage,
        by_election_year: years
            .into_iter()
            .map(|(year, members)| {
                let b = Breakdown::of(members);
                (
                    year,
                    YearStats {
                        total: b.total,
                        separate_last_name: b.separate_last_name,
                        same_sex_marriage: b.same_sex_marriage,
                    },
                )
            })
            .collect(),
        by_party: parties
            .into_iter()
            .map(|(party, members)| {
                let b = Breakdown::of(members);
                (
                    party.to_string(),
                    PartyStats {
                        count: b.total,
                        separate_last_name: b.separate_last_name,
                        same_sex_marriage: b.same_sex_marriage,
                    },
                )
            })
            .collect(),
    }
}
