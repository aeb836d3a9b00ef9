use crate::model::{Chamber, PoliticianRecord};

/// Party labels matched as name prefixes. Order matters: the first label that
/// prefixes the combined cell wins.
pub const PARTIES: [&str; 11] = [
    "自由民主党",
    "公明党",
    "立憲民主党",
    "日本維新の会",
    "国民民主党",
    "共産党",
    "社会民主党",
    "日本保守党",
    "参政党",
    "れいわ新選組",
    "無所属",
];

/// Recover a cell value that the page renders twice with no separator
/// ("北海道1区北海道1区" -> "北海道1区").
///
/// Keeps the first `floor(chars / 2)` characters. Odd-length input is not a
/// real duplication and loses its last intended character ("ABC" -> "A").
pub fn halve(text: &str) -> &str {
    let keep = text.chars().count() / 2;
    match text.char_indices().nth(keep) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Split an already-halved "party + name" string into `(party, name)`.
/// Unknown parties give `("", whole)`.
pub fn split_party(combined: &str) -> (&'static str, &str) {
    PARTIES
        .iter()
        .find_map(|party| combined.strip_prefix(party).map(|name| (*party, name)))
        .unwrap_or(("", combined))
}

/// Turn one row's cell texts into a record. Rows with fewer than four
/// cells yield nothing.
pub fn split_row(cells: &[String], chamber: Chamber, election_year: i32) -> Option<PoliticianRecord> {
    let [district, name_with_party, separate_last_name, same_sex_marriage, ..] = cells else {
        return None;
    };

    let (party, name) = split_party(halve(name_with_party));

    Some(PoliticianRecord {
        chamber,
        district: halve(district).to_string(),
        name: name.to_string(),
        party: party.to_string(),
        separate_last_name: halve(separate_last_name).to_string(),
        same_sex_marriage: halve(same_sex_marriage).to_string(),
        election_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AGREE, DISAGREE, NO_ANSWER};

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn halve_duplicated_text() {
        assert_eq!(halve("北海道1区北海道1区"), "北海道1区");
        assert_eq!(halve("賛成賛成"), "賛成");
        assert_eq!(halve("abab"), "ab");
    }

    #[test]
    fn halve_odd_length_truncates() {
        assert_eq!(halve("ABC"), "A");
        assert_eq!(halve("無回答無回"), "無回");
    }

    #[test]
    fn halve_empty_and_single() {
        assert_eq!(halve(""), "");
        assert_eq!(halve("x"), "");
    }

    #[test]
    fn known_party_prefix() {
        assert_eq!(split_party("自由民主党山田太郎"), ("自由民主党", "山田太郎"));
        assert_eq!(split_party("れいわ新選組山本 太郎"), ("れいわ新選組", "山本 太郎"));
    }

    #[test]
    fn no_party_prefix() {
        assert_eq!(split_party("山田太郎"), ("", "山田太郎"));
        // Party label in the middle is not a prefix.
        assert_eq!(split_party("山田公明党"), ("", "山田公明党"));
    }

    #[test]
    fn party_list_has_no_shadowed_labels() {
        for (i, earlier) in PARTIES.iter().enumerate() {
            for later in &PARTIES[i + 1..] {
                assert!(
                    !later.starts_with(earlier),
                    "{earlier} would shadow {later}"
                );
            }
        }
    }

    #[test]
    fn split_full_row() {
        let row = cells(&[
            "北海道1区北海道1区",
            "立憲民主党道下 大樹立憲民主党道下 大樹",
            "賛成賛成",
            "無回答無回答",
        ]);
        let r = split_row(&row, Chamber::Representatives, 2024).unwrap();
        assert_eq!(r.district, "北海道1区");
        assert_eq!(r.party, "立憲民主党");
        assert_eq!(r.name, "道下 大樹");
        assert_eq!(r.separate_last_name, AGREE);
        assert_eq!(r.same_sex_marriage, NO_ANSWER);
        assert_eq!(r.election_year, 2024);
        assert_eq!(r.chamber, Chamber::Representatives);
    }

    #[test]
    fn name_and_party_partition_the_halved_cell() {
        let row = cells(&["東京都東京都", "無所属鈴木一郎無所属鈴木一郎", "反対反対", "反対反対"]);
        let r = split_row(&row, Chamber::Councillors, 2022).unwrap();
        assert_eq!(format!("{}{}", r.party, r.name), "無所属鈴木一郎");
        assert_eq!(r.same_sex_marriage, DISAGREE);
    }

    #[test]
    fn stance_text_is_kept_verbatim() {
        let row = cells(&["比例比例", "山田山田", "条件付き条件付き", "--"]);
        let r = split_row(&row, Chamber::Councillors, 2019).unwrap();
        assert_eq!(r.separate_last_name, "条件付き");
        assert_eq!(r.same_sex_marriage, "-");
        assert_eq!(r.party, "");
    }

    #[test]
    fn short_rows_are_dropped() {
        let row = cells(&["北海道1区北海道1区", "山田山田", "賛成賛成"]);
        assert!(split_row(&row, Chamber::Representatives, 2024).is_none());
        assert!(split_row(&[], Chamber::Representatives, 2024).is_none());
    }

    #[test]
    fn extra_cells_are_ignored() {
        let row = cells(&["aa", "bb", "cc", "dd", "ee"]);
        let r = split_row(&row, Chamber::Representatives, 2024).unwrap();
        assert_eq!(r.district, "a");
        assert_eq!(r.same_sex_marriage, "d");
    }
}
