use super::{BoardItem, ColumnName, ItemType, RawRecord};

/// Turn a fetched batch into board items, one per record, in input order.
///
/// Ids combine the title with the record's position in the batch, so two
/// records with the same title still get distinct ids.
pub fn normalize(records: impl IntoIterator<Item = RawRecord>) -> Vec<BoardItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_record(index, raw))
        .collect()
}

pub fn normalize_record(index: usize, raw: RawRecord) -> BoardItem {
    // Missing, empty and unrecognized statuses all land in the default column
    let status = raw
        .status
        .as_deref()
        .and_then(ColumnName::from_status)
        .unwrap_or_default()
        .as_str()
        .to_string();

    BoardItem {
        id: format!("{}-{index}", raw.title),
        kind: raw.kind.as_deref().and_then(ItemType::from_label),
        developers: raw
            .developer
            .as_deref()
            .map(split_developers)
            .unwrap_or_default(),
        title: raw.title,
        status,
    }
}

/// Split a comma-separated name list. Names are trimmed and blanks dropped.
pub fn split_developers(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, status: Option<&str>, developer: Option<&str>, kind: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.into(),
            status: status.map(Into::into),
            developer: developer.map(Into::into),
            kind: kind.map(Into::into),
        }
    }

    #[test]
    fn ids_combine_title_and_position() {
        let items = normalize(vec![
            raw("A", Some("Stuck"), Some("Al, Bo"), Some("Bug")),
            raw("B", None, Some("Cy"), None),
        ]);
        assert_eq!(items[0].id, "A-0");
        assert_eq!(items[1].id, "B-1");
    }

    #[test]
    fn duplicate_titles_get_distinct_ids() {
        let items = normalize(vec![raw("Same", None, None, None), raw("Same", None, None, None)]);
        assert_eq!(items[0].id, "Same-0");
        assert_eq!(items[1].id, "Same-1");
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn preserves_input_order() {
        let items = normalize(vec![
            raw("C", None, None, None),
            raw("A", None, None, None),
            raw("B", None, None, None),
        ]);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn missing_status_defaults_to_ready_to_start() {
        let item = normalize_record(0, raw("B", None, None, None));
        assert_eq!(item.status, "Ready to start");
        let item = normalize_record(0, raw("B", Some(""), None, None));
        assert_eq!(item.status, "Ready to start");
    }

    #[test]
    fn unrecognized_status_becomes_ready_to_start() {
        let item = normalize_record(3, raw("Q", Some("Blocked"), None, None));
        assert_eq!(item.status, "Ready to start");
        assert_eq!(item.column(), ColumnName::ReadyToStart);

        // Matching is exact, so near-misses are unrecognized too
        let item = normalize_record(0, raw("Q", Some("done"), None, None));
        assert_eq!(item.status, "Ready to start");
    }

    #[test]
    fn recognized_status_is_kept() {
        for name in ColumnName::ALL {
            let item = normalize_record(0, raw("A", Some(name.as_str()), None, None));
            assert_eq!(item.status, name.as_str());
            assert_eq!(item.column(), name);
        }
    }

    #[test]
    fn developers_split_in_source_order() {
        let item = normalize_record(0, raw("A", None, Some("Al, Bo"), None));
        assert_eq!(item.developers, ["Al", "Bo"]);
    }

    #[test]
    fn missing_developer_yields_empty_list() {
        let item = normalize_record(0, raw("A", None, None, None));
        assert!(item.developers.is_empty());
    }

    #[test]
    fn malformed_developer_text_does_not_fail() {
        assert_eq!(split_developers(",,Al,  ,Bo,"), ["Al", "Bo"]);
        assert_eq!(split_developers("Al,Bo"), ["Al", "Bo"]);
        assert!(split_developers("").is_empty());
        assert!(split_developers(" , ").is_empty());
    }

    #[test]
    fn type_maps_to_chip_or_none() {
        assert_eq!(normalize_record(0, raw("A", None, None, Some("Bug"))).kind, Some(ItemType::Bug));
        assert_eq!(normalize_record(0, raw("A", None, None, Some("Whatever"))).kind, None);
        assert_eq!(normalize_record(0, raw("A", None, None, None)).kind, None);
    }
}
