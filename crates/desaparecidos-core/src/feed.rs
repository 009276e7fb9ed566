//! Ordering of an occurrence's supplementary-information feed.
//!
//! The feed is displayed newest first. Ordering uses the parsed date, so
//! `2025-09-01` and `2025-09-01T00:00:00` compare equal.
//!
//! # Ties and bad dates
//!
//! - Entries with equal dates keep the order the API returned them in
//!   (`sort_by` is stable).
//! - Entries whose date does not parse sort after every dated entry, again
//!   in API order.

use std::cmp::Ordering;

use crate::dates::parse_api_date;
use crate::model::SupplementaryInfo;

/// Sort a feed by date, newest first.
pub fn sort_by_date_desc(mut entries: Vec<SupplementaryInfo>) -> Vec<SupplementaryInfo> {
    entries.sort_by(|a, b| {
        match (parse_api_date(&a.date), parse_api_date(&b.date)) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: u64, date: &str) -> SupplementaryInfo {
        SupplementaryInfo {
            occurrence_id: 1,
            text: format!("entrada {id}"),
            date: date.into(),
            id,
            attachments: None,
        }
    }

    fn ids(entries: &[SupplementaryInfo]) -> Vec<u64> {
        entries.iter().map(|e| e.id).collect()
    }

    /// Helper: every entry's date is >= the date of the entry after it.
    fn assert_descending(entries: &[SupplementaryInfo]) {
        for pair in entries.windows(2) {
            let (a, b) = (parse_api_date(&pair[0].date), parse_api_date(&pair[1].date));
            if let (Some(a), Some(b)) = (a, b) {
                assert!(a >= b, "{:?} should not precede {:?}", pair[0].date, pair[1].date);
            }
        }
    }

    #[test]
    fn newest_first() {
        let sorted = sort_by_date_desc(vec![
            info(1, "2025-01-10"),
            info(2, "2025-09-01"),
            info(3, "2024-12-31"),
            info(4, "2025-03-15"),
        ]);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
        assert_descending(&sorted);
    }

    #[test]
    fn mixed_date_shapes() {
        let sorted = sort_by_date_desc(vec![
            info(1, "2025-09-01"),
            info(2, "2025-09-01T18:45:00"),
            info(3, "2025-08-31T23:59:59.999"),
        ]);
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
        assert_descending(&sorted);
    }

    #[test]
    fn equal_dates_keep_api_order() {
        let sorted = sort_by_date_desc(vec![
            info(10, "2025-05-05"),
            info(11, "2025-06-01"),
            info(12, "2025-05-05"),
            info(13, "2025-05-05T00:00:00"),
        ]);
        assert_eq!(ids(&sorted), vec![11, 10, 12, 13]);
    }

    #[test]
    fn unparseable_dates_go_last() {
        let sorted = sort_by_date_desc(vec![
            info(1, "desconhecida"),
            info(2, "2025-01-01"),
            info(3, ""),
            info(4, "2025-02-01"),
        ]);
        assert_eq!(ids(&sorted), vec![4, 2, 1, 3]);
    }

    #[test]
    fn empty_feed() {
        assert!(sort_by_date_desc(Vec::new()).is_empty());
    }
}
