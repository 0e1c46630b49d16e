//! In-memory filtering and sorting for list views.
//!
//! List endpoints fetch the full collection and shape it here; these
//! functions are pure and keep input order for everything they do not
//! explicitly reorder.

use chrono::{NaiveDate, NaiveTime};

use crate::protocol::ListParams;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Int(i64),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl SortValue {
    pub fn text<S: AsRef<str>>(s: S) -> Self {
        SortValue::Text(s.as_ref().to_lowercase())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(order: Option<&str>) -> Self {
        match order {
            Some("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

pub trait ListItem {
    /// Fields the free-text search matches against (any-field,
    /// case-insensitive substring).
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<&str> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Derived comparison value for a sort key; `None` for keys this
    /// item does not know, which leaves the list order untouched.
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

pub fn filter<T: ListItem>(
    items: Vec<T>,
    search: Option<&str>,
    status: Option<&str>,
    date: Option<NaiveDate>,
) -> Vec<T> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    items
        .into_iter()
        .filter(|item| {
            let text_hit = match &needle {
                Some(needle) => item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle)),
                None => true,
            };
            let status_hit = match status {
                Some(status) => item.status() == Some(status),
                None => true,
            };
            let date_hit = match date {
                Some(date) => item.date() == Some(date),
                None => true,
            };
            text_hit && status_hit && date_hit
        })
        .collect()
}

/// Stable sort by a derived key; ties keep their input order and an
/// unknown key is a no-op.
pub fn sort<T: ListItem>(mut items: Vec<T>, key: &str, dir: SortDir) -> Vec<T> {
    if !items.iter().any(|item| item.sort_value(key).is_some()) {
        return items;
    }
    items.sort_by(|a, b| {
        let ord = a.sort_value(key).cmp(&b.sort_value(key));
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    items
}

pub fn apply<T: ListItem>(items: Vec<T>, params: &ListParams) -> Vec<T> {
    let date = params
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    let items = filter(
        items,
        params.search.as_deref(),
        params.status.as_deref(),
        date,
    );
    match params.sort.as_deref() {
        Some(key) => sort(items, key, SortDir::parse(params.order.as_deref())),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        patient: &'static str,
        doctor: &'static str,
        status: &'static str,
        date: NaiveDate,
    }

    impl ListItem for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.patient, self.doctor]
        }

        fn status(&self) -> Option<&str> {
            Some(self.status)
        }

        fn date(&self) -> Option<NaiveDate> {
            Some(self.date)
        }

        fn sort_value(&self, key: &str) -> Option<SortValue> {
            match key {
                "patient" => Some(SortValue::text(self.patient)),
                "date" => Some(SortValue::Date(self.date)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        let d = |day| NaiveDate::from_ymd(2024, 3, day);
        vec![
            Row { patient: "Alice Young", doctor: "Dr. Chen", status: "booked", date: d(12) },
            Row { patient: "Bob Stone", doctor: "Dr. Patel", status: "completed", date: d(10) },
            Row { patient: "Carol Reyes", doctor: "Dr. Chen", status: "booked", date: d(15) },
            Row { patient: "Dan Idowu", doctor: "Dr. Okafor", status: "cancelled", date: d(12) },
            Row { patient: "Eve Larsen", doctor: "Dr. Patel", status: "booked", date: d(11) },
        ]
    }

    #[test]
    fn status_filter_keeps_relative_order() {
        let out = filter(rows(), None, Some("booked"), None);
        let names: Vec<_> = out.iter().map(|r| r.patient).collect();
        assert_eq!(names, vec!["Alice Young", "Carol Reyes", "Eve Larsen"]);
    }

    #[test]
    fn unmatched_query_yields_empty() {
        let out = filter(rows(), Some("zzz-no-such"), None, None);
        assert!(out.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let out = filter(rows(), Some("dr. chen"), None, None);
        assert_eq!(out.len(), 2);
        let out = filter(rows(), Some("IDOWU"), None, None);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn filters_are_anded() {
        let out = filter(
            rows(),
            Some("chen"),
            Some("booked"),
            Some(NaiveDate::from_ymd(2024, 3, 15)),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].patient, "Carol Reyes");
    }

    #[test]
    fn date_sort_desc_reverses_asc() {
        let asc = sort(rows(), "date", SortDir::Asc);
        let mut desc = sort(rows(), "date", SortDir::Desc);
        desc.reverse();
        // Not elementwise equal in general (ties), but the key sequence is.
        let asc_dates: Vec<_> = asc.iter().map(|r| r.date).collect();
        let desc_dates: Vec<_> = desc.iter().map(|r| r.date).collect();
        assert_eq!(asc_dates, desc_dates);
        assert!(asc_dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let out = sort(rows(), "date", SortDir::Asc);
        // Alice and Dan share 2024-03-12 and must keep input order.
        let names: Vec<_> = out.iter().map(|r| r.patient).collect();
        let alice = names.iter().position(|n| *n == "Alice Young").unwrap();
        let dan = names.iter().position(|n| *n == "Dan Idowu").unwrap();
        assert!(alice < dan);
    }

    #[test]
    fn unknown_sort_key_is_a_no_op() {
        assert_eq!(sort(rows(), "nope", SortDir::Desc), rows());
    }

    #[test]
    fn apply_parses_params() {
        let params = ListParams {
            status: Some("booked".to_string()),
            sort: Some("date".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        };
        let out = apply(rows(), &params);
        let names: Vec<_> = out.iter().map(|r| r.patient).collect();
        assert_eq!(names, vec!["Carol Reyes", "Alice Young", "Eve Larsen"]);
    }
}
