use chrono::{NaiveDate, NaiveTime};
use fcc_complaints::{format_filters, FilterSet, FilterValue};
use regex::Regex;

#[test]
fn every_key_survives_formatting() {
    let filters = FilterSet::new()
        .with("id", 7i64)
        .with("issue_date", NaiveDate::from_ymd_opt(2016, 5, 25).unwrap())
        .with("issue_time", "11:00 pm")
        .with("state", "NY")
        .with("zip", 10001i64);
    let formatted = format_filters(&filters, "US").unwrap();
    assert_eq!(formatted.len(), filters.len());
    for (name, _) in filters.iter() {
        assert!(formatted.contains_key(name), "{} missing", name);
    }
}

#[test]
fn unrecognized_keys_use_display() {
    let values = [
        FilterValue::from("Unwanted Calls"),
        FilterValue::from(10001i64),
        FilterValue::from(1.5f64),
        FilterValue::from(NaiveTime::from_hms_opt(23, 0, 0).unwrap()),
    ];
    for value in values {
        let filters = FilterSet::new().with("issue", value.clone());
        let formatted = format_filters(&filters, "US").unwrap();
        assert_eq!(formatted["issue"], value.to_string());
    }
}

#[test]
fn recognized_keys_match_literal_patterns() {
    let timestamp = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}$").unwrap();
    let time = Regex::new(r"^(0[1-9]|1[0-2]):[0-5]\d (am|pm)$").unwrap();
    let phone = Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();

    for hour in 0..24 {
        let at = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_micro_opt(hour, 59, 1, 999)
            .unwrap();
        let filters = FilterSet::new()
            .with("ticket_created", at)
            .with("issue_date", at)
            .with("issue_time", at);
        let formatted = format_filters(&filters, "US").unwrap();
        assert!(timestamp.is_match(&formatted["ticket_created"]));
        assert!(timestamp.is_match(&formatted["issue_date"]));
        assert!(time.is_match(&formatted["issue_time"]), "{}", formatted["issue_time"]);
    }

    for raw in ["202-555-0142", "(202) 555-0142", "2025550142", "+1 202 555 0142"] {
        let filters = FilterSet::new().with("caller_id_number", raw);
        let formatted = format_filters(&filters, "US").unwrap();
        assert!(phone.is_match(&formatted["caller_id_number"]), "{}", raw);
        assert!(!formatted["caller_id_number"].starts_with('+'));
    }
}

#[test]
fn already_formatted_values_are_unchanged() {
    let filters = FilterSet::new()
        .with("ticket_created", "2016-05-25T09:33:48.000000")
        .with("issue_date", "2016-05-24T00:00:00.000000")
        .with("issue_time", "11:00 pm");
    let once = format_filters(&filters, "US").unwrap();
    let again: FilterSet = once.clone().into_iter().collect();
    assert_eq!(format_filters(&again, "US").unwrap(), once);
    assert_eq!(once["issue_time"], "11:00 pm");
}

#[test]
fn documented_examples() {
    let formatted = format_filters(
        &FilterSet::new().with("issue_time", NaiveTime::from_hms_opt(23, 0, 0).unwrap()),
        "US",
    )
    .unwrap();
    assert_eq!(formatted["issue_time"], "11:00 pm");

    let formatted = format_filters(
        &FilterSet::new().with(
            "ticket_created",
            NaiveDate::from_ymd_opt(2016, 5, 25)
                .unwrap()
                .and_hms_opt(9, 33, 48)
                .unwrap(),
        ),
        "US",
    )
    .unwrap();
    assert_eq!(formatted["ticket_created"], "2016-05-25T09:33:48.000000");

    let formatted =
        format_filters(&FilterSet::new().with("caller_id_number", "555-123-4567"), "US").unwrap();
    assert_eq!(formatted["caller_id_number"], "555-123-4567");
}
