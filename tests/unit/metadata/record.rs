use super::*;

fn row(name: &str, date: &str) -> RawRow {
    RawRow {
        card_name: name.to_string(),
        date_created: date.to_string(),
        rarity: "Rare".to_string(),
        updated: "TRUE".to_string(),
        ..RawRow::default()
    }
}

fn record(id: u32, name: &str, date: &str) -> CardRecord {
    CardRecord::from_row(RecordId(id), name.to_string(), &row(name, date)).unwrap()
}

#[test]
fn parse_date_reads_month_day_year() {
    let d = parse_date("03/15/2023").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    assert!(parse_date("2023-03-15").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn from_row_copies_fields_and_year() {
    let r = record(7, "He's Here", "03/15/2023");
    assert_eq!(r.id, RecordId(7));
    assert_eq!(r.year(), 2023);
    assert_eq!(r.rarity, "Rare");
    assert!(r.updated);
    assert!(r.backsides.is_empty());
    assert!(r.front.is_none());
}

#[test]
fn only_explicit_false_clears_updated() {
    let mut raw = row("x", "01/01/2024");
    raw.updated = "FALSE".to_string();
    assert!(!CardRecord::from_row(RecordId(0), "x".into(), &raw).unwrap().updated);
    raw.updated = String::new();
    assert!(CardRecord::from_row(RecordId(0), "x".into(), &raw).unwrap().updated);
}

#[test]
fn bad_date_is_malformed_metadata() {
    let err = CardRecord::from_row(RecordId(0), "x".into(), &row("x", "soon")).unwrap_err();
    assert!(matches!(err, StampError::MalformedMetadata(_)));
}

#[test]
fn sort_orders_by_date_then_name() {
    let a = record(0, "Beta", "01/02/2023");
    let b = record(1, "Alpha", "01/02/2023");
    let c = record(2, "Zed", "12/31/2022");
    let sorted: Vec<&str> = sorted_records([&a, &b, &c])
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(sorted, vec!["Zed", "Alpha", "Beta"]);
}

#[test]
fn resorting_is_a_noop() {
    let items = [
        record(0, "C", "05/05/2023"),
        record(1, "A", "05/05/2023"),
        record(2, "B", "01/01/2023"),
    ];
    let once = sorted_records(items.iter());
    let twice = sorted_records(once.iter().copied());
    assert_eq!(once, twice);
}

#[test]
fn category_labels_and_prefixes() {
    assert_eq!(Category::BasicLands.label(), "BASIC LANDS");
    assert_eq!(Category::AltArts.sheet_prefix(), "alt_arts");
    assert_eq!(Category::ALL.len(), 4);
}
