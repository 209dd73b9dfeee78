mod common;

use carsdb::ingest::dedup::Deduplicator;
use carsdb::ingest::parser::ColumnMap;
use carsdb::snapshot::Snapshot;
use carsdb::types::CarRecord;
use rand::seq::SliceRandom;
use telemetry::tracing::init_test_tracing;

use crate::common::vehicles_csv;

/// Runs a whole dataset string through the ingestion pipeline.
fn ingest(dataset: &str) -> Vec<CarRecord> {
    let mut lines = dataset.lines();
    let columns = ColumnMap::from_header(lines.next().expect("dataset has a header"));

    let mut dedup = Deduplicator::new();
    for line in lines {
        if let Some(row) = columns.parse_row(line) {
            dedup.fold(row);
        }
    }

    dedup.into_records()
}

#[test]
fn rows_with_one_identity_key_collapse_into_one_record() {
    init_test_tracing();

    let records = ingest(&vehicles_csv(&[
        ("Toyota", "Corolla", "Compact Cars", "2001"),
        ("Toyota", "Corolla", "Compact Cars", "2003"),
    ]));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].make, "Toyota");
    assert_eq!(records[0].model, "Corolla");
    assert_eq!(records[0].years, vec![2001, 2003]);
}

#[test]
fn ingestion_order_does_not_change_the_merged_record() {
    init_test_tracing();

    let mut rows = vec![
        ("Toyota", "Corolla", "Compact Cars", "2001"),
        ("Toyota", "Corolla", "Compact Cars", "2003"),
        ("Toyota", "Corolla", "Compact Cars", "1999"),
        ("Toyota", "Corolla", "Compact Cars", "2003"),
        ("Toyota", "Corolla", "Compact Cars", "2007"),
    ];

    let reference = ingest(&vehicles_csv(&rows));
    assert_eq!(reference.len(), 1);
    assert_eq!(reference[0].years, vec![1999, 2001, 2003, 2007]);

    let mut rng = rand::thread_rng();
    for _ in 0..5 {
        rows.shuffle(&mut rng);

        let records = ingest(&vehicles_csv(&rows));
        assert_eq!(records, reference);
    }
}

#[test]
fn rejected_rows_contribute_no_data() {
    init_test_tracing();

    let records = ingest(&vehicles_csv(&[
        ("Toyota", "Corolla", "Compact Cars", "2001"),
        // Sentinel make, dropped.
        ("0", "Corolla", "Compact Cars", "2002"),
        // Unparseable year, dropped.
        ("Toyota", "Corolla", "Compact Cars", "n/a"),
    ]));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].years, vec![2001]);
}

#[test]
fn class_buckets_partition_identity_keys() {
    init_test_tracing();

    let records = ingest(&vehicles_csv(&[
        // Both raw classes bucket to midsize, so these rows merge.
        ("Toyota", "Camry", "Compact Cars", "2001"),
        ("Toyota", "Camry", "Midsize Cars", "2002"),
        // An unmapped raw class buckets to unknown, a distinct identity.
        ("Toyota", "Camry", "Rocket Sled", "2003"),
    ]));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].years, vec![2001, 2002]);
    assert_eq!(records[1].years, vec![2003]);
    assert_ne!(records[0].id, records[1].id);
}

#[test]
fn reingesting_identical_data_reproduces_identical_identifiers() {
    init_test_tracing();

    let dataset = vehicles_csv(&[
        ("Toyota", "Corolla", "Compact Cars", "2001"),
        ("Volvo", "S60", "Midsize Cars", "2010"),
    ]);

    let first: Vec<String> = ingest(&dataset).into_iter().map(|r| r.id).collect();
    let second: Vec<String> = ingest(&dataset).into_iter().map(|r| r.id).collect();

    assert_eq!(first, second);
}

#[test]
fn snapshot_indexes_cover_exactly_the_distinct_makes() {
    init_test_tracing();

    let snapshot = Snapshot::build(ingest(&vehicles_csv(&[
        ("Volvo", "S60", "Midsize Cars", "2010"),
        ("Audi", "A4", "Midsize Cars", "2011"),
        ("Volvo", "V70", "Midsize-Large Station Wagons", "2012"),
    ])));

    assert_eq!(snapshot.brands(), ["Audi", "Volvo"]);
    assert_eq!(snapshot.brand_records("Volvo").len(), 2);
    assert_eq!(snapshot.brand_records("Saab").len(), 0);
}
