//! Protocol contract of the AT&T database: partition sizes, id laws and the
//! reference scenarios used by downstream experiments.

use std::collections::BTreeSet;

use facedb_atnt::identity::{global_id, parse_path_stem, path_stem, split_global_id};
use facedb_atnt::{AtntError, Database, Sample, SampleQuery, Selector};

const TRAINING: [u32; 20] = [
    1, 2, 5, 6, 10, 11, 12, 14, 16, 17, 20, 21, 24, 26, 27, 29, 33, 34, 36, 39,
];

fn count(db: &Database, query: SampleQuery) -> usize {
    db.query_samples(&query).unwrap().len()
}

#[test]
fn all_samples_cover_every_global_id_once() {
    let db = Database::default();
    let samples = db.query_samples(&SampleQuery::new()).unwrap();
    assert_eq!(samples.len(), 400);

    let ids: BTreeSet<u32> = samples.iter().map(Sample::id).collect();
    assert_eq!(ids.len(), 400);
    assert_eq!(ids, (1..=400).collect::<BTreeSet<u32>>());
}

#[test]
fn group_partition() {
    let db = Database::default();

    let training = db.resolve_client_ids("training").unwrap();
    assert_eq!(training, TRAINING);

    let evaluation = db.resolve_client_ids("evaluation").unwrap();
    let expected: Vec<u32> = (1..=40).filter(|id| !TRAINING.contains(id)).collect();
    assert_eq!(evaluation, expected);

    let training: BTreeSet<u32> = training.into_iter().collect();
    let evaluation: BTreeSet<u32> = evaluation.into_iter().collect();
    assert!(training.is_disjoint(&evaluation));
    let union: BTreeSet<u32> = training.union(&evaluation).copied().collect();
    assert_eq!(union, (1..=40).collect::<BTreeSet<u32>>());

    let all = db.resolve_client_ids(Selector::<String>::all()).unwrap();
    assert_eq!(all, (1..=40).collect::<Vec<_>>());
}

#[test]
fn partition_sizes() {
    let db = Database::default();

    assert_eq!(count(&db, SampleQuery::new().groups("training")), 200);
    assert_eq!(count(&db, SampleQuery::new().groups("evaluation")), 200);
    assert_eq!(count(&db, SampleQuery::new().groups("evaluation").purposes("enroll")), 100);
    assert_eq!(count(&db, SampleQuery::new().groups("evaluation").purposes("probe")), 100);
    assert_eq!(
        count(&db, SampleQuery::new().groups("evaluation").purposes(["enroll", "probe"])),
        db.resolve_client_ids("evaluation").unwrap().len() * 10
    );

    assert_eq!(db.resolve_clients(Selector::<String>::all()).unwrap().len(), 40);
    assert_eq!(db.resolve_clients("training").unwrap().len(), 20);
    assert_eq!(db.resolve_clients("evaluation").unwrap().len(), 20);
}

#[test]
fn round_trip_laws() {
    for client_id in 1..=40 {
        for file_id in 1..=10 {
            let id = global_id(client_id, file_id).unwrap();
            assert_eq!(split_global_id(id).unwrap(), (client_id, file_id));
            let stem = path_stem(client_id, file_id).unwrap();
            assert_eq!(parse_path_stem(&stem).unwrap(), (client_id, file_id));
        }
    }
}

#[test]
fn enroll_files_of_model_three() {
    let db = Database::default();
    let samples = db
        .query_samples(
            &SampleQuery::new()
                .groups("evaluation")
                .purposes("enroll")
                .model_ids([3u32]),
        )
        .unwrap();
    assert_eq!(samples.len(), 5);

    let file_ids: Vec<u32> = samples.iter().map(Sample::file_id).collect();
    assert_eq!(file_ids, [2, 4, 5, 7, 9]);

    let paths = db.resolve_sample_paths(&samples, None, None);
    assert_eq!(paths, ["s3/2", "s3/4", "s3/5", "s3/7", "s3/9"]);

    for sample in &samples {
        assert_eq!(db.client_from_file(sample.id()).unwrap(), 3);
    }
}

#[test]
fn client_from_file_bounds() {
    let db = Database::default();
    assert_eq!(db.client_from_file(1).unwrap(), 1);
    assert_eq!(db.client_from_file(10).unwrap(), 1);
    assert_eq!(db.client_from_file(11).unwrap(), 2);
    assert_eq!(db.client_from_file(400).unwrap(), 40);
    assert!(matches!(db.client_from_file(401), Err(AtntError::InvalidArgument(_))));
    assert!(matches!(db.client_from_file(0), Err(AtntError::InvalidArgument(_))));
}

#[test]
fn unknown_selectors_fail() {
    let db = Database::default();
    assert!(matches!(
        db.resolve_client_ids("bogus"),
        Err(AtntError::InvalidSelector { kind: "group", .. })
    ));
    assert!(matches!(
        db.query_samples(&SampleQuery::new().model_ids(vec![41u32])),
        Err(AtntError::InvalidSelector { kind: "model", .. })
    ));
    assert!(matches!(
        db.query_samples(&SampleQuery::new().groups(["training", "bogus"])),
        Err(AtntError::InvalidSelector { .. })
    ));
}

#[test]
fn queries_are_reproducible() {
    let db = Database::default();
    let query = SampleQuery::new().groups(["dev", "world"]).model_ids(1u32..=13);
    let first = db.query_samples(&query).unwrap();
    let second = db.query_samples(&query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn database_is_shareable_across_threads() {
    let db = std::sync::Arc::new(Database::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            std::thread::spawn(move || db.files(&SampleQuery::new(), None, None).unwrap().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 400);
    }
}
