//! Bootstrap tests against the on-disk engine: connect, idempotent
//! schema definition and counter seeding

use hr_server::db;
use hr_server::db::schema;
use hr_server::domain::sequence;

#[tokio::test]
async fn connect_bootstraps_schema_and_allocator() {
    let tmp = tempfile::tempdir().unwrap();
    let db = db::connect(tmp.path().to_str().unwrap()).await.unwrap();

    // Schema definition is idempotent across restarts.
    schema::define(&db).await.unwrap();

    let first = sequence::allocate_employment_id(&db).await.unwrap();
    let second = sequence::allocate_employment_id(&db).await.unwrap();
    assert_eq!(first, 1000);
    assert_eq!(second, 1001);
}

#[tokio::test]
async fn counter_seeding_respects_existing_employees() {
    let tmp = tempfile::tempdir().unwrap();
    let db = db::connect(tmp.path().to_str().unwrap()).await.unwrap();

    // Simulate a store that predates the counter: employees exist but
    // the counter record does not.
    db.query("CREATE employee SET employment_id = 1422")
        .await
        .unwrap()
        .check()
        .unwrap();
    db.query("DELETE sequence:employment_id")
        .await
        .unwrap()
        .check()
        .unwrap();

    sequence::seed_employment_ids(&db).await.unwrap();

    let next = sequence::allocate_employment_id(&db).await.unwrap();
    assert_eq!(next, 1423);
}
