use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tinyurl_storage::{MySqlStore, ShortCode, ShortUrl, StorageError, Store};
use tinyurl_test_infra::mysql::{MySqlPair, MySqlServer};

struct Fixture {
    _mysql: MySqlServer,
    store: MySqlStore,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::start().await.expect("start mysql");
        let store = MySqlStore::new(connect(&mysql).await);
        store.ensure_schema().await.expect("create schema");

        Self {
            _mysql: mysql,
            store,
        }
    }
}

/// A store reading from `pair.primary` with `pair.replica` as fallback.
/// `replica` shares its pool with the store and is used for seeding.
struct ReplicatedFixture {
    pair: MySqlPair,
    store: MySqlStore,
    replica: MySqlPool,
}

impl ReplicatedFixture {
    async fn start() -> Self {
        let pair = MySqlPair::start().await.expect("start mysql pair");
        let primary = connect(&pair.primary).await;
        let replica = connect(&pair.replica).await;

        MySqlStore::new(replica.clone())
            .ensure_schema()
            .await
            .expect("create replica schema");
        let store = MySqlStore::new(primary).with_replica(replica.clone());
        store.ensure_schema().await.expect("create primary schema");

        Self {
            pair,
            store,
            replica,
        }
    }

    async fn seed_replica(&self, record: ShortUrl) {
        let code = ShortCode::new_unchecked(record.short.as_str());
        MySqlStore::new(self.replica.clone())
            .insert(&code, record)
            .await
            .expect("seed replica");
    }
}

async fn connect(server: &MySqlServer) -> MySqlPool {
    let url = server.url().await.expect("mysql url");
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn insert_and_get() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&code("abc123"), ShortUrl::new("https://example.com", "abc123"))
        .await
        .unwrap();

    let got = fixture.store.get(&code("abc123")).await.unwrap().unwrap();
    assert_eq!(got, ShortUrl::new("https://example.com", "abc123"));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn missing_code_is_none() {
    let fixture = Fixture::start().await;

    assert!(fixture.store.get(&code("missing")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn duplicate_insert_is_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .insert(&code("dup"), ShortUrl::new("https://first.com", "dup"))
        .await
        .unwrap();

    let err = fixture
        .store
        .insert(&code("dup"), ShortUrl::new("https://second.com", "dup"))
        .await
        .unwrap_err();

    assert_eq!(err, StorageError::AlreadyExists("dup".to_string()));
    assert!(fixture.store.is_already_exists(&err));

    let kept = fixture.store.get(&code("dup")).await.unwrap().unwrap();
    assert_eq!(kept.url, "https://first.com");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn ensure_schema_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture.store.ensure_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "requires docker"]
async fn reads_fall_back_to_replica_when_primary_is_down() {
    let fixture = ReplicatedFixture::start().await;
    let record = ShortUrl::new("https://replica.example", "onreplica");
    fixture.seed_replica(record.clone()).await;

    fixture.pair.primary.stop().await.expect("stop primary");

    let got = fixture.store.get(&code("onreplica")).await.unwrap();
    assert_eq!(got, Some(record));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn reads_fall_back_to_replica_when_primary_pool_is_closed() {
    let fixture = ReplicatedFixture::start().await;
    let record = ShortUrl::new("https://replica.example", "closed");
    fixture.seed_replica(record.clone()).await;

    fixture.store.primary().close().await;

    assert_eq!(fixture.store.get(&code("closed")).await.unwrap(), Some(record));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn primary_miss_does_not_consult_replica() {
    let fixture = ReplicatedFixture::start().await;
    fixture
        .seed_replica(ShortUrl::new("https://replica.example", "onlyreplica"))
        .await;

    assert!(fixture.store.get(&code("onlyreplica")).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn replica_error_is_returned_when_both_reads_fail() {
    let fixture = ReplicatedFixture::start().await;

    fixture.store.primary().close().await;
    fixture.replica.close().await;

    let err = fixture.store.get(&code("anything")).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}
