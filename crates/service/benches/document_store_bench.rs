use criterion::{criterion_group, criterion_main, Criterion};

use models::stats::PlayerStat;
use service::auth::PasswordHasher;
use service::storage::{memory::MemoryBackend, DocumentStore};

fn player(i: usize) -> PlayerStat {
    PlayerStat {
        uuid: format!("player-{i}"),
        username: format!("user{i}"),
        stats: serde_json::json!({"kills": i, "deaths": i / 2}),
        extra: Default::default(),
    }
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = DocumentStore::new(MemoryBackend::new());
    rt.block_on(async {
        for i in 0..200 {
            store.save("stats", &player(i)).await.unwrap();
        }
    });

    c.bench_function("document_store_load_all_200", |b| {
        b.iter(|| rt.block_on(store.load_all::<PlayerStat>("stats")));
    });
    c.bench_function("document_store_save", |b| {
        let doc = player(7);
        b.iter(|| rt.block_on(store.save("stats", &doc)).unwrap());
    });
}

fn bench_hash(c: &mut Criterion) {
    let hasher = PasswordHasher::new("bench-salt");
    c.bench_function("password_hash", |b| b.iter(|| hasher.hash("admin123")));
}

criterion_group!(benches, bench_store, bench_hash);
criterion_main!(benches);
