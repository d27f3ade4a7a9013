use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tfidf_search_server::{document::Status, ExecutionPolicy, SearchServer};

fn build_server(doc_count: i64) -> SearchServer {
    let mut server = SearchServer::new(["and", "with", "the", "a"]).unwrap();
    let words = ["curly", "dog", "cat", "rat", "nasty", "gray", "funny", "pet", "tail", "bark"];
    for id in 0..doc_count {
        let text = (0..8).map(|i| words[((id as usize + i) * 7) % words.len()]).collect::<Vec<_>>().join(" ");
        server.add_document(id, &text, Status::Actual, &[(id % 5) + 1]).unwrap();
    }
    server
}

fn bench_find_top(c: &mut Criterion) {
    let server = build_server(5_000);

    c.bench_function("find_top_sequential", |b| {
        b.iter(|| server.find_top_with(ExecutionPolicy::Sequential, black_box("curly dog -rat"), |_, s, _| s == Status::Actual).unwrap())
    });

    c.bench_function("find_top_parallel", |b| {
        b.iter(|| server.find_top_with(ExecutionPolicy::Parallel, black_box("curly dog -rat"), |_, s, _| s == Status::Actual).unwrap())
    });
}

criterion_group!(benches, bench_find_top);
criterion_main!(benches);
