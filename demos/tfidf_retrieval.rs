//! Bulk query processing and the rolling request queue.

use tfidf_search_server::{bulk, document::Status, RequestQueue, SearchServer};

fn main() {
    let mut server = SearchServer::new(["and", "with"]).unwrap();
    server.add_document(0, "curly cat curly tail", Status::Actual, &[1]).unwrap();
    server.add_document(1, "curly dog and loud bark", Status::Actual, &[2]).unwrap();
    server.add_document(2, "nasty rat with long tail", Status::Actual, &[3]).unwrap();

    let queries = ["curly dog", "nasty rat -not", "nothing matches this"];

    println!("=== process_queries ===");
    for (query, docs) in queries.iter().zip(bulk::process_queries(&server, &queries).unwrap()) {
        println!("  {query:?}: {} result(s)", docs.len());
    }

    println!("\n=== process_queries_joined ===");
    let joined = bulk::process_queries_joined(&server, &queries).unwrap();
    println!("  {} documents total", joined.len());

    println!("\n=== RequestQueue ===");
    let mut request_queue = RequestQueue::new(&server);
    for query in queries {
        request_queue.add_find_request(query).unwrap();
    }
    println!("  empty-result requests: {}", request_queue.no_results_count());
}
