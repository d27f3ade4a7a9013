//! Basic retrieval: indexing documents and ranking them against a query.
//!
//! TF-IDF scores each document as `sum(tf(w, d) * idf(w))` over the query's
//! plus-words, with any document touched by a minus-word dropped outright.

use tfidf_search_server::{document::Status, SearchServer};

fn main() {
    let mut server = SearchServer::new(["and", "with", "a"]).unwrap();

    server.add_document(0, "a colorful parrot with green wings", Status::Actual, &[8]).unwrap();
    server.add_document(1, "a gray cat and a long tail", Status::Actual, &[7]).unwrap();
    server.add_document(2, "a gray dog and a loud bark", Status::Actual, &[5]).unwrap();
    server.add_document(3, "gray dog with big eyes", Status::Actual, &[3]).unwrap();

    println!("=== find_top(\"gray dog\") ===");
    for doc in server.find_top("gray dog").unwrap() {
        println!("  {doc}");
    }

    println!("\n=== find_top(\"gray dog -loud\") ===");
    for doc in server.find_top("gray dog -loud").unwrap() {
        println!("  {doc}");
    }

    println!("\n=== match_document(\"gray cat\", 1) ===");
    let (matched, status) = server.match_document("gray cat", 1).unwrap();
    println!("  matched: {matched:?}, status: {status:?}");
}
