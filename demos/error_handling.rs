//! The error cases `SearchServer` can return.

use tfidf_search_server::{document::Status, SearchError, SearchServer};

fn main() {
    let mut server = SearchServer::new::<_, &str>([]).unwrap();
    server.add_document(0, "gray dog", Status::Actual, &[1]).unwrap();

    println!("1. Negative id:");
    match server.add_document(-1, "anything", Status::Actual, &[]) {
        Err(SearchError::NegativeId(id)) => println!("   caught: id {id} is negative"),
        other => println!("   unexpected: {other:?}"),
    }

    println!("\n2. Duplicate id:");
    match server.add_document(0, "anything", Status::Actual, &[]) {
        Err(SearchError::DuplicateId(id)) => println!("   caught: id {id} already exists"),
        other => println!("   unexpected: {other:?}"),
    }

    println!("\n3. Control characters in document text:");
    match server.add_document(1, "bad\u{0}text", Status::Actual, &[]) {
        Err(SearchError::InvalidCharacters(_)) => println!("   caught: control byte rejected"),
        other => println!("   unexpected: {other:?}"),
    }

    println!("\n4. Bare minus-word in a query:");
    match server.find_top("gray -") {
        Err(SearchError::InvalidMinusWord(word)) => println!("   caught: {word:?} is not a valid minus-word"),
        other => println!("   unexpected: {other:?}"),
    }

    println!("\n5. Matching against an unknown document id:");
    match server.match_document("gray", 999) {
        Err(SearchError::UnknownDocument(id)) => println!("   caught: document {id} does not exist"),
        other => println!("   unexpected: {other:?}"),
    }
}
