//! Example: driving the double-array trie with a small dictionary.
//!
//! Builds a trie from a corpus of words with numeric payloads, then
//! exercises exact lookup, prefix completion, full enumeration, and
//! deletion.
//!
//! Run with: cargo run --example wordlist

use libdatrie::datrie::builder::build_trie;
use libdatrie::datrie::trie::Search;

fn main() {
    let corpus = [
        ("bake", 1u32),
        ("baked", 2),
        ("baker", 3),
        ("cake", 4),
        ("caked", 5),
        ("fake", 6),
        ("lake", 7),
    ];
    let mut trie = build_trie(corpus, '#').expect("corpus is sentinel-free");

    // Exact lookup
    println!("Word lookup:");
    for word in ["bake", "baker", "bakes", "cake", "lake", "make"] {
        let found = match trie.search_exact(word) {
            Search::Exact(m) => format!("yes (payload {})", m.payload),
            _ => "no".to_owned(),
        };
        println!("  {word}: {found}");
    }

    // Prefix completion
    println!("\nPrefix completion:");
    for prefix in ["ba", "cak", "ma", "fak"] {
        match trie.search(prefix) {
            Search::Prefix(matches) => {
                let words: Vec<String> = matches.iter().map(|m| m.text()).collect();
                println!("  {prefix}*: {words:?}");
            }
            Search::Exact(m) => println!("  {prefix}*: exact word {:?}", m.text()),
            Search::InTail(m) => println!("  {prefix}*: completes to {:?}", m.text()),
            _ => println!("  {prefix}*: no completions"),
        }
    }

    // Full enumeration
    let all: Vec<String> = trie.words().iter().map(|m| m.text()).collect();
    println!("\nAll {} words: {all:?}", trie.len());

    // Deletion leaves sibling words intact
    trie.remove_word("bake");
    println!(
        "\nAfter deleting \"bake\": contains(\"bake\") = {}, contains(\"baked\") = {}",
        trie.contains("bake"),
        trie.contains("baked"),
    );
}
