//! # libdatrie
//!
//! A mutable [double-array trie](https://en.wikipedia.org/wiki/Trie#Implementation_strategies)
//! for Rust: a compact deterministic automaton over a set of strings, where a
//! child state is found by plain integer arithmetic (`base[parent] + code`)
//! and validated by a parent back-pointer (`check[child] == parent`).
//!
//! Single-child suffix chains are not expanded into one node per character;
//! they are kept as compressed "tail" records and only split into real nodes
//! when a later insertion diverges inside them. Each stored word carries an
//! arbitrary payload that is returned with every match.
//!
//! ## Features
//!
//! - **Generic over character type**: works with `char`, `u8`, `u16`, or any
//!   type implementing [`TrieChar`](datrie::TrieChar)
//! - **Compact**: transitions live in two integer arrays; suffix chains are
//!   stored as flat tail records instead of one node per character
//! - **Mutable**: insertion, exact and prefix lookup, and deletion, in any
//!   order — no pre-sorted corpus required
//!
//! ## Quick Start
//!
//! ```
//! use libdatrie::datrie::trie::{DoubleArrayTrie, Search};
//!
//! let mut trie: DoubleArrayTrie<char, u32> = DoubleArrayTrie::new('#');
//! trie.add_word("baby", 1);
//! trie.add_word("bachelor", 2);
//! trie.add_word("jar", 3);
//!
//! assert!(trie.contains("baby"));
//! assert!(!trie.contains("bab"));
//!
//! match trie.search("ba") {
//!     Search::Prefix(matches) => assert_eq!(matches.len(), 2),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! Building from an initial corpus, with payloads:
//!
//! ```
//! use libdatrie::datrie::builder::build_trie;
//!
//! let trie = build_trie([("left", 0u8), ("right", 1)], '#').unwrap();
//! assert!(trie.contains("right"));
//! assert!(!trie.contains("l"));
//! ```

#![warn(missing_docs)]

/// Core double-array trie: alphabet, tail store, node arrays, and the engine.
pub mod datrie;
