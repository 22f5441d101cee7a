/// Character-to-code registry with the reserved sentinel code.
pub mod alphabet;
/// Corpus construction, dictionary-file loading, and the word input trait.
pub mod builder;
/// Trait for types that can serve as trie edge labels.
pub mod char_trait;
/// The `base`/`check` array pair underlying the automaton.
pub(crate) mod state;
/// Compressed suffix records with payloads.
pub(crate) mod tail;
/// The double-array trie engine: insert, search, delete.
pub mod trie;

pub use alphabet::Alphabet;
pub use builder::{CorpusError, IntoWord};
pub use char_trait::TrieChar;
pub use trie::{DoubleArrayTrie, Match, Search};

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod test {
    use super::builder::build_trie;
    use super::trie::Search;

    #[test]
    fn corpus_workflow_end_to_end() {
        let corpus = [
            ("apple", 1u32),
            ("applet", 2),
            ("apply", 3),
            ("ape", 4),
            ("banana", 5),
            ("band", 6),
            ("bandana", 7),
        ];
        let mut trie = build_trie(corpus, '#').unwrap();

        for (word, payload) in corpus {
            match trie.search_exact(word) {
                Search::Exact(m) => {
                    assert_eq!(m.text(), word);
                    assert_eq!(m.payload, payload);
                }
                other => panic!("{word:?} should be stored, got {other:?}"),
            }
        }
        for non_word in ["app", "appl", "ban", "bananas", "pple", ""] {
            assert_eq!(trie.search_exact(non_word), Search::Missing, "{non_word:?}");
        }

        match trie.search("app") {
            Search::Prefix(matches) => {
                let mut texts: Vec<String> = matches.iter().map(|m| m.text()).collect();
                texts.sort();
                assert_eq!(texts, ["apple", "applet", "apply"]);
            }
            other => panic!("expected prefix matches, got {other:?}"),
        }

        assert!(trie.remove_word("band"));
        assert!(!trie.contains("band"));
        assert!(trie.contains("bandana"));
        assert_eq!(trie.len(), corpus.len() - 1);
    }
}
