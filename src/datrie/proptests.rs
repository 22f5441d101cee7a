use super::trie::{DoubleArrayTrie, Search};

use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Add(Vec<char>, u32),
    Remove(Vec<char>),
    Lookup(Vec<char>),
}

/// Short words over a three-letter alphabet: small enough that base offsets
/// constantly contend, so collisions and tail splits dominate the run.
fn word_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c']), 0..=6)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (word_strategy(), any::<u32>()).prop_map(|(w, v)| Op::Add(w, v)),
        2 => word_strategy().prop_map(Op::Remove),
        2 => word_strategy().prop_map(Op::Lookup),
    ];
    prop::collection::vec(op, 0..=200)
}

proptest! {
    /// Random interleavings of insert/remove/lookup must agree with a plain
    /// map at every step, and the final enumeration must match exactly.
    /// The first payload wins on duplicate inserts, mirroring the trie's
    /// idempotent-insert rule.
    #[test]
    fn trie_agrees_with_model(ops in ops_strategy()) {
        let mut trie: DoubleArrayTrie<char, u32> = DoubleArrayTrie::new('#');
        let mut model: HashMap<Vec<char>, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(word, payload) => {
                    prop_assert!(trie.add_word(word.clone(), payload));
                    model.entry(word).or_insert(payload);
                }
                Op::Remove(word) => {
                    let expected = model.remove(&word).is_some();
                    prop_assert_eq!(trie.remove_word(word), expected);
                }
                Op::Lookup(word) => match (trie.search_exact(word.clone()), model.get(&word)) {
                    (Search::Exact(m), Some(&payload)) => {
                        prop_assert_eq!(m.word, word);
                        prop_assert_eq!(m.payload, payload);
                    }
                    (Search::Missing, None) => {}
                    (got, want) => {
                        prop_assert!(false, "lookup mismatch: got {:?}, model has {:?}", got, want)
                    }
                },
            }
        }

        prop_assert_eq!(trie.len(), model.len());
        let mut stored: Vec<(Vec<char>, u32)> = trie
            .words()
            .into_iter()
            .map(|m| (m.word, m.payload))
            .collect();
        stored.sort();
        let mut expected: Vec<(Vec<char>, u32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(stored, expected);
    }
}
