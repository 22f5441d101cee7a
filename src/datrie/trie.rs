use super::alphabet::{Alphabet, SENTINEL_CODE};
use super::builder::IntoWord;
use super::char_trait::TrieChar;
use super::state::NodeArrays;
use super::tail::TailStore;

use smallvec::SmallVec;

/// Sentinel used by [`DoubleArrayTrie::default`] for `char` tries.
pub const DEFAULT_SENTINEL: char = '#';

/// Fixed id of the root node. Pre-initialized with a positive base, so the
/// root is always a branching node.
const ROOT: usize = 1;

/// A stored word returned by a lookup, together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<C: TrieChar, P> {
    /// The full stored word.
    pub word: Vec<C>,
    /// The payload attached when the word was inserted.
    pub payload: P,
}

impl<P> Match<char, P> {
    /// The matched word as a `String`.
    pub fn text(&self) -> String {
        self.word.iter().collect()
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search<C: TrieChar, P> {
    /// The query contains the sentinel terminator; nothing was looked up.
    Illegal,
    /// No stored word matches the query.
    Missing,
    /// The query itself is stored; the single match carries its payload.
    Exact(Match<C, P>),
    /// The query ends inside a compressed tail: exactly one stored word
    /// completes it, returned in full.
    InTail(Match<C, P>),
    /// The query is a proper prefix of the stored words listed.
    Prefix(Vec<Match<C, P>>),
}

/// A mutable double-array trie mapping words to payloads.
///
/// Transitions live in two parallel integer arrays: the child of node `n`
/// for character `c` is `base[n] + code(c)`, valid only when the child's
/// `check` entry points back at `n`. A word's unshared remainder is not
/// expanded node-by-node; it is kept as a compressed tail record and split
/// into real nodes only when a later insertion diverges inside it.
///
/// Operations take `&self`/`&mut self`; callers needing cross-thread use
/// must wrap the trie in their own synchronization.
///
/// # Examples
///
/// ```
/// use libdatrie::datrie::trie::{DoubleArrayTrie, Search};
///
/// let mut trie: DoubleArrayTrie<char, &str> = DoubleArrayTrie::new('#');
/// trie.add_word("bake", "recipe");
/// trie.add_word("baker", "person");
///
/// assert!(trie.contains("bake"));
/// match trie.search("bak") {
///     Search::Prefix(matches) => assert_eq!(matches.len(), 2),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// assert!(trie.remove_word("bake"));
/// assert!(!trie.contains("bake"));
/// assert!(trie.contains("baker"));
/// ```
pub struct DoubleArrayTrie<C: TrieChar, P> {
    alphabet: Alphabet<C>,
    arrays: NodeArrays,
    tails: TailStore<C, P>,
    len: usize,
}

impl<P> Default for DoubleArrayTrie<char, P> {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl<C: TrieChar, P> std::fmt::Debug for DoubleArrayTrie<C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleArrayTrie")
            .field("len", &self.len)
            .field("alphabet_len", &self.alphabet.len())
            .finish()
    }
}

impl<C: TrieChar, P> DoubleArrayTrie<C, P> {
    /// Creates an empty trie whose words must never contain `sentinel`.
    pub fn new(sentinel: C) -> Self {
        let mut arrays = NodeArrays::new();
        arrays.set_base(ROOT, 1);
        DoubleArrayTrie {
            alphabet: Alphabet::new(sentinel),
            arrays,
            tails: TailStore::new(),
            len: 0,
        }
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no words are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The character-to-code registry, sentinel included.
    pub fn alphabet(&self) -> &Alphabet<C> {
        &self.alphabet
    }

    /// Inserts `word` with `payload`.
    ///
    /// Returns `false` only when `word` contains the sentinel (illegal
    /// input; nothing is mutated). Every legal insert returns `true`:
    /// a fresh write, a tail split, a collision-resolved write, or an
    /// idempotent hit on an already-stored word. Re-inserting keeps the
    /// original payload and changes no structure.
    pub fn add_word(&mut self, word: impl IntoWord<C>, payload: P) -> bool {
        let word = word.collect_word();
        if word.contains(&self.alphabet.sentinel()) {
            return false;
        }
        self.alphabet.register(&word);

        let mut current = ROOT;
        // One step per character, plus a final terminator step with an
        // empty remainder. The extra step stores words that are fully
        // consumed while walking branching nodes (including the empty
        // word) as a sentinel-coded transition.
        for i in 0..=word.len() {
            let code = if i < word.len() {
                self.alphabet.code(word[i])
            } else {
                SENTINEL_CODE
            };
            debug_assert_ne!(code, 0, "inserted characters are registered");
            let remaining = if i < word.len() {
                &word[i + 1..]
            } else {
                &word[word.len()..]
            };

            let child = (self.arrays.base(current) + code as i32) as usize;
            let owner = self.arrays.check(child);

            if owner == 0 {
                // Free slot: the rest of the word becomes one tail record.
                self.claim_tail(current, child, remaining, payload);
                self.len += 1;
                return true;
            }

            if owner == current as i32 {
                let b = self.arrays.base(child);
                if b < 0 {
                    let slot = (-b) as u32;
                    if self.tails.suffix(slot) == remaining {
                        return true;
                    }
                    self.split_tail(child, slot, remaining, payload);
                    self.len += 1;
                    return true;
                }
                debug_assert!(b > 0, "claimed slot must have an initialized base");
                current = child;
                continue;
            }

            // The slot is owned by an unrelated parent: a base collision.
            current = self.resolve_collision(current, code);
            let child = (self.arrays.base(current) + code as i32) as usize;
            debug_assert_eq!(
                self.arrays.check(child),
                0,
                "collision resolution must leave the pending slot free"
            );
            self.claim_tail(current, child, remaining, payload);
            self.len += 1;
            return true;
        }
        unreachable!("the terminator step always ends the walk");
    }

    /// Removes `word`, returning `true` if it was stored.
    ///
    /// The word's tail record is dropped and its terminal slot freed.
    /// Branching nodes left with a single child (or none) are not merged
    /// or compacted afterward: longer words sharing the path stay
    /// reachable, and node ids remain stable across deletes.
    pub fn remove_word(&mut self, word: impl IntoWord<C>) -> bool {
        let word = word.collect_word();
        if word.contains(&self.alphabet.sentinel()) {
            return false;
        }
        let mut current = ROOT;
        for i in 0..word.len() {
            let b = self.arrays.base(current);
            if b < 0 {
                let slot = (-b) as u32;
                if self.tails.suffix(slot) != &word[i..] {
                    return false;
                }
                self.tails.remove(slot);
                self.arrays.clear_slot(current);
                self.len -= 1;
                return true;
            }
            let code = self.alphabet.code(word[i]);
            if code == 0 {
                return false;
            }
            let child = (b + code as i32) as usize;
            if self.arrays.check(child) != current as i32 {
                return false;
            }
            current = child;
        }
        let b = self.arrays.base(current);
        if b < 0 {
            let slot = (-b) as u32;
            if !self.tails.suffix(slot).is_empty() {
                return false;
            }
            self.tails.remove(slot);
            self.arrays.clear_slot(current);
            self.len -= 1;
            return true;
        }
        let terminal = (b + SENTINEL_CODE as i32) as usize;
        if self.arrays.check(terminal) != current as i32 {
            return false;
        }
        debug_assert!(self.arrays.base(terminal) < 0, "terminator slots own a tail");
        let slot = (-self.arrays.base(terminal)) as u32;
        self.tails.remove(slot);
        self.arrays.clear_slot(terminal);
        self.len -= 1;
        true
    }

    /// Claims the free slot `child` under `parent` as a tail-owning node
    /// holding `suffix` and `payload`.
    fn claim_tail(&mut self, parent: usize, child: usize, suffix: &[C], payload: P) {
        let slot = self.tails.push(suffix, payload);
        self.arrays.set_base(child, -(slot as i32));
        self.arrays.set_check(child, parent as i32);
    }

    /// Splits the tail at `node` (record `slot`) against the diverging
    /// `remaining` input suffix.
    ///
    /// The common prefix of the two suffixes is threaded into the arrays as
    /// a chain of single-child branching nodes; below it, one offset holds
    /// the two diverging transitions. Comparing the suffixes extended with
    /// the sentinel terminator lets a suffix that is a strict prefix of the
    /// other diverge on the terminator itself, so each branch is always a
    /// real transition. The pre-existing record keeps its slot id and
    /// payload; the new branch gets a fresh slot.
    fn split_tail(&mut self, node: usize, slot: u32, remaining: &[C], payload: P) {
        let stored: Vec<C> = self.tails.suffix(slot).to_vec();
        debug_assert!(stored != remaining);
        let lcp = stored
            .iter()
            .zip(remaining)
            .take_while(|(a, b)| a == b)
            .count();

        let mut s = node;
        for &ch in &stored[..lcp] {
            let code = self.alphabet.code(ch);
            let q = self.arrays.find_free_base(&[code]);
            self.arrays.set_base(s, q);
            let link = (q + code as i32) as usize;
            self.arrays.set_check(link, s as i32);
            s = link;
        }

        let stored_code = match stored.get(lcp) {
            Some(&ch) => self.alphabet.code(ch),
            None => SENTINEL_CODE,
        };
        let input_code = match remaining.get(lcp) {
            Some(&ch) => self.alphabet.code(ch),
            None => SENTINEL_CODE,
        };
        debug_assert_ne!(stored_code, input_code, "split requires divergence");

        let q = self.arrays.find_free_base(&[stored_code, input_code]);
        self.arrays.set_base(s, q);

        let stored_rest = if lcp < stored.len() {
            stored[lcp + 1..].to_vec()
        } else {
            Vec::new()
        };
        let stored_node = (q + stored_code as i32) as usize;
        self.arrays.set_base(stored_node, -(slot as i32));
        self.arrays.set_check(stored_node, s as i32);
        self.tails.set_suffix(slot, stored_rest);

        let input_rest = if lcp < remaining.len() {
            &remaining[lcp + 1..]
        } else {
            &remaining[remaining.len()..]
        };
        let input_node = (q + input_code as i32) as usize;
        let new_slot = self.tails.push(input_rest, payload);
        self.arrays.set_base(input_node, -(new_slot as i32));
        self.arrays.set_check(input_node, s as i32);
    }

    /// Resolves a base collision for the pending edge `pending_code` out of
    /// `current`, relocating whichever contender is cheaper to move.
    ///
    /// Returns the walk position afterward: relocating the slot's owner can
    /// move `current` itself when the owner is its parent.
    fn resolve_collision(&mut self, current: usize, pending_code: u32) -> usize {
        let child = (self.arrays.base(current) + pending_code as i32) as usize;
        let other = self.arrays.check(child) as usize;
        let current_codes = self.transition_codes(current);
        let other_codes = self.transition_codes(other);

        if current_codes.len() + 1 <= other_codes.len() {
            // The inserting node moves; its new base must also have room
            // for the pending edge.
            let mut needed = current_codes.clone();
            needed.push(pending_code);
            self.relocate(current, &current_codes, &needed);
            current
        } else {
            // The other owner moves, freeing the contested slot. If it is
            // the walk's own parent, the walk position moves with it.
            let parent_of_current = self.arrays.check(current) == other as i32;
            let old_base = self.arrays.base(other);
            self.relocate(other, &other_codes, &other_codes);
            if parent_of_current {
                (self.arrays.base(other) + (current as i32 - old_base)) as usize
            } else {
                current
            }
        }
    }

    /// Moves every transition of `node` to a fresh base offset under which
    /// all of `needed` land on free slots.
    fn relocate(&mut self, node: usize, codes: &[u32], needed: &[u32]) {
        let q = self.arrays.find_free_base(needed);
        let old_base = self.arrays.base(node);
        debug_assert!(old_base > 0, "only branching nodes relocate");

        let num_codes = self.alphabet.len() as u32;

        for &code in codes {
            let from = (old_base + code as i32) as usize;
            let to = (q + code as i32) as usize;
            debug_assert_eq!(self.arrays.check(to), 0, "target slot must be free");
            let b = self.arrays.base(from);
            self.arrays.set_base(to, b);
            self.arrays.set_check(to, node as i32);
            if b > 0 {
                // The moved transition is itself a parent: its children
                // must point at the new location.
                for grandchild_code in 1..=num_codes {
                    let g = (b + grandchild_code as i32) as usize;
                    if self.arrays.check(g) == from as i32 {
                        self.arrays.set_check(g, to as i32);
                    }
                }
            }
            self.arrays.clear_slot(from);
        }
        self.arrays.set_base(node, q);
    }

    /// Codes of all outgoing transitions of `node`.
    fn transition_codes(&self, node: usize) -> SmallVec<[u32; 8]> {
        let b = self.arrays.base(node);
        debug_assert!(b > 0);
        self.alphabet
            .codes()
            .filter(|&code| self.arrays.check((b + code as i32) as usize) == node as i32)
            .collect()
    }
}

impl<C: TrieChar, P: Clone> DoubleArrayTrie<C, P> {
    /// Looks up `word`, reporting prefix relationships.
    ///
    /// - [`Search::Illegal`] — the query contains the sentinel
    /// - [`Search::Missing`] — no stored word matches or completes it
    /// - [`Search::Exact`] — the query itself is stored
    /// - [`Search::InTail`] — the query ends inside a compressed tail; the
    ///   single completing word is returned
    /// - [`Search::Prefix`] — the query is a proper prefix; every stored
    ///   completion is returned
    pub fn search(&self, word: impl IntoWord<C>) -> Search<C, P> {
        let word = word.collect_word();
        self.search_impl(&word, false)
    }

    /// Looks up `word`, accepting only exact matches.
    ///
    /// Prefix relationships that [`search`](Self::search) would report
    /// collapse to [`Search::Missing`].
    pub fn search_exact(&self, word: impl IntoWord<C>) -> Search<C, P> {
        let word = word.collect_word();
        self.search_impl(&word, true)
    }

    /// True if `word` itself is stored.
    pub fn contains(&self, word: impl IntoWord<C>) -> bool {
        matches!(self.search_exact(word), Search::Exact(_))
    }

    /// Every stored word with its payload, in transition-code order.
    pub fn words(&self) -> Vec<Match<C, P>> {
        let mut prefix = Vec::new();
        let mut out = Vec::new();
        self.collect_words(ROOT, &mut prefix, &mut out);
        out
    }

    fn search_impl(&self, word: &[C], exact: bool) -> Search<C, P> {
        if word.contains(&self.alphabet.sentinel()) {
            return Search::Illegal;
        }
        let mut current = ROOT;
        for i in 0..word.len() {
            let b = self.arrays.base(current);
            if b < 0 {
                // The walk entered a tail with query characters left over.
                let slot = (-b) as u32;
                let stored = self.tails.suffix(slot);
                let rest = &word[i..];
                if stored == rest {
                    return Search::Exact(Match {
                        word: word.to_vec(),
                        payload: self.tails.payload(slot).clone(),
                    });
                }
                if !exact && stored.len() > rest.len() && stored.starts_with(rest) {
                    let mut full = word[..i].to_vec();
                    full.extend_from_slice(stored);
                    return Search::InTail(Match {
                        word: full,
                        payload: self.tails.payload(slot).clone(),
                    });
                }
                return Search::Missing;
            }
            let code = self.alphabet.code(word[i]);
            if code == 0 {
                return Search::Missing;
            }
            let child = (b + code as i32) as usize;
            if self.arrays.check(child) != current as i32 {
                return Search::Missing;
            }
            current = child;
        }

        let b = self.arrays.base(current);
        if b < 0 {
            let slot = (-b) as u32;
            let stored = self.tails.suffix(slot);
            if stored.is_empty() {
                return Search::Exact(Match {
                    word: word.to_vec(),
                    payload: self.tails.payload(slot).clone(),
                });
            }
            if exact {
                return Search::Missing;
            }
            let mut full = word.to_vec();
            full.extend_from_slice(stored);
            return Search::Prefix(vec![Match {
                word: full,
                payload: self.tails.payload(slot).clone(),
            }]);
        }

        let terminal = (b + SENTINEL_CODE as i32) as usize;
        if self.arrays.check(terminal) == current as i32 {
            debug_assert!(self.arrays.base(terminal) < 0, "terminator slots own a tail");
            let slot = (-self.arrays.base(terminal)) as u32;
            return Search::Exact(Match {
                word: word.to_vec(),
                payload: self.tails.payload(slot).clone(),
            });
        }
        if exact {
            return Search::Missing;
        }
        let mut completions = Vec::new();
        let mut prefix = word.to_vec();
        self.collect_words(current, &mut prefix, &mut completions);
        if completions.is_empty() {
            // Deletions can leave a reachable branching node childless.
            Search::Missing
        } else {
            Search::Prefix(completions)
        }
    }

    /// Depth-first enumeration of every stored word below `node`, in
    /// transition-code order. `prefix` holds the characters consumed so
    /// far and is restored before returning.
    fn collect_words(&self, node: usize, prefix: &mut Vec<C>, out: &mut Vec<Match<C, P>>) {
        let b = self.arrays.base(node);
        debug_assert!(b > 0);
        for code in self.alphabet.codes() {
            let child = (b + code as i32) as usize;
            if self.arrays.check(child) != node as i32 {
                continue;
            }
            if code == SENTINEL_CODE {
                let slot = (-self.arrays.base(child)) as u32;
                out.push(Match {
                    word: prefix.clone(),
                    payload: self.tails.payload(slot).clone(),
                });
                continue;
            }
            let ch = self.alphabet.char_for(code);
            let child_base = self.arrays.base(child);
            if child_base < 0 {
                let slot = (-child_base) as u32;
                let mut word = prefix.clone();
                word.push(ch);
                word.extend_from_slice(self.tails.suffix(slot));
                out.push(Match {
                    word,
                    payload: self.tails.payload(slot).clone(),
                });
            } else {
                prefix.push(ch);
                self.collect_words(child, prefix, out);
                prefix.pop();
            }
        }
    }
}
