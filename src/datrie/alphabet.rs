use hashbrown::HashMap;

use super::char_trait::TrieChar;

/// Transition code reserved for the sentinel terminator.
pub(crate) const SENTINEL_CODE: u32 = 1;

/// Registry assigning a dense positive integer code to every distinct
/// character seen by the trie.
///
/// Codes start at 1 and never change once assigned; code 1 is reserved for
/// the sentinel terminator, registered at construction. Characters that were
/// never registered read as code 0, which no valid transition uses.
pub struct Alphabet<C: TrieChar> {
    codes: HashMap<C, u32>,
    /// Reverse table: `chars[code - 1]` is the character owning `code`.
    chars: Vec<C>,
    sentinel: C,
}

impl<C: TrieChar> Alphabet<C> {
    /// Creates a registry holding only the sentinel, at code 1.
    pub fn new(sentinel: C) -> Self {
        let mut codes = HashMap::new();
        codes.insert(sentinel, SENTINEL_CODE);
        Alphabet {
            codes,
            chars: vec![sentinel],
            sentinel,
        }
    }

    /// Returns the code assigned to `c`, or 0 if `c` was never registered.
    ///
    /// This is the read path: it never assigns a new code.
    #[inline]
    pub fn code(&self, c: C) -> u32 {
        self.codes.get(&c).copied().unwrap_or(0)
    }

    /// Assigns the next unused code to each character of `word` not yet
    /// present. Already-registered characters keep their code.
    pub fn register(&mut self, word: &[C]) {
        for &c in word {
            if !self.codes.contains_key(&c) {
                let code = self.chars.len() as u32 + 1;
                self.codes.insert(c, code);
                self.chars.push(c);
            }
        }
    }

    /// The sentinel terminator character.
    #[inline]
    pub fn sentinel(&self) -> C {
        self.sentinel
    }

    /// The character owning `code`. `code` must be assigned.
    #[inline]
    pub(crate) fn char_for(&self, code: u32) -> C {
        self.chars[(code - 1) as usize]
    }

    /// All assigned codes, in ascending order.
    #[inline]
    pub(crate) fn codes(&self) -> impl Iterator<Item = u32> {
        1..=self.chars.len() as u32
    }

    /// Number of registered characters, sentinel included.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false: the sentinel is registered at construction.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_gets_code_one() {
        let alphabet = Alphabet::new('#');
        assert_eq!(alphabet.code('#'), SENTINEL_CODE);
        assert_eq!(alphabet.sentinel(), '#');
        assert_eq!(alphabet.len(), 1);
    }

    #[test]
    fn codes_are_dense_and_stable() {
        let mut alphabet = Alphabet::new('#');
        alphabet.register(&['b', 'a', 'b', 'y']);
        assert_eq!(alphabet.code('b'), 2);
        assert_eq!(alphabet.code('a'), 3);
        assert_eq!(alphabet.code('y'), 4);

        // Re-registering must not move anything.
        alphabet.register(&['y', 'a', 'k']);
        assert_eq!(alphabet.code('b'), 2);
        assert_eq!(alphabet.code('a'), 3);
        assert_eq!(alphabet.code('y'), 4);
        assert_eq!(alphabet.code('k'), 5);
        assert_eq!(alphabet.len(), 5);
    }

    #[test]
    fn unseen_characters_read_as_zero() {
        let mut alphabet = Alphabet::new('#');
        alphabet.register(&['a']);
        assert_eq!(alphabet.code('z'), 0);
        // The read path must not register.
        assert_eq!(alphabet.len(), 2);
    }

    #[test]
    fn reverse_table_round_trips() {
        let mut alphabet = Alphabet::new(0u8);
        alphabet.register(&[7, 42, 7]);
        for code in alphabet.codes() {
            let c = alphabet.char_for(code);
            assert_eq!(alphabet.code(c), code);
        }
        assert_eq!(alphabet.len(), 3);
    }
}
