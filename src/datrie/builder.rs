use smallvec::SmallVec;

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::char_trait::TrieChar;
use super::trie::{DoubleArrayTrie, DEFAULT_SENTINEL};

/// Trait for types that can be used as a word by the trie operations.
///
/// Implemented for common string and sequence types so that
/// [`DoubleArrayTrie::add_word`] and friends accept them directly without
/// manual conversion.
pub trait IntoWord<C: TrieChar> {
    /// Collects this word into a character buffer.
    fn collect_word(self) -> SmallVec<[C; 32]>;
}

// String types → char

impl IntoWord<char> for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: TrieChar> IntoWord<C> for &[C] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: TrieChar> IntoWord<C> for Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: TrieChar> IntoWord<C> for &Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: TrieChar> IntoWord<C> for SmallVec<[C; 32]> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self
    }
}

impl<C: TrieChar, const N: usize> IntoWord<C> for [C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: TrieChar, const N: usize> IntoWord<C> for &[C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

/// Errors that can occur when building a trie from an initial corpus.
#[derive(Debug, PartialEq)]
pub enum CorpusError<C: TrieChar> {
    /// A corpus word contains the sentinel terminator, so the corpus is
    /// incompatible with the chosen encoding. Carries the offending word.
    Sentinel(Vec<C>),
}

impl<C: TrieChar> std::fmt::Display for CorpusError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::Sentinel(word) => {
                write!(f, "sentinel character occurs in corpus word {word:?}")
            }
        }
    }
}

impl<C: TrieChar> Error for CorpusError<C> {}

/// Builds a trie from an initial corpus of `(word, payload)` records.
///
/// The whole corpus is validated against the sentinel before any state is
/// touched; a sentinel-containing word fails construction instead of being
/// silently tolerated. Records are then inserted one by one, in order; no
/// sorting is required.
///
/// # Examples
///
/// ```
/// use libdatrie::datrie::builder::build_trie;
///
/// let trie = build_trie([("baby", 1u32), ("bachelor", 2), ("jar", 3)], '#').unwrap();
/// assert!(trie.contains("bachelor"));
/// assert!(!trie.contains("bach"));
/// ```
///
/// A corpus clashing with the sentinel is rejected:
///
/// ```
/// use libdatrie::datrie::builder::build_trie;
///
/// assert!(build_trie([("ok", 0u8), ("not#ok", 1)], '#').is_err());
/// ```
pub fn build_trie<C, P, W>(
    records: impl IntoIterator<Item = (W, P)>,
    sentinel: C,
) -> Result<DoubleArrayTrie<C, P>, CorpusError<C>>
where
    C: TrieChar,
    W: IntoWord<C>,
{
    let records: Vec<(SmallVec<[C; 32]>, P)> = records
        .into_iter()
        .map(|(word, payload)| (word.collect_word(), payload))
        .collect();
    for (word, _) in &records {
        if word.contains(&sentinel) {
            return Err(CorpusError::Sentinel(word.to_vec()));
        }
    }
    let mut trie = DoubleArrayTrie::new(sentinel);
    for (word, payload) in records {
        let inserted = trie.add_word(word, payload);
        debug_assert!(inserted, "corpus words are sentinel-free");
    }
    Ok(trie)
}

/// Builds a trie from a dictionary file, one word per line.
///
/// Lines starting with `#` are treated as comments and ignored; empty lines
/// are skipped. Words carry no payload. The default sentinel applies, so a
/// word containing `#` fails construction.
///
/// # Examples
///
/// ```no_run
/// use libdatrie::datrie::builder::build_trie_from_file;
///
/// let trie = build_trie_from_file("dictionary.txt").unwrap();
/// ```
pub fn build_trie_from_file(
    filename: &str,
) -> Result<DoubleArrayTrie<char, ()>, Box<dyn Error>> {
    let file = File::open(filename)?;
    let mut reader = BufReader::new(file);

    // Calling read_line repeatedly reuses one buffer instead of allocating
    // a fresh string per line.
    let mut records: Vec<(String, ())> = Vec::new();
    let mut buf = String::with_capacity(80);
    loop {
        let bytes_read = reader.read_line(&mut buf);
        match bytes_read {
            Ok(0) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            records.push((word.to_owned(), ()));
        }
        buf.clear();
    }
    Ok(build_trie(records, DEFAULT_SENTINEL)?)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn corpus_round_trips() {
        let trie = build_trie([("ba", 'x'), ("bac", 'y'), ("be", 'z')], '#').unwrap();
        assert_eq!(trie.len(), 3);
        assert!(trie.contains("ba"));
        assert!(trie.contains("bac"));
        assert!(trie.contains("be"));
        assert!(!trie.contains("b"));
    }

    #[test]
    fn sentinel_in_corpus_is_a_construction_error() {
        let err = build_trie([("fine", 0u8), ("bro#ken", 1)], '#').unwrap_err();
        assert_eq!(err, CorpusError::Sentinel("bro#ken".chars().collect()));
    }

    #[test]
    fn custom_sentinel_moves_the_restriction() {
        // With '$' as sentinel, '#' is an ordinary character.
        let trie = build_trie([("a#b", 0u8)], '$').unwrap();
        assert!(trie.contains("a#b"));
        assert!(build_trie([("a$b", 0u8)], '$').is_err());
    }

    #[test]
    fn dictionary_file_loads_words_and_skips_comments() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# dictionary header").unwrap();
        writeln!(file, "baby").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   # indented comment").unwrap();
        writeln!(file, "jar").unwrap();
        file.flush().unwrap();

        let trie = build_trie_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(trie.len(), 2);
        assert!(trie.contains("baby"));
        assert!(trie.contains("jar"));
    }

    #[test]
    fn missing_dictionary_file_is_an_error() {
        assert!(build_trie_from_file("/definitely/not/a/real/file").is_err());
    }

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
    }

    #[test]
    fn comment_with_whitespace_before_pound() {
        assert!(is_comment("        # This is a comment with whitespace"));
    }

    #[test]
    fn non_comment() {
        assert!(!is_comment("REVERBERATE"));
    }

    #[test]
    fn non_comment_whitespace() {
        assert!(!is_comment(" REVERBERATE"));
    }
}
