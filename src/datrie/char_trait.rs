use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as edge labels in the trie.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: words and tail records store labels by value
/// - `Eq`: comparing labels during walks and tail splits
/// - `Hash`: the alphabet's character-to-code registry
/// - `Debug`: debug printing of words and errors
pub trait TrieChar: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> TrieChar for T {}
