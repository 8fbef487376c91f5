//! Rust-native stand-ins for the NLP toolkit the pipeline leans on:
//! a word tokenizer, a part-of-speech tagger seam and a regexp chunker.

pub mod chunker;
pub mod tagger;
pub mod tokenizer;

pub use chunker::{Chunk, ChunkGrammar, ChunkNode, ChunkTree, GrammarError};
pub use tagger::{HeuristicTagger, PosTagger, TaggerError};
pub use tokenizer::word_tokenize;
