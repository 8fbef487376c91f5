use once_cell::sync::Lazy;

use cvsift_core::{Lexicon, Token};

use crate::config::ParsingConfig;
use crate::nlp::ChunkGrammar;

/// Runs of singular nouns / proper nouns.
pub const NAME_GRAMMAR: &str = "NAME: {<NN|NNP> <NN|NNP>*}";

static DEFAULT_NAME_GRAMMAR: Lazy<ChunkGrammar> =
    Lazy::new(|| ChunkGrammar::parse(NAME_GRAMMAR).unwrap());

/// Pick the candidate's name from tagged tokens.
///
/// Walks the NAME chunks in document order and returns the first leaf that
/// is in the names lexicon and carries a noun tag, with its original casing.
/// Only the first hit is returned: a résumé whose first known given name is
/// not the candidate's (a referee, a company named after a person) misfires.
pub fn extract_name(tokens: &[Token], names: &Lexicon) -> Option<String> {
    extract_name_with_grammar(tokens, names, &DEFAULT_NAME_GRAMMAR)
}

pub(crate) fn extract_name_with_config(
    tokens: &[Token],
    names: &Lexicon,
    config: &ParsingConfig,
) -> Option<String> {
    let grammar = config.name_grammar.as_ref().unwrap_or(&DEFAULT_NAME_GRAMMAR);
    extract_name_with_grammar(tokens, names, grammar)
}

pub fn extract_name_with_grammar(
    tokens: &[Token],
    names: &Lexicon,
    grammar: &ChunkGrammar,
) -> Option<String> {
    let tree = grammar.chunk(tokens);
    let found = tree
        .subtrees(grammar.label())
        .flat_map(|chunk| chunk.leaves())
        .find(|leaf| leaf.is_nominal() && names.contains(&leaf.text))
        .map(|leaf| leaf.text.clone());

    tracing::trace!(found = found.is_some(), "name chunk scan");
    found
}
