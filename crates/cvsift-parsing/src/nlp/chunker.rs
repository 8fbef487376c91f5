use regex::Regex;
use thiserror::Error;

use cvsift_core::Token;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("grammar rule has no `LABEL:` prefix")]
    MissingLabel,
    #[error("grammar rule body must be wrapped in `{{...}}`")]
    MissingBraces,
    #[error("grammar rule body is empty")]
    Empty,
    #[error("unterminated tag pattern starting at byte {0}")]
    UnterminatedTag(usize),
    #[error("unexpected character {0:?} in grammar rule")]
    UnexpectedChar(char),
    #[error("grammar compiled to an invalid regex: {0}")]
    Regex(#[from] regex::Error),
}

/// A one-rule regexp chunk grammar over part-of-speech tags.
///
/// Rules look like `NAME: {<NN|NNP> <NN|NNP>*}`. Each `<...>` matches one
/// token's tag; inside it `|` separates alternatives and `.` matches any
/// character. Outside tags, `*`, `+`, `?`, `|` and parentheses work as in
/// regular expressions. Matching is leftmost and greedy, and chunks never
/// overlap.
#[derive(Debug, Clone)]
pub struct ChunkGrammar {
    label: String,
    pattern: Regex,
}

impl ChunkGrammar {
    pub fn parse(rule: &str) -> Result<Self, GrammarError> {
        let (label, body) = rule.split_once(':').ok_or(GrammarError::MissingLabel)?;
        let label = label.trim();
        if label.is_empty() {
            return Err(GrammarError::MissingLabel);
        }

        let body = body
            .trim()
            .strip_prefix('{')
            .and_then(|b| b.strip_suffix('}'))
            .ok_or(GrammarError::MissingBraces)?;
        if body.trim().is_empty() {
            return Err(GrammarError::Empty);
        }

        let pattern = Regex::new(&tag_pattern_to_regex(body)?)?;
        Ok(Self {
            label: label.to_string(),
            pattern,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Group `tokens` into a flat tree of chunks and loose leaves.
    pub fn chunk(&self, tokens: &[Token]) -> ChunkTree {
        // Encode as "<NNP><NNP><VBZ>" and remember where each token starts.
        let mut encoded = String::new();
        let mut starts = Vec::with_capacity(tokens.len());
        for token in tokens {
            starts.push(encoded.len());
            encoded.push('<');
            encoded.extend(token.tag.chars().filter(|c| *c != '<' && *c != '>'));
            encoded.push('>');
        }

        let mut nodes = Vec::new();
        let mut next = 0;
        for m in self.pattern.find_iter(&encoded) {
            if m.start() == m.end() {
                continue;
            }
            let (Ok(first), last) = (
                starts.binary_search(&m.start()),
                starts.binary_search(&m.end()).unwrap_or(tokens.len()),
            ) else {
                continue;
            };

            nodes.extend(tokens[next..first].iter().cloned().map(ChunkNode::Leaf));
            nodes.push(ChunkNode::Chunk(Chunk {
                label: self.label.clone(),
                tokens: tokens[first..last].to_vec(),
            }));
            next = last;
        }
        nodes.extend(tokens[next..].iter().cloned().map(ChunkNode::Leaf));

        ChunkTree { nodes }
    }
}

/// Translate the body of a rule into a regex over the encoded tag string.
fn tag_pattern_to_regex(body: &str) -> Result<String, GrammarError> {
    let mut out = String::new();
    let mut chars = body.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '<' => {
                out.push_str("(?:<(?:");
                let mut closed = false;
                for (_, tc) in chars.by_ref() {
                    match tc {
                        '>' => {
                            closed = true;
                            break;
                        }
                        '.' => out.push_str("[^<>]"),
                        '|' | '*' | '+' | '?' | '(' | ')' => out.push(tc),
                        tc if tc.is_alphanumeric() || matches!(tc, '$' | '_' | '-') => {
                            out.push_str(&regex::escape(&tc.to_string()));
                        }
                        other => return Err(GrammarError::UnexpectedChar(other)),
                    }
                }
                if !closed {
                    return Err(GrammarError::UnterminatedTag(pos));
                }
                out.push_str(")>)");
            }
            '*' | '+' | '?' | '|' | '(' | ')' => out.push(c),
            other => return Err(GrammarError::UnexpectedChar(other)),
        }
    }

    Ok(out)
}

/// A labeled run of consecutive tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub label: String,
    pub tokens: Vec<Token>,
}

impl Chunk {
    pub fn leaves(&self) -> &[Token] {
        &self.tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkNode {
    Leaf(Token),
    Chunk(Chunk),
}

/// Result of chunking: loose leaves and chunks, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkTree {
    pub nodes: Vec<ChunkNode>,
}

impl ChunkTree {
    /// Chunks carrying `label`, in document order.
    pub fn subtrees<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.nodes.iter().filter_map(move |node| match node {
            ChunkNode::Chunk(chunk) if chunk.label == label => Some(chunk),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs.iter().map(|&(w, t)| Token::new(w, t)).collect()
    }

    const NAME_RULE: &str = "NAME: {<NN|NNP> <NN|NNP>*}";

    #[test]
    fn test_groups_consecutive_nouns() {
        let grammar = ChunkGrammar::parse(NAME_RULE).unwrap();
        let tree = grammar.chunk(&toks(&[
            ("John", "NNP"),
            ("Smith", "NNP"),
            ("works", "VBZ"),
            ("at", "IN"),
            ("Acme", "NNP"),
        ]));

        let chunks: Vec<_> = tree.subtrees("NAME").collect();
        assert_eq!(chunks.len(), 2);
        let first: Vec<_> = chunks[0].leaves().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(first, vec!["John", "Smith"]);
        assert_eq!(chunks[1].leaves()[0].text, "Acme");
        assert_eq!(tree.nodes.len(), 4);
        assert!(matches!(&tree.nodes[1], ChunkNode::Leaf(t) if t.text == "works"));
        assert!(matches!(&tree.nodes[2], ChunkNode::Leaf(t) if t.text == "at"));
    }

    #[test]
    fn test_exact_tag_alternatives() {
        // <NN> must not swallow NNS.
        let grammar = ChunkGrammar::parse(NAME_RULE).unwrap();
        let tree = grammar.chunk(&toks(&[("skills", "NNS"), ("Jane", "NNP")]));
        let chunks: Vec<_> = tree.subtrees("NAME").collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].leaves()[0].text, "Jane");
    }

    #[test]
    fn test_wildcard_inside_tag() {
        let grammar = ChunkGrammar::parse("NP: {<DT>?<JJ>*<NN.*>+}").unwrap();
        let tree = grammar.chunk(&toks(&[
            ("the", "DT"),
            ("senior", "JJ"),
            ("engineers", "NNS"),
            ("left", "VBD"),
        ]));
        let chunks: Vec<_> = tree.subtrees("NP").collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].leaves().len(), 3);
    }

    #[test]
    fn test_no_match_leaves_only() {
        let grammar = ChunkGrammar::parse(NAME_RULE).unwrap();
        let tree = grammar.chunk(&toks(&[("runs", "VBZ"), (".", ".")]));
        assert_eq!(tree.subtrees("NAME").count(), 0);
        assert_eq!(tree.nodes.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let grammar = ChunkGrammar::parse(NAME_RULE).unwrap();
        assert!(grammar.chunk(&[]).nodes.is_empty());
    }

    #[test]
    fn test_tags_with_dollar_sign() {
        let grammar = ChunkGrammar::parse("POSS: {<PRP$><NN>}").unwrap();
        let tree = grammar.chunk(&toks(&[("my", "PRP$"), ("team", "NN")]));
        assert_eq!(tree.subtrees("POSS").count(), 1);
    }

    #[test]
    fn test_grammar_errors() {
        assert!(matches!(
            ChunkGrammar::parse("{<NN>}"),
            Err(GrammarError::MissingLabel)
        ));
        assert!(matches!(
            ChunkGrammar::parse("NAME: <NN>"),
            Err(GrammarError::MissingBraces)
        ));
        assert!(matches!(ChunkGrammar::parse("NAME: { }"), Err(GrammarError::Empty)));
        assert!(matches!(
            ChunkGrammar::parse("NAME: {<NN}"),
            Err(GrammarError::UnterminatedTag(_))
        ));
        assert!(matches!(
            ChunkGrammar::parse("NAME: {<NN> & <NNP>}"),
            Err(GrammarError::UnexpectedChar('&'))
        ));
    }

    #[test]
    fn test_label_is_trimmed() {
        let grammar = ChunkGrammar::parse("  NAME :{<NNP>}").unwrap();
        assert_eq!(grammar.label(), "NAME");
    }
}
