//! Placeholder scanning.
//!
//! `{name}` is a named slot, `{}` a positional one, whitespace inside the
//! braces is ignored. `{{` and `}}` stand for literal braces. A brace
//! without a partner is kept as text.

use std::fmt;

/// Identifies a placeholder in error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Named(String),
    /// Zero-based index among the `{}` slots of one pass.
    Positional(usize),
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Named(name) => write!(f, "{{{name}}}"),
            Placeholder::Positional(index) => write!(f, "{{}} #{index}"),
        }
    }
}

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Named(&'a str),
    Positional,
}

/// Split `template` into literal text and placeholders, left to right.
pub fn parse(template: &str) -> Vec<Segment<'_>> {
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                push_literal(&mut segments, template, literal_start, i);
                push_literal(&mut segments, template, i, i + 1);
                i += 2;
                literal_start = i;
            }
            b'{' => match closing_brace(bytes, i + 1) {
                Some(end) => {
                    push_literal(&mut segments, template, literal_start, i);
                    let name = template[i + 1..end].trim();
                    segments.push(if name.is_empty() {
                        Segment::Positional
                    } else {
                        Segment::Named(name)
                    });
                    i = end + 1;
                    literal_start = i;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    push_literal(&mut segments, template, literal_start, bytes.len());
    segments
}

fn push_literal<'a>(segments: &mut Vec<Segment<'a>>, template: &'a str, from: usize, to: usize) {
    if from < to {
        segments.push(Segment::Literal(&template[from..to]));
    }
}

/// Index of the `}` closing a slot opened before `from`, unless another `{` comes first.
fn closing_brace(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == b'{' || b == b'}')
        .map(|offset| from + offset)
        .filter(|&end| bytes[end] == b'}')
}


#[cfg(test)]
mod tests {
    use super::*;
    use Segment::*;

    #[test]
    fn given_mixed_template_when_parsing_then_splits_in_order() {
        let segments = parse("👋 {greeting}! {}!");
        assert_eq!(
            segments,
            vec![Literal("👋 "), Named("greeting"), Literal("! "), Positional, Literal("!")]
        );
    }

    #[test]
    fn given_padded_braces_when_parsing_then_trims_names() {
        assert_eq!(parse("{ name }{ }"), vec![Named("name"), Positional]);
    }

    #[test]
    fn given_doubled_braces_when_parsing_then_literal_braces() {
        assert_eq!(
            parse("{{x}} = {x}"),
            vec![Literal("{"), Literal("x"), Literal("}"), Literal(" = "), Named("x")]
        );
    }

    #[test]
    fn given_unmatched_brace_when_parsing_then_kept_as_text() {
        assert_eq!(parse("a { b"), vec![Literal("a { b")]);
        assert_eq!(parse("a } b"), vec![Literal("a } b")]);
        assert_eq!(parse("{a {b}"), vec![Literal("{a "), Named("b")]);
    }

    #[test]
    fn given_placeholder_when_displaying_then_shows_braces() {
        assert_eq!(Placeholder::Named("missing".into()).to_string(), "{missing}");
        assert_eq!(Placeholder::Positional(1).to_string(), "{} #1");
    }
}
