//! Tokenizer for tag-argument markup.
//!
//! The escaped markup is consumed front to back: each step matches the
//! grammar's `entry` rule against the remaining text, classifies the raw
//! token, and continues past the separating whitespace. The loop is
//! iterative so stack depth never depends on argument count.

use pest::Parser;
use pest_derive::Parser;

use crate::error::Error;
use crate::escape::{descape, escape};
use crate::params::{Entry, Params};
use crate::value::{self, Value};

#[derive(Parser)]
#[grammar = "args.pest"]
pub struct ArgsParser;

const SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

pub(crate) fn parse(markup: &str) -> Result<Params, Error> {
    let escaped = escape(markup);
    let mut rest = escaped.trim_matches(SEPARATORS);
    let mut params = Params::new();

    while !rest.is_empty() {
        let Ok(mut pairs) = ArgsParser::parse(Rule::entry, rest) else {
            return Err(Error::Syntax {
                remainder: descape(rest),
            });
        };
        let pair = pairs.next().expect("parser returned no entry rule");
        let tail = &rest[pair.as_span().end()..];
        // Every token must be followed by a separating run of whitespace
        // or the end of the markup.
        if !tail.is_empty() && !tail.starts_with(SEPARATORS) {
            return Err(Error::Syntax {
                remainder: descape(rest),
            });
        }
        params.push(entry(pair)?);
        rest = tail.trim_start_matches(SEPARATORS);
    }

    Ok(params)
}

fn entry(pair: pest::iterators::Pair<Rule>) -> Result<Entry, Error> {
    let form = pair.into_inner().next().expect("entry rule is never empty");
    match form.as_rule() {
        Rule::attribute => {
            let mut parts = form.into_inner();
            let key = parts.next().expect("attribute without key").as_str();
            let token = parts.next().expect("attribute without value").as_str();
            Ok(Entry {
                name: Some(key.to_string()),
                value: value::classify(token)?,
            })
        }
        Rule::flag => {
            let key = form.into_inner().next().expect("flag without key").as_str();
            Ok(Entry {
                name: Some(key.to_string()),
                value: Value::flag(),
            })
        }
        Rule::positional => {
            let token = form
                .into_inner()
                .next()
                .expect("positional without value")
                .as_str();
            Ok(Entry {
                name: None,
                value: value::classify(token)?,
            })
        }
        rule => unreachable!("entry matched unexpected rule {rule:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Kind, Path, Quoted, Quotes};

    #[test]
    fn test_parse_named_integer() {
        let params = parse("key=123").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get_named("key").unwrap().kind(), &Kind::Integer(123));
    }

    #[test]
    fn test_parse_positional_integer() {
        let params = parse("123").unwrap();
        assert_eq!(params.get(0).unwrap().kind(), &Kind::Integer(123));
        assert!(params.entries().next().unwrap().name().is_none());
    }

    #[test]
    fn test_parse_flag() {
        let params = parse("flag").unwrap();
        assert_eq!(params.get_named("flag").unwrap().kind(), &Kind::Boolean(true));
        assert_eq!(params.get(0).unwrap().kind(), &Kind::Boolean(true));
    }

    #[test]
    fn test_parse_mixed_entries_keep_source_order() {
        let params = parse("@cover 'alt text' width=10px {{ page.title }}").unwrap();
        assert_eq!(params.len(), 4);
        assert!(matches!(params.get(0).unwrap().kind(), Kind::Path(_)));
        assert!(matches!(params.get(1).unwrap().kind(), Kind::Quoted(_)));
        assert!(matches!(params.get(2).unwrap().kind(), Kind::Measure(_)));
        assert!(matches!(params.get(3).unwrap().kind(), Kind::Variable(_)));
        assert!(params.get_named("width").is_some());
    }

    #[test]
    fn test_parse_attribute_variable() {
        let params = parse("title={{ page.title }}").unwrap();
        let Kind::Variable(variable) = params.get_named("title").unwrap().kind() else {
            panic!("expected a variable");
        };
        assert_eq!(variable.name(), "page.title");
        assert!(variable.braced());
    }

    #[test]
    fn test_parse_bare_attribute_value_is_variable() {
        let params = parse("src=site.logo").unwrap();
        let Kind::Variable(variable) = params.get_named("src").unwrap().kind() else {
            panic!("expected a variable");
        };
        assert_eq!(variable.name(), "site.logo");
        assert!(!variable.braced());
    }

    #[test]
    fn test_parse_quoted_value_with_spaces() {
        let params = parse("caption='a b c'").unwrap();
        assert_eq!(
            params.get_named("caption").unwrap().kind(),
            &Kind::Quoted(Quoted {
                value: "a b c".to_string(),
                quotes: Quotes::Single,
            })
        );
    }

    #[test]
    fn test_last_assignment_wins_but_sequence_keeps_both() {
        let params = parse("k=1 k=2").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_named("k").unwrap().kind(), &Kind::Integer(2));
        assert_eq!(params.get(0).unwrap().kind(), &Kind::Integer(1));
    }

    #[test]
    fn test_dangling_attribute_is_syntax_error() {
        assert_eq!(
            parse("key=").unwrap_err(),
            Error::Syntax {
                remainder: "key=".to_string(),
            }
        );
    }

    #[test]
    fn test_syntax_error_names_unconsumed_remainder() {
        assert_eq!(
            parse("ok key= tail").unwrap_err(),
            Error::Syntax {
                remainder: "key= tail".to_string(),
            }
        );
    }

    #[test]
    fn test_tokens_require_separating_whitespace() {
        assert!(matches!(parse("'a''b'"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_escaped_space_stays_inside_token() {
        let params = parse("path=hello\\ world").unwrap();
        assert_eq!(
            params.get_named("path").unwrap().kind(),
            &Kind::Path(Path {
                value: "hello\\ world".to_string(),
                signed: false,
            })
        );
    }

    #[test]
    fn test_escaped_quote_inside_quoted_value() {
        let params = parse("t='it\\'s'").unwrap();
        assert_eq!(
            params.get_named("t").unwrap().kind(),
            &Kind::Quoted(Quoted {
                value: "it\\'s".to_string(),
                quotes: Quotes::Single,
            })
        );
    }

    #[test]
    fn test_empty_markup_parses_to_no_entries() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_literal_propagates() {
        assert!(matches!(
            parse("c=#ab"),
            Err(Error::Literal { what: "hex color", .. })
        ));
    }
}
