//! Quote-aware tokenization of one line of command text.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::map,
    multi::many0,
    sequence::delimited,
    IResult,
};

use crate::CommandError;

/// Token separators. Quoted runs keep their whitespace verbatim.
const SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// A sequential pack of processed arguments — the least processed form of a
/// command line. The first argument is always the name of the command
/// invoked; an empty pack never matches any profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentPack {
    args: Vec<String>,
}

/// One raw segment of the line: an unquoted run still subject to whitespace
/// splitting, or the verbatim contents of a closed quote.
enum Segment<'a> {
    Plain(&'a str),
    Quoted(&'a str),
}

fn single_quoted(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        Segment::Quoted,
    )(input)
}

fn double_quoted(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        Segment::Quoted,
    )(input)
}

fn back_quoted(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(char('`'), take_while(|c| c != '`'), char('`')),
        Segment::Quoted,
    )(input)
}

fn plain(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        take_while1(|c| !matches!(c, '\'' | '"' | '`')),
        Segment::Plain,
    )(input)
}

fn segments(input: &str) -> IResult<&str, Vec<Segment<'_>>> {
    many0(alt((single_quoted, double_quoted, back_quoted, plain)))(input)
}

impl ArgumentPack {
    /// Tokenize a line of command text.
    ///
    /// Unquoted runs split on ASCII space, tab, CR and LF with empty pieces
    /// discarded; a run enclosed in matching `'`, `"` or `` ` `` becomes
    /// exactly one token, internal whitespace and the other quote characters
    /// included. A quote that never closes fails the whole line.
    ///
    /// # Errors
    /// * `CommandError::UnterminatedQuote` - a quote was opened and not closed
    pub fn tokenize(line: &str) -> Result<Self, CommandError> {
        // `segments` cannot fail: it stops in front of the first quote
        // character that has no closing partner, leaving it in `rest`.
        let (rest, parts) = segments(line)
            .map_err(|_| CommandError::UnterminatedQuote(line.to_string()))?;
        if !rest.is_empty() {
            return Err(CommandError::UnterminatedQuote(line.to_string()));
        }

        let mut args = Vec::new();
        for part in parts {
            match part {
                Segment::Plain(run) => args.extend(
                    run.split(|c| SEPARATORS.contains(&c))
                        .filter(|piece| !piece.is_empty())
                        .map(str::to_string),
                ),
                Segment::Quoted(run) => args.push(run.to_string()),
            }
        }
        Ok(ArgumentPack { args })
    }

    /// Tokenize a line, reporting failure as `None`.
    pub fn try_tokenize(line: &str) -> Option<Self> {
        Self::tokenize(line).ok()
    }

    pub(crate) fn from_args(args: Vec<String>) -> Self {
        ArgumentPack { args }
    }

    /// The command name, i.e. the first token.
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.args.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl std::ops::Index<usize> for ArgumentPack {
    type Output = str;

    fn index(&self, i: usize) -> &str {
        &self.args[i]
    }
}

impl<'a> IntoIterator for &'a ArgumentPack {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        ArgumentPack::tokenize(line).unwrap().args
    }

    #[test]
    fn test_plain_split() {
        assert_eq!(tokens("/laundry occupy left-dry 30"), vec![
            "/laundry", "occupy", "left-dry", "30"
        ]);
        assert_eq!(tokens("  a \t b \r\n c  "), vec!["a", "b", "c"]);
        assert_eq!(tokens(""), Vec::<String>::new());
        assert_eq!(tokens("   \t "), Vec::<String>::new());
    }

    #[test]
    fn test_quoted_run_is_one_token() {
        assert_eq!(tokens(r#"foo "bar baz" qux"#), vec!["foo", "bar baz", "qux"]);
        assert_eq!(tokens("say 'a  b'"), vec!["say", "a  b"]);
        assert_eq!(tokens("say `a b`"), vec!["say", "a b"]);
    }

    #[test]
    fn test_other_quote_chars_are_inert_inside_a_quote() {
        assert_eq!(tokens(r#""it's `fine`""#), vec!["it's `fine`"]);
        assert_eq!(tokens(r#"'say "hi"'"#), vec![r#"say "hi""#]);
    }

    #[test]
    fn test_empty_quotes_yield_an_empty_token() {
        assert_eq!(tokens(r#"foo "" bar"#), vec!["foo", "", "bar"]);
    }

    #[test]
    fn test_adjacent_quote_and_text() {
        // The run before the quote is flushed as its own tokens; the quoted
        // run never merges with its neighbors.
        assert_eq!(tokens(r#"abc"x y"z"#), vec!["abc", "x y", "z"]);
    }

    #[test]
    fn test_unterminated_quote_fails() {
        assert!(matches!(
            ArgumentPack::tokenize(r#"foo "bar"#),
            Err(CommandError::UnterminatedQuote(_))
        ));
        // An apostrophe opens a single quote that never closes.
        assert!(ArgumentPack::try_tokenize("it's fine").is_none());
        assert!(ArgumentPack::try_tokenize(r#"foo "bar baz"#).is_none());
    }

    #[test]
    fn test_pack_accessors() {
        let pack = ArgumentPack::tokenize("/stat detail=true").unwrap();
        assert_eq!(pack.name(), Some("/stat"));
        assert_eq!(pack.len(), 2);
        assert_eq!(&pack[1], "detail=true");
        assert_eq!(pack.get(2), None);
        assert!(ArgumentPack::tokenize("").unwrap().name().is_none());
    }
}
