use super::{token::*, Error, LineNumber};
use crate::error;

/// Lex a whole script. Runs of identifiers, keywords, numbers and
/// comparison operators still open at the end of input are completed.
pub fn lex(s: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::new();
    for ch in s.chars() {
        scanner.feed(ch);
    }
    scanner.finish();
    if scanner.success() {
        return Ok(scanner.into_tokens());
    }
    Err(scanner.error())
}

fn is_delimiter(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_operator(c: char) -> bool {
    "+-*/%~^|&()[]".contains(c)
}

fn is_punctuator(c: char) -> bool {
    "{};:,".contains(c)
}

fn is_comparison(c: char) -> bool {
    c == '=' || c == '<' || c == '>' || c == '!'
}

/// Characters allowed directly after an identifier, keyword, number or string.
/// `!` is deliberately absent: `$x!` is malformed.
fn is_separator(c: char) -> bool {
    c == '=' || c == '<' || c == '>' || is_operator(c) || is_punctuator(c) || is_delimiter(c)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum State {
    Home,
    Ident,
    Keyword,
    Integer,
    Real,
    Quote,
    Comparison,
    Comment,
    Error,
}

/// ## Character driven lexical analyzer
///
/// Characters are pushed in one at a time with [`Scanner::feed`].
/// A token that ends on a character it cannot absorb re-feeds that
/// character to the home state, so lookahead is never consumed.

#[derive(Debug)]
pub struct Scanner {
    state: State,
    delay: bool,
    separate: bool,
    line: LineNumber,
    start_line: LineNumber,
    buffer: String,
    tokens: Vec<Token>,
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new()
    }
}

impl Scanner {
    pub fn new() -> Scanner {
        Scanner {
            state: State::Home,
            delay: false,
            separate: false,
            line: 1,
            start_line: 1,
            buffer: String::new(),
            tokens: vec![],
        }
    }

    pub fn feed(&mut self, c: char) {
        self.step(c);
        if self.delay {
            self.delay = false;
            self.step(c);
        }
        if c == '\n' {
            self.line += 1;
        }
    }

    /// Signals end of input.
    pub fn finish(&mut self) {
        match self.state {
            State::Quote | State::Error => {}
            _ => self.feed('\n'),
        }
    }

    pub fn success(&self) -> bool {
        self.state == State::Home
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// The diagnostic for a scanner that did not finish in the home state.
    pub fn error(&self) -> Error {
        match (self.state, self.last_token()) {
            (State::Error, Some(token)) => {
                error!(MalformedToken; "unrecognized token").at_token(token)
            }
            _ => error!(UnterminatedToken; "bad final state").in_line(self.start_line),
        }
    }

    fn step(&mut self, c: char) {
        self.control_delimiter(c);
        match self.state {
            State::Home => self.home(c),
            State::Ident => self.ident(c),
            State::Keyword => self.keyword(c),
            State::Integer => self.integer(c),
            State::Real => self.real(c),
            State::Quote => self.quote(c),
            State::Comparison => self.comparison(c),
            State::Comment => self.comment(c),
            State::Error => {}
        }
    }

    fn home(&mut self, c: char) {
        if is_delimiter(c) {
            return;
        }
        self.start_line = self.line;
        if c == '#' {
            self.state = State::Comment;
        } else if c == '"' {
            self.state = State::Quote;
        } else {
            self.buffer.push(c);
            if is_operator(c) {
                self.add_lexeme(Kind::Operator);
            } else if is_punctuator(c) {
                self.add_lexeme(Kind::Punctuator);
            } else if c == '$' || c == '?' || c == '@' {
                self.state = State::Ident;
            } else if c.is_ascii_lowercase() {
                self.state = State::Keyword;
            } else if c.is_ascii_digit() {
                self.state = State::Integer;
            } else if is_comparison(c) {
                self.state = State::Comparison;
            } else {
                self.state = State::Error;
                self.add_lexeme(Kind::Malformed);
            }
        }
    }

    fn ident(&mut self, c: char) {
        if is_ident_char(c) {
            self.buffer.push(c);
        } else {
            self.complete(Kind::Identifier);
        }
    }

    fn keyword(&mut self, c: char) {
        if c.is_ascii_lowercase() {
            self.buffer.push(c);
        } else if Token::is_keyword(&self.buffer) {
            self.complete(Kind::Keyword);
        } else {
            self.state = State::Error;
            self.add_lexeme(Kind::Malformed);
        }
    }

    fn integer(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.buffer.push(c);
        } else if c == '.' {
            self.state = State::Real;
            self.buffer.push(c);
        } else {
            self.complete(Kind::Constant);
        }
    }

    fn real(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.buffer.push(c);
        } else {
            self.complete(Kind::Constant);
        }
    }

    fn quote(&mut self, c: char) {
        if c != '"' {
            self.buffer.push(c);
        } else {
            self.state = State::Home;
            self.separate = true;
            self.add_string();
        }
    }

    fn comparison(&mut self, c: char) {
        self.state = State::Home;
        if c == '=' {
            self.buffer.push(c);
        } else {
            self.delay = true;
        }
        self.add_lexeme(Kind::Operator);
    }

    fn comment(&mut self, c: char) {
        if c == '\n' {
            self.state = State::Home;
        }
    }

    /// Ends a run on a character it cannot absorb; that character is fed again.
    fn complete(&mut self, kind: Kind) {
        self.state = State::Home;
        self.delay = true;
        self.separate = true;
        self.add_lexeme(kind);
    }

    fn control_delimiter(&mut self, c: char) {
        if !self.separate {
            return;
        }
        self.separate = false;
        if is_separator(c) {
            return;
        }
        self.state = State::Error;
        self.buffer.push(c);
        self.add_lexeme(Kind::Malformed);
    }

    fn add_lexeme(&mut self, kind: Kind) {
        if self.buffer.is_empty() {
            return;
        }
        self.add_string_kind(kind);
    }

    fn add_string(&mut self) {
        self.add_string_kind(Kind::StringLiteral);
    }

    fn add_string_kind(&mut self, kind: Kind) {
        let text = std::mem::take(&mut self.buffer);
        self.tokens.push(Token {
            text,
            kind,
            line: self.line,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(s: &str) -> Scanner {
        let mut scanner = Scanner::new();
        for ch in s.chars() {
            scanner.feed(ch);
        }
        scanner
    }

    #[test]
    fn test_real() {
        let scanner = scan("123.45 ");
        assert!(scanner.success());
        assert_eq!(
            scanner.tokens(),
            &[Token::new("123.45", Kind::Constant, 1)]
        );
    }

    #[test]
    fn test_stalled_identifier() {
        let scanner = scan("$x");
        assert!(!scanner.success());
        assert!(scanner.tokens().is_empty());
    }

    #[test]
    fn test_empty_string_literal() {
        let scanner = scan("\"\" ");
        assert!(scanner.success());
        assert_eq!(scanner.tokens(), &[Token::new("", Kind::StringLiteral, 1)]);
    }

    #[test]
    fn test_error_is_absorbing() {
        let scanner = scan("` $x ");
        assert!(!scanner.success());
        assert_eq!(scanner.tokens(), &[Token::new("`", Kind::Malformed, 1)]);
    }
}
