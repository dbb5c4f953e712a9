use super::LineNumber;

pub const KEYWORDS: [&str; 28] = [
    "program", "begin", "end", "endl", "equ", "and", "or", "xor", "not", "if", "else", "elseif",
    "goto", "while", "repeat", "until", "alloc", "free", "print", "scan", "inc", "dec", "true",
    "false", "bool", "int", "double", "string",
];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Kind {
    Identifier,
    Keyword,
    Constant,
    StringLiteral,
    Operator,
    Punctuator,
    Malformed,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub text: String,
    pub kind: Kind,
    pub line: LineNumber,
}

impl Token {
    pub fn new(text: &str, kind: Kind, line: LineNumber) -> Token {
        Token {
            text: text.to_string(),
            kind,
            line,
        }
    }

    pub fn is_keyword(s: &str) -> bool {
        KEYWORDS.contains(&s)
    }

    /// Matches punctuation, operators and keywords by text.
    /// String literals never match, so `"end"` is not the keyword `end`.
    pub fn is(&self, s: &str) -> bool {
        self.kind != Kind::StringLiteral && self.text == s
    }

    pub fn is_variable(&self) -> bool {
        self.kind == Kind::Identifier && self.text.starts_with('$')
    }

    pub fn is_function(&self) -> bool {
        self.kind == Kind::Identifier && self.text.starts_with('?')
    }

    pub fn is_label(&self) -> bool {
        self.kind == Kind::Identifier && self.text.starts_with('@')
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            Kind::StringLiteral => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}
