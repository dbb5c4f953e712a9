use super::{LineNumber, Token};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: Option<LineNumber>,
    token: Option<String>,
    operator: Option<&'static str>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $op:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_operator($op)
    };
    ($err:ident, $op:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_operator($op)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            token: None,
            operator: None,
            message: String::new(),
        }
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    /// Compile failures stop a script before a single instruction runs.
    pub fn is_compile_error(&self) -> bool {
        self.code < ErrorCode::TypeMismatch as u16
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn in_line(self, line: LineNumber) -> Error {
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn at_token(self, token: &Token) -> Error {
        Error {
            line_number: Some(token.line),
            token: Some(token.text.clone()),
            ..self
        }
    }

    pub fn in_operator(self, operator: &'static str) -> Error {
        if self.operator.is_some() {
            return self;
        }
        Error {
            operator: Some(operator),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    MalformedToken = 1,
    UnterminatedToken = 2,
    SyntaxError = 3,
    DuplicateLabel = 4,
    UnknownFunction = 5,
    WrongArguments = 6,
    TypeMismatch = 10,
    StackUnderflow = 11,
    DivisionByZero = 12,
    BadAllocation = 13,
    OutOfBounds = 14,
    UndefinedVariable = 15,
    UndefinedLabel = 16,
    IllegalFunctionCall = 17,
    InputError = 18,
    Interrupted = 19,
    OutOfMemory = 20,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "malformed token",
            2 => "unterminated token",
            3 => "syntax error",
            4 => "duplicate label",
            5 => "unknown function",
            6 => "wrong number of arguments",
            10 => "type mismatch",
            11 => "stack underflow",
            12 => "division by zero",
            13 => "bad allocation",
            14 => "index out of bounds",
            15 => "undefined variable",
            16 => "undefined label",
            17 => "illegal function call",
            18 => "input error",
            19 => "interrupted",
            20 => "out of memory",
            51 => "internal error",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(operator) = self.operator {
            suffix.push_str(&format!(" in {}", operator));
        }
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" in line {}", line_number));
        }
        if let Some(token) = &self.token {
            suffix.push_str(&format!(" at `{}`", token));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "error {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
