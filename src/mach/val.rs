use super::Address;
use std::rc::Rc;

/// ## Script values
///
/// Text is reference counted. Values are never mutated in place,
/// so every copy behaves as an independent value.

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(Rc<str>),
}

impl Default for Val {
    fn default() -> Self {
        Val::Integer(0)
    }
}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Bool(_) => "bool",
            Val::Integer(_) => "int",
            Val::Double(_) => "double",
            Val::Text(_) => "string",
        }
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Self {
        Val::Text(s.into())
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Bool(b) => write!(f, "{}", b),
            Val::Integer(n) => write!(f, "{}", n),
            Val::Double(n) if n.is_nan() => {
                write!(f, "{}nan", if n.is_sign_negative() { "-" } else { "" })
            }
            Val::Double(n) => write!(f, "{:.6}", n),
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}

/// An element of the operand stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Val),
    Label(Address),
    Var(Rc<str>, i64),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operand::Value(v) => write!(f, "{}", v),
            Operand::Label(a) => write!(f, "@{}", a),
            Operand::Var(name, index) => write!(f, "{}[{}]", name, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_display() {
        assert_eq!(Val::Double(2.5).to_string(), "2.500000");
        assert_eq!(Val::Double(std::f64::NAN).to_string(), "nan");
        assert_eq!(Val::Double(-std::f64::NAN).to_string(), "-nan");
        assert_eq!(Val::Double(std::f64::INFINITY).to_string(), "inf");
        assert_eq!(Val::Double(std::f64::NEG_INFINITY).to_string(), "-inf");
    }
}
