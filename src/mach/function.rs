use super::{Builtin, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Function {}

impl Function {
    pub fn builtin_and_arity(func_name: &str) -> Option<(Builtin, usize)> {
        use Builtin::*;
        match func_name {
            "bool" => Some((CastBool, 1)),
            "int" => Some((CastInt, 1)),
            "double" => Some((CastDouble, 1)),
            "string" => Some((CastString, 1)),
            "?rand" => Some((Rand, 1)),
            "?abs" => Some((Abs, 1)),
            "?pow" => Some((Pow, 2)),
            "?sqrt" => Some((Sqrt, 1)),
            "?sin" => Some((Sin, 1)),
            "?cos" => Some((Cos, 1)),
            "?tan" => Some((Tan, 1)),
            "?asin" => Some((Asin, 1)),
            "?acos" => Some((Acos, 1)),
            "?atan" => Some((Atan, 1)),
            "?atan2" => Some((Atan2, 2)),
            "?exp" => Some((Exp, 1)),
            "?log" => Some((Log, 1)),
            "?ceil" => Some((Ceil, 1)),
            "?floor" => Some((Floor, 1)),
            "?trunc" => Some((Trunc, 1)),
            "?round" => Some((Round, 1)),
            "?max" => Some((Max, 2)),
            "?min" => Some((Min, 2)),
            _ => None,
        }
    }

    pub fn is_cast(name: &str) -> bool {
        matches!(name, "bool" | "int" | "double" | "string")
    }

    pub fn cast_bool(val: Val) -> Val {
        use Val::*;
        match val {
            Bool(b) => Bool(b),
            Integer(n) => Bool(n != 0),
            Double(n) => Bool(n != 0.0),
            Text(s) => Bool(&*s == "true"),
        }
    }

    pub fn cast_int(val: Val) -> Val {
        use Val::*;
        match val {
            Bool(b) => Integer(b as i64),
            Integer(n) => Integer(n),
            Double(n) => Integer(n as i64),
            Text(s) => Integer(parse_integer_prefix(&s)),
        }
    }

    pub fn cast_double(val: Val) -> Val {
        use Val::*;
        match val {
            Bool(b) => Double(b as i64 as f64),
            Integer(n) => Double(n as f64),
            Double(n) => Double(n),
            Text(s) => Double(parse_double_prefix(&s)),
        }
    }

    pub fn cast_string(val: Val) -> Val {
        match val {
            Val::Text(s) => Val::Text(s),
            _ => Val::Text(val.to_string().into()),
        }
    }

    pub fn rand<R: rand::Rng>(val: Val, rng: &mut R) -> Result<Val> {
        match val {
            Val::Integer(n) if n >= 0 => Ok(Val::Integer(rng.gen_range(0..=n))),
            Val::Integer(_) => Err(error!(IllegalFunctionCall; "operand must be >= 0")),
            _ => Err(mismatch(&val)),
        }
    }

    pub fn abs(val: Val) -> Result<Val> {
        match val {
            Val::Integer(n) => Ok(Val::Integer(n.wrapping_abs())),
            Val::Double(n) => Ok(Val::Double(n.abs())),
            _ => Err(mismatch(&val)),
        }
    }

    /// Rounding functions leave integers alone.
    pub fn rounding(val: Val, f: fn(f64) -> f64) -> Result<Val> {
        match val {
            Val::Integer(n) => Ok(Val::Integer(n)),
            Val::Double(n) => Ok(Val::Double(f(n))),
            _ => Err(mismatch(&val)),
        }
    }

    pub fn real(val: Val, f: fn(f64) -> f64) -> Result<Val> {
        Ok(Val::Double(f(real(&val)?)))
    }

    pub fn real_2(lhs: Val, rhs: Val, f: fn(f64, f64) -> f64) -> Result<Val> {
        Ok(Val::Double(f(real(&lhs)?, real(&rhs)?)))
    }

    pub fn max(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Integer(l), Val::Integer(r)) => Ok(Val::Integer(*l.max(r))),
            _ => Self::real_2(lhs, rhs, f64::max),
        }
    }

    pub fn min(lhs: Val, rhs: Val) -> Result<Val> {
        match (&lhs, &rhs) {
            (Val::Integer(l), Val::Integer(r)) => Ok(Val::Integer(*l.min(r))),
            _ => Self::real_2(lhs, rhs, f64::min),
        }
    }
}

fn real(val: &Val) -> Result<f64> {
    match val {
        Val::Integer(n) => Ok(*n as f64),
        Val::Double(n) => Ok(*n),
        _ => Err(mismatch(val)),
    }
}

fn mismatch(val: &Val) -> Error {
    error!(TypeMismatch; format!("numeric operand expected, found {}", val.type_name()))
}

/// Leading decimal integer, like C `atol`. No digits yields zero.
fn parse_integer_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut n: i64 = 0;
    for b in digits.bytes().take_while(|b| b.is_ascii_digit()) {
        let d = (b - b'0') as i64;
        n = n.saturating_mul(10);
        n = if negative {
            n.saturating_sub(d)
        } else {
            n.saturating_add(d)
        };
    }
    n
}

/// Leading decimal float, like C `atof`. No digits yields zero.
fn parse_double_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut end = 0;
    if let Some(b'-') | Some(b'+') = bytes.first() {
        end = 1;
    }
    let int_end = digits(end);
    let mut mantissa_end = int_end;
    if int_end < bytes.len() && bytes[int_end] == b'.' {
        mantissa_end = digits(int_end + 1);
    }
    if mantissa_end == end || (mantissa_end == end + 1 && int_end == end) {
        return 0.0;
    }
    let mut last = mantissa_end;
    if last < bytes.len() && (bytes[last] == b'e' || bytes[last] == b'E') {
        let mut exp = last + 1;
        if let Some(b'-') | Some(b'+') = bytes.get(exp) {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end > exp {
            last = exp_end;
        }
    }
    s[..last].parse().unwrap_or(0.0)
}
