use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Operators
///
/// Both operands must carry the same tag. Nothing is ever coerced;
/// use a cast. Integer arithmetic wraps.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => Ok(Integer(n.wrapping_neg())),
            Double(n) => Ok(Double(-n)),
            _ => Err(error!(TypeMismatch; format!("cannot negate {}", val.type_name()))),
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Integer(l.wrapping_add(r))),
            (Double(l), Double(r)) => Ok(Double(l + r)),
            (Text(l), Text(r)) => {
                let mut s = String::with_capacity(l.len() + r.len());
                s.push_str(&l);
                s.push_str(&r);
                Ok(Text(s.into()))
            }
            (lhs, rhs) => Err(mismatch(&lhs, &rhs)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Integer(l.wrapping_sub(r))),
            (Double(l), Double(r)) => Ok(Double(l - r)),
            (lhs, rhs) => Err(mismatch(&lhs, &rhs)),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Integer(l.wrapping_mul(r))),
            (Double(l), Double(r)) => Ok(Double(l * r)),
            (lhs, rhs) => Err(mismatch(&lhs, &rhs)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(_), Integer(0)) => Err(error!(DivisionByZero)),
            (Integer(l), Integer(r)) => Ok(Integer(l.wrapping_div(r))),
            (Double(_), Double(r)) if r == 0.0 => Err(error!(DivisionByZero)),
            (Double(l), Double(r)) => Ok(Double(l / r)),
            (lhs, rhs) => Err(mismatch(&lhs, &rhs)),
        }
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(_), Integer(0)) => Err(error!(DivisionByZero; "modulo by zero")),
            (Integer(l), Integer(r)) => Ok(Integer(l.wrapping_rem(r))),
            (lhs, rhs) => Err(error!(TypeMismatch; format!(
                "{} and {}, int expected",
                lhs.type_name(),
                rhs.type_name()
            ))),
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(compare(&lhs, &rhs)? == Some(Ordering::Equal)))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(compare(&lhs, &rhs)? != Some(Ordering::Equal)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(compare(&lhs, &rhs)? == Some(Ordering::Less)))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(matches!(
            compare(&lhs, &rhs)?,
            Some(Ordering::Less) | Some(Ordering::Equal)
        )))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(compare(&lhs, &rhs)? == Some(Ordering::Greater)))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Bool(matches!(
            compare(&lhs, &rhs)?,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )))
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Bool(b) => Ok(Val::Bool(!b)),
            _ => Err(error!(TypeMismatch; format!("bool expected, found {}", val.type_name()))),
        }
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = logic(&lhs, &rhs)?;
        Ok(Val::Bool(l && r))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = logic(&lhs, &rhs)?;
        Ok(Val::Bool(l || r))
    }

    pub fn xor(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = logic(&lhs, &rhs)?;
        Ok(Val::Bool(l ^ r))
    }

    pub fn equivalent(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = logic(&lhs, &rhs)?;
        Ok(Val::Bool(l == r))
    }
}

/// `None` only for NaN, which is unequal and unordered.
fn compare(lhs: &Val, rhs: &Val) -> Result<Option<Ordering>> {
    use Val::*;
    match (lhs, rhs) {
        (Bool(l), Bool(r)) => Ok(l.partial_cmp(r)),
        (Integer(l), Integer(r)) => Ok(l.partial_cmp(r)),
        (Double(l), Double(r)) => Ok(l.partial_cmp(r)),
        (Text(l), Text(r)) => Ok(l.as_bytes().partial_cmp(r.as_bytes())),
        _ => Err(mismatch(lhs, rhs)),
    }
}

fn logic(lhs: &Val, rhs: &Val) -> Result<(bool, bool)> {
    match (lhs, rhs) {
        (Val::Bool(l), Val::Bool(r)) => Ok((*l, *r)),
        _ => Err(mismatch(lhs, rhs)),
    }
}

fn mismatch(lhs: &Val, rhs: &Val) -> Error {
    error!(TypeMismatch; format!("{} and {}", lhs.type_name(), rhs.type_name()))
}
