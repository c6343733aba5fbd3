use failure::Error;

use crate::errors::RunError;
use crate::values::Value::{self, *};

// the whole numeric tower: integers and floats, promotion on contact.
// integer op integer stays an integer except for division, which is true
// division and always produces a float. i64 has edges a dynamic host
// never met (overflow, MIN % -1), so the integer paths are checked.

pub fn add(a: Value, b: Value) -> Result<Value, Error> {
    match (a, b) {
        (Integer(x), Integer(y)) => checked("+", x.checked_add(y)),
        (Float(x), Float(y)) => Ok(Float(x + y)),
        (Integer(x), Float(y)) => Ok(Float(x as f64 + y)),
        (Float(x), Integer(y)) => Ok(Float(x + y as f64)),
        (a, b) => Err(not_a_number("+", &a, &b)),
    }
}

pub fn sub(a: Value, b: Value) -> Result<Value, Error> {
    match (a, b) {
        (Integer(x), Integer(y)) => checked("-", x.checked_sub(y)),
        (Float(x), Float(y)) => Ok(Float(x - y)),
        (Integer(x), Float(y)) => Ok(Float(x as f64 - y)),
        (Float(x), Integer(y)) => Ok(Float(x - y as f64)),
        (a, b) => Err(not_a_number("-", &a, &b)),
    }
}

pub fn mul(a: Value, b: Value) -> Result<Value, Error> {
    match (a, b) {
        (Integer(x), Integer(y)) => checked("*", x.checked_mul(y)),
        (Float(x), Float(y)) => Ok(Float(x * y)),
        (Integer(x), Float(y)) => Ok(Float(x as f64 * y)),
        (Float(x), Integer(y)) => Ok(Float(x * y as f64)),
        (a, b) => Err(not_a_number("*", &a, &b)),
    }
}

pub fn div(a: Value, b: Value) -> Result<Value, Error> {
    match (a, b) {
        (Integer(x), Integer(y)) => Ok(Float(x as f64 / y as f64)),
        (Float(x), Float(y)) => Ok(Float(x / y)),
        (Integer(x), Float(y)) => Ok(Float(x as f64 / y)),
        (Float(x), Integer(y)) => Ok(Float(x / y as f64)),
        (a, b) => Err(not_a_number("/", &a, &b)),
    }
}

pub fn rem(a: Value, b: Value) -> Result<Value, Error> {
    match (a, b) {
        (Integer(_), Integer(0)) => Err(RunError::DivideByZero)?,
        (Integer(x), Integer(y)) => checked("modulo", x.checked_rem(y)),
        (Float(x), Float(y)) => Ok(Float(x % y)),
        (Integer(x), Float(y)) => Ok(Float(x as f64 % y)),
        (Float(x), Integer(y)) => Ok(Float(x % y as f64)),
        (a, b) => Err(not_a_number("modulo", &a, &b)),
    }
}

/// unary minus
pub fn neg(a: Value) -> Result<Value, Error> {
    match a {
        Integer(x) => checked("-", x.checked_neg()),
        Float(x) => Ok(Float(-x)),
        a => Err(not_a_number("-", &a, &a)),
    }
}

/// unary division: the reciprocal
pub fn recip(a: Value) -> Result<Value, Error> {
    match a {
        Integer(x) => Ok(Float(1.0 / x as f64)),
        Float(x) => Ok(Float(1.0 / x)),
        a => Err(not_a_number("/", &a, &a)),
    }
}

fn checked(op: &str, result: Option<i64>) -> Result<Value, Error> {
    match result {
        Some(n) => Ok(Integer(n)),
        None => Err(RunError::ProcError {
            name: op.to_owned(),
            msg: "integer overflow".to_owned(),
        })?,
    }
}

fn not_a_number(op: &str, a: &Value, b: &Value) -> Error {
    let culprit = if a.is_number() { b } else { a };
    RunError::TypeError {
        name: op.to_owned(),
        expected: "number".to_owned(),
        got: culprit.type_name().to_owned(),
    }
    .into()
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RunError;

    #[test]
    fn integers_stay_integers() {
        assert_eq!(add(Integer(1), Integer(2)).unwrap(), Integer(3));
        assert_eq!(sub(Integer(1), Integer(2)).unwrap(), Integer(-1));
        assert_eq!(mul(Integer(3), Integer(4)).unwrap(), Integer(12));
        assert_eq!(rem(Integer(7), Integer(3)).unwrap(), Integer(1));
    }

    #[test]
    fn mixing_promotes_to_float() {
        assert_eq!(add(Integer(1), Float(2.5)).unwrap(), Float(3.5));
        assert_eq!(sub(Float(2.5), Integer(1)).unwrap(), Float(1.5));
        assert_eq!(mul(Float(0.5), Integer(6)).unwrap(), Float(3.0));
    }

    #[test]
    fn division_is_always_true_division() {
        assert_eq!(div(Integer(4), Integer(2)).unwrap(), Float(2.0));
        assert_eq!(div(Integer(1), Integer(2)).unwrap(), Float(0.5));
        assert_eq!(div(Float(1.0), Integer(4)).unwrap(), Float(0.25));
        // float division by zero follows ieee, no error
        assert_eq!(div(Integer(1), Integer(0)).unwrap(), Float(f64::INFINITY));
    }

    #[test]
    fn unary_helpers() {
        assert_eq!(neg(Integer(5)).unwrap(), Integer(-5));
        assert_eq!(neg(Float(2.5)).unwrap(), Float(-2.5));
        assert_eq!(recip(Integer(4)).unwrap(), Float(0.25));
        assert_eq!(recip(Float(0.5)).unwrap(), Float(2.0));
    }

    #[test]
    fn integer_modulo_by_zero_is_an_error() {
        let err = rem(Integer(1), Integer(0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::DivideByZero)
        ));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert!(add(Integer(i64::MAX), Integer(1)).is_err());
        assert!(neg(Integer(i64::MIN)).is_err());
        assert!(rem(Integer(i64::MIN), Integer(-1)).is_err());
    }

    #[test]
    fn non_numbers_are_type_errors() {
        let err = add(Integer(1), Bool(true)).unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::TypeError { got, .. }) => assert_eq!(got, "Bool"),
            other => panic!("wrong error: {:?}", other),
        }
        assert!(mul(Str("a".to_owned()), Integer(2)).is_err());
    }
}
// }}}
