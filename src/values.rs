use failure::Error;
use itertools::join;
use std::cmp::Ordering;
use std::fmt;

use crate::env::{Env, EnvRef};
use crate::errors::SyntaxError;
use crate::eval;
use crate::parser;

/// representation of every expression and runtime value. code and data
/// share this one type, which is what makes `quote` cheap.
#[derive(Debug, Clone)]
pub enum Value {
    Symbol(String),
    Str(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Builtin(Primitive),
    Proc(Box<Lambda>),
}

use self::Value::*;

/// the shared signature of every builtin: evaluated arguments in, one
/// value out
pub type PrimitiveFn = fn(Vec<Value>) -> Result<Value, Error>;

/// a named native procedure out of the builtin table
#[derive(Debug, Clone)]
pub struct Primitive {
    pub name: &'static str,
    pub func: PrimitiveFn,
}

impl Value {
    /// parse exactly one expression out of a string of source text
    pub fn parse(source: &str) -> Result<Value, Error> {
        let mut tokens = parser::tokenize(source)?;
        let value = Value::from_tokens(&mut tokens)?;

        match tokens.first() {
            Some(extra) => Err(SyntaxError::TrailingToken(extra.to_string()))?,
            None => Ok(value),
        }
    }

    /// the empty list, doubling as the "nothing useful to return" value
    pub fn nil() -> Value {
        List(Vec::new())
    }

    /// truthiness under `if`: #f is the one false value. 0, "" and ()
    /// all count as true; emptiness is tested with null?
    pub fn to_bool(&self) -> bool {
        match self {
            Bool(b) => *b,
            _ => true,
        }
    }

    pub fn is_number(&self) -> bool {
        match self {
            Integer(_) | Float(_) => true,
            _ => false,
        }
    }

    /// the human-friendly name of a value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Symbol(_) => "Symbol",
            Str(_) => "Str",
            Integer(_) => "Integer",
            Float(_) => "Float",
            Bool(_) => "Bool",
            List(_) => "List",
            Builtin(_) => "Builtin",
            Proc(_) => "Proc",
        }
    }

    /// render a value so that data reads back as itself: like `Display`,
    /// except strings keep their quotes
    pub fn serialize(&self) -> String {
        match self {
            Str(text) => format!("\"{}\"", text),
            List(items) => format!("({})", join(items.iter().map(|item| item.serialize()), " ")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol(name) => write!(f, "{}", name),
            Str(text) => write!(f, "{}", text),
            Integer(n) => write!(f, "{}", n),
            // {:?} keeps a decimal point on whole floats so they re-read
            // as floats
            Float(x) => write!(f, "{:?}", x),
            Bool(true) => write!(f, "#t"),
            Bool(false) => write!(f, "#f"),
            List(items) => write!(f, "({})", join(items.iter().map(|item| item.serialize()), " ")),
            Builtin(p) => write!(f, "#<builtin {}>", p.name),
            Proc(lambda) => write!(f, "#<procedure ({})>", lambda.params.join(" ")),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Symbol(a), Symbol(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => *a as f64 == *b,
            (Bool(a), Bool(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Builtin(a), Builtin(b)) => a.name == b.name,
            _ => false, // lambdas and mixed types are never equal
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Integer(a), Integer(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            _ => None, // only numbers have an order
        }
    }
}

/// a closure: named, typeless parameters, one unevaluated body
/// expression, and the environment that was live at `lambda` time
#[derive(Debug, Clone)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Value,
    pub env: EnvRef,
}

impl Lambda {
    /// bind `args` to the parameters in a fresh frame under the captured
    /// environment, then evaluate the body there
    pub fn call(&self, args: Vec<Value>) -> Result<Value, Error> {
        let frame = Env::child_with(self.env.clone(), &self.params, args)?;
        eval::eval(self.body.clone(), frame)
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::Value::{self, *};
    use super::{Lambda, Primitive};
    use crate::env::Env;
    use failure::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sym(name: &str) -> Value {
        Symbol(name.to_owned())
    }

    #[test]
    fn display_atoms() {
        assert_eq!(Integer(42).to_string(), "42");
        assert_eq!(Integer(-7).to_string(), "-7");
        assert_eq!(Float(2.0).to_string(), "2.0");
        assert_eq!(Float(-0.5).to_string(), "-0.5");
        assert_eq!(Bool(true).to_string(), "#t");
        assert_eq!(Bool(false).to_string(), "#f");
        assert_eq!(sym("x").to_string(), "x");
        assert_eq!(Str("hi there".to_owned()).to_string(), "hi there");
    }

    #[test]
    fn display_lists() {
        let v = List(vec![sym("+"), Integer(1), List(vec![Integer(2), Float(3.5)])]);
        assert_eq!(v.to_string(), "(+ 1 (2 3.5))");
        assert_eq!(Value::nil().to_string(), "()");
    }

    #[test]
    fn strings_quote_in_serialized_form() {
        let v = Str("hi".to_owned());
        assert_eq!(v.to_string(), "hi");
        assert_eq!(v.serialize(), "\"hi\"");

        // nested strings stay quoted in both renderings
        let list = List(vec![Str("a".to_owned()), Integer(1)]);
        assert_eq!(list.to_string(), "(\"a\" 1)");
        assert_eq!(list.serialize(), "(\"a\" 1)");
    }

    #[test]
    fn procedures_print_opaquely() {
        fn noop(_args: Vec<Value>) -> Result<Value, Error> {
            Ok(Value::nil())
        }

        let builtin = Builtin(Primitive {
            name: "car",
            func: noop,
        });
        assert_eq!(builtin.to_string(), "#<builtin car>");

        let lambda = Proc(Box::new(Lambda {
            params: vec!["x".to_owned(), "y".to_owned()],
            body: Value::nil(),
            env: Rc::new(RefCell::new(Env::new(None))),
        }));
        assert_eq!(lambda.to_string(), "#<procedure (x y)>");
    }

    #[test]
    fn data_round_trips_through_serialize() {
        let v = List(vec![
            Integer(1),
            Float(2.5),
            Bool(false),
            sym("x"),
            Str("hello world".to_owned()),
            List(vec![Integer(4), Value::nil()]),
        ]);
        let reparsed = Value::parse(&v.serialize()).unwrap();
        assert_eq!(reparsed, v);
    }

    #[test]
    fn only_false_is_falsy() {
        assert!(!Bool(false).to_bool());
        assert!(Bool(true).to_bool());
        assert!(Integer(0).to_bool());
        assert!(Float(0.0).to_bool());
        assert!(Str(String::new()).to_bool());
        assert!(Value::nil().to_bool());
    }

    #[test]
    fn numbers_compare_across_the_divide() {
        assert_eq!(Integer(1), Float(1.0));
        assert_eq!(Float(2.0), Integer(2));
        assert_ne!(Integer(1), Float(1.5));
        assert!(Integer(1) < Float(1.5));
        assert!(Float(2.5) > Integer(2));
        // non-numbers have no order at all
        assert!(!(sym("a") < sym("b")));
        assert!(!(sym("a") >= sym("b")));
    }

    #[test]
    fn lists_compare_structurally() {
        assert_eq!(
            List(vec![Integer(1), List(vec![sym("a")])]),
            List(vec![Integer(1), List(vec![sym("a")])])
        );
        assert_ne!(List(vec![Integer(1)]), List(vec![Integer(2)]));
        assert_ne!(Value::nil(), List(vec![Integer(1)]));
    }

    #[test]
    fn nan_is_unequal_and_unordered_even_to_itself() {
        assert_ne!(Float(f64::NAN), Float(f64::NAN));
        assert_ne!(Float(f64::NAN), Integer(1));
        assert!(!(Float(f64::NAN) < Float(1.0)));
        assert!(!(Float(f64::NAN) >= Float(1.0)));
        assert!(!(Integer(1) < Float(f64::NAN)));
        assert!(!(Float(f64::NAN) <= Float(f64::NAN)));
    }

    #[test]
    fn lambdas_never_compare_equal() {
        let f = Proc(Box::new(Lambda {
            params: vec!["x".to_owned()],
            body: sym("x"),
            env: Rc::new(RefCell::new(Env::new(None))),
        }));
        // not to a structural copy, and not even to itself
        assert_ne!(f, f.clone());
        assert_ne!(f, f);
    }
}
// }}}
