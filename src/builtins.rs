use failure::Error;
use itertools::join;

use crate::arithmetic;
use crate::env::Env;
use crate::errors::RunError;
use crate::eval;
use crate::values::Value::{self, *};
use crate::values::{Primitive, PrimitiveFn};

/// the native procedure table. every entry lands in the root environment
/// as a first-class `Builtin` value, so builtins can be passed around,
/// rebound, and shadowed like anything else. arguments arrive already
/// evaluated.
pub const BUILTINS: &[(&str, PrimitiveFn)] = &[
    ("+",       add),
    ("-",       sub),
    ("*",       mul),
    ("/",       div),
    ("modulo",  modulo),
    ("=",       eq),
    ("!=",      neq),
    (">",       gt),
    (">=",      geq),
    ("<",       lt),
    ("<=",      leq),
    ("not",     not),
    ("list",    list),
    ("cons",    cons),
    ("car",     car),
    ("first",   car),
    ("cdr",     cdr),
    ("rest",    cdr),
    ("null?",   is_null),
    ("length",  length),
    ("append",  append),
    ("map",     map),
    ("print",   print),
];

/// bind the whole table into `env`
pub fn install(env: &mut Env) {
    for &(name, func) in BUILTINS {
        env.define(name, Builtin(Primitive { name, func }));
    }
}

// {{{ helpful macros
/// return from a function if the Vec $args doesn't contain $num elements
macro_rules! check_num_args {
    ($args: ident, $num: expr, $name: expr) => {{
        if $args.len() != $num {
            Err(RunError::WrongNumArgs {
                name: $name.to_string(),
                expected: $num,
                got: $args.len(),
            })
        } else {
            Ok(())
        }
    }};
}

/// pull the inner Rust value out of a lisp value, or Err if $value is
/// not of enum variant $variant
macro_rules! extract {
    ($value: expr, $variant: path, $proc: expr) => {{
        match $value {
            $variant(inner) => Ok(inner),
            other => Err(RunError::TypeError {
                name: $proc.to_string(),
                expected: stringify!($variant).to_string(),
                got: other.type_name().to_string(),
            }),
        }
    }};
}

/// return an Err(RunError::ProcError)
macro_rules! procerr {
    ($name: expr, $msg: expr) => {
        Err(RunError::ProcError {
            name: $name.to_string(),
            msg: $msg.to_string(),
        }
        .into())
    };
}
// }}}

// {{{ math
/// usage: (+ <num> ...)
pub fn add(args: Vec<Value>) -> Result<Value, Error> {
    args.into_iter().try_fold(Integer(0), arithmetic::add)
}

/// usage: (* <num> ...)
pub fn mul(args: Vec<Value>) -> Result<Value, Error> {
    args.into_iter().try_fold(Integer(1), arithmetic::mul)
}

/// usage: (- <num> <num> ...), or (- <num>) to negate
pub fn sub(mut args: Vec<Value>) -> Result<Value, Error> {
    if args.is_empty() {
        return procerr!("-", "at least 1 argument required");
    }

    let first = args.remove(0);
    if args.is_empty() {
        arithmetic::neg(first)
    } else {
        args.into_iter().try_fold(first, arithmetic::sub)
    }
}

/// usage: (/ <num> <num> ...), or (/ <num>) for the reciprocal
pub fn div(mut args: Vec<Value>) -> Result<Value, Error> {
    if args.is_empty() {
        return procerr!("/", "at least 1 argument required");
    }

    let first = args.remove(0);
    if args.is_empty() {
        arithmetic::recip(first)
    } else {
        args.into_iter().try_fold(first, arithmetic::div)
    }
}

/// usage: (modulo <num> <num>)
pub fn modulo(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "modulo")?;

    let b = args.pop().unwrap();
    let a = args.pop().unwrap();
    arithmetic::rem(a, b)
}
// }}}

// {{{ logic
/// usage: (> <num> <num>)
///        (>= <num> <num>)
///        (< <num> <num>)
///        (<= <num> <num>)
fn compare(op: &'static str, args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, op)?;

    for arg in &args {
        if !arg.is_number() {
            Err(RunError::TypeError {
                name: op.to_string(),
                expected: "number".to_string(),
                got: arg.type_name().to_string(),
            })?
        }
    }

    let result = match op {
        ">"  => args[0] >  args[1],
        ">=" => args[0] >= args[1],
        "<"  => args[0] <  args[1],
        "<=" => args[0] <= args[1],
        _    => panic!("{} is not a valid comparison operator", op),
    };

    Ok(Bool(result))
}

/// usage: (= <expr> <expr>)
pub fn eq(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "=")?;
    Ok(Bool(args[0] == args[1]))
}

/// usage: (!= <expr> <expr>)
pub fn neq(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "!=")?;
    Ok(Bool(args[0] != args[1]))
}

pub fn gt(args: Vec<Value>) -> Result<Value, Error> {
    compare(">", args)
}

pub fn geq(args: Vec<Value>) -> Result<Value, Error> {
    compare(">=", args)
}

pub fn lt(args: Vec<Value>) -> Result<Value, Error> {
    compare("<", args)
}

pub fn leq(args: Vec<Value>) -> Result<Value, Error> {
    compare("<=", args)
}

/// usage: (not <expr>)
pub fn not(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "not")?;
    Ok(Bool(!args[0].to_bool()))
}
// }}}

// {{{ lists
/// usage: (list <expr> ...)
pub fn list(args: Vec<Value>) -> Result<Value, Error> {
    Ok(List(args))
}

/// usage: (cons <value> <list>)
pub fn cons(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "cons")?;

    let mut list: Vec<Value> = extract!(args.pop().unwrap(), List, "cons")?;
    let value = args.pop().unwrap();

    list.insert(0, value);
    Ok(List(list))
}

/// usage: (car <list>)
pub fn car(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "car")?;

    let mut list: Vec<Value> = extract!(args.pop().unwrap(), List, "car")?;
    if list.is_empty() {
        return procerr!("car", "the empty list has no first element");
    }
    Ok(list.remove(0))
}

/// usage: (cdr <list>). the cdr of () is ()
pub fn cdr(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "cdr")?;

    let mut list: Vec<Value> = extract!(args.pop().unwrap(), List, "cdr")?;
    if !list.is_empty() {
        list.remove(0);
    }
    Ok(List(list))
}

/// usage: (null? <expr>)
pub fn is_null(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "null?")?;
    Ok(Bool(args[0] == Value::nil()))
}

/// usage: (length <list>)
///        (length <str>)
pub fn length(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "length")?;

    match &args[0] {
        List(items) => Ok(Integer(items.len() as i64)),
        Str(text) => Ok(Integer(text.chars().count() as i64)),
        other => procerr!(
            "length",
            format!("expected a List or Str, got a {} instead", other.type_name())
        ),
    }
}

/// usage: (append <list> <list>)
pub fn append(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "append")?;

    let mut tail: Vec<Value> = extract!(args.pop().unwrap(), List, "append")?;
    let mut head: Vec<Value> = extract!(args.pop().unwrap(), List, "append")?;
    head.append(&mut tail);
    Ok(List(head))
}

/// usage: (map <proc> <list>)
pub fn map(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "map")?;

    let items: Vec<Value> = extract!(args.pop().unwrap(), List, "map")?;
    let procedure = args.pop().unwrap();

    let mapped = items
        .into_iter()
        .map(|item| eval::apply(procedure.clone(), vec![item]))
        .collect::<Result<Vec<Value>, Error>>()?;
    Ok(List(mapped))
}
// }}}

// {{{ output
/// usage: (print <expr> ...)
pub fn print(args: Vec<Value>) -> Result<Value, Error> {
    println!("{}", join(&args, " "));
    Ok(Value::nil())
}
// }}}

// }}}
