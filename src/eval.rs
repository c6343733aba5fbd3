use failure::Error;
use std::cell::RefCell;
use std::rc::Rc;

use crate::env::{Env, EnvRef};
use crate::errors::{RunError, SyntaxError};
use crate::values::Lambda;
use crate::values::Value::{self, *};

/// names the evaluator claims for itself. they are not looked up in the
/// environment unless a user has explicitly shadowed them.
const SPECIAL_FORMS: &[&str] = &["quote", "if", "define", "set!", "lambda", "begin", "let"];

/// evaluate one expression in the given environment. atoms other than
/// symbols evaluate to themselves, symbols are looked up, and non-empty
/// lists dispatch through `eval_form`. the match is spelled out variant
/// by variant so a new variant forces a decision here.
pub fn eval(value: Value, env: EnvRef) -> Result<Value, Error> {
    match value {
        Symbol(name) => lookup(&name, &env),
        List(items) => {
            if items.is_empty() {
                Ok(List(items))
            } else {
                eval_form(items, env)
            }
        }
        Str(_) | Integer(_) | Float(_) | Bool(_) | Builtin(_) | Proc(_) => Ok(value),
    }
}

/// evaluate every element of a list, preserving order
pub fn eval_list(items: Vec<Value>, env: EnvRef) -> Result<Vec<Value>, Error> {
    items.into_iter().map(|item| eval(item, env.clone())).collect()
}

/// call an already-evaluated procedure on already-evaluated arguments
pub fn apply(procedure: Value, args: Vec<Value>) -> Result<Value, Error> {
    match procedure {
        Builtin(p) => (p.func)(args),
        Proc(lambda) => lambda.call(args),
        other => Err(RunError::UncallableValue {
            name: other.to_string(),
            typename: other.type_name().to_owned(),
        })?,
    }
}

fn lookup(name: &str, env: &EnvRef) -> Result<Value, Error> {
    if SPECIAL_FORMS.contains(&name) && !env.borrow().contains(name) {
        Err(SyntaxError::ReservedSymbol(name.to_owned()))?
    }
    env.borrow().get(name)
}

/// dispatch a non-empty list: special forms go by the literal head
/// symbol, before any evaluation; everything else is a procedure call.
fn eval_form(mut items: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    let head = items.remove(0);

    if let Symbol(op) = &head {
        match op.as_str() {
            "quote"  => return quote_form(items),
            "if"     => return if_form(items, env),
            "define" => return define_form(items, env),
            "set!"   => return set_form(items, env),
            "lambda" => return lambda_form(items, env),
            "begin"  => return begin_form(items, env),
            "let"    => return let_form(items, env),
            _ => {}
        }
    }

    let procedure = eval(head, env.clone())?;
    let args = eval_list(items, env)?;
    apply(procedure, args)
}

// {{{ special forms
fn quote_form(mut args: Vec<Value>) -> Result<Value, Error> {
    if args.len() != 1 {
        Err(SyntaxError::BadForm {
            form: "quote",
            reason: "expected exactly one expression",
        })?
    }
    Ok(args.remove(0))
}

fn if_form(mut args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.len() < 2 || args.len() > 3 {
        Err(SyntaxError::BadForm {
            form: "if",
            reason: "expected a test, a consequent, and an optional alternative",
        })?
    }

    // only the taken branch is ever evaluated
    if eval(args.remove(0), env.clone())?.to_bool() {
        eval(args.remove(0), env)
    } else if args.len() == 2 {
        eval(args.remove(1), env)
    } else {
        Ok(Value::nil())
    }
}

fn define_form(mut args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.len() != 2 {
        Err(SyntaxError::BadForm {
            form: "define",
            reason: "expected a name and a value",
        })?
    }

    let value_expr = args.pop().unwrap();
    let name = match args.pop().unwrap() {
        Symbol(name) => name,
        _ => Err(SyntaxError::BadForm {
            form: "define",
            reason: "the name must be a symbol",
        })?,
    };

    let value = eval(value_expr, env.clone())?;
    env.borrow_mut().define(&name, value.clone());
    Ok(value)
}

fn set_form(mut args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.len() != 2 {
        Err(SyntaxError::BadForm {
            form: "set!",
            reason: "expected a name and a value",
        })?
    }

    let value_expr = args.pop().unwrap();
    let name = match args.pop().unwrap() {
        Symbol(name) => name,
        _ => Err(SyntaxError::BadForm {
            form: "set!",
            reason: "the name must be a symbol",
        })?,
    };

    let value = eval(value_expr, env.clone())?;
    env.borrow_mut().set(&name, value.clone())?;
    Ok(value)
}

fn lambda_form(mut args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.len() != 2 {
        Err(SyntaxError::BadForm {
            form: "lambda",
            reason: "expected a parameter list and a body",
        })?
    }

    let body = args.pop().unwrap();
    let params = match args.pop().unwrap() {
        List(params) => params
            .into_iter()
            .map(|param| match param {
                Symbol(name) => Ok(name),
                _ => Err(SyntaxError::BadForm {
                    form: "lambda",
                    reason: "parameters must be symbols",
                }
                .into()),
            })
            .collect::<Result<Vec<String>, Error>>()?,
        _ => Err(SyntaxError::BadForm {
            form: "lambda",
            reason: "expected a list of parameters",
        })?,
    };

    Ok(Proc(Box::new(Lambda { params, body, env })))
}

fn begin_form(args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.is_empty() {
        Err(SyntaxError::BadForm {
            form: "begin",
            reason: "expected at least one expression",
        })?
    }

    let mut result = Value::nil();
    for expr in args {
        result = eval(expr, env.clone())?;
    }
    Ok(result)
}

/// `(let ((name value) ...) body)`: every value is evaluated in the
/// enclosing environment, then all the names land in one new frame
fn let_form(mut args: Vec<Value>, env: EnvRef) -> Result<Value, Error> {
    if args.len() != 2 {
        Err(SyntaxError::BadForm {
            form: "let",
            reason: "expected a binding list and a body",
        })?
    }

    let body = args.pop().unwrap();
    let bindings = match args.pop().unwrap() {
        List(bindings) => bindings,
        _ => Err(SyntaxError::BadForm {
            form: "let",
            reason: "expected a list of bindings",
        })?,
    };

    let frame = Rc::new(RefCell::new(Env::new(Some(env.clone()))));
    for binding in bindings {
        match binding {
            List(mut pair) if pair.len() == 2 => {
                let value = eval(pair.pop().unwrap(), env.clone())?;
                match pair.pop().unwrap() {
                    Symbol(name) => frame.borrow_mut().define(&name, value),
                    _ => Err(SyntaxError::BadForm {
                        form: "let",
                        reason: "binding names must be symbols",
                    })?,
                }
            }
            _ => Err(SyntaxError::BadForm {
                form: "let",
                reason: "each binding must be a (name value) pair",
            })?,
        }
    }

    eval(body, frame)
}
// }}}

// }}}
