#[macro_use]
extern crate failure_derive;

mod arithmetic;
mod builtins;
pub mod env;
mod errors;
mod eval;
mod file;
mod log;
mod parser;
pub mod values;

use failure::Error;
use std::cell::RefCell;
use std::rc::Rc;

use crate::env::{Env, EnvRef};
use crate::values::Value;

/// one interpreter session: a persistent global environment with the
/// builtins installed, and an entry point that runs expressions
/// against it
#[derive(Clone)]
pub struct Interpreter {
    pub env: EnvRef,
}

impl Interpreter {
    /// create a session with a fresh global environment
    pub fn new() -> Interpreter {
        let mut globals = Env::new(None);
        builtins::install(&mut globals);

        Interpreter {
            env: Rc::new(RefCell::new(globals)),
        }
    }

    /// parse one expression out of `code` and evaluate it. definitions
    /// persist between calls on the same session.
    pub fn run<S: AsRef<str>>(&self, code: S) -> Result<Value, Error> {
        let expr = Value::parse(code.as_ref())?;
        eval::eval(expr, self.env.clone())
    }
}

// }}}
