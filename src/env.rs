use failure::Error;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::RunError;
use crate::values::Value;

/// one frame of the interpreter's memory: a name-to-value map with an
/// optional parent frame. frames chain outward to the global frame, and
/// the chain is what symbol lookup walks.
#[derive(Debug, Clone)]
pub struct Env {
    pub vars: HashMap<String, Value>,
    pub parent: Option<EnvRef>,
}

/// an interior-mutable, reference-counted handle to a frame. closures
/// keep their defining frame alive through one of these.
pub type EnvRef = Rc<RefCell<Env>>;

impl Env {
    pub fn new(parent: Option<EnvRef>) -> Env {
        Env {
            vars: HashMap::new(),
            parent,
        }
    }

    /// resolve a symbol against this frame, then the parent chain
    pub fn get(&self, name: &str) -> Result<Value, Error> {
        match self.vars.get(name) {
            Some(value) => Ok(value.clone()),
            None => match &self.parent {
                Some(outer) => outer.borrow().get(name),
                None => Err(RunError::UnboundSymbol(name.to_owned()))?,
            },
        }
    }

    /// whether a symbol is bound anywhere along the chain
    pub fn contains(&self, name: &str) -> bool {
        if self.vars.contains_key(name) {
            true
        } else {
            match &self.parent {
                Some(outer) => outer.borrow().contains(name),
                None => false,
            }
        }
    }

    /// add (or overwrite) a binding in this frame only
    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    /// overwrite an existing binding wherever along the chain it lives
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), Error> {
        if self.vars.contains_key(name) {
            self.vars.insert(name.to_owned(), value);
            Ok(())
        } else {
            match &self.parent {
                Some(outer) => outer.borrow_mut().set(name, value),
                None => Err(RunError::UnboundSymbol(name.to_owned()))?,
            }
        }
    }

    /// build a call frame under `parent`, binding each parameter to the
    /// matching argument positionally. no variadic parameters: the counts
    /// must agree exactly, and the arity error names the callee by its
    /// printed form. the label is only formatted on the failing path.
    pub fn child_with(
        parent: EnvRef,
        params: &[String],
        args: Vec<Value>,
    ) -> Result<EnvRef, Error> {
        if params.len() != args.len() {
            Err(RunError::WrongNumArgs {
                name: format!("#<procedure ({})>", params.join(" ")),
                expected: params.len(),
                got: args.len(),
            })?
        }

        let mut frame = Env::new(Some(parent));
        for (param, arg) in params.iter().zip(args) {
            frame.define(param, arg);
        }

        Ok(Rc::new(RefCell::new(frame)))
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::{Env, EnvRef};
    use crate::errors::RunError;
    use crate::values::Value::{self, Integer};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn root() -> EnvRef {
        Rc::new(RefCell::new(Env::new(None)))
    }

    #[test]
    fn define_then_get() {
        let env = root();
        env.borrow_mut().define("x", Integer(5));
        assert_eq!(env.borrow().get("x").unwrap(), Integer(5));
    }

    #[test]
    fn get_walks_the_parent_chain() {
        let outer = root();
        outer.borrow_mut().define("x", Integer(1));
        let inner = Rc::new(RefCell::new(Env::new(Some(outer))));

        assert_eq!(inner.borrow().get("x").unwrap(), Integer(1));
        assert!(inner.borrow().contains("x"));
        assert!(!inner.borrow().contains("y"));
    }

    #[test]
    fn local_bindings_shadow_outer_ones() {
        let outer = root();
        outer.borrow_mut().define("x", Integer(1));
        let inner = Rc::new(RefCell::new(Env::new(Some(outer.clone()))));
        inner.borrow_mut().define("x", Integer(2));

        assert_eq!(inner.borrow().get("x").unwrap(), Integer(2));
        assert_eq!(outer.borrow().get("x").unwrap(), Integer(1));
    }

    #[test]
    fn get_of_unbound_symbol_fails() {
        let err = root().borrow().get("ghost").unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::UnboundSymbol(name)) => assert_eq!(name, "ghost"),
            other => panic!("wrong error: {:?}", other),
        }
    }

    #[test]
    fn set_mutates_the_owning_frame() {
        let outer = root();
        outer.borrow_mut().define("x", Integer(1));
        let inner = Rc::new(RefCell::new(Env::new(Some(outer.clone()))));

        inner.borrow_mut().set("x", Integer(9)).unwrap();
        assert_eq!(outer.borrow().get("x").unwrap(), Integer(9));
        // set never creates a local binding
        assert!(!inner.borrow().vars.contains_key("x"));
    }

    #[test]
    fn set_of_unbound_symbol_fails() {
        let env = root();
        assert!(env.borrow_mut().set("ghost", Integer(1)).is_err());
    }

    #[test]
    fn child_with_binds_positionally() {
        let outer = root();
        outer.borrow_mut().define("z", Integer(30));
        let params = vec!["a".to_owned(), "b".to_owned()];
        let frame = Env::child_with(outer, &params, vec![Integer(10), Integer(20)]).unwrap();

        assert_eq!(frame.borrow().get("a").unwrap(), Integer(10));
        assert_eq!(frame.borrow().get("b").unwrap(), Integer(20));
        assert_eq!(frame.borrow().get("z").unwrap(), Integer(30));
    }

    #[test]
    fn child_with_rejects_wrong_arity_in_both_directions() {
        let params = vec!["a".to_owned(), "b".to_owned()];

        for args in vec![
            vec![Integer(1)],
            vec![Integer(1), Integer(2), Integer(3)],
            Vec::<Value>::new(),
        ] {
            let got = args.len();
            let err = Env::child_with(root(), &params, args).unwrap_err();
            match err.downcast_ref::<RunError>() {
                Some(RunError::WrongNumArgs { name, expected, got: g }) => {
                    assert_eq!(name, "#<procedure (a b)>");
                    assert_eq!(*expected, 2);
                    assert_eq!(*g, got);
                }
                other => panic!("wrong error: {:?}", other),
            }
        }
    }
}
// }}}
