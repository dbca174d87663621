use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope of runtime bindings.
///
/// Scopes are shared (`Rc<RefCell<_>>`): a block, a call frame and every
/// closure created inside it may hold the same scope, and writes through any
/// holder are seen by all of them.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Convenience for the common `Rc<RefCell<_>>` child scope.
    pub fn child_of(enclosing: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(enclosing))))
    }

    /// Always writes into this scope; redefinition overwrites.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` exactly `distance` scopes out, without searching.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        if distance == 0 {
            return self.values.get(name).cloned();
        }

        self.enclosing
            .as_ref()?
            .borrow()
            .get_at(distance - 1, name)
    }

    /// Write `name` exactly `distance` scopes out. Returns `false` when the
    /// chain is shorter than `distance` or the slot does not exist.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value) -> bool {
        if distance == 0 {
            return match self.values.get_mut(name) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            };
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign_at(distance - 1, name, value),
            None => false,
        }
    }
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    #[test]
    fn lookups_fall_through_to_enclosing_scope() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::child_of(&globals);
        assert_eq!(inner.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));

        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Number(2.0))
            .unwrap();
        assert_eq!(globals.borrow().get_at(0, "a"), Some(Value::Number(2.0)));
    }

    #[test]
    fn missing_name_is_undefined_variable() {
        let env = Environment::new();
        let err = env.get(&ident("nope")).unwrap_err();
        assert_eq!(err.message(), "Undefined variable 'nope'.");

        let mut env = Environment::new();
        assert!(env.assign(&ident("nope"), Value::Nil).is_err());
    }

    #[test]
    fn get_at_skips_shadowing_scopes() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().define("x", Value::Number(1.0));
        let inner = Environment::child_of(&outer);
        inner.borrow_mut().define("x", Value::Number(2.0));

        assert_eq!(inner.borrow().get_at(0, "x"), Some(Value::Number(2.0)));
        assert_eq!(inner.borrow().get_at(1, "x"), Some(Value::Number(1.0)));
        assert_eq!(inner.borrow().get_at(2, "x"), None);

        assert!(inner.borrow_mut().assign_at(1, "x", Value::Nil));
        assert_eq!(outer.borrow().get_at(0, "x"), Some(Value::Nil));
    }
}
