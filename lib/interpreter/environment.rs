use super::object::Object;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// One lexical scope. Lookups walk outward through `outer`; writes always land
/// in the scope they are made on.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_enclosed_environment(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    pub fn set(&mut self, name: &str, value: Object) {
        self.store.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_outward() {
        let global = Environment::new();
        global.borrow_mut().set("x", Object::Integer(1));

        let local = Environment::new_enclosed_environment(global.clone());
        local.borrow_mut().set("y", Object::Integer(2));

        assert_eq!(local.borrow().get("x"), Some(Object::Integer(1)));
        assert_eq!(local.borrow().get("y"), Some(Object::Integer(2)));
        assert_eq!(global.borrow().get("y"), None);
        assert_eq!(local.borrow().get("z"), None);
    }

    #[test]
    fn test_set_shadows_without_touching_outer() {
        let global = Environment::new();
        global.borrow_mut().set("x", Object::Integer(1));

        let local = Environment::new_enclosed_environment(global.clone());
        local.borrow_mut().set("x", Object::Integer(10));

        assert_eq!(local.borrow().get("x"), Some(Object::Integer(10)));
        assert_eq!(global.borrow().get("x"), Some(Object::Integer(1)));
    }
}
