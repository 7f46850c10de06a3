//! Environment for variable scoping in the interpreter.
//!
//! Scopes form a chain of reference-counted records pointing outward to
//! their parents. The interpreter keeps a stack of active scopes: block
//! scopes are children of the scope below them, while a call scope is a
//! child of the called function's captured scope.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use bpl_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

/// A single-threaded, shared, mutable scope handle.
///
/// Wraps `Rc<RefCell<T>>` so all scope allocations go through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, replacing any binding of the same name.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a variable through this scope and its ancestors.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if let Some(value) = scope.bindings.get(&name) {
                return Some(value.clone());
            }
            next = scope.parent.clone();
        }
        None
    }

    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Drop every binding, releasing the values they hold.
    fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Environment for the interpreter using a scope stack.
///
/// A function value stored in a scope its own captured chain reaches forms
/// an `Rc` cycle. Every scope that receives a function value is recorded,
/// and the recorded scopes are cleared when the environment is dropped.
pub struct Environment {
    /// Stack of active scopes, current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
    /// Scopes that have held a function value.
    function_holders: Vec<Weak<RefCell<Scope>>>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
            function_holders: Vec::new(),
        }
    }

    /// Number of active scopes, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// The innermost active scope.
    #[inline]
    pub fn current_scope(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Push a block scope whose parent is the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Push a call scope whose parent is the callee's captured scope.
    #[inline]
    pub fn push_call_scope(&mut self, captured: LocalScope<Scope>) {
        self.scopes.push(LocalScope::new(Scope::with_parent(captured)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Pop every scope above the global one.
    pub fn reset_to_global(&mut self) {
        self.scopes.truncate(1);
    }

    /// Define a variable in the current scope.
    pub fn define(&mut self, name: Name, value: Value) {
        let scope = self.current_scope().clone();
        self.bind(&scope, name, value);
    }

    /// Look up a variable through the current scope chain.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    /// Assign to a variable.
    ///
    /// Rebinds the innermost existing binding of `name` in the current
    /// chain; if there is none, defines `name` in the current scope.
    pub fn assign(&mut self, name: Name, value: Value) {
        let target = self
            .owner_of(name)
            .unwrap_or_else(|| self.current_scope().clone());
        self.bind(&target, name, value);
    }

    /// The innermost scope in the current chain that binds `name`.
    fn owner_of(&self, name: Name) -> Option<LocalScope<Scope>> {
        let mut next = Some(self.current_scope().clone());
        while let Some(scope) = next {
            if scope.borrow().contains(name) {
                return Some(scope);
            }
            next = scope.borrow().parent().cloned();
        }
        None
    }

    fn bind(&mut self, scope: &LocalScope<Scope>, name: Name, value: Value) {
        if matches!(value, Value::Function(_)) {
            self.record_function_holder(scope);
        }
        scope.borrow_mut().define(name, value);
    }

    fn record_function_holder(&mut self, scope: &LocalScope<Scope>) {
        let weak = scope.downgrade();
        if self
            .function_holders
            .last()
            .is_some_and(|last| last.ptr_eq(&weak))
        {
            return;
        }
        if self.function_holders.len() == self.function_holders.capacity() {
            self.function_holders.retain(|scope| scope.strong_count() > 0);
        }
        self.function_holders.push(weak);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        self.scopes.clear();
        for scope in self.function_holders.drain(..) {
            if let Some(scope) = scope.upgrade() {
                // Move the bindings out first so nested drops never observe
                // a borrowed scope.
                let bindings = std::mem::take(&mut scope.borrow_mut().bindings);
                drop(bindings);
            }
        }
        self.global.borrow_mut().clear();
    }
}
