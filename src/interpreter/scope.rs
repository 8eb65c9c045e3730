use std::collections::HashMap;

use crate::interpreter::types::FunctionSymbol;

/// One level of the scope chain.
///
/// Each frame carries variable bindings and function declarations for a
/// block, a for-in step, or a function activation.
#[derive(Debug)]
struct Frame<T> {
    values:    HashMap<String, T>,
    functions: HashMap<String, FunctionSymbol>,
}

impl<T> Frame<T> {
    fn new() -> Self {
        Self { values:    HashMap::new(),
               functions: HashMap::new(), }
    }
}

/// A chain of scope frames with innermost-outward lookup.
///
/// The same shape serves both pipeline halves: the binder instantiates it
/// with `T = TypeSymbol` to track declared variable types, and the
/// evaluator with `T = Value` for the runtime scope stack. The chain always
/// contains at least the global frame.
#[derive(Debug)]
pub struct Scope<T> {
    frames: Vec<Frame<T>>,
}

impl<T> Scope<T> {
    /// Creates a scope containing only the global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::new()] }
    }

    /// Pushes a new innermost frame.
    pub fn enter(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pops the innermost frame. The global frame is never popped.
    pub fn leave(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The number of live frames, counting the global frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolves a name by searching from the innermost frame outward.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&T> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.values.get(name))
    }

    /// Resolves a name in the innermost frame only.
    #[must_use]
    pub fn resolve_local(&self, name: &str) -> Option<&T> {
        self.frames
            .last()
            .and_then(|frame| frame.values.get(name))
    }

    /// Binds a name in the innermost frame.
    pub fn declare(&mut self, name: impl Into<String>, value: T) {
        self.frames
            .last_mut()
            .expect("scope chain always has a global frame")
            .values
            .insert(name.into(), value);
    }

    /// Overwrites the innermost frame that already binds `name`; binds it in
    /// the innermost frame when no frame does.
    ///
    /// This is the assignment path: writes reach through inner frames to the
    /// declaring one, and unseen names spring into existence locally.
    pub fn assign_nearest(&mut self, name: &str, value: T) {
        for frame in self.frames.iter_mut().rev() {
            if frame.values.contains_key(name) {
                frame.values.insert(name.to_string(), value);
                return;
            }
        }
        self.declare(name, value);
    }

    /// Declares a function in the innermost frame.
    pub fn declare_function(&mut self, symbol: FunctionSymbol) {
        self.frames
            .last_mut()
            .expect("scope chain always has a global frame")
            .functions
            .insert(symbol.name().to_string(), symbol);
    }

    /// Resolves a function by name, innermost frame first.
    #[must_use]
    pub fn resolve_function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.functions.get(name))
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Self::new()
    }
}
