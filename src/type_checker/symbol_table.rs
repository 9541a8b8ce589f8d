use std::collections::HashMap;

use tracing::trace;

use crate::ast::types::DataType;

/// One lexical block's bindings.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, DataType>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn declare_variable(&mut self, variable_name: String, variable_type: DataType) {
        self.variable_lookup.insert(variable_name, variable_type);
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&DataType> {
        self.variable_lookup.get(variable_name)
    }
}

/// Stack of environments, innermost last.
///
/// Lookups walk from the innermost environment outward, so inner
/// declarations shadow outer ones.
#[derive(Debug, Default)]
pub struct SymbolTable {
    environments: Vec<Environment>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            environments: vec![],
        }
    }

    pub fn push_scope(&mut self) {
        self.environments.push(Environment::new());
        trace!(depth = self.environments.len(), "pushed scope");
    }

    pub fn pop_scope(&mut self) {
        self.environments.pop();
        trace!(depth = self.environments.len(), "popped scope");
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    /// Binds `name` in the innermost scope. Redeclaration checks are up to the caller.
    pub fn declare(&mut self, name: impl Into<String>, data_type: DataType) {
        debug_assert!(!self.environments.is_empty(), "declare without an open scope");
        if let Some(environment) = self.environments.last_mut() {
            environment.declare_variable(name.into(), data_type);
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn exists_in_innermost(&self, name: &str) -> bool {
        self.environments
            .last()
            .is_some_and(|environment| environment.get_variable(name).is_some())
    }

    pub fn lookup(&self, name: &str) -> Option<&DataType> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }
}
