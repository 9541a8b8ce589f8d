use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{
        ast::{FunDef, Program, StructDef},
        types::{DataType, BASE_TYPES, BUILT_INS},
    },
    errors::errors::{Error, ErrorImpl},
};

/// Program-wide struct and function definitions, keyed by name.
///
/// Filled once before any body is checked so that definitions can refer
/// to each other regardless of order.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    struct_defs: HashMap<&'a str, &'a StructDef>,
    fun_defs: HashMap<&'a str, &'a FunDef>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Registry {
            struct_defs: HashMap::new(),
            fun_defs: HashMap::new(),
        }
    }

    /// Registers every definition of `program` and validates `main`.
    pub fn from_program(program: &'a Program) -> Result<Self, Error> {
        let mut registry = Registry::new();

        for struct_def in program.struct_defs.iter() {
            registry.register_struct(struct_def)?;
        }
        for fun_def in program.fun_defs.iter() {
            registry.register_function(fun_def)?;
        }
        registry.validate_main()?;

        debug!(
            structs = registry.struct_defs.len(),
            functions = registry.fun_defs.len(),
            "registered definitions"
        );
        Ok(registry)
    }

    pub fn register_struct(&mut self, struct_def: &'a StructDef) -> Result<(), Error> {
        let name = struct_def.name();
        if self.struct_defs.contains_key(name) {
            return Err(Error::at(
                ErrorImpl::MultipleDefinitions {
                    name: name.to_string(),
                },
                &struct_def.struct_name,
            ));
        }

        self.struct_defs.insert(name, struct_def);
        Ok(())
    }

    pub fn register_function(&mut self, fun_def: &'a FunDef) -> Result<(), Error> {
        let name = fun_def.name();
        if BUILT_INS.contains(name) {
            return Err(Error::at(
                ErrorImpl::RedefiningBuiltIn {
                    name: name.to_string(),
                },
                &fun_def.fun_name,
            ));
        }
        if self.fun_defs.contains_key(name) {
            return Err(Error::at(
                ErrorImpl::MultipleDefinitions {
                    name: name.to_string(),
                },
                &fun_def.fun_name,
            ));
        }

        self.fun_defs.insert(name, fun_def);
        Ok(())
    }

    /// Requires a `void main()` among the registered functions.
    pub fn validate_main(&self) -> Result<(), Error> {
        let Some(main) = self.get_function("main") else {
            return Err(Error::new(ErrorImpl::MissingMain, None));
        };

        if main.return_type != DataType::void() {
            return Err(Error::at(ErrorImpl::MainNotVoid, &main.fun_name));
        }
        if let Some(param) = main.params.first() {
            return Err(Error::at(ErrorImpl::MainHasParameters, &param.var_name));
        }

        Ok(())
    }

    pub fn get_struct(&self, name: &str) -> Option<&'a StructDef> {
        self.struct_defs.get(name).copied()
    }

    pub fn get_function(&self, name: &str) -> Option<&'a FunDef> {
        self.fun_defs.get(name).copied()
    }

    pub fn is_struct(&self, type_name: &str) -> bool {
        self.struct_defs.contains_key(type_name)
    }

    /// Primitive or registered struct name. `void` is not a value type.
    pub fn is_value_type(&self, type_name: &str) -> bool {
        BASE_TYPES.contains(type_name) || self.is_struct(type_name)
    }
}
