//! Closures, classes and objects.

use std::fmt;
use std::rc::Rc;

use pithon_ir::{FunctionDef, Name};
use rustc_hash::FxHashMap;

use super::Value;
use crate::environment::{Environment, LocalScope};

/// A user-defined function paired with the frame it was defined in.
///
/// The frame is captured by reference: writes to it after the definition
/// are visible when the function runs.
#[derive(Clone)]
pub struct FunctionValue {
    def: Rc<FunctionDef>,
    env: Environment,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, env: Environment) -> Self {
        FunctionValue { def, env }
    }

    pub fn def(&self) -> &FunctionDef {
        &self.def
    }

    /// The captured defining frame.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn name(&self) -> &Name {
        &self.def.name
    }

    /// Same definition captured over the same frame.
    pub fn same(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.def, &other.def) && self.env.same_frame(&other.env)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.def.name)
            .field("params", &self.def.params)
            .field("vararg", &self.def.vararg)
            .finish_non_exhaustive()
    }
}

/// A class method bound to the instance it was read from.
///
/// Created lazily on attribute lookup; calling it prepends the receiver to
/// the arguments.
#[derive(Clone, Debug)]
pub struct MethodValue {
    function: FunctionValue,
    receiver: ObjectValue,
}

impl MethodValue {
    pub fn new(function: FunctionValue, receiver: ObjectValue) -> Self {
        MethodValue { function, receiver }
    }

    pub fn function(&self) -> &FunctionValue {
        &self.function
    }

    pub fn receiver(&self) -> &ObjectValue {
        &self.receiver
    }

    /// `Class.method`, as shown in backtraces and call errors.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.receiver.class().name(), self.function.name())
    }

    pub fn same(&self, other: &MethodValue) -> bool {
        self.function.same(&other.function) && self.receiver.same(&other.receiver)
    }
}

struct ClassData {
    name: Name,
    methods: FxHashMap<Name, FunctionValue>,
}

/// A class definition: a name and its methods.
///
/// Every method closes over the same defining frame.
#[derive(Clone)]
pub struct ClassValue(Rc<ClassData>);

impl ClassValue {
    /// Name of the method run when the class is called.
    pub const CONSTRUCTOR: &'static str = "__init__";

    pub fn new(name: Name, methods: FxHashMap<Name, FunctionValue>) -> Self {
        ClassValue(Rc::new(ClassData { name, methods }))
    }

    pub fn name(&self) -> &Name {
        &self.0.name
    }

    pub fn method(&self, name: &str) -> Option<&FunctionValue> {
        self.0.methods.get(name)
    }

    pub fn constructor(&self) -> Option<&FunctionValue> {
        self.method(Self::CONSTRUCTOR)
    }

    /// Method names, sorted.
    pub fn method_names(&self) -> Vec<&Name> {
        let mut names: Vec<&Name> = self.0.methods.keys().collect();
        names.sort_unstable();
        names
    }

    pub fn same(&self, other: &ClassValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassValue")
            .field("name", &self.0.name)
            .field("methods", &self.method_names())
            .finish()
    }
}

/// An instance of a class.
///
/// The attribute map is shared between every clone of the handle, so two
/// variables bound to the same object see each other's writes.
#[derive(Clone)]
pub struct ObjectValue {
    class: ClassValue,
    attributes: LocalScope<FxHashMap<Name, Value>>,
}

impl ObjectValue {
    /// A new instance with no attributes.
    pub fn new(class: ClassValue) -> Self {
        ObjectValue {
            class,
            attributes: LocalScope::default(),
        }
    }

    pub fn class(&self) -> &ClassValue {
        &self.class
    }

    /// Instance attribute only; class methods are not consulted.
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Insert or overwrite an instance attribute.
    pub fn set_attr(&self, name: Name, value: Value) {
        self.attributes.borrow_mut().insert(name, value);
    }

    /// Resolve `object.name`: instance attributes first, then class methods
    /// bound to this instance.
    pub fn lookup_attr(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get_attr(name) {
            return Some(value);
        }
        self.class
            .method(name)
            .map(|method| Value::Method(MethodValue::new(method.clone(), self.clone())))
    }

    pub fn same(&self, other: &ObjectValue) -> bool {
        self.attributes.ptr_eq(&other.attributes)
    }
}

// Attributes may point back at this object, so only names are shown.
impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = self.attributes.borrow();
        let mut names: Vec<&Name> = attributes.keys().collect();
        names.sort_unstable();
        f.debug_struct("ObjectValue")
            .field("class", self.class.name())
            .field("attributes", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests;
