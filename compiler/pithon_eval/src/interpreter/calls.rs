//! Calls: primitives, functions, bound methods and constructors.

use pithon_ir::FunctionDef;

use super::{Flow, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::Environment;
use crate::errors::{
    control_outside_loop, missing_argument, not_callable, too_many_arguments, EvalError,
    EvalResult,
};
use crate::primitives::PrimitiveContext;
use crate::value::{ClassValue, FunctionValue, ObjectValue, Value};

impl Interpreter {
    /// Call `callee` with already evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Primitive(primitive) => {
                primitive.call(&args, &PrimitiveContext::new(&self.print_handler))
            }
            Value::Function(function) => {
                self.invoke(function, function.name().to_string(), args)
            }
            Value::Method(method) => {
                let args = with_receiver(method.receiver(), args);
                self.invoke(method.function(), method.qualified_name(), args)
            }
            Value::Class(class) => self.construct(class, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Allocate an instance and run `__init__` on it, if the class has one.
    ///
    /// The constructor's own result is discarded; the call always yields the
    /// new object.
    fn construct(&mut self, class: &ClassValue, args: Vec<Value>) -> EvalResult {
        let instance = ObjectValue::new(class.clone());
        if let Some(init) = class.constructor() {
            let args = with_receiver(&instance, args);
            self.invoke(init, class.name().to_string(), args)?;
        }
        Ok(Value::Object(instance))
    }

    /// Run a user-level function in a fresh frame under a new call frame.
    ///
    /// The call frame is popped on every exit path. An error leaving the
    /// frame picks up a backtrace if it does not have one yet.
    #[tracing::instrument(level = "debug", skip(self, function, args))]
    fn invoke(&mut self, function: &FunctionValue, name: String, args: Vec<Value>) -> EvalResult {
        tracing::trace!(
            depth = self.call_stack.depth(),
            args = args.len(),
            stack = ?pithon_stack::remaining_stack(),
            "enter"
        );
        self.call_stack.push(CallFrame { name: name.clone() })?;
        let result = self
            .run_body(function, &name, args)
            .map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result
    }

    fn run_body(&mut self, function: &FunctionValue, name: &str, args: Vec<Value>) -> EvalResult {
        let def = function.def();
        let frame = bind_arguments(def, name, function.env(), args)?;
        match self.exec_block(&def.body, &frame)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break => Err(control_outside_loop("break")),
            Flow::Continue => Err(control_outside_loop("continue")),
        }
    }
}

fn with_receiver(receiver: &ObjectValue, args: Vec<Value>) -> Vec<Value> {
    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(Value::Object(receiver.clone()));
    all.extend(args);
    all
}

/// Bind arguments positionally in a child of the captured frame.
///
/// Surplus arguments go to the vararg as a list (empty when there are
/// none). Without a vararg they are a Call error, as is a missing argument.
fn bind_arguments(
    def: &FunctionDef,
    name: &str,
    captured: &Environment,
    args: Vec<Value>,
) -> Result<Environment, EvalError> {
    let expected = def.params.len();
    let got = args.len();
    if got < expected {
        return Err(missing_argument(name, expected, got));
    }
    if got > expected && def.vararg.is_none() {
        return Err(too_many_arguments(name, expected, got));
    }

    let frame = captured.child();
    let mut args = args.into_iter();
    for (param, value) in def.params.iter().zip(args.by_ref()) {
        frame.define(param.clone(), value);
    }
    if let Some(vararg) = &def.vararg {
        frame.define(vararg.clone(), Value::list(args.collect()));
    }
    Ok(frame)
}
