use super::*;
use pithon_ir::{Expr, Stmt};
use pretty_assertions::assert_eq;

fn method(name: &str) -> Rc<FunctionDef> {
    Rc::new(FunctionDef::new(
        name,
        vec![Name::from("self")],
        vec![Stmt::ret(Expr::number(1.0))],
    ))
}

fn counter_class(env: &Environment) -> ClassValue {
    let mut methods = FxHashMap::default();
    for name in ["increment", "__init__"] {
        methods.insert(Name::from(name), FunctionValue::new(method(name), env.clone()));
    }
    ClassValue::new(Name::from("Counter"), methods)
}

#[test]
fn class_lookup_and_constructor() {
    let class = counter_class(&Environment::new());
    assert_eq!(class.name().as_str(), "Counter");
    assert!(class.method("increment").is_some());
    assert!(class.constructor().is_some());
    assert!(class.method("missing").is_none());
    let names: Vec<&str> = class.method_names().into_iter().map(Name::as_str).collect();
    assert_eq!(names, vec!["__init__", "increment"]);
}

#[test]
fn object_attributes_are_shared_between_clones() {
    let obj = ObjectValue::new(counter_class(&Environment::new()));
    let alias = obj.clone();
    obj.set_attr(Name::from("v"), Value::Number(5.0));
    alias.set_attr(Name::from("v"), Value::Number(9.0));
    assert_eq!(obj.get_attr("v"), Some(Value::Number(9.0)));
    assert!(obj.same(&alias));
}

#[test]
fn distinct_instances_do_not_share_attributes() {
    let class = counter_class(&Environment::new());
    let a = ObjectValue::new(class.clone());
    let b = ObjectValue::new(class);
    a.set_attr(Name::from("v"), Value::Number(1.0));
    assert_eq!(b.get_attr("v"), None);
    assert!(!a.same(&b));
    assert!(!Value::Object(a).equals(&Value::Object(b)));
}

#[test]
fn instance_attribute_shadows_method() {
    let obj = ObjectValue::new(counter_class(&Environment::new()));
    assert!(matches!(obj.lookup_attr("increment"), Some(Value::Method(_))));
    obj.set_attr(Name::from("increment"), Value::Number(0.0));
    assert_eq!(obj.lookup_attr("increment"), Some(Value::Number(0.0)));
    assert_eq!(obj.lookup_attr("nothing"), None);
}

#[test]
fn bound_method_display_and_identity() {
    let obj = ObjectValue::new(counter_class(&Environment::new()));
    let Some(Value::Method(m)) = obj.lookup_attr("increment") else {
        panic!("expected a bound method");
    };
    assert_eq!(m.qualified_name(), "Counter.increment");
    assert_eq!(
        Value::Method(m.clone()).to_string(),
        "<bound method Counter.increment>"
    );
    assert!(m.receiver().same(&obj));
    let Some(Value::Method(again)) = obj.lookup_attr("increment") else {
        panic!("expected a bound method");
    };
    assert!(m.same(&again));
}

#[test]
fn function_identity_needs_same_frame() {
    let def = method("f");
    let env = Environment::new();
    let a = FunctionValue::new(def.clone(), env.clone());
    let b = FunctionValue::new(def.clone(), env.clone());
    let c = FunctionValue::new(def, env.child());
    assert!(a.same(&b));
    assert!(!a.same(&c));
    assert_eq!(Value::Function(a).to_string(), "<function f>");
}

#[test]
fn class_and_object_display() {
    let class = counter_class(&Environment::new());
    assert_eq!(Value::Class(class.clone()).to_string(), "<class Counter>");
    assert_eq!(
        Value::Object(ObjectValue::new(class)).to_string(),
        "<Counter object>"
    );
}
