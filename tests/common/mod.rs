#![allow(dead_code)]

use std::collections::HashMap;

use byname::{Abstract, Invocable, MethodSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    // Each integration test binary installs its own subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Target exercising every parameter shape the invoker supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub name: String,
    pub age: i64,
}

pub trait Named {
    fn name(&self) -> String;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cyclic {
    pub name: String,
    pub b: Option<Box<CyclicPeer>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CyclicPeer {
    pub name: String,
    pub a: Option<Box<Cyclic>>,
}

impl Cyclic {
    /// Number of nested records below and including this one.
    pub fn depth(&self) -> usize {
        1 + self
            .b
            .as_ref()
            .map_or(0, |peer| 1 + peer.a.as_ref().map_or(0, |a| a.depth()))
    }
}

impl Person {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }

    fn no_param(&mut self) -> String {
        "Hello World".to_string()
    }

    fn single_param(&mut self, data: Option<HashMap<String, Value>>) -> String {
        data.and_then(|data| data.get("message").and_then(|m| m.as_str().map(str::to_string)))
            .unwrap_or_default()
    }

    fn multi_param(&mut self, name: String, age: i64) {
        self.name = name;
        self.age = age;
    }

    fn complex_types(
        &mut self,
        text: String,
        number: i64,
        _flag: bool,
        _ratio: f64,
        _map: HashMap<String, Value>,
        _list: Vec<Value>,
    ) {
        self.name = text;
        self.age = number;
    }

    fn pointer_param(&mut self, name: Option<String>, age: Option<i64>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(age) = age {
            self.age = age;
        }
    }

    fn slice_param(&mut self, names: Vec<String>) {
        if let Some(first) = names.into_iter().next() {
            self.name = first;
        }
    }

    fn map_param(&mut self, data: HashMap<String, String>) {
        if let Some(name) = data.get("name") {
            self.name = name.clone();
        }
        if data.contains_key("age") {
            self.age = 25;
        }
    }

    fn value_receiver_method(&self, name: String) -> String {
        format!("Hello, {}", name)
    }

    fn pointer_receiver_method(&mut self, name: String) -> String {
        self.name = name.clone();
        format!("Hello, {}", name)
    }

    fn struct_param_method(&mut self, param: Person) -> String {
        format!("Name: {}, Age: {}", param.name, param.age)
    }

    fn struct_pointer_param_method(&mut self, param: Box<Person>) -> String {
        format!("Name: {}, Age: {}", param.name, param.age)
    }

    fn no_return(&mut self, name: String) {
        self.name = name;
    }

    fn variadic_param(&mut self, name: String, ages: Vec<i64>) -> String {
        self.name = name.clone();
        if let Some(first) = ages.first() {
            self.age = *first;
        }
        format!("Name: {}, Ages: {:?}", name, ages)
    }

    fn fixed_and_variadic_param(&mut self, name: String, age: i64, scores: Vec<i64>) -> String {
        self.name = name.clone();
        self.age = age;
        format!("Name: {}, Age: {}, Scores: {:?}", name, age, scores)
    }

    fn interface_param_method(&mut self, param: Abstract<dyn Named>) -> String {
        self.name = param.name();
        format!("Name: {}", self.name)
    }

    fn cyclic_struct_param(&mut self, param: Cyclic) -> String {
        self.name = param.name.clone();
        format!("Name: {}, B: {:?}", param.name, param.b)
    }

    fn divmod(&self, a: i64, b: i64) -> (i64, i64) {
        (a / b, a % b)
    }
}

impl Invocable for Person {
    fn register_methods(methods: &mut MethodSet<Self>) {
        methods
            .method("no_param", Person::no_param)
            .method("single_param", Person::single_param)
            .method("multi_param", Person::multi_param)
            .method("complex_types", Person::complex_types)
            .method("pointer_param", Person::pointer_param)
            .method("slice_param", Person::slice_param)
            .method("map_param", Person::map_param)
            .method("value_receiver_method", Person::value_receiver_method)
            .method("pointer_receiver_method", Person::pointer_receiver_method)
            .method("struct_param_method", Person::struct_param_method)
            .method(
                "struct_pointer_param_method",
                Person::struct_pointer_param_method,
            )
            .method("no_return", Person::no_return)
            .variadic("variadic_param", Person::variadic_param)
            .variadic("fixed_and_variadic_param", Person::fixed_and_variadic_param)
            .method("interface_param_method", Person::interface_param_method)
            .method("cyclic_struct_param", Person::cyclic_struct_param)
            .method("divmod", Person::divmod);
    }
}

/// Small arithmetic and text target.
#[derive(Debug, Default)]
pub struct Toolbox {
    pub calls: usize,
}

impl Toolbox {
    fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }

    fn join(&self, sep: String, parts: Vec<String>) -> String {
        parts.join(&sep)
    }

    fn pair(&self, left: String, right: String) -> String {
        format!("{}{}", left, right)
    }

    fn record(&mut self, _label: String) -> usize {
        self.calls += 1;
        self.calls
    }

    fn nothing(&self) {}
}

impl Invocable for Toolbox {
    fn register_methods(methods: &mut MethodSet<Self>) {
        methods
            .method("add", Toolbox::add)
            .variadic("join", Toolbox::join)
            .method("pair", Toolbox::pair)
            .method("record", Toolbox::record)
            .method("nothing", Toolbox::nothing);
    }
}

pub fn string_result(results: &[byname::DynValue], index: usize) -> Option<&str> {
    results
        .get(index)
        .and_then(|value| value.downcast_ref::<String>())
        .map(String::as_str)
}
