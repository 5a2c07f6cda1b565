use std::rc::Rc;

use crate::object::{Builtin, Object, NULL};

const BUILTINS: [Builtin; 6] = [
    Builtin {
        name: "len",
        func: len,
    },
    Builtin {
        name: "first",
        func: first,
    },
    Builtin {
        name: "last",
        func: last,
    },
    Builtin {
        name: "rest",
        func: rest,
    },
    Builtin {
        name: "push",
        func: push,
    },
    Builtin {
        name: "print",
        func: print,
    },
];

/// Resolve a builtin by name. Consulted only after the environment chain
/// misses, so user bindings shadow builtins.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

fn wrong_arg_count(got: usize, want: usize) -> Object {
    Object::Error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

fn len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        Object::Str(value) => Object::Integer(value.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(NULL),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got={}",
            other.type_name()
        )),
    }
}

fn last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(NULL),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got={}",
            other.type_name()
        )),
    }
}

fn rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(args.len(), 1);
    }
    match &args[0] {
        Object::Array(elements) => {
            if elements.is_empty() {
                NULL
            } else {
                Object::Array(Rc::new(elements[1..].to_vec()))
            }
        }
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got={}",
            other.type_name()
        )),
    }
}

// Returns a new array; the argument is never mutated.
fn push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arg_count(args.len(), 2);
    }
    match &args[0] {
        Object::Array(elements) => {
            let mut extended = elements.as_ref().clone();
            extended.push(args[1].clone());
            Object::Array(Rc::new(extended))
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got={}",
            other.type_name()
        )),
    }
}

// The single output side effect of evaluation: one space-joined line per
// invocation.
fn print(args: Vec<Object>) -> Object {
    let rendered: Vec<String> = args.iter().map(Object::to_string).collect();
    println!("{}", rendered.join(" "));
    NULL
}
