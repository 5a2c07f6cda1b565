use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::ast::BlockStmt;

// The interned singletons. The enum encoding makes Boolean/Null equality a
// value comparison, which is observationally the same as identity over
// interned instances; arrays, hashes and functions carry real identity
// through their Rc allocation.
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// A runtime value. `Return` and `Error` are signals that travel the same
/// paths as ordinary values: block evaluation checks for them after every
/// statement and short-circuits, which is how `return` and error
/// propagation work without host-level unwinding.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(Rc<String>),
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashMap<HashKey, HashPair>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Return(Box<Object>),
    Error(String),
}

impl Object {
    pub fn from_native_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    /// Type tag as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Return(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    /// `false` and `null` are falsy; everything else, including `0` and
    /// `""`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Derived map key for the hashable variants; `None` for everything
    /// else, which the evaluator reports as a user-facing error.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::Str(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                Some(HashKey::Str(hasher.finish()))
            }
            _ => None,
        }
    }
}

// Host-level equality, used by tests and the REPL. The language's own
// `==`/`!=` live in the evaluator and have identity semantics for the
// aggregate types.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(l), Object::Integer(r)) => l == r,
            (Object::Boolean(l), Object::Boolean(r)) => l == r,
            (Object::Str(l), Object::Str(r)) => l == r,
            (Object::Null, Object::Null) => true,
            (Object::Array(l), Object::Array(r)) => l == r,
            (Object::Hash(l), Object::Hash(r)) => l == r,
            (Object::Function(l), Object::Function(r)) => Rc::ptr_eq(l, r),
            (Object::Builtin(l), Object::Builtin(r)) => l == r,
            (Object::Return(l), Object::Return(r)) => l == r,
            (Object::Error(l), Object::Error(r)) => l == r,
            _ => false,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Str(value) => f.write_str(value),
            Object::Null => f.write_str("null"),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Object::Hash(pairs) => {
                f.write_str("{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Object::Function(function) => {
                write!(f, "fn({}) {}", function.parameters.join(", "), function.body)
            }
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Return(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// Comparable/hashable stand-in for a hashable `Object`. The variant tag
/// keeps e.g. `Integer(1)` and `Boolean(true)` from ever colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(u64),
}

/// A hash entry keeps the original key object around for inspection, since
/// `HashKey::Str` only stores the string's hash.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A user-defined function: parameters, body, and the environment it was
/// created in. The environment reference (not a copy) is the closure.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStmt,
    pub env: Rc<Environment>,
}

// Leaves out the captured environment: an environment can hold the
// function itself, and following that edge would not terminate.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Function(fn({}))", self.parameters.join(", "))
    }
}

/// A native function exposed to interpreted code under a fixed name. Each
/// builtin validates its own arguments and reports misuse as an
/// `Object::Error`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(Vec<Object>) -> Object,
}

/// A chained name→value binding table. Frames are shared (`Rc`), never
/// exclusively owned: a closure's captured environment outlives the call
/// that created it, and several closures may capture the same frame.
pub struct Environment {
    bindings: RefCell<HashMap<String, Object>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            enclosing: None,
        })
    }

    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            enclosing: Some(outer),
        })
    }

    /// Resolve a name, walking outward through the enclosing chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref().and_then(|outer| outer.get(name))
    }

    /// Bind in this frame, shadowing any outer binding of the same name.
    pub fn set(&self, name: &str, value: Object) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }
}
