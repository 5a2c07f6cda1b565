mod builtins;

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{BlockStmt, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::object::{Environment, Function, HashPair, Object, NULL};

/// Evaluate a whole program. The result is the last statement's value, an
/// `Error`, or `Null` for an empty program; a top-level `return` yields its
/// operand.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = NULL;
    for stmt in &program.statements {
        match eval_stmt(stmt, env) {
            Object::Return(value) => return *value,
            error @ Object::Error(_) => return error,
            value => result = value,
        }
    }
    result
}

// Unlike eval_program, a block passes Return through unopened so that a
// return deep inside nested blocks still unwinds the enclosing function.
fn eval_block(block: &BlockStmt, env: &Rc<Environment>) -> Object {
    let mut result = NULL;
    for stmt in &block.statements {
        match eval_stmt(stmt, env) {
            signal @ (Object::Return(_) | Object::Error(_)) => return signal,
            value => result = value,
        }
    }
    result
}

fn eval_stmt(stmt: &Stmt, env: &Rc<Environment>) -> Object {
    match stmt {
        Stmt::Let { name, value } => {
            let value = eval_expr(value, env);
            if value.is_error() {
                return value;
            }
            env.set(name, value);
            NULL
        }
        Stmt::Return { value } => {
            let value = eval_expr(value, env);
            if value.is_error() {
                return value;
            }
            Object::Return(Box::new(value))
        }
        Stmt::Expr { expression } => eval_expr(expression, env),
        Stmt::Block(block) => eval_block(block, env),
    }
}

fn eval_expr(expr: &Expr, env: &Rc<Environment>) -> Object {
    match expr {
        Expr::Int { value } => Object::Integer(*value),
        Expr::Str { value } => Object::Str(Rc::new(value.clone())),
        Expr::Bool { value } => Object::from_native_bool(*value),
        Expr::Null => NULL,
        Expr::Ident(name) => eval_identifier(name, env),
        Expr::Prefix { operator, right } => {
            let right = eval_expr(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(*operator, right)
        }
        Expr::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expr(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expr(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(*operator, left, right)
        }
        Expr::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expr(condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                NULL
            }
        }
        Expr::Function { parameters, body } => Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        })),
        Expr::Call {
            function,
            arguments,
        } => {
            let function = eval_expr(function, env);
            if function.is_error() {
                return function;
            }
            match eval_expressions(arguments, env) {
                Ok(args) => apply_function(function, args),
                Err(error) => error,
            }
        }
        Expr::Array { elements } => match eval_expressions(elements, env) {
            Ok(elements) => Object::Array(Rc::new(elements)),
            Err(error) => error,
        },
        Expr::Index { left, index } => {
            let left = eval_expr(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expr(index, env);
            if index.is_error() {
                return index;
            }
            eval_index(left, index)
        }
        Expr::Hash { pairs } => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Object {
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Object::Builtin(builtin);
    }
    Object::Error(format!("identifier not found: {}", name))
}

fn eval_prefix(operator: PrefixOp, right: Object) -> Object {
    match operator {
        PrefixOp::Not => Object::from_native_bool(!right.is_truthy()),
        PrefixOp::Negative => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            right => Object::Error(format!("unknown operator: -{}", right.type_name())),
        },
    }
}

fn eval_infix(operator: InfixOp, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix(operator, left, right)
        }
        (Object::Str(left), Object::Str(right)) => eval_string_infix(operator, &left, &right),
        (left, right) => match operator {
            InfixOp::Eq => Object::from_native_bool(identical(&left, &right)),
            InfixOp::NotEq => Object::from_native_bool(!identical(&left, &right)),
            operator if left.type_name() != right.type_name() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            operator => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
    }
}

fn eval_integer_infix(operator: InfixOp, left: i64, right: i64) -> Object {
    match operator {
        // Arithmetic wraps on overflow; only division by zero is an error
        InfixOp::Add => Object::Integer(left.wrapping_add(right)),
        InfixOp::Subtract => Object::Integer(left.wrapping_sub(right)),
        InfixOp::Multiply => Object::Integer(left.wrapping_mul(right)),
        InfixOp::Divide => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        InfixOp::LessThan => Object::from_native_bool(left < right),
        InfixOp::GreaterThan => Object::from_native_bool(left > right),
        InfixOp::Eq => Object::from_native_bool(left == right),
        InfixOp::NotEq => Object::from_native_bool(left != right),
    }
}

fn eval_string_infix(operator: InfixOp, left: &str, right: &str) -> Object {
    match operator {
        InfixOp::Add => Object::Str(Rc::new(format!("{}{}", left, right))),
        InfixOp::Eq => Object::from_native_bool(left == right),
        InfixOp::NotEq => Object::from_native_bool(left != right),
        operator => Object::Error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

// Identity comparison for `==`/`!=` outside the integer/string value
// cases. Booleans and null are interned, so value equality IS identity;
// the aggregates compare by allocation.
fn identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        (Object::Array(left), Object::Array(right)) => Rc::ptr_eq(left, right),
        (Object::Hash(left), Object::Hash(right)) => Rc::ptr_eq(left, right),
        (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
        (Object::Builtin(left), Object::Builtin(right)) => left == right,
        _ => false,
    }
}

/// Evaluate left to right, stopping at the first error.
fn eval_expressions(exprs: &[Expr], env: &Rc<Environment>) -> Result<Vec<Object>, Object> {
    let mut results = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expr(expr, env);
        if value.is_error() {
            return Err(value);
        }
        results.push(value);
    }
    Ok(results)
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(function) => {
            if args.len() != function.parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments: want={}, got={}",
                    function.parameters.len(),
                    args.len()
                ));
            }
            let env = Environment::new_enclosed(Rc::clone(&function.env));
            for (parameter, arg) in function.parameters.iter().zip(args) {
                env.set(parameter, arg);
            }
            unwrap_return(eval_block(&function.body, &env))
        }
        Object::Builtin(builtin) => (builtin.func)(args),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

// Strips exactly one level: a body that falls off the end returns its last
// value as-is, and a nested Return never leaks past the call boundary.
fn unwrap_return(result: Object) -> Object {
    match result {
        Object::Return(value) => *value,
        value => value,
    }
}

fn eval_index(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => {
            if index < 0 || index as usize >= elements.len() {
                NULL
            } else {
                elements[index as usize].clone()
            }
        }
        (Object::Hash(pairs), index) => match index.hash_key() {
            Some(key) => pairs.get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL),
            None => Object::Error(format!("unusable as hash key: {}", index.type_name())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_hash_literal(pairs: &[(Expr, Expr)], env: &Rc<Environment>) -> Object {
    let mut evaluated = HashMap::with_capacity(pairs.len());
    for (key_expr, value_expr) in pairs {
        let key = eval_expr(key_expr, env);
        if key.is_error() {
            return key;
        }
        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => {
                return Object::Error(format!("unusable as hash key: {}", key.type_name()));
            }
        };
        let value = eval_expr(value_expr, env);
        if value.is_error() {
            return value;
        }
        evaluated.insert(hash_key, HashPair { key, value });
    }
    Object::Hash(Rc::new(evaluated))
}
