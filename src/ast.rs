use std::fmt::{self, Display, Formatter};

/// Root of a parsed source text. Owns the whole tree for the lifetime of
/// one parse/eval cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Stmt::token_literal)
            .unwrap_or_default()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        f.write_str(" }")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Let { name: String, value: Expr },
    Return { value: Expr },
    Expr { expression: Expr },
    Block(BlockStmt),
}

impl Stmt {
    /// Literal text of the token this statement starts with.
    pub fn token_literal(&self) -> String {
        match self {
            Stmt::Let { .. } => "let".to_string(),
            Stmt::Return { .. } => "return".to_string(),
            Stmt::Expr { expression } => expression.token_literal(),
            Stmt::Block(_) => "{".to_string(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {} = {};", name, value),
            Stmt::Return { value } => write!(f, "return {};", value),
            // The trailing ';' keeps adjacent expression statements from
            // re-parsing as one expression
            Stmt::Expr { expression } => write!(f, "{};", expression),
            Stmt::Block(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Int {
        value: i64,
    },
    Str {
        value: String,
    },
    Bool {
        value: bool,
    },
    Null,
    Prefix {
        operator: PrefixOp,
        right: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        operator: InfixOp,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: BlockStmt,
        alternative: Option<BlockStmt>,
    },
    Function {
        parameters: Vec<String>,
        body: BlockStmt,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Array {
        elements: Vec<Expr>,
    },
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
    Hash {
        pairs: Vec<(Expr, Expr)>,
    },
}

impl Expr {
    /// Literal text of the token this expression starts with (for call and
    /// index expressions, the token that formed them: `(` and `[`).
    pub fn token_literal(&self) -> String {
        match self {
            Expr::Ident(name) => name.clone(),
            Expr::Int { value } => value.to_string(),
            Expr::Str { value } => value.clone(),
            Expr::Bool { value } => value.to_string(),
            Expr::Null => "null".to_string(),
            Expr::Prefix { operator, .. } => operator.to_string(),
            Expr::Infix { operator, .. } => operator.to_string(),
            Expr::If { .. } => "if".to_string(),
            Expr::Function { .. } => "fn".to_string(),
            Expr::Call { .. } => "(".to_string(),
            Expr::Array { .. } => "[".to_string(),
            Expr::Index { .. } => "[".to_string(),
            Expr::Hash { .. } => "{".to_string(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Int { value } => write!(f, "{}", value),
            Expr::Str { value } => write!(f, "\"{}\"", value),
            Expr::Bool { value } => write!(f, "{}", value),
            Expr::Null => f.write_str("null"),
            Expr::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expr::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expr::Function { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expr::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Array { elements } => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Expr::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expr::Hash { pairs } => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Negative,
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => f.write_str("!"),
            PrefixOp::Negative => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Eq,
    NotEq,
    LessThan,
    GreaterThan,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InfixOp::Eq => f.write_str("=="),
            InfixOp::NotEq => f.write_str("!="),
            InfixOp::LessThan => f.write_str("<"),
            InfixOp::GreaterThan => f.write_str(">"),
            InfixOp::Add => f.write_str("+"),
            InfixOp::Subtract => f.write_str("-"),
            InfixOp::Multiply => f.write_str("*"),
            InfixOp::Divide => f.write_str("/"),
        }
    }
}
