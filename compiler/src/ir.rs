//! A small statement/expression tree for the generated Go functions.
//!
//! Synthesis builds these values; [`crate::printer`] is the only place that
//! turns them into text.

/// Go type reference: `[]*pkg.Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name:    String,
    pub pointer: bool,
    pub list:    bool,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, pointer: bool, list: bool) -> Self {
        TypeRef { name: name.into(), pointer, list }
    }

    pub fn value(name: impl Into<String>) -> Self {
        TypeRef::new(name, false, false)
    }

    /// Element type of a list reference.
    pub fn element(&self) -> TypeRef {
        TypeRef { list: false, ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// `x.field`
    Selector(Box<Expr>, String),
    /// `x[i]`
    Index(Box<Expr>, String),
    /// `*x`
    Deref(Box<Expr>),
    /// `&x`
    AddrOf(Box<Expr>),
    Call { func: String, args: Vec<Expr> },
    /// `T{}` or a multi-line keyed literal.
    Composite { type_: String, entries: Vec<(String, Expr)> },
    /// `make([]T, len(x))`
    MakeSlice { elem: TypeRef, len_of: Box<Expr> },
    /// Verbatim text, e.g. `opts...`.
    Raw(String),
}

impl Expr {
    pub fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    pub fn field(self, name: &str) -> Expr {
        Expr::Selector(Box::new(self), name.to_string())
    }

    pub fn deref(self) -> Expr {
        Expr::Deref(Box::new(self))
    }

    pub fn addr(self) -> Expr {
        Expr::AddrOf(Box::new(self))
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call { func: func.into(), args }
    }

    pub fn empty(type_: impl Into<String>) -> Expr {
        Expr::Composite { type_: type_.into(), entries: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `name := value`
    Define { name: String, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    /// A call evaluated for its effect.
    Expr(Expr),
    Return(Option<Expr>),
    /// `if subject == nil { body }`
    IfNil { subject: Expr, body: Vec<Stmt> },
    /// `for key, value := range over { body }`
    Range { key: String, value: String, over: Expr, body: Vec<Stmt> },
    /// An empty line between statement groups.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name:  String,
    /// Parameter type, already rendered, e.g. `...TransformParam`.
    pub type_: String,
}

impl Param {
    pub fn new(name: &str, type_: impl Into<String>) -> Self {
        Param { name: name.to_string(), type_: type_.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Comment lines printed above the declaration, without `// `.
    pub doc:    Vec<String>,
    pub name:   String,
    pub params: Vec<Param>,
    pub result: TypeRef,
    pub body:   Vec<Stmt>,
}
