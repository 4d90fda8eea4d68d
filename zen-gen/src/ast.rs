//! AST definitions for the bridged surface language.
//!
//! Two tagged-union families live here: the annotation tree, which models a
//! single type annotation as written in the source (`int | str`, `list[X]`,
//! `dict[K, V]`, `None`), and the generated-code tree, which models the
//! statements the synthesizer emits (imports, assignments, type definitions,
//! callables). Both are plain data; rendering to text is the printer's job.

/// A type annotation expression.
///
/// Unions are kept as binary nodes, matching the left-associative `A | B | C`
/// shape of the surface syntax: `(A | B) | C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// A bare name: a primitive (`str`, `int`, ...) or a schema reference.
    Name(String),

    /// The `None` literal.
    None,

    /// A binary union: `left | right`.
    Union(Box<Annotation>, Box<Annotation>),

    /// A subscripted container: `list[...]` or `dict[...]`.
    Subscript {
        /// The container name (`list`, `dict`).
        base: String,
        /// The subscript index.
        index: SubscriptIndex,
    },

    /// Annotation text outside the supported grammar, carried verbatim.
    /// Decodes to the empty alternative list.
    Unsupported(String),
}

/// The index of a subscripted container annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptIndex {
    /// A single bare name: `list[str]`.
    Name(String),

    /// Exactly two bare names: `dict[str, int]`.
    Pair(String, String),

    /// A single nested expression: `list[int | str]`, `list[list[int]]`.
    Nested(Box<Annotation>),

    /// Any other comma-separated form. Decodes as unsupported.
    Tuple(Vec<Annotation>),
}

impl Annotation {
    /// Create a bare name node.
    pub fn name(name: impl Into<String>) -> Self {
        Annotation::Name(name.into())
    }

    /// Create a binary union node.
    pub fn union(left: Annotation, right: Annotation) -> Self {
        Annotation::Union(Box::new(left), Box::new(right))
    }

    /// Create a `list[name]` node.
    pub fn list_of(name: impl Into<String>) -> Self {
        Annotation::Subscript {
            base: "list".to_string(),
            index: SubscriptIndex::Name(name.into()),
        }
    }

    /// Create a `dict[key, value]` node.
    pub fn dict_of(key: impl Into<String>, value: impl Into<String>) -> Self {
        Annotation::Subscript {
            base: "dict".to_string(),
            index: SubscriptIndex::Pair(key.into(), value.into()),
        }
    }

    /// Wrap this annotation in `| None`.
    pub fn optional(self) -> Self {
        Annotation::union(self, Annotation::None)
    }
}

/// A top-level statement in a generated or parsed module.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A module-level documentation string.
    ModuleDoc(String),

    /// An import statement.
    Import(Import),

    /// A simple assignment, e.g. `app = FastAPI()`.
    Assign(Assign),

    /// A class-like type definition.
    TypeDef(TypeDef),

    /// A function definition.
    Callable(Callable),
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// `import module`
    Plain(String),

    /// `from module import a, b`
    From {
        module: String,
        names: Vec<String>,
    },
}

impl Import {
    /// Create a `from module import names` statement.
    pub fn from_module<I, S>(module: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Import::From {
            module: module.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A simple single-target assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// Assignment target name.
    pub target: String,

    /// Assigned expression.
    pub value: Expr,
}

/// A small expression union, sufficient for decorators and assignment values.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare name.
    Name(String),

    /// A string literal.
    Str(String),

    /// Attribute access: `value.attr`.
    Attribute { value: Box<Expr>, attr: String },

    /// A call: `func(args...)`.
    Call { func: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    /// Create a name expression.
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    /// Create an attribute access on this expression.
    pub fn attr(self, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(self),
            attr: attr.into(),
        }
    }

    /// Create a call with the given arguments.
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(self),
            args,
        }
    }
}

/// A class-like type definition.
///
/// An empty field list renders as an explicit `pass` body, never as an
/// omitted body.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Class name.
    pub name: String,

    /// First declared base, if any.
    pub base: Option<String>,

    /// Annotated fields, in declaration order.
    pub fields: Vec<Field>,
}

/// A single annotated field of a type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    pub name: String,

    /// Field annotation.
    pub annotation: Annotation,
}

/// A function definition. Generated callables are stubs with an `...` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    /// Function name.
    pub name: String,

    /// Parameters, in declaration order.
    pub params: Vec<Param>,

    /// Return annotation, if any.
    pub returns: Option<Annotation>,

    /// Leading documentation string, if any.
    pub doc: Option<String>,

    /// Decorator expressions, outermost first.
    pub decorators: Vec<Expr>,

    /// Whether the callable is declared suspend-capable (`async def`).
    pub is_async: bool,
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,

    /// Parameter annotation, if present.
    pub annotation: Option<Annotation>,
}

/// A parsed source module: an optional leading docstring plus statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// The module-level documentation string, if present.
    pub doc: Option<String>,

    /// Top-level statements, in source order.
    pub items: Vec<Stmt>,
}

/// A decorator template with a structural function-name slot.
///
/// Binding produces `object.method("<path>")` where the path is assembled
/// from literal segments and the bound function name. The slot is filled
/// structurally; no serialized text is ever re-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorTemplate {
    /// The object the decorator method is called on, e.g. `app`.
    pub object: String,

    /// The decorator method, e.g. `get`.
    pub method: String,

    /// The route path as a sequence of segments.
    pub path: Vec<PathSegment>,
}

/// One segment of a decorator route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A literal piece of the path.
    Literal(String),

    /// The slot bound to the current function name.
    FunctionName,
}

impl DecoratorTemplate {
    /// Bind the template's name slot to a function name.
    pub fn bind(&self, function_name: &str) -> Expr {
        let path: String = self
            .path
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => text.as_str(),
                PathSegment::FunctionName => function_name,
            })
            .collect();

        Expr::name(&self.object)
            .attr(&self.method)
            .call(vec![Expr::Str(path)])
    }
}
