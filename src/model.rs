use std::fmt;

/// A literal argument value carried by a data row.
///
/// # Examples
///
/// ```rust
/// use pariksha::model::{Arg, ParamKind};
/// let a = Arg::Int(3);
/// assert_eq!(a.kind(), ParamKind::Int);
/// assert_eq!(a.type_name(), "Int");
/// let s = Arg::from("hello");
/// assert_eq!(s.kind(), ParamKind::Str);
/// let nil = Arg::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Arg {
    #[default]
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// The declared kind of one test-method parameter.
///
/// Data rows are matched structurally against a test's declared parameter
/// kinds: the row's argument count and per-position kinds must both match,
/// otherwise the row is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Nil,
    Int,
    Float,
    Bool,
    Str,
}

impl Arg {
    /// Returns the kind used for structural parameter matching. A nil
    /// argument matches only a nil parameter; it never stands in for a
    /// missing value of another kind.
    pub fn kind(&self) -> ParamKind {
        match self {
            Arg::Nil => ParamKind::Nil,
            Arg::Int(_) => ParamKind::Int,
            Arg::Float(_) => ParamKind::Float,
            Arg::Bool(_) => ParamKind::Bool,
            Arg::Str(_) => ParamKind::Str,
        }
    }

    /// Returns the type name of the argument as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Nil => "Nil",
            Arg::Int(_) => "Int",
            Arg::Float(_) => "Float",
            Arg::Bool(_) => "Bool",
            Arg::Str(_) => "Str",
        }
    }

    /// Returns true if the argument is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Arg::Nil)
    }

    /// Returns the contained integer if this is an Int argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pariksha::model::Arg;
    /// assert_eq!(Arg::Int(7).as_int(), Some(7));
    /// assert_eq!(Arg::Bool(true).as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained float if this is a Float argument.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Arg::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool argument.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained string if this is a Str argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Nil => write!(f, "nil"),
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Float(n) => write!(f, "{}", n),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Int(n as i64)
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Float(n)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

/// `None` becomes a nil argument, `Some` converts its payload.
///
/// # Examples
///
/// ```rust
/// use pariksha::model::Arg;
/// assert_eq!(Arg::from(None::<i64>), Arg::Nil);
/// assert_eq!(Arg::from(Some(4)), Arg::Int(4));
/// ```
impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Arg::Nil,
        }
    }
}

/// Builds a `Vec<Arg>` from literal values.
///
/// # Examples
///
/// ```rust
/// use pariksha::args;
/// use pariksha::model::Arg;
/// let row = args![2, 3, "sum"];
/// assert_eq!(row[2], Arg::Str("sum".to_string()));
/// ```
#[macro_export]
macro_rules! args {
    () => { Vec::<$crate::model::Arg>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::model::Arg::from($value)),+]
    };
}

/// One literal argument tuple attached to a test, yielding one independent
/// invocation. Rows are kept in declaration order.
#[derive(Debug, Clone)]
pub struct DataRow {
    pub args: Vec<Arg>,
    pub description: Option<String>,
}

impl DataRow {
    pub fn new(args: Vec<Arg>) -> Self {
        Self {
            args,
            description: None,
        }
    }

    pub fn described(args: Vec<Arg>, description: impl Into<String>) -> Self {
        Self {
            args,
            description: Some(description.into()),
        }
    }

    /// Label used in per-invocation identities: the row's description if it
    /// has one, otherwise the rendered argument tuple.
    pub fn label(&self) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => {
                let rendered: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
                format!("({})", rendered.join(", "))
            }
        }
    }

    /// Structural match against a declared parameter list: same arity and
    /// the same kind at every position.
    pub fn matches(&self, params: &[ParamKind]) -> bool {
        self.args.len() == params.len()
            && self.args.iter().zip(params).all(|(arg, kind)| arg.kind() == *kind)
    }
}
