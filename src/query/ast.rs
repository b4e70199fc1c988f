//! Abstract syntax tree types for filter expressions.

/// A step in a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Named member (`.name` or `['name']`)
    Child(String),
    /// Array element (`[0]`, `[-1]`)
    Index(isize),
    /// All children (`[]`, `[*]` or `.*`)
    Wildcard,
    /// Recursive descent (`..name` or `..`)
    RecursiveDescent(Option<String>),
    /// Array slice (`[start:end]`)
    Slice(Option<isize>, Option<isize>),
    /// Object projection (`['a','b']`)
    MultiProperty(Vec<String>),
}

impl Segment {
    /// True for segments that turn one value into many.
    pub fn fans_out(&self) -> bool {
        matches!(self, Segment::Wildcard | Segment::RecursiveDescent(_))
    }
}

/// Builtin functions usable as pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Keys,
    Values,
    Length,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keys" => Some(Builtin::Keys),
            "values" => Some(Builtin::Values),
            "length" => Some(Builtin::Length),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Keys => "keys",
            Builtin::Values => "values",
            Builtin::Length => "length",
        }
    }
}

/// One `|`-separated stage of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Path(Vec<Segment>),
    Builtin(Builtin),
}

/// A complete filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub stages: Vec<Stage>,
}

impl Query {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// True when the query returns its input unchanged.
    pub fn is_identity(&self) -> bool {
        self.stages
            .iter()
            .all(|stage| matches!(stage, Stage::Path(segments) if segments.is_empty()))
    }
}
