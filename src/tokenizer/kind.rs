//! Token kinds
//!
//!     Every token carries a [`Kind`]. Native kinds are the fixed set produced by the PHP
//!     lexical adapter. Custom kinds are allocated at runtime by transformers through the
//!     [`CustomKinds`] registry and travel inside [`Kind::Custom`], so hot paths compare small
//!     copyable values instead of names.
//!
//!     Single-character punctuation such as `(` or `;` has no kind of its own and is tagged
//!     [`Kind::Char`]; such tokens are matched by text.

use std::collections::HashMap;
use std::fmt;

/// Identifier of a custom kind, allocated by [`CustomKinds::reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomKind(pub u16);

/// Kind tag of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    Whitespace,
    Comment,
    DocComment,
    Variable,
    String,
    Number,
    Identifier,

    // Keywords
    Abstract,
    Array,
    As,
    Break,
    Case,
    Catch,
    Class,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    Do,
    Echo,
    Else,
    ElseIf,
    Extends,
    Final,
    Finally,
    Fn,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    If,
    Implements,
    Include,
    IncludeOnce,
    InstanceOf,
    InsteadOf,
    Interface,
    Isset,
    List,
    Match,
    Namespace,
    New,
    Print,
    Private,
    Protected,
    Public,
    Require,
    RequireOnce,
    Return,
    Static,
    Switch,
    Throw,
    Trait,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,

    /// `#[` opening an attribute.
    AttributeStart,

    // Multi-character operators
    DoubleColon,
    ObjectOperator,
    DoubleArrow,
    NsSeparator,
    Ellipsis,
    Operator,

    /// Single-character punctuation.
    Char,

    /// Kind introduced by a transformer.
    Custom(CustomKind),
}

/// Class-like declarations.
pub const CLASSY: &[Kind] = &[Kind::Class, Kind::Interface, Kind::Trait];

/// Keywords that open a control structure with a header block.
pub const CONTROL_STRUCTURES: &[Kind] = &[
    Kind::For,
    Kind::Foreach,
    Kind::If,
    Kind::Switch,
    Kind::While,
];

/// Tokens that start an element a documentation comment may legitimately describe.
pub const STRUCTURAL_ELEMENTS: &[Kind] = &[
    Kind::Class,
    Kind::Interface,
    Kind::Trait,
    Kind::Private,
    Kind::Protected,
    Kind::Public,
    Kind::Function,
    Kind::Abstract,
    Kind::Const,
    Kind::Namespace,
    Kind::Require,
    Kind::RequireOnce,
    Kind::Include,
    Kind::IncludeOnce,
    Kind::Final,
    Kind::Static,
];

impl Kind {
    /// Classifies identifier text as a keyword, case-insensitively.
    pub fn keyword(text: &str) -> Option<Kind> {
        let kind = match text.to_ascii_lowercase().as_str() {
            "abstract" => Kind::Abstract,
            "array" => Kind::Array,
            "as" => Kind::As,
            "break" => Kind::Break,
            "case" => Kind::Case,
            "catch" => Kind::Catch,
            "class" => Kind::Class,
            "clone" => Kind::Clone,
            "const" => Kind::Const,
            "continue" => Kind::Continue,
            "declare" => Kind::Declare,
            "default" => Kind::Default,
            "do" => Kind::Do,
            "echo" => Kind::Echo,
            "else" => Kind::Else,
            "elseif" => Kind::ElseIf,
            "extends" => Kind::Extends,
            "final" => Kind::Final,
            "finally" => Kind::Finally,
            "fn" => Kind::Fn,
            "for" => Kind::For,
            "foreach" => Kind::Foreach,
            "function" => Kind::Function,
            "global" => Kind::Global,
            "goto" => Kind::Goto,
            "if" => Kind::If,
            "implements" => Kind::Implements,
            "include" => Kind::Include,
            "include_once" => Kind::IncludeOnce,
            "instanceof" => Kind::InstanceOf,
            "insteadof" => Kind::InsteadOf,
            "interface" => Kind::Interface,
            "isset" => Kind::Isset,
            "list" => Kind::List,
            "match" => Kind::Match,
            "namespace" => Kind::Namespace,
            "new" => Kind::New,
            "print" => Kind::Print,
            "private" => Kind::Private,
            "protected" => Kind::Protected,
            "public" => Kind::Public,
            "require" => Kind::Require,
            "require_once" => Kind::RequireOnce,
            "return" => Kind::Return,
            "static" => Kind::Static,
            "switch" => Kind::Switch,
            "throw" => Kind::Throw,
            "trait" => Kind::Trait,
            "try" => Kind::Try,
            "unset" => Kind::Unset,
            "use" => Kind::Use,
            "var" => Kind::Var,
            "while" => Kind::While,
            "yield" => Kind::Yield,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_custom(self) -> bool {
        matches!(self, Kind::Custom(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Custom(CustomKind(id)) => write!(f, "Custom#{}", id),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Registry of custom kinds, name to id.
///
/// Ids are handed out sequentially in reservation order, so a fixed transformer pipeline always
/// produces the same ids. Reserving a name twice returns the first id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomKinds {
    ids: HashMap<String, CustomKind>,
    names: Vec<String>,
}

impl CustomKinds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, name: &str) -> Kind {
        if let Some(id) = self.ids.get(name) {
            return Kind::Custom(*id);
        }
        let id = CustomKind(self.names.len() as u16);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Kind::Custom(id)
    }

    pub fn get(&self, name: &str) -> Option<Kind> {
        self.ids.get(name).copied().map(Kind::Custom)
    }

    pub fn name_of(&self, kind: Kind) -> Option<&str> {
        match kind {
            Kind::Custom(CustomKind(id)) => self.names.get(id as usize).map(String::as_str),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
