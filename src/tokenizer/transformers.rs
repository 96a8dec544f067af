//! Shipped transformers
//!
//!     Each transformer owns the custom kinds it declares. The names below are what fixers look
//!     up through [`Tokens::custom_kind`](crate::tokenizer::tokens::Tokens::custom_kind).

pub mod namespace_operator;
pub mod use_keyword;

pub use namespace_operator::NamespaceOperatorTransformer;
pub use use_keyword::UseTransformer;

/// `use` importing a trait inside a class-like body.
pub const USE_TRAIT: &str = "use_trait";

/// `use` listing variables captured by a closure.
pub const USE_LAMBDA: &str = "use_lambda";

/// `namespace` used as the relative-name operator (`namespace\foo()`).
pub const NAMESPACE_OPERATOR: &str = "namespace_operator";
