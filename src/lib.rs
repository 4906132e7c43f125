//! # rulelex - A composable, rule-driven lexer
//!
//! The goal of this crate is to turn raw text into an ordered sequence of typed
//! tokens by combining small matching rules, instead of hand-writing a monolithic
//! scanner for every notation. A lexer is nothing more than an ordered list of
//! [rules](rules::SyntaxRule) plus a set of characters to skip between tokens.
//!
//! ```rust
//! use rulelex::lexer::DefaultLexer;
//! use rulelex::rules::{IdentifierRule, NumberRule, WordRule, boxed};
//!
//! let lexer = DefaultLexer::new(vec![
//!     boxed(WordRule::new("keyword", "if")),
//!     boxed(IdentifierRule::new()),
//!     boxed(NumberRule::new()),
//! ]);
//! let tokens = lexer.tokenize("if x 12").expect("valid input");
//! assert_eq!(tokens.len(), 3);
//! ```
//!
//! ## Contracts
//!
//! - Every primitive rule is atomic: when it does not match, the cursor of the
//!   [character stream](stream::CharacterStream) stays where it was. This is what
//!   lets the [driver](lexer::DefaultLexer) try rules one after another without
//!   any backtracking machinery.
//! - Rule order is significant and chosen by the caller. Literal words and
//!   comments have to come before bare identifiers, or they never fire.
//! - Some rules commit once they have seen an opening marker (a quote, a comment
//!   start). Running out of input past that point is a fatal
//!   [error](errors::LexingError), not a missed match.
//!
//! ## Extensions
//!
//! - Tokens carry a [`Span`](types::Span) of the characters they consumed.
//! - [`CompoundRule`](rules::CompoundRule) restores the cursor when one of its
//!   parts does not match, so it is as atomic as the primitive rules.
//! - A couple of ready-made rule lists live in [presets].
#![deny(
    warnings,
)]
#![deny(
    future_incompatible,
    keyword_idents,
    let_underscore,
    nonstandard_style,
    refining_impl_trait,
)]
#![deny(
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2024_compatibility,
)]
#![deny(
    clippy::all,
    clippy::pedantic,
)]
#![deny(
    clippy::alloc_instead_of_core,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::else_if_without_else,
    clippy::empty_structs_with_brackets,
    clippy::error_impl_error,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::indexing_slicing,
    clippy::let_underscore_must_use,
    clippy::map_err_ignore,
    clippy::missing_assert_message,
    clippy::missing_docs_in_private_items,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::rc_buffer,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::self_named_module_files,
    clippy::std_instead_of_core,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_slice,
    clippy::string_to_string,
    clippy::todo,
    clippy::try_err,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::verbose_file_reads,
    clippy::wildcard_enum_match_arm
)]
#![warn(unused)]
#![allow(
    edition_2024_expr_fragment_specifier,
    reason = "the macros expect the 2024 edition behaviour."
)]

// Shared functionality
pub mod errors;
pub mod types;
mod util;

// Engine
pub mod lexer;
pub mod rules;
pub mod stream;
pub mod token;

// Ready-made rule lists
pub mod presets;
