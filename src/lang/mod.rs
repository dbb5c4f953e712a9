/*!
# Rust Language Module

This Rust module provides lexical analysis of the script language
and the error type shared by every phase.

*/

pub type LineNumber = usize;

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::Scanner;
pub use token::Kind;
pub use token::Token;
pub use token::KEYWORDS;
