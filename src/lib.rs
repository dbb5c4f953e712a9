//! # RPN
//!
//! A small imperative scripting language compiled to reverse polish
//! notation and run on a stack machine.
//!
//! Install with `cargo install rpn-lang` then run a script with
//! `rpn script.rpn`. See the language chapter for the details.
//! ```text
//! program "hello";
//! begin {
//!     print "hello world", endl;
//! } end
//! ```
//!
//! The library is usable on its own. `mach::compile` turns source into a
//! `mach::Program` and a `mach::Runtime` executes it a slice at a time.

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod _Language;

pub mod lang;
pub mod mach;
pub mod term;
