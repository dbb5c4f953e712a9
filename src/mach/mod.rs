/*!
## Rust Machine Module

This Rust module is a compiler and virtual machine for the script language.
Tokens from `lang` are compiled in one pass to a flat `Program` of
instructions which a `Runtime` then evaluates on an operand stack.

*/

pub type Address = usize;

mod compile;
mod function;
mod label;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod table;
mod val;
mod var;

pub use compile::{compile, compile_tokens};
pub use function::Function;
pub use label::LabelTable;
pub use opcode::{Builtin, Opcode};
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use table::HashTable;
pub use val::{Operand, Val};
pub use var::{Array, VarTable};

#[cfg(test)]
mod tests;
