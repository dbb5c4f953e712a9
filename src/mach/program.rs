use super::{Address, Opcode};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program
///
/// An arena of instructions. An `Address` is a stable index into it,
/// so jump targets survive further appends. Forward jumps are built
/// by appending a `Blank` and patching it once the target is known.

#[derive(Debug, Default, Clone)]
pub struct Program {
    ops: Vec<Opcode>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Append an instruction and return its address.
    pub fn push(&mut self, op: Opcode) -> Address {
        self.ops.push(op);
        self.ops.len() - 1
    }

    pub fn blank(&mut self) -> Address {
        self.push(Opcode::Blank)
    }

    pub fn patch(&mut self, addr: Address, op: Opcode) -> Result<()> {
        match self.ops.get_mut(addr) {
            Some(slot) if *slot == Opcode::Blank => {
                *slot = op;
                Ok(())
            }
            Some(_) => Err(error!(InternalError; format!("{} is not blank", addr))),
            None => Err(error!(InternalError; format!("{} out of range", addr))),
        }
    }

    pub fn get(&self, addr: Address) -> Option<&Opcode> {
        self.ops.get(addr)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let width = self.ops.len().to_string().len();
        for (addr, op) in self.ops.iter().enumerate() {
            writeln!(f, "{:>width$} {}", addr, op, width = width)?;
        }
        Ok(())
    }
}
