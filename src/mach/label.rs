use super::{Address, HashTable};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Label memory
///
/// Maps `@name` to the instruction that defines it. Each name may
/// be written once.

#[derive(Debug, Default)]
pub struct LabelTable {
    table: HashTable<Address>,
}

impl LabelTable {
    pub fn new() -> LabelTable {
        LabelTable::default()
    }

    pub fn add_label(&mut self, addr: Address, name: &str) -> bool {
        self.table.add(name, addr)
    }

    pub fn get_label(&self, name: &str) -> Result<Address> {
        match self.table.get(name) {
            Ok(addr) => Ok(*addr),
            Err(_) => Err(error!(UndefinedLabel; name)),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
