use super::{HashTable, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Growable array of value slots
///
/// New slots hold integer zero.

const MAX_SLOTS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    slots: Vec<Val>,
}

impl Array {
    pub fn new(size: usize) -> Result<Array> {
        let mut array = Array { slots: vec![] };
        array.allocate(size)?;
        Ok(array)
    }

    /// Resize in place, keeping the first `min(old, new)` slots.
    pub fn allocate(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(error!(BadAllocation; "size must be positive"));
        }
        if size > MAX_SLOTS {
            return Err(error!(OutOfMemory; format!("{} slots", size)));
        }
        if self
            .slots
            .try_reserve(size.saturating_sub(self.slots.len()))
            .is_err()
        {
            return Err(error!(OutOfMemory; format!("{} slots", size)));
        }
        self.slots.resize(size, Val::default());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: i64) -> Result<&Val> {
        let len = self.len();
        Self::slot(index, len).map(move |i| &self.slots[i])
    }

    pub fn get_mut(&mut self, index: i64) -> Result<&mut Val> {
        let len = self.len();
        let i = Self::slot(index, len)?;
        Ok(&mut self.slots[i])
    }

    fn slot(index: i64, len: usize) -> Result<usize> {
        if index < 0 || index as u64 >= len as u64 {
            return Err(error!(OutOfBounds; format!("index {} with length {}", index, len)));
        }
        Ok(index as usize)
    }
}

/// ## Variable memory
///
/// Every variable is an array. Writing to a name that does not exist
/// declares it as a one element array.

#[derive(Debug, Default)]
pub struct VarTable {
    table: HashTable<Array>,
}

impl VarTable {
    pub fn new() -> VarTable {
        VarTable::default()
    }

    pub fn alloc(&mut self, name: &str, size: i64) -> Result<()> {
        if size <= 0 {
            return Err(error!(BadAllocation; format!("{} slots for {}", size, name)));
        }
        let size = size as usize;
        if self.table.find(name) {
            self.table.get_mut(name)?.allocate(size)
        } else {
            self.table.add(name, Array::new(size)?);
            Ok(())
        }
    }

    pub fn free(&mut self, name: &str) -> Result<()> {
        self.table.get_mut(name)?.allocate(1)?;
        self.table.remove(name);
        Ok(())
    }

    pub fn set_value(&mut self, name: &str, index: i64, value: Val) -> Result<()> {
        if !self.table.find(name) {
            self.table.add(name, Array::new(1)?);
        }
        *self.table.get_mut(name)?.get_mut(index)? = value;
        Ok(())
    }

    pub fn get_value(&self, name: &str, index: i64) -> Result<Val> {
        Ok(self.table.get(name)?.get(index)?.clone())
    }

    pub fn len(&self, name: &str) -> Result<usize> {
        Ok(self.table.get(name)?.len())
    }

    pub fn clear(&mut self) {
        self.table = HashTable::new();
    }
}
