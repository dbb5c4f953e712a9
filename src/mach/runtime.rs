use super::{
    Address, Builtin, Function, LabelTable, Opcode, Operand, Operation, Program, Stack, Val,
    VarTable,
};
use crate::error;
use crate::lang::Error;
use rand::rngs::StdRng;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Virtual machine
///
/// A `Runtime` owns everything one run of a script needs. The caller
/// drives it with `execute` and reacts to the returned `Event`.

pub struct Runtime {
    prog: Program,
    labels: LabelTable,
    vars: VarTable,
    stack: Stack<Operand>,
    pc: Option<Address>,
    scan: Option<(Rc<str>, i64)>,
    failure: Option<Error>,
    rng: StdRng,
}

/// Events are used to communicate with the caller of `execute`.
#[derive(Debug, PartialEq)]
pub enum Event {
    /// The program ended or was torn down.
    Stopped,
    /// The cycle budget ran out. Call `execute` again.
    Running,
    /// Write this text to standard output.
    Print(String),
    /// A `scan` is waiting. Supply the line with `enter`.
    Input,
    /// The run failed and has been torn down.
    Error(Error),
}

impl Runtime {
    pub fn new(prog: Program, labels: LabelTable, rng: StdRng) -> Runtime {
        Runtime {
            prog,
            labels,
            vars: VarTable::new(),
            stack: Stack::new("operand stack overflow"),
            pc: Some(0),
            scan: None,
            failure: None,
            rng,
        }
    }

    /// Answer a pending `scan`. One trailing newline is removed.
    pub fn enter(&mut self, line: &str) {
        if let Some((name, index)) = self.scan.take() {
            let line = line.strip_suffix('\n').unwrap_or(line);
            if let Err(error) = self.vars.set_value(&name, index, Val::from(line)) {
                self.abort(error.in_operator(Builtin::Scan.name()));
            }
        }
    }

    /// Fail the run from outside. The error is reported by the next `execute`.
    pub fn abort(&mut self, error: Error) {
        self.teardown();
        self.failure = Some(error);
    }

    pub fn interrupt(&mut self) {
        if self.is_running() {
            self.abort(error!(Interrupted));
        }
    }

    pub fn is_running(&self) -> bool {
        self.scan.is_some() || matches!(self.pc, Some(pc) if pc < self.prog.len())
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(error) = self.failure.take() {
            return Event::Error(error);
        }
        if self.scan.is_some() {
            return Event::Input;
        }
        for _ in 0..cycles {
            let pc = match self.pc {
                Some(pc) if pc < self.prog.len() => pc,
                _ => {
                    self.teardown();
                    return Event::Stopped;
                }
            };
            match self.step(pc) {
                Ok(None) => {}
                Ok(Some(event)) => return event,
                Err(error) => {
                    self.teardown();
                    return Event::Error(error);
                }
            }
        }
        Event::Running
    }

    fn teardown(&mut self) {
        self.pc = None;
        self.scan = None;
        self.stack.clear();
        self.vars.clear();
    }

    fn step(&mut self, pc: Address) -> Result<Option<Event>> {
        let op = match self.prog.get(pc) {
            Some(op) => op.clone(),
            None => return Err(error!(InternalError; "instruction out of range")),
        };
        self.pc = Some(pc + 1);
        match op {
            Opcode::Literal(val) => self.stack.push(Operand::Value(val))?,
            Opcode::Label(addr) => self.stack.push(Operand::Label(addr))?,
            Opcode::Jump => {
                let addr = self.pop_label().map_err(|e| e.in_operator("jump"))?;
                self.pc = Some(addr);
            }
            Opcode::JumpFalse => {
                let (cond, addr) = self.pop_branch().map_err(|e| e.in_operator("jump"))?;
                if !cond {
                    self.pc = Some(addr);
                }
            }
            Opcode::Call(builtin) => {
                return self.call(builtin).map_err(|e| e.in_operator(builtin.name()));
            }
            Opcode::Blank => return Err(error!(InternalError; "unpatched jump")),
        }
        Ok(None)
    }

    fn call(&mut self, builtin: Builtin) -> Result<Option<Event>> {
        use Builtin::*;
        match builtin {
            Nop => {}
            Lab => {
                let name = self.pop_name()?;
                let addr = self.labels.get_label(&name)?;
                self.stack.push(Operand::Label(addr))?;
            }
            Index => {
                let index = match self.pop_val()? {
                    Val::Integer(n) => n,
                    val => return Err(error!(TypeMismatch; format!("index is {}", val.type_name()))),
                };
                let name = self.pop_name()?;
                self.stack.push(Operand::Var(name, index))?;
            }
            Var => {
                let (name, index) = self.pop_address()?;
                let val = self.vars.get_value(&name, index)?;
                self.stack.push(Operand::Value(val))?;
            }
            Assign => {
                let val = self.pop_val()?;
                let (name, index) = self.pop_address()?;
                self.vars.set_value(&name, index, val)?;
            }
            Alloc => {
                let size = match self.pop_val()? {
                    Val::Integer(n) => n,
                    val => return Err(error!(TypeMismatch; format!("size is {}", val.type_name()))),
                };
                let name = self.pop_name()?;
                self.vars.alloc(&name, size)?;
            }
            Free => {
                let name = self.pop_name()?;
                self.vars.free(&name)?;
            }
            Inc => self.step_slot(1)?,
            Dec => self.step_slot(-1)?,
            Print => return Ok(Some(Event::Print(self.pop_all()?))),
            Scan => {
                self.scan = Some(self.pop_address()?);
                return Ok(Some(Event::Input));
            }
            Neg => self.unary(Operation::negate)?,
            Not => self.unary(Operation::not)?,
            Mul => self.binary(Operation::multiply)?,
            Div => self.binary(Operation::divide)?,
            Mod => self.binary(Operation::modulus)?,
            Add => self.binary(Operation::sum)?,
            Sub => self.binary(Operation::subtract)?,
            Eq => self.binary(Operation::equal)?,
            NotEq => self.binary(Operation::not_equal)?,
            Lt => self.binary(Operation::less)?,
            LtEq => self.binary(Operation::less_equal)?,
            Gt => self.binary(Operation::greater)?,
            GtEq => self.binary(Operation::greater_equal)?,
            And => self.binary(Operation::and)?,
            Or => self.binary(Operation::or)?,
            Xor => self.binary(Operation::xor)?,
            Equ => self.binary(Operation::equivalent)?,
            CastBool => self.unary(|v| Ok(Function::cast_bool(v)))?,
            CastInt => self.unary(|v| Ok(Function::cast_int(v)))?,
            CastDouble => self.unary(|v| Ok(Function::cast_double(v)))?,
            CastString => self.unary(|v| Ok(Function::cast_string(v)))?,
            Rand => {
                let val = self.pop_val()?;
                let val = Function::rand(val, &mut self.rng)?;
                self.stack.push(Operand::Value(val))?;
            }
            Abs => self.unary(Function::abs)?,
            Pow => self.binary(|l, r| Function::real_2(l, r, f64::powf))?,
            Sqrt => self.unary(|v| Function::real(v, f64::sqrt))?,
            Sin => self.unary(|v| Function::real(v, f64::sin))?,
            Cos => self.unary(|v| Function::real(v, f64::cos))?,
            Tan => self.unary(|v| Function::real(v, f64::tan))?,
            Asin => self.unary(|v| Function::real(v, f64::asin))?,
            Acos => self.unary(|v| Function::real(v, f64::acos))?,
            Atan => self.unary(|v| Function::real(v, f64::atan))?,
            Atan2 => self.binary(|l, r| Function::real_2(l, r, f64::atan2))?,
            Exp => self.unary(|v| Function::real(v, f64::exp))?,
            Log => self.unary(|v| Function::real(v, f64::ln))?,
            Ceil => self.unary(|v| Function::rounding(v, f64::ceil))?,
            Floor => self.unary(|v| Function::rounding(v, f64::floor))?,
            Trunc => self.unary(|v| Function::rounding(v, f64::trunc))?,
            Round => self.unary(|v| Function::rounding(v, f64::round))?,
            Max => self.binary(Function::max)?,
            Min => self.binary(Function::min)?,
        }
        Ok(None)
    }

    fn unary(&mut self, f: impl FnOnce(Val) -> Result<Val>) -> Result<()> {
        let val = self.pop_val()?;
        self.stack.push(Operand::Value(f(val)?))
    }

    fn binary(&mut self, f: impl FnOnce(Val, Val) -> Result<Val>) -> Result<()> {
        let rhs = self.pop_val()?;
        let lhs = self.pop_val()?;
        self.stack.push(Operand::Value(f(lhs, rhs)?))
    }

    fn step_slot(&mut self, delta: i64) -> Result<()> {
        let (name, index) = self.pop_address()?;
        match self.vars.get_value(&name, index)? {
            Val::Integer(n) => self
                .vars
                .set_value(&name, index, Val::Integer(n.wrapping_add(delta))),
            val => Err(error!(TypeMismatch; format!("{} is {}", name, val.type_name()))),
        }
    }

    /// Print takes every operand left on the stack, in source order.
    fn pop_all(&mut self) -> Result<String> {
        let mut vals = vec![];
        while !self.stack.is_empty() {
            vals.push(self.pop_val()?);
        }
        let mut s = String::new();
        for val in vals.iter().rev() {
            s.push_str(&val.to_string());
        }
        Ok(s)
    }

    fn pop_val(&mut self) -> Result<Val> {
        match self.stack.pop()? {
            Operand::Value(val) => Ok(val),
            operand => Err(error!(TypeMismatch; format!("value expected, found {}", operand))),
        }
    }

    fn pop_name(&mut self) -> Result<Rc<str>> {
        match self.pop_val()? {
            Val::Text(name) => Ok(name),
            val => Err(error!(TypeMismatch; format!("name expected, found {}", val.type_name()))),
        }
    }

    fn pop_address(&mut self) -> Result<(Rc<str>, i64)> {
        match self.stack.pop()? {
            Operand::Var(name, index) => Ok((name, index)),
            operand => Err(error!(TypeMismatch; format!("variable expected, found {}", operand))),
        }
    }

    fn pop_label(&mut self) -> Result<Address> {
        match self.stack.pop()? {
            Operand::Label(addr) => Ok(addr),
            operand => Err(error!(TypeMismatch; format!("label expected, found {}", operand))),
        }
    }

    fn pop_branch(&mut self) -> Result<(bool, Address)> {
        let cond = match self.pop_val()? {
            Val::Bool(b) => b,
            val => return Err(error!(TypeMismatch; format!("condition is {}", val.type_name()))),
        };
        Ok((cond, self.pop_label()?))
    }
}
