use super::{Address, Val};

/// ## Virtual machine instruction set
///
/// The virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `$a = 3 * $b;` compiles to
/// `"$a" 0 [] 3 "$b" 0 [] VAR * =`
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    /// Push a copy of the literal value.
    Literal(Val),
    /// Push a reference to an instruction.
    Label(Address),
    /// Pop a label and continue there.
    Jump,
    /// Pop a boolean, then a label. Continue at the label if false.
    JumpFalse,
    /// Pop a fixed number of operands, push at most one result.
    Call(Builtin),
    /// Placeholder for a jump target not yet known. Never executed.
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Builtin {
    // *** Program structure
    Nop,
    Lab,

    // *** Variables
    Index,
    Var,
    Assign,
    Alloc,
    Free,
    Inc,
    Dec,

    // *** Statements
    Print,
    Scan,

    // *** Expression operations
    Neg,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Not,
    And,
    Or,
    Xor,
    Equ,

    // *** Casts
    CastBool,
    CastInt,
    CastDouble,
    CastString,

    // *** Built-in functions
    Rand,
    Abs,
    Pow,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Exp,
    Log,
    Ceil,
    Floor,
    Trunc,
    Round,
    Max,
    Min,
}

impl Builtin {
    /// The name a script uses; runtime failures are reported under it.
    pub fn name(&self) -> &'static str {
        use Builtin::*;
        match self {
            Nop => "nop",
            Lab => "goto",
            Index => "[]",
            Var => "var",
            Assign => "=",
            Alloc => "alloc",
            Free => "free",
            Inc => "inc",
            Dec => "dec",
            Print => "print",
            Scan => "scan",
            Neg => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Add => "+",
            Sub => "-",
            Eq => "==",
            NotEq => "!=",
            Lt => "<",
            LtEq => "<=",
            Gt => ">",
            GtEq => ">=",
            Not => "not",
            And => "and",
            Or => "or",
            Xor => "xor",
            Equ => "equ",
            CastBool => "bool",
            CastInt => "int",
            CastDouble => "double",
            CastString => "string",
            Rand => "?rand",
            Abs => "?abs",
            Pow => "?pow",
            Sqrt => "?sqrt",
            Sin => "?sin",
            Cos => "?cos",
            Tan => "?tan",
            Asin => "?asin",
            Acos => "?acos",
            Atan => "?atan",
            Atan2 => "?atan2",
            Exp => "?exp",
            Log => "?log",
            Ceil => "?ceil",
            Floor => "?floor",
            Trunc => "?trunc",
            Round => "?round",
            Max => "?max",
            Min => "?min",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Literal(Val::Text(s)) => write!(f, "{:?}", s),
            Literal(v) => write!(f, "{}", v),
            Label(a) => write!(f, "LABEL({})", a),
            Jump => write!(f, "JUMP"),
            JumpFalse => write!(f, "JUMPFALSE"),
            Call(b) => write!(f, "{}", b.name().to_ascii_uppercase()),
            Blank => write!(f, "BLANK"),
        }
    }
}

/*
Code generation notes.

// $r = 10 + $a * 2;
"$r" 0 []
10
"$a" 0 [] VAR
2
*
+
=

// if c { then } else { other }
LABEL(:else)      -- patched blank
-- eval c
JUMPFALSE
-- then
LABEL(:done)      -- patched blank
JUMP
:else NOP
-- other
:done NOP

// while c { body }
:again NOP
LABEL(:done)      -- patched blank
-- eval c
JUMPFALSE
-- body
LABEL(:again)
JUMP
:done NOP

// repeat { body } until c
:again NOP
-- body
LABEL(:again)
-- eval c
JUMPFALSE

// goto @l;
"@l"
GOTO              -- label table lookup
JUMP

// print a, endl;
-- eval a
STRING
"\n"
PRINT             -- pops until the stack is empty
*/
