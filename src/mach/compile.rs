use super::{Address, Builtin, Function, LabelTable, Opcode, Program, Stack, Val};
use crate::error;
use crate::lang::{lex, Error, Kind, Token};

type Result<T> = std::result::Result<T, Error>;

const RELATIONS: [(&str, Builtin); 6] = [
    ("==", Builtin::Eq),
    ("!=", Builtin::NotEq),
    ("<", Builtin::Lt),
    ("<=", Builtin::LtEq),
    (">", Builtin::Gt),
    (">=", Builtin::GtEq),
];

/// Lex and compile a whole script.
pub fn compile(source: &str) -> Result<(Program, LabelTable)> {
    let tokens = lex(source)?;
    compile_tokens(&tokens)
}

/// Compile tokens straight to instructions. There is no syntax tree;
/// every production appends its code as soon as it is recognized.
pub fn compile_tokens(tokens: &[Token]) -> Result<(Program, LabelTable)> {
    if tokens.is_empty() {
        return Err(error!(SyntaxError; "no input tokens"));
    }
    let mut compiler = Compiler {
        tokens,
        index: 0,
        exhausted: false,
        prog: Program::new(),
        labels: LabelTable::new(),
        pending: Stack::new("expression too complex"),
    };
    compiler.program()?;
    debug_assert!(compiler.pending.is_empty());
    Ok((compiler.prog, compiler.labels))
}

struct Compiler<'a> {
    tokens: &'a [Token],
    index: usize,
    exhausted: bool,
    prog: Program,
    labels: LabelTable,
    pending: Stack<Builtin>,
}

impl<'a> Compiler<'a> {
    fn token(&self) -> &'a Token {
        &self.tokens[self.index]
    }

    fn is(&self, s: &str) -> bool {
        self.token().is(s)
    }

    /// Advance, staying on the final token once the input runs out.
    fn next(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        } else {
            self.exhausted = true;
        }
    }

    fn expect(&mut self, s: &str, what: &str) -> Result<()> {
        if !self.is(s) {
            return Err(self.expected(what));
        }
        self.next();
        Ok(())
    }

    fn expected(&self, what: &str) -> Error {
        error!(SyntaxError; format!("expected {}", what)).at_token(self.token())
    }

    fn emit(&mut self, op: Opcode) -> Address {
        self.prog.push(op)
    }

    fn call(&mut self, builtin: Builtin) -> Address {
        self.emit(Opcode::Call(builtin))
    }

    fn text(&mut self, s: &str) -> Address {
        self.emit(Opcode::Literal(Val::from(s)))
    }

    /// Resolve a blank to a no-op appended here.
    fn land(&mut self, blank: Address) -> Result<()> {
        let target = self.call(Builtin::Nop);
        self.prog.patch(blank, Opcode::Label(target))
    }

    fn defer(&mut self, builtin: Builtin) -> Result<()> {
        self.pending.push(builtin)?;
        self.next();
        Ok(())
    }

    fn resolve(&mut self) -> Result<()> {
        let builtin = self.pending.pop()?;
        self.call(builtin);
        Ok(())
    }

    fn program(&mut self) -> Result<()> {
        self.expect("program", "keyword 'program'")?;
        if self.token().kind != Kind::StringLiteral {
            return Err(self.expected("program name"));
        }
        self.next();
        self.expect(";", "';'")?;
        self.expect("begin", "keyword 'begin'")?;
        self.block()?;
        if !self.is("end") {
            return Err(self.expected("keyword 'end'"));
        }
        if self.index + 1 < self.tokens.len() {
            return Err(self.expected("end of file"));
        }
        Ok(())
    }

    fn block(&mut self) -> Result<()> {
        self.expect("{", "'{'")?;
        while !self.is("}") {
            if self.exhausted {
                return Err(error!(SyntaxError; "unterminated block").at_token(self.token()));
            }
            self.statement()?;
        }
        self.next();
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        let token = self.token();
        if token.kind == Kind::Keyword {
            let statement: fn(&mut Self) -> Result<()> = match token.text.as_str() {
                "if" => Self::r#if,
                "while" => Self::r#while,
                "repeat" => Self::r#repeat,
                "goto" => Self::r#goto,
                "alloc" => Self::r#alloc,
                "free" => Self::r#free,
                "print" => Self::r#print,
                "scan" => |this: &mut Self| this.addressed(Builtin::Scan),
                "inc" => |this: &mut Self| this.addressed(Builtin::Inc),
                "dec" => |this: &mut Self| this.addressed(Builtin::Dec),
                _ => return Err(self.expected("operator or label")),
            };
            self.next();
            return statement(self);
        }
        if token.is_variable() {
            return self.r#assign();
        }
        if token.is_label() {
            return self.r#label();
        }
        Err(self.expected("operator or label"))
    }

    fn r#if(&mut self) -> Result<()> {
        let skip_then = self.prog.blank();
        self.expression()?;
        self.emit(Opcode::JumpFalse);
        self.block()?;
        if self.is("else") || self.is("elseif") {
            let chained = self.is("elseif");
            self.next();
            let skip_else = self.prog.blank();
            self.emit(Opcode::Jump);
            self.land(skip_then)?;
            if chained {
                self.r#if()?;
            } else {
                self.block()?;
            }
            self.land(skip_else)
        } else {
            self.land(skip_then)
        }
    }

    fn r#while(&mut self) -> Result<()> {
        let again = self.call(Builtin::Nop);
        let done = self.prog.blank();
        self.expression()?;
        self.emit(Opcode::JumpFalse);
        self.block()?;
        self.emit(Opcode::Label(again));
        self.emit(Opcode::Jump);
        self.land(done)
    }

    fn r#repeat(&mut self) -> Result<()> {
        let again = self.call(Builtin::Nop);
        self.block()?;
        self.emit(Opcode::Label(again));
        self.expect("until", "keyword 'until'")?;
        self.expression()?;
        self.emit(Opcode::JumpFalse);
        if self.is(";") {
            self.next();
        }
        Ok(())
    }

    fn r#goto(&mut self) -> Result<()> {
        let token = self.token();
        if !token.is_label() {
            return Err(self.expected("label"));
        }
        self.text(&token.text);
        self.next();
        self.call(Builtin::Lab);
        self.emit(Opcode::Jump);
        self.expect(";", "';'")
    }

    fn r#alloc(&mut self) -> Result<()> {
        let token = self.token();
        if !token.is_variable() {
            return Err(self.expected("variable"));
        }
        self.text(&token.text);
        self.next();
        if self.is(",") {
            self.next();
        }
        self.expression()?;
        self.call(Builtin::Alloc);
        self.expect(";", "';'")
    }

    fn r#free(&mut self) -> Result<()> {
        let token = self.token();
        if !token.is_variable() {
            return Err(self.expected("variable"));
        }
        self.text(&token.text);
        self.next();
        self.call(Builtin::Free);
        self.expect(";", "';'")
    }

    fn r#print(&mut self) -> Result<()> {
        loop {
            if self.is("endl") {
                self.text("\n");
                self.next();
            } else {
                self.expression()?;
                self.call(Builtin::CastString);
            }
            if !self.is(",") {
                break;
            }
            self.next();
        }
        self.call(Builtin::Print);
        self.expect(";", "';'")
    }

    /// `scan`, `inc` and `dec` all take one addressed slot.
    fn addressed(&mut self, builtin: Builtin) -> Result<()> {
        self.address()?;
        self.expect(";", "';'")?;
        self.call(builtin);
        Ok(())
    }

    fn r#assign(&mut self) -> Result<()> {
        self.address()?;
        self.expect("=", "operator '='")?;
        self.expression()?;
        self.call(Builtin::Assign);
        self.expect(";", "';'")
    }

    fn r#label(&mut self) -> Result<()> {
        let token = self.token();
        let addr = self.call(Builtin::Nop);
        if !self.labels.add_label(addr, &token.text) {
            return Err(error!(DuplicateLabel).at_token(token));
        }
        self.next();
        self.expect(":", "':' after label")
    }

    /// `$name` with an optional `[index]`, defaulting to element zero.
    fn address(&mut self) -> Result<()> {
        let token = self.token();
        if !token.is_variable() {
            return Err(self.expected("variable"));
        }
        self.text(&token.text);
        self.next();
        if self.is("[") {
            self.next();
            self.expression()?;
            self.expect("]", "']'")?;
        } else {
            self.emit(Opcode::Literal(Val::Integer(0)));
        }
        self.call(Builtin::Index);
        Ok(())
    }

    fn expression(&mut self) -> Result<()> {
        self.disjunction()?;
        while self.is("~") || self.is("equ") {
            self.defer(Builtin::Equ)?;
            self.disjunction()?;
            self.resolve()?;
        }
        Ok(())
    }

    fn disjunction(&mut self) -> Result<()> {
        self.conjunction()?;
        loop {
            let builtin = if self.is("|") || self.is("or") {
                Builtin::Or
            } else if self.is("^") || self.is("xor") {
                Builtin::Xor
            } else {
                return Ok(());
            };
            self.defer(builtin)?;
            self.conjunction()?;
            self.resolve()?;
        }
    }

    fn conjunction(&mut self) -> Result<()> {
        self.relation()?;
        while self.is("&") || self.is("and") {
            self.defer(Builtin::And)?;
            self.relation()?;
            self.resolve()?;
        }
        Ok(())
    }

    /// Relational operators do not chain.
    fn relation(&mut self) -> Result<()> {
        self.sum()?;
        let builtin = match RELATIONS.iter().find(|(s, _)| self.is(s)) {
            Some((_, builtin)) => *builtin,
            None => return Ok(()),
        };
        self.defer(builtin)?;
        self.sum()?;
        self.resolve()
    }

    fn sum(&mut self) -> Result<()> {
        self.product()?;
        loop {
            let builtin = if self.is("+") {
                Builtin::Add
            } else if self.is("-") {
                Builtin::Sub
            } else {
                return Ok(());
            };
            self.defer(builtin)?;
            self.product()?;
            self.resolve()?;
        }
    }

    fn product(&mut self) -> Result<()> {
        self.unary()?;
        loop {
            let builtin = if self.is("*") {
                Builtin::Mul
            } else if self.is("/") {
                Builtin::Div
            } else if self.is("%") {
                Builtin::Mod
            } else {
                return Ok(());
            };
            self.defer(builtin)?;
            self.unary()?;
            self.resolve()?;
        }
    }

    fn unary(&mut self) -> Result<()> {
        let builtin = if self.is("-") {
            Builtin::Neg
        } else if self.is("!") || self.is("not") {
            Builtin::Not
        } else {
            return self.primary();
        };
        self.defer(builtin)?;
        self.primary()?;
        self.resolve()
    }

    fn primary(&mut self) -> Result<()> {
        let token = self.token();
        match token.kind {
            Kind::Identifier if token.is_variable() => {
                self.address()?;
                self.call(Builtin::Var);
                Ok(())
            }
            Kind::Identifier if token.is_function() => self.function(),
            Kind::Keyword if Function::is_cast(&token.text) => self.function(),
            Kind::Keyword if token.is("true") || token.is("false") => {
                self.emit(Opcode::Literal(Val::Bool(token.is("true"))));
                self.next();
                Ok(())
            }
            Kind::StringLiteral => {
                self.text(&token.text);
                self.next();
                Ok(())
            }
            Kind::Constant => {
                let val = constant(token)?;
                self.emit(Opcode::Literal(val));
                self.next();
                Ok(())
            }
            _ if token.is("(") => {
                self.next();
                self.expression()?;
                self.expect(")", "closing bracket")
            }
            _ => Err(self.expected("operand")),
        }
    }

    fn function(&mut self) -> Result<()> {
        let token = self.token();
        let (builtin, arity) = match Function::builtin_and_arity(&token.text) {
            Some(found) => found,
            None => return Err(error!(UnknownFunction).at_token(token)),
        };
        self.defer(builtin)?;
        self.expect("(", "'(' before arguments")?;
        let mut len = 0;
        if !self.is(")") {
            self.expression()?;
            len += 1;
            while self.is(",") {
                self.next();
                self.expression()?;
                len += 1;
            }
        }
        self.expect(")", "')' after arguments")?;
        if len != arity {
            return Err(error!(WrongArguments; format!("{} takes {}, found {}", token.text, arity, len))
                .at_token(token));
        }
        self.resolve()
    }
}

fn constant(token: &Token) -> Result<Val> {
    if token.text.contains('.') {
        match token.text.parse() {
            Ok(n) => Ok(Val::Double(n)),
            Err(_) => Err(error!(MalformedToken).at_token(token)),
        }
    } else {
        match token.text.parse() {
            Ok(n) => Ok(Val::Integer(n)),
            Err(_) => Err(error!(MalformedToken; "integer out of range").at_token(token)),
        }
    }
}
