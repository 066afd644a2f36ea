use std::fmt;

pub mod lexer;

/// Every symbol the language knows about, anything else is a comment
pub const OPCODE_SYMBOLS: &str = "><+-[].,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // `>`: Increment the `data pointer` by one
    ShiftRight,
    // `<`: Decrement the `data pointer` by one
    ShiftLeft,

    // `+`: Increment the byte at the `data pointer` by one
    Increment,
    // `-`: Decrement the byte at the `data pointer` by one
    Decrement,

    // `[`: If the byte at the `data pointer` is zero, jump forward to the matching `]`
    LoopBegin,
    // `]`: If the byte at the `data pointer` is non-zero, jump back to the matching `[`
    LoopEnd,

    // `.`: Write the byte at the `data pointer` to the output
    Write,
    // `,`: Read the next character from the input into the `data pointer`
    Read,
}

impl Opcode {
    /// The opcode for `c`, or `None` if `c` is commentary
    pub fn from_char(c: char) -> Option<Opcode> {
        match c {
            '>' => Some(Opcode::ShiftRight),
            '<' => Some(Opcode::ShiftLeft),
            '+' => Some(Opcode::Increment),
            '-' => Some(Opcode::Decrement),
            '[' => Some(Opcode::LoopBegin),
            ']' => Some(Opcode::LoopEnd),
            '.' => Some(Opcode::Write),
            ',' => Some(Opcode::Read),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Opcode::ShiftRight => '>',
            Opcode::ShiftLeft => '<',
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::LoopBegin => '[',
            Opcode::LoopEnd => ']',
            Opcode::Write => '.',
            Opcode::Read => ',',
        }
    }
}

impl TryFrom<char> for Opcode {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Opcode::from_char(c).ok_or(c)
    }
}

impl From<Opcode> for char {
    fn from(op: Opcode) -> char {
        op.as_char()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
