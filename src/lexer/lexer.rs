use super::Opcode;

/// Streams the opcodes out of raw source text, silently skipping commentary
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable position of the last opcode yielded */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the text (in terms of 'codepoints') */
    pub codepoint_offset: usize,

    chars: std::str::Chars<'a>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str) -> Lexer<'a> {
        Lexer {
            cur_line: 1,
            cur_col: 1,

            codepoint_offset: 0,

            chars: chars.chars(),
            line: 1,
            col: 1,
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.cur_line = self.line;
        self.cur_col = self.col;
        self.col += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        }
        self.codepoint_offset += 1;
        Some(c)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Opcode;

    fn next(&mut self) -> Option<Opcode> {
        while let Some(c) = self.consume_char() {
            if let Some(op) = Opcode::from_char(c) {
                return Some(op);
            }
        }
        None
    }
}

/// Keep only the opcodes of `text`, in order
pub fn filter(text: &str) -> Vec<Opcode> {
    Lexer::new(text).collect()
}

/// Same as [`filter`] but rendered back into text
pub fn filter_source(text: &str) -> String {
    Lexer::new(text).map(Opcode::as_char).collect()
}
