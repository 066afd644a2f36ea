use std::fmt;

use tracing::{debug, trace, warn};

use crate::lexer::{lexer::filter, Opcode};
use crate::stream::{Input, Output};

use super::{brackets, InterpreterError};

/// Executes programs one opcode at a time over a fixed-size byte tape.
///
/// Every handler except the two loop handlers moves the instruction pointer
/// forward by exactly one after doing its work. `[` and `]` compute the new
/// instruction pointer themselves.
pub struct Interpreter<I, O> {
    /// Our statically sized tape, cells wrap at 8 bits
    tape: Vec<u8>,

    /// Index into the tape, only checked when a cell is actually touched
    data_pointer: isize,

    code: Vec<Opcode>,
    instruction_pointer: usize,

    steps: u64,
    step_limit: Option<u64>,

    input: I,
    output: O,
}

impl<I: Input, O: Output> Interpreter<I, O> {
    pub fn new(size: usize, input: I, output: O) -> Result<Self, InterpreterError> {
        let mut interpreter = Self {
            tape: vec![],
            data_pointer: 0,
            code: vec![],
            instruction_pointer: 0,
            steps: 0,
            step_limit: None,
            input,
            output,
        };
        interpreter.reset(size)?;
        Ok(interpreter)
    }

    /// Abort any run that dispatches more than `limit` opcodes
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Zero a fresh tape of `size` cells and forget the loaded program
    pub fn reset(&mut self, size: usize) -> Result<(), InterpreterError> {
        if size == 0 {
            return Err(InterpreterError::InvalidSize { size });
        }

        self.tape = vec![0; size];
        self.code.clear();
        self.data_pointer = 0;
        self.instruction_pointer = 0;
        self.steps = 0;
        debug!(size, "reset interpreter");
        Ok(())
    }

    /// Filter `source` and install it as the current program, without running it
    pub fn load(&mut self, source: &str) {
        self.code = filter(source);
        self.instruction_pointer = 0;
        self.steps = 0;
        debug!(opcodes = self.code.len(), "loaded program");
    }

    /// Load `source` and execute it until the instruction pointer runs off the end.
    ///
    /// The tape and data pointer carry over from whatever ran before, call
    /// [`Interpreter::reset`] for a clean slate.
    pub fn run(&mut self, source: &str) -> Result<(), InterpreterError> {
        self.load(source);
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(
                        ip = self.instruction_pointer,
                        dp = self.data_pointer,
                        "run aborted: {e}"
                    );
                    return Err(e);
                }
            }
        }
        debug!(steps = self.steps, "finished run");
        Ok(())
    }

    /// Dispatch the opcode under the instruction pointer.
    /// Returns `false` once there is nothing left to execute.
    pub fn step(&mut self) -> Result<bool, InterpreterError> {
        let Some(&op) = self.code.get(self.instruction_pointer) else {
            return Ok(false);
        };

        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                return Err(InterpreterError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;

        trace!(ip = self.instruction_pointer, dp = self.data_pointer, %op, "dispatch");
        match op {
            Opcode::ShiftRight => self.shift_right(),
            Opcode::ShiftLeft => self.shift_left(),
            Opcode::Increment => self.increment()?,
            Opcode::Decrement => self.decrement()?,
            Opcode::LoopBegin => self.loop_begin()?,
            Opcode::LoopEnd => self.loop_end()?,
            Opcode::Write => self.write()?,
            Opcode::Read => self.read()?,
        }
        Ok(true)
    }

    /// `>`
    pub fn shift_right(&mut self) {
        // we don't check that the data pointer is valid on shifts
        // only once a cell is read/written through it
        self.data_pointer += 1;
        self.instruction_pointer += 1;
    }

    /// `<`
    pub fn shift_left(&mut self) {
        self.data_pointer -= 1;
        self.instruction_pointer += 1;
    }

    /// `+`
    pub fn increment(&mut self) -> Result<(), InterpreterError> {
        let cell = self.cell_mut()?;
        *cell = cell.wrapping_add(1);
        self.instruction_pointer += 1;
        Ok(())
    }

    /// `-`
    pub fn decrement(&mut self) -> Result<(), InterpreterError> {
        let cell = self.cell_mut()?;
        *cell = cell.wrapping_sub(1);
        self.instruction_pointer += 1;
        Ok(())
    }

    /// `[`: step into the body, or land on the matching `]` when the cell is zero.
    ///
    /// Landing *on* the `]` (not past it) is deliberate, its own handler then
    /// sees the zero cell and falls through.
    pub fn loop_begin(&mut self) -> Result<(), InterpreterError> {
        if self.cell()? == 0 {
            self.instruction_pointer =
                brackets::find_loop_end(&self.code, self.instruction_pointer)?;
        } else {
            self.instruction_pointer += 1;
        }
        Ok(())
    }

    /// `]`: fall through when the cell is zero, otherwise jump back onto the matching `[`
    pub fn loop_end(&mut self) -> Result<(), InterpreterError> {
        if self.cell()? == 0 {
            self.instruction_pointer += 1;
        } else {
            self.instruction_pointer =
                brackets::find_loop_begin(&self.code, self.instruction_pointer)?;
        }
        Ok(())
    }

    /// `.`: emit the current cell as a character
    pub fn write(&mut self) -> Result<(), InterpreterError> {
        let value = self.cell()?;
        self.output.write_char(char::from(value))?;
        self.instruction_pointer += 1;
        Ok(())
    }

    /// `,`: store the next input character (modulo 256), or 0 once input runs dry
    pub fn read(&mut self) -> Result<(), InterpreterError> {
        // check before blocking on input
        self.cell()?;
        let value = match self.input.read_char()? {
            Some(c) => c as u32 as u8,
            None => 0,
        };
        *self.cell_mut()? = value;
        self.instruction_pointer += 1;
        Ok(())
    }

    fn tape_index(&self) -> Result<usize, InterpreterError> {
        usize::try_from(self.data_pointer)
            .ok()
            .filter(|&index| index < self.tape.len())
            .ok_or(InterpreterError::TapeIndexOutOfRange {
                index: self.data_pointer,
                len: self.tape.len(),
            })
    }

    /// the value at the data pointer
    pub fn cell(&self) -> Result<u8, InterpreterError> {
        Ok(self.tape[self.tape_index()?])
    }

    fn cell_mut(&mut self) -> Result<&mut u8, InterpreterError> {
        let index = self.tape_index()?;
        Ok(&mut self.tape[index])
    }
}

impl<I, O> Interpreter<I, O> {
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn data_pointer(&self) -> isize {
        self.data_pointer
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn code(&self) -> &[Opcode] {
        &self.code
    }

    /// Opcodes dispatched since the program was loaded
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

impl<I, O> fmt::Display for Interpreter<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code: String = self.code.iter().map(|op| op.as_char()).collect();
        write!(
            f,
            "mem: {:?} dp: {} ip: {} code: '{}'",
            self.tape, self.data_pointer, self.instruction_pointer, code
        )
    }
}
