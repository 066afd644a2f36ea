use crate::lexer::Opcode;

use super::InterpreterError;

/// Find the `]` closing the `[` at `start`, counting nested loops on the way.
pub fn find_loop_end(code: &[Opcode], start: usize) -> Result<usize, InterpreterError> {
    let mut depth = 0usize;
    for (pos, op) in code.iter().enumerate().skip(start) {
        match op {
            Opcode::LoopBegin => depth += 1,
            Opcode::LoopEnd => {
                // a `]` before any `[` means `start` wasn't a `[` to begin with
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    return Ok(pos);
                }
            }
            _ => {}
        }
    }

    Err(InterpreterError::UnmatchedBracket {
        symbol: '[',
        other: ']',
        position: start,
    })
}

/// Find the `[` opening the `]` at `end`, scanning backwards.
pub fn find_loop_begin(code: &[Opcode], end: usize) -> Result<usize, InterpreterError> {
    let mut depth = 0usize;
    let scan = code.get(..=end).unwrap_or_default();
    for (pos, op) in scan.iter().enumerate().rev() {
        match op {
            Opcode::LoopEnd => depth += 1,
            Opcode::LoopBegin => {
                // a `[` before any `]` means `end` wasn't a `]` to begin with
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    return Ok(pos);
                }
            }
            _ => {}
        }
    }

    Err(InterpreterError::UnmatchedBracket {
        symbol: ']',
        other: '[',
        position: end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lexer::filter;

    #[test]
    fn flat_loop() {
        let code = filter("[-]");
        assert_eq!(find_loop_end(&code, 0).unwrap(), 2);
        assert_eq!(find_loop_begin(&code, 2).unwrap(), 0);
    }

    #[test]
    fn nested_loops_match_their_own_bracket() {
        //                 0123456789
        let code = filter("[>[-]<[-]]");
        assert_eq!(find_loop_end(&code, 0).unwrap(), 9);
        assert_eq!(find_loop_end(&code, 2).unwrap(), 4);
        assert_eq!(find_loop_end(&code, 6).unwrap(), 8);
        assert_eq!(find_loop_begin(&code, 9).unwrap(), 0);
        assert_eq!(find_loop_begin(&code, 8).unwrap(), 6);
    }

    #[test]
    fn unmatched_open() {
        let code = filter("[[-]");
        assert!(matches!(
            find_loop_end(&code, 0),
            Err(InterpreterError::UnmatchedBracket { symbol: '[', position: 0, .. })
        ));
    }

    #[test]
    fn unmatched_close() {
        let code = filter("-]+]");
        assert!(matches!(
            find_loop_begin(&code, 1),
            Err(InterpreterError::UnmatchedBracket { symbol: ']', position: 1, .. })
        ));
        assert!(find_loop_begin(&code, 3).is_err());
        assert!(find_loop_begin(&[], 0).is_err());
    }
}
