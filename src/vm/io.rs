//! I/O interrupts and the halt instruction.
//!
//! The print interrupts write to the console's output stream and flush so
//! guest output is visible immediately. The input interrupts are the only
//! fallible instructions that never abort the machine: they report their
//! outcome through the `ERROR` register and leave the input stream in a
//! usable state for the next read.

use std::io::{self, BufRead, BufReader, Write};

use crate::registers::Register;

use super::{ExecError, Vm};

/// Guest-visible status of the most recent fallible interrupt, and the
/// conventional meaning of the program exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Normal termination / last operation succeeded.
    NoError = 0,
    /// The input stream reached end of file.
    EndOfFile = 1,
    /// The input did not parse.
    InvalidInput = 2,
    /// The input stream reported an unrecoverable fault.
    GenericError = 3,
}

impl ErrorCode {
    /// Decode an exit-code byte. Returns `None` for values the taxonomy
    /// does not assign.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ErrorCode::NoError),
            1 => Some(ErrorCode::EndOfFile),
            2 => Some(ErrorCode::InvalidInput),
            3 => Some(ErrorCode::GenericError),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCode::NoError => "NO_ERROR",
            ErrorCode::EndOfFile => "END_OF_FILE",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::GenericError => "GENERIC_ERROR",
        };
        f.write_str(name)
    }
}

/// The host stream pair the interrupt instructions talk to.
///
/// Defaults to the process stdin/stdout; tests and embedding hosts swap in
/// their own streams through [`Console::from_parts`].
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    /// Console wired to the process standard streams.
    pub fn stdio() -> Self {
        Self {
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
        }
    }

    /// Console over arbitrary streams.
    pub fn from_parts(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Read one whitespace-delimited token. Returns `None` at end of file.
    fn read_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        // Skip leading whitespace.
        loop {
            let buf = self.input.fill_buf()?;
            if buf.is_empty() {
                return Ok(None);
            }
            match buf.iter().position(|b| !b.is_ascii_whitespace()) {
                Some(skip) => {
                    self.input.consume(skip);
                    break;
                }
                None => {
                    let len = buf.len();
                    self.input.consume(len);
                }
            }
        }

        let mut token = Vec::new();
        loop {
            let buf = self.input.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            match buf.iter().position(|b| b.is_ascii_whitespace()) {
                Some(end) => {
                    token.extend_from_slice(&buf[..end]);
                    self.input.consume(end);
                    break;
                }
                None => {
                    token.extend_from_slice(buf);
                    let len = buf.len();
                    self.input.consume(len);
                }
            }
        }
        Ok(Some(token))
    }

    /// Drop the remainder of the current line so a failed parse does not
    /// poison subsequent reads.
    fn discard_line(&mut self) -> io::Result<()> {
        let mut rest = Vec::new();
        self.input.read_until(b'\n', &mut rest)?;
        Ok(())
    }

    /// Read one line as raw bytes, without its trailing newline. No
    /// encoding is assumed, matching the byte transparency of the string
    /// print path. Returns `None` at end of file.
    fn read_line_raw(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl Vm {
    pub(super) fn exec_print(&mut self) -> Result<(), ExecError> {
        let value = self.registers.read(Register::Print);
        write!(self.console.output, "{}", value)?;
        self.console.output.flush()?;
        Ok(())
    }

    pub(super) fn exec_print_string(&mut self) -> Result<(), ExecError> {
        let mut address = self.registers.read(Register::Print);
        let mut buffer = Vec::new();
        loop {
            let byte = self.memory.get_byte(address)?;
            if byte == 0 {
                break;
            }
            buffer.push(byte);
            address += 1;
        }
        self.console.output.write_all(&buffer)?;
        self.console.output.flush()?;
        Ok(())
    }

    pub(super) fn exec_input_int(&mut self) -> Result<(), ExecError> {
        let code = match self.console.read_token() {
            Ok(None) => ErrorCode::EndOfFile,
            Ok(Some(token)) => {
                let parsed = std::str::from_utf8(&token)
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok());
                match parsed {
                    Some(value) => {
                        self.registers.write(Register::Input, value);
                        ErrorCode::NoError
                    }
                    None => {
                        if self.console.discard_line().is_err() {
                            ErrorCode::GenericError
                        } else {
                            ErrorCode::InvalidInput
                        }
                    }
                }
            }
            Err(err) => {
                log::warn!("INPUT_INT stream fault: {}", err);
                ErrorCode::GenericError
            }
        };
        self.registers.write(Register::Error, code as u64);
        Ok(())
    }

    pub(super) fn exec_input_string(&mut self) -> Result<(), ExecError> {
        let code = match self.console.read_line_raw() {
            Ok(None) => ErrorCode::EndOfFile,
            Ok(Some(line)) => {
                self.registers
                    .write(Register::Input, line.len() as u64);
                self.push_stack_bytes(&line)?;
                ErrorCode::NoError
            }
            Err(err) => {
                log::warn!("INPUT_STRING stream fault: {}", err);
                ErrorCode::GenericError
            }
        };
        self.registers.write(Register::Error, code as u64);
        Ok(())
    }

    pub(super) fn exec_exit(&mut self) -> Result<(), ExecError> {
        self.running = false;
        Ok(())
    }
}
