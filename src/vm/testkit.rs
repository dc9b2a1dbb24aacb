//! Test helpers: a byte-level program builder and console capture.
//!
//! The builder emits raw opcode/operand bytes so tests spell out the exact
//! wire encoding they exercise; the handful of composite helpers cover the
//! patterns nearly every program needs (loading a register, storing a byte,
//! halting).

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use crate::bytes::Width;
use crate::isa::Opcode;
use crate::registers::Register;

use super::{Console, Vm};

/// Bytecode program under construction.
pub(crate) struct Prog {
    bytes: Vec<u8>,
}

impl Prog {
    pub(crate) fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append an opcode byte.
    pub(crate) fn op(mut self, opcode: Opcode) -> Self {
        self.bytes.push(opcode as u8);
        self
    }

    /// Append a raw byte.
    pub(crate) fn byte(mut self, byte: u8) -> Self {
        self.bytes.push(byte);
        self
    }

    /// Append a register operand.
    pub(crate) fn reg(self, reg: Register) -> Self {
        self.byte(reg as u8)
    }

    /// Append a width operand.
    pub(crate) fn width(self, width: Width) -> Self {
        self.byte(width.bytes() as u8)
    }

    /// Append an 8-byte little-endian address operand.
    pub(crate) fn addr(mut self, address: u64) -> Self {
        self.bytes.extend_from_slice(&address.to_le_bytes());
        self
    }

    /// Append a `width`-byte little-endian immediate.
    pub(crate) fn imm(mut self, width: Width, value: u64) -> Self {
        let start = self.bytes.len();
        self.bytes.resize(start + width.bytes(), 0);
        width.write(&mut self.bytes[start..], value);
        self
    }

    /// `MOVE_INTO_REG_FROM_CONST` at full width: 11 bytes.
    pub(crate) fn load_reg(self, reg: Register, value: u64) -> Self {
        self.op(Opcode::MoveIntoRegFromConst)
            .width(Width::Eight)
            .reg(reg)
            .imm(Width::Eight, value)
    }

    /// `MOVE_INTO_ADDR_LITERAL_FROM_CONST` for a single byte: 11 bytes.
    pub(crate) fn store_byte(self, address: u64, value: u8) -> Self {
        self.op(Opcode::MoveIntoAddrLiteralFromConst)
            .width(Width::One)
            .addr(address)
            .imm(Width::One, value as u64)
    }

    /// Append the halt instruction.
    pub(crate) fn halt(self) -> Self {
        self.op(Opcode::Exit)
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// `Write` sink that keeps captured guest output readable after the VM has
/// consumed the console.
#[derive(Clone, Default)]
pub(crate) struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub(crate) fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl std::io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `program` on a fresh machine with empty input. Panics on fatal
/// faults; returns the machine, captured output and exit code.
pub(crate) fn run_program(program: &[u8]) -> (Vm, Vec<u8>, u8) {
    run_program_with_input(program, "")
}

/// Run `program` with the given stdin contents. Input is raw bytes; string
/// literals convert for the common case.
pub(crate) fn run_program_with_input(program: &[u8], input: impl Into<Vec<u8>>) -> (Vm, Vec<u8>, u8) {
    let output = SharedOutput::default();
    let console = Console::from_parts(Cursor::new(input.into()), output.clone());
    let mut vm = Vm::with_console(4096, 64, console);
    let code = vm.execute(program, false).expect("program faulted");
    (vm, output.contents(), code)
}
