//! Register file.
//!
//! The machine exposes 13 named 64-bit registers. The enum ordinal is part
//! of the wire format: an instruction encodes a register operand as a single
//! byte equal to its ordinal.
//!
//! `EXIT` is volatile: the dispatcher clears it after every instruction
//! while the machine is running, so its value only survives into the halt
//! path. The three flag registers are written as a side effect of
//! arithmetic and compare instructions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a register name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown register name '{0}'")]
pub struct ParseRegisterError(String);

/// Number of registers in the file.
pub const REGISTER_COUNT: usize = 13;

/// Named register. Ordinals are the bytecode encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Primary arithmetic operand and result.
    A = 0,
    /// Secondary arithmetic operand.
    B = 1,
    /// General purpose.
    C = 2,
    /// General purpose.
    D = 3,
    /// Program exit code; cleared after every instruction while running.
    Exit = 4,
    /// Result of input interrupts (value, or length for strings).
    Input = 5,
    /// Status of the most recent fallible interrupt.
    Error = 6,
    /// Operand to the print interrupts (value, or string address).
    Print = 7,
    /// Next-free byte offset into memory; grows upward.
    StackPointer = 8,
    /// Byte offset of the next instruction to fetch.
    ProgramCounter = 9,
    /// 1 iff the last arithmetic/compare result was exactly 0.
    ZeroFlag = 10,
    /// 1 iff the last arithmetic/compare result is negative as signed 64-bit.
    SignFlag = 11,
    /// Remainder of the last integer division (0 for non-division ops).
    RemainderFlag = 12,
}

impl Register {
    /// Decode a register operand byte. Returns `None` for ordinals past the
    /// register file.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Register::A),
            1 => Some(Register::B),
            2 => Some(Register::C),
            3 => Some(Register::D),
            4 => Some(Register::Exit),
            5 => Some(Register::Input),
            6 => Some(Register::Error),
            7 => Some(Register::Print),
            8 => Some(Register::StackPointer),
            9 => Some(Register::ProgramCounter),
            10 => Some(Register::ZeroFlag),
            11 => Some(Register::SignFlag),
            12 => Some(Register::RemainderFlag),
            _ => None,
        }
    }

    /// Canonical register name, as spelled in assembly listings.
    pub const fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::Exit => "EXIT",
            Register::Input => "INPUT",
            Register::Error => "ERROR",
            Register::Print => "PRINT",
            Register::StackPointer => "STACK_POINTER",
            Register::ProgramCounter => "PROGRAM_COUNTER",
            Register::ZeroFlag => "ZERO_FLAG",
            Register::SignFlag => "SIGN_FLAG",
            Register::RemainderFlag => "REMAINDER_FLAG",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Register {
    type Err = ParseRegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Register::A),
            "B" => Ok(Register::B),
            "C" => Ok(Register::C),
            "D" => Ok(Register::D),
            "EXIT" => Ok(Register::Exit),
            "INPUT" => Ok(Register::Input),
            "ERROR" => Ok(Register::Error),
            "PRINT" => Ok(Register::Print),
            "STACK_POINTER" => Ok(Register::StackPointer),
            "PROGRAM_COUNTER" => Ok(Register::ProgramCounter),
            "ZERO_FLAG" => Ok(Register::ZeroFlag),
            "SIGN_FLAG" => Ok(Register::SignFlag),
            "REMAINDER_FLAG" => Ok(Register::RemainderFlag),
            other => Err(ParseRegisterError(other.to_string())),
        }
    }
}

/// The register file: 13 × 64-bit cells, all zero at construction.
#[derive(Clone)]
pub struct RegisterFile {
    regs: [u64; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Create a new zeroed register file.
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Read a register.
    #[inline]
    pub fn read(&self, reg: Register) -> u64 {
        self.regs[reg as usize]
    }

    /// Write a register.
    #[inline]
    pub fn write(&mut self, reg: Register, value: u64) {
        self.regs[reg as usize] = value;
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show non-zero registers
        let non_zero: Vec<_> = self
            .regs
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .collect();

        if non_zero.is_empty() {
            write!(f, "RegisterFile {{ all zero }}")
        } else {
            write!(f, "RegisterFile {{ ")?;
            for (i, (ordinal, value)) in non_zero.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                let reg = Register::from_byte(*ordinal as u8).expect("ordinal in file range");
                write!(f, "{}: 0x{:016X}", reg, value)?;
            }
            write!(f, " }}")
        }
    }
}
