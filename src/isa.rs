//! Instruction set definition.
//!
//! One byte per opcode; the enum ordinal is the wire encoding. Operands
//! follow the opcode byte inline in the instruction stream and are consumed
//! by the handler for each instruction (see the `vm` module).
//!
//! `LABEL` is reserved for the assembly layer: label definitions are
//! resolved to literal addresses before emission, so a `LABEL` byte reaching
//! the dispatcher at runtime is a decode fault.

use std::fmt;

/// Instruction opcode. Ordinals are the bytecode encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Add = 0,
    Sub = 1,
    Mul = 2,
    Div = 3,
    Mod = 4,

    IncReg = 5,
    IncAddrInReg = 6,
    IncAddrLiteral = 7,
    DecReg = 8,
    DecAddrInReg = 9,
    DecAddrLiteral = 10,

    NoOperation = 11,

    MoveIntoRegFromReg = 12,
    MoveIntoRegFromAddrInReg = 13,
    MoveIntoRegFromConst = 14,
    MoveIntoRegFromAddrLiteral = 15,
    MoveIntoAddrInRegFromReg = 16,
    MoveIntoAddrInRegFromAddrInReg = 17,
    MoveIntoAddrInRegFromConst = 18,
    MoveIntoAddrInRegFromAddrLiteral = 19,
    MoveIntoAddrLiteralFromReg = 20,
    MoveIntoAddrLiteralFromAddrInReg = 21,
    MoveIntoAddrLiteralFromConst = 22,
    MoveIntoAddrLiteralFromAddrLiteral = 23,

    PushFromReg = 24,
    PushFromAddrInReg = 25,
    PushFromConst = 26,
    PushFromAddrLiteral = 27,
    PopIntoReg = 28,
    PopIntoAddrInReg = 29,
    PopIntoAddrLiteral = 30,

    Label = 31,

    Jump = 32,
    JumpIfTrueReg = 33,
    JumpIfFalseReg = 34,

    CompareRegReg = 35,
    CompareRegConst = 36,
    CompareConstReg = 37,
    CompareConstConst = 38,

    Print = 39,
    PrintString = 40,
    InputInt = 41,
    InputString = 42,

    Exit = 43,
}

impl Opcode {
    /// Decode an opcode byte. Returns `None` for unassigned ordinals.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Opcode::Add),
            1 => Some(Opcode::Sub),
            2 => Some(Opcode::Mul),
            3 => Some(Opcode::Div),
            4 => Some(Opcode::Mod),
            5 => Some(Opcode::IncReg),
            6 => Some(Opcode::IncAddrInReg),
            7 => Some(Opcode::IncAddrLiteral),
            8 => Some(Opcode::DecReg),
            9 => Some(Opcode::DecAddrInReg),
            10 => Some(Opcode::DecAddrLiteral),
            11 => Some(Opcode::NoOperation),
            12 => Some(Opcode::MoveIntoRegFromReg),
            13 => Some(Opcode::MoveIntoRegFromAddrInReg),
            14 => Some(Opcode::MoveIntoRegFromConst),
            15 => Some(Opcode::MoveIntoRegFromAddrLiteral),
            16 => Some(Opcode::MoveIntoAddrInRegFromReg),
            17 => Some(Opcode::MoveIntoAddrInRegFromAddrInReg),
            18 => Some(Opcode::MoveIntoAddrInRegFromConst),
            19 => Some(Opcode::MoveIntoAddrInRegFromAddrLiteral),
            20 => Some(Opcode::MoveIntoAddrLiteralFromReg),
            21 => Some(Opcode::MoveIntoAddrLiteralFromAddrInReg),
            22 => Some(Opcode::MoveIntoAddrLiteralFromConst),
            23 => Some(Opcode::MoveIntoAddrLiteralFromAddrLiteral),
            24 => Some(Opcode::PushFromReg),
            25 => Some(Opcode::PushFromAddrInReg),
            26 => Some(Opcode::PushFromConst),
            27 => Some(Opcode::PushFromAddrLiteral),
            28 => Some(Opcode::PopIntoReg),
            29 => Some(Opcode::PopIntoAddrInReg),
            30 => Some(Opcode::PopIntoAddrLiteral),
            31 => Some(Opcode::Label),
            32 => Some(Opcode::Jump),
            33 => Some(Opcode::JumpIfTrueReg),
            34 => Some(Opcode::JumpIfFalseReg),
            35 => Some(Opcode::CompareRegReg),
            36 => Some(Opcode::CompareRegConst),
            37 => Some(Opcode::CompareConstReg),
            38 => Some(Opcode::CompareConstConst),
            39 => Some(Opcode::Print),
            40 => Some(Opcode::PrintString),
            41 => Some(Opcode::InputInt),
            42 => Some(Opcode::InputString),
            43 => Some(Opcode::Exit),
            _ => None,
        }
    }

    /// Assembly mnemonic for this opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::IncReg => "INC_REG",
            Opcode::IncAddrInReg => "INC_ADDR_IN_REG",
            Opcode::IncAddrLiteral => "INC_ADDR_LITERAL",
            Opcode::DecReg => "DEC_REG",
            Opcode::DecAddrInReg => "DEC_ADDR_IN_REG",
            Opcode::DecAddrLiteral => "DEC_ADDR_LITERAL",
            Opcode::NoOperation => "NO_OPERATION",
            Opcode::MoveIntoRegFromReg => "MOVE_INTO_REG_FROM_REG",
            Opcode::MoveIntoRegFromAddrInReg => "MOVE_INTO_REG_FROM_ADDR_IN_REG",
            Opcode::MoveIntoRegFromConst => "MOVE_INTO_REG_FROM_CONST",
            Opcode::MoveIntoRegFromAddrLiteral => "MOVE_INTO_REG_FROM_ADDR_LITERAL",
            Opcode::MoveIntoAddrInRegFromReg => "MOVE_INTO_ADDR_IN_REG_FROM_REG",
            Opcode::MoveIntoAddrInRegFromAddrInReg => "MOVE_INTO_ADDR_IN_REG_FROM_ADDR_IN_REG",
            Opcode::MoveIntoAddrInRegFromConst => "MOVE_INTO_ADDR_IN_REG_FROM_CONST",
            Opcode::MoveIntoAddrInRegFromAddrLiteral => "MOVE_INTO_ADDR_IN_REG_FROM_ADDR_LITERAL",
            Opcode::MoveIntoAddrLiteralFromReg => "MOVE_INTO_ADDR_LITERAL_FROM_REG",
            Opcode::MoveIntoAddrLiteralFromAddrInReg => "MOVE_INTO_ADDR_LITERAL_FROM_ADDR_IN_REG",
            Opcode::MoveIntoAddrLiteralFromConst => "MOVE_INTO_ADDR_LITERAL_FROM_CONST",
            Opcode::MoveIntoAddrLiteralFromAddrLiteral => "MOVE_INTO_ADDR_LITERAL_FROM_ADDR_LITERAL",
            Opcode::PushFromReg => "PUSH_FROM_REG",
            Opcode::PushFromAddrInReg => "PUSH_FROM_ADDR_IN_REG",
            Opcode::PushFromConst => "PUSH_FROM_CONST",
            Opcode::PushFromAddrLiteral => "PUSH_FROM_ADDR_LITERAL",
            Opcode::PopIntoReg => "POP_INTO_REG",
            Opcode::PopIntoAddrInReg => "POP_INTO_ADDR_IN_REG",
            Opcode::PopIntoAddrLiteral => "POP_INTO_ADDR_LITERAL",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfTrueReg => "JUMP_IF_TRUE_REG",
            Opcode::JumpIfFalseReg => "JUMP_IF_FALSE_REG",
            Opcode::CompareRegReg => "COMPARE_REG_REG",
            Opcode::CompareRegConst => "COMPARE_REG_CONST",
            Opcode::CompareConstReg => "COMPARE_CONST_REG",
            Opcode::CompareConstConst => "COMPARE_CONST_CONST",
            Opcode::Print => "PRINT",
            Opcode::PrintString => "PRINT_STRING",
            Opcode::InputInt => "INPUT_INT",
            Opcode::InputString => "INPUT_STRING",
            Opcode::Exit => "EXIT",
        }
    }

    /// Whether this opcode transfers control.
    pub const fn is_control_flow(self) -> bool {
        matches!(
            self,
            Opcode::Jump | Opcode::JumpIfTrueReg | Opcode::JumpIfFalseReg
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
