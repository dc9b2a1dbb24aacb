//! Control flow and compare handlers.
//!
//! Jump targets are absolute 8-byte addresses resolved by the assembly
//! layer; the conditional forms encode the target before the test register.
//! Compares subtract (left - right) at 64-bit width and only write the
//! flags; the operands are left untouched.

use crate::registers::Register;

use super::{ExecError, Vm};

impl Vm {
    pub(super) fn exec_jump(&mut self) -> Result<(), ExecError> {
        let target = self.next_address()?;
        self.registers.write(Register::ProgramCounter, target);
        Ok(())
    }

    pub(super) fn exec_jump_if_true_reg(&mut self) -> Result<(), ExecError> {
        let target = self.next_address()?;
        let test = self.next_register()?;
        if self.registers.read(test) != 0 {
            self.registers.write(Register::ProgramCounter, target);
        }
        Ok(())
    }

    pub(super) fn exec_jump_if_false_reg(&mut self) -> Result<(), ExecError> {
        let target = self.next_address()?;
        let test = self.next_register()?;
        if self.registers.read(test) == 0 {
            self.registers.write(Register::ProgramCounter, target);
        }
        Ok(())
    }

    pub(super) fn exec_compare_reg_reg(&mut self) -> Result<(), ExecError> {
        let left = self.next_register()?;
        let right = self.next_register()?;
        let diff = self
            .registers
            .read(left)
            .wrapping_sub(self.registers.read(right));
        self.set_arithmetic_flags(diff, 0);
        Ok(())
    }

    pub(super) fn exec_compare_reg_const(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let left = self.next_register()?;
        let bytes = self.next_bytes(width.bytes())?;
        let right = width.read(&bytes);
        let diff = self.registers.read(left).wrapping_sub(right);
        self.set_arithmetic_flags(diff, 0);
        Ok(())
    }

    pub(super) fn exec_compare_const_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let bytes = self.next_bytes(width.bytes())?;
        let left = width.read(&bytes);
        let right = self.next_register()?;
        let diff = left.wrapping_sub(self.registers.read(right));
        self.set_arithmetic_flags(diff, 0);
        Ok(())
    }

    pub(super) fn exec_compare_const_const(&mut self) -> Result<(), ExecError> {
        // One width byte covers both immediates.
        let width = self.next_width()?;
        let left_bytes = self.next_bytes(width.bytes())?;
        let right_bytes = self.next_bytes(width.bytes())?;
        let diff = width.read(&left_bytes).wrapping_sub(width.read(&right_bytes));
        self.set_arithmetic_flags(diff, 0);
        Ok(())
    }
}
