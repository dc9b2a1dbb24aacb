//! Arithmetic and increment/decrement handlers.
//!
//! The five binary operations work on the fixed A/B pair at 64-bit width
//! with wrap-around. Increment/decrement come in a register form and two
//! width-parametric memory forms that update the addressed cell in place.

use crate::bytes::Width;
use crate::memory::Address;
use crate::registers::Register;

use super::{ExecError, Vm};

impl Vm {
    pub(super) fn exec_add(&mut self) -> Result<(), ExecError> {
        let result = self
            .registers
            .read(Register::A)
            .wrapping_add(self.registers.read(Register::B));
        self.registers.write(Register::A, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_sub(&mut self) -> Result<(), ExecError> {
        let result = self
            .registers
            .read(Register::A)
            .wrapping_sub(self.registers.read(Register::B));
        self.registers.write(Register::A, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_mul(&mut self) -> Result<(), ExecError> {
        let result = self
            .registers
            .read(Register::A)
            .wrapping_mul(self.registers.read(Register::B));
        self.registers.write(Register::A, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_div(&mut self) -> Result<(), ExecError> {
        let dividend = self.registers.read(Register::A);
        let divisor = self.registers.read(Register::B);
        if divisor == 0 {
            return Err(ExecError::DivisionByZero { pc: self.pc() });
        }

        let remainder = dividend % divisor;
        let result = dividend / divisor;
        self.registers.write(Register::A, result);
        self.set_arithmetic_flags(result, remainder);
        Ok(())
    }

    pub(super) fn exec_mod(&mut self) -> Result<(), ExecError> {
        let dividend = self.registers.read(Register::A);
        let divisor = self.registers.read(Register::B);
        if divisor == 0 {
            return Err(ExecError::DivisionByZero { pc: self.pc() });
        }

        let result = dividend % divisor;
        self.registers.write(Register::A, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_inc_reg(&mut self) -> Result<(), ExecError> {
        let reg = self.next_register()?;
        let result = self.registers.read(reg).wrapping_add(1);
        self.registers.write(reg, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_dec_reg(&mut self) -> Result<(), ExecError> {
        let reg = self.next_register()?;
        let result = self.registers.read(reg).wrapping_sub(1);
        self.registers.write(reg, result);
        self.set_arithmetic_flags(result, 0);
        Ok(())
    }

    pub(super) fn exec_inc_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let reg = self.next_register()?;
        let address = self.registers.read(reg);
        self.step_memory_cell(address, width, 1)
    }

    pub(super) fn exec_inc_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let address = self.next_address()?;
        self.step_memory_cell(address, width, 1)
    }

    pub(super) fn exec_dec_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let reg = self.next_register()?;
        let address = self.registers.read(reg);
        self.step_memory_cell(address, width, u64::MAX)
    }

    pub(super) fn exec_dec_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let address = self.next_address()?;
        self.step_memory_cell(address, width, u64::MAX)
    }

    /// Add `delta` (1 or -1 as two's complement) to the `width`-byte cell at
    /// `address` in place. The cell wraps at its own width; flags read the
    /// updated cell back as a signed integer of that width.
    fn step_memory_cell(&mut self, address: Address, width: Width, delta: u64) -> Result<(), ExecError> {
        let cell = self.memory.get_bytes_mut(address, width.bytes())?;
        let value = width.truncate(width.read(cell).wrapping_add(delta));
        width.write(cell, value);
        let result = width.read_int(cell);
        self.set_arithmetic_flags(result as u64, 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testkit::{run_program, Prog};
    use super::*;
    use crate::isa::Opcode;

    fn binary_op(op: Opcode, a: u64, b: u64) -> (u64, u64, u64, u64) {
        let program = Prog::new()
            .load_reg(Register::A, a)
            .load_reg(Register::B, b)
            .op(op)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        (
            vm.registers().read(Register::A),
            vm.registers().read(Register::ZeroFlag),
            vm.registers().read(Register::SignFlag),
            vm.registers().read(Register::RemainderFlag),
        )
    }

    #[test]
    fn test_add() {
        assert_eq!(binary_op(Opcode::Add, 2, 3), (5, 0, 0, 0));
        // Wrap-around to zero sets the zero flag.
        assert_eq!(binary_op(Opcode::Add, u64::MAX, 1), (0, 1, 0, 0));
    }

    #[test]
    fn test_mul() {
        assert_eq!(binary_op(Opcode::Mul, 6, 7), (42, 0, 0, 0));
        assert_eq!(binary_op(Opcode::Mul, 10, 0), (0, 1, 0, 0));
    }

    #[test]
    fn test_div_clears_stale_remainder() {
        // 17 / 5 leaves remainder 2; a following exact division resets it.
        let program = Prog::new()
            .load_reg(Register::A, 17)
            .load_reg(Register::B, 5)
            .op(Opcode::Div)
            .load_reg(Register::A, 10)
            .load_reg(Register::B, 5)
            .op(Opcode::Div)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.registers().read(Register::A), 2);
        assert_eq!(vm.registers().read(Register::RemainderFlag), 0);
    }

    #[test]
    fn test_mod() {
        assert_eq!(binary_op(Opcode::Mod, 17, 5), (2, 0, 0, 0));
        assert_eq!(binary_op(Opcode::Mod, 15, 5), (0, 1, 0, 0));
    }

    #[test]
    fn test_inc_dec_reg() {
        let program = Prog::new()
            .load_reg(Register::C, 10)
            .op(Opcode::IncReg)
            .reg(Register::C)
            .op(Opcode::IncReg)
            .reg(Register::C)
            .op(Opcode::DecReg)
            .reg(Register::C)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.registers().read(Register::C), 11);
    }

    #[test]
    fn test_dec_reg_to_zero_sets_zero_flag() {
        let program = Prog::new()
            .load_reg(Register::D, 1)
            .op(Opcode::DecReg)
            .reg(Register::D)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.registers().read(Register::ZeroFlag), 1);
    }

    #[test]
    fn test_dec_reg_wraps_and_sets_sign() {
        let program = Prog::new()
            .op(Opcode::DecReg)
            .reg(Register::D)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.registers().read(Register::D), u64::MAX);
        assert_eq!(vm.registers().read(Register::SignFlag), 1);
    }

    #[test]
    fn test_inc_addr_literal_wraps_at_cell_width() {
        // A one-byte cell holding 0xFF wraps to 0x00 without touching its
        // neighbour, and the zero flag reflects the cell value.
        let program = Prog::new()
            .store_byte(100, 0xFF)
            .store_byte(101, 0x55)
            .op(Opcode::IncAddrLiteral)
            .width(Width::One)
            .addr(100)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().get_byte(100).unwrap(), 0);
        assert_eq!(vm.memory().get_byte(101).unwrap(), 0x55);
        assert_eq!(vm.registers().read(Register::ZeroFlag), 1);
        assert_eq!(vm.registers().read(Register::SignFlag), 0);
    }

    #[test]
    fn test_inc_addr_sign_flag_at_cell_width() {
        // 0x7F + 1 = 0x80: negative as a signed byte, so the sign flag is
        // set even though the cell is only one byte wide.
        let program = Prog::new()
            .store_byte(105, 0x7F)
            .op(Opcode::IncAddrLiteral)
            .width(Width::One)
            .addr(105)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().get_byte(105).unwrap(), 0x80);
        assert_eq!(vm.registers().read(Register::SignFlag), 1);
        assert_eq!(vm.registers().read(Register::ZeroFlag), 0);
    }

    #[test]
    fn test_inc_addr_in_reg() {
        let program = Prog::new()
            .store_byte(150, 7)
            .load_reg(Register::C, 150)
            .op(Opcode::IncAddrInReg)
            .width(Width::One)
            .reg(Register::C)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().get_byte(150).unwrap(), 8);
    }

    #[test]
    fn test_dec_addr_literal_two_byte_cell() {
        let program = Prog::new()
            .op(Opcode::MoveIntoAddrLiteralFromConst)
            .width(Width::Two)
            .addr(160)
            .imm(Width::Two, 0x0100)
            .op(Opcode::DecAddrLiteral)
            .width(Width::Two)
            .addr(160)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().read_uint(160, Width::Two).unwrap(), 0x00FF);
    }

    #[test]
    fn test_dec_addr_underflow_wraps_at_width() {
        let program = Prog::new()
            .op(Opcode::DecAddrLiteral)
            .width(Width::Two)
            .addr(170)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().read_uint(170, Width::Two).unwrap(), 0xFFFF);
        // The wrap stays inside the cell, and 0xFFFF is -1 at cell width.
        assert_eq!(vm.memory().get_byte(172).unwrap(), 0);
        assert_eq!(vm.registers().read(Register::SignFlag), 1);
    }
}
