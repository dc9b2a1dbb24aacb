//! Stack handlers.
//!
//! The stack grows upward from the end of the program image. A push writes
//! at the stack pointer and advances it; a pop moves the pointer down first
//! and then reads. `PUSH_FROM_REG` and `POP_INTO_REG` always transfer the
//! full 8 register bytes; the pop has no width operand, so a guest that
//! pushed fewer bytes gets back whatever lies below them.

use crate::bytes::Width;
use crate::registers::Register;

use super::{ExecError, Vm};

impl Vm {
    pub(super) fn exec_push_from_reg(&mut self) -> Result<(), ExecError> {
        let src = self.next_register()?;
        let value = self.registers.read(src);
        self.push_stack_uint(Width::Eight, value)
    }

    pub(super) fn exec_push_from_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let addr_reg = self.next_register()?;
        let src_address = self.registers.read(addr_reg);
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.push_stack_bytes(&bytes)
    }

    pub(super) fn exec_push_from_const(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let bytes = self.next_bytes(width.bytes())?;
        self.push_stack_bytes(&bytes)
    }

    pub(super) fn exec_push_from_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let src_address = self.next_address()?;
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.push_stack_bytes(&bytes)
    }

    pub(super) fn exec_pop_into_reg(&mut self) -> Result<(), ExecError> {
        let dst = self.next_register()?;
        let value = self.pop_stack_uint(Width::Eight)?;
        self.registers.write(dst, value);
        Ok(())
    }

    pub(super) fn exec_pop_into_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let addr_reg = self.next_register()?;
        let dst_address = self.registers.read(addr_reg);
        let value = self.pop_stack_uint(width)?;
        self.memory.write_uint(dst_address, width, value)?;
        Ok(())
    }

    pub(super) fn exec_pop_into_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_address = self.next_address()?;
        let value = self.pop_stack_uint(width)?;
        self.memory.write_uint(dst_address, width, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testkit::{run_program, Prog};
    use super::*;
    use crate::isa::Opcode;

    #[test]
    fn test_push_pop_reg_round_trip() {
        let program = Prog::new()
            .load_reg(Register::A, 123)
            .load_reg(Register::B, 456)
            .op(Opcode::PushFromReg)
            .reg(Register::A)
            .op(Opcode::PushFromReg)
            .reg(Register::B)
            .op(Opcode::PopIntoReg)
            .reg(Register::C)
            .op(Opcode::PopIntoReg)
            .reg(Register::D)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        // LIFO order.
        assert_eq!(vm.registers().read(Register::C), 456);
        assert_eq!(vm.registers().read(Register::D), 123);
    }

    #[test]
    fn test_push_const_pop_addr_literal() {
        let program = Prog::new()
            .op(Opcode::PushFromConst)
            .width(Width::Two)
            .imm(Width::Two, 0x1234)
            .op(Opcode::PopIntoAddrLiteral)
            .width(Width::Two)
            .addr(200)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().read_uint(200, Width::Two).unwrap(), 0x1234);
    }

    #[test]
    fn test_push_from_addr_literal_pop_into_addr_in_reg() {
        let program = Prog::new()
            .op(Opcode::MoveIntoAddrLiteralFromConst)
            .width(Width::Four)
            .addr(210)
            .imm(Width::Four, 0xFEED_F00D)
            .op(Opcode::PushFromAddrLiteral)
            .width(Width::Four)
            .addr(210)
            .load_reg(Register::C, 220)
            .op(Opcode::PopIntoAddrInReg)
            .width(Width::Four)
            .reg(Register::C)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().read_uint(220, Width::Four).unwrap(), 0xFEED_F00D);
    }

    #[test]
    fn test_push_from_addr_in_reg() {
        let program = Prog::new()
            .store_byte(230, 0xA5)
            .load_reg(Register::D, 230)
            .op(Opcode::PushFromAddrInReg)
            .width(Width::One)
            .reg(Register::D)
            .op(Opcode::PopIntoAddrLiteral)
            .width(Width::One)
            .addr(231)
            .halt()
            .build();
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().get_byte(231).unwrap(), 0xA5);
    }

    #[test]
    fn test_pop_into_reg_always_takes_eight_bytes() {
        // Push only 4 bytes; the pop still consumes 8, dipping below the
        // push into the program image. The stack pointer ends up 4 bytes
        // below where it started.
        let program = Prog::new()
            .op(Opcode::PushFromConst)
            .width(Width::Four)
            .imm(Width::Four, 1)
            .op(Opcode::PopIntoReg)
            .reg(Register::A)
            .halt()
            .build();
        let program_len = program.len() as u64;
        let (vm, _, _) = run_program(&program);
        assert_eq!(
            vm.registers().read(Register::StackPointer),
            program_len - 4
        );
    }

    #[test]
    fn test_stack_grows_above_program_image() {
        let program = Prog::new()
            .op(Opcode::PushFromConst)
            .width(Width::One)
            .imm(Width::One, 0xEE)
            .halt()
            .build();
        let program_len = program.len() as u64;
        let (vm, _, _) = run_program(&program);
        assert_eq!(vm.memory().get_byte(program_len).unwrap(), 0xEE);
        assert_eq!(
            vm.registers().read(Register::StackPointer),
            program_len + 1
        );
    }
}
