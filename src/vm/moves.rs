//! Move handlers: one per (destination mode, source mode) pair.
//!
//! Every form copies exactly `width` bytes. A register destination is
//! written zero-extended; a register source contributes its low `width`
//! bytes. The register-to-register form is a plain 64-bit copy and carries
//! no width operand.

use crate::registers::Register;

use super::{ExecError, Vm};

impl Vm {
    pub(super) fn exec_move_into_reg_from_reg(&mut self) -> Result<(), ExecError> {
        let dst = self.next_register()?;
        let src = self.next_register()?;
        let value = self.registers.read(src);
        self.registers.write(dst, value);
        Ok(())
    }

    pub(super) fn exec_move_into_reg_from_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst = self.next_register()?;
        let addr_reg = self.next_register()?;
        let src_address = self.registers.read(addr_reg);
        let value = self.memory.read_uint(src_address, width)?;
        self.registers.write(dst, value);
        Ok(())
    }

    pub(super) fn exec_move_into_reg_from_const(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst = self.next_register()?;
        let bytes = self.next_bytes(width.bytes())?;
        self.registers.write(dst, width.read(&bytes));
        Ok(())
    }

    pub(super) fn exec_move_into_reg_from_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst = self.next_register()?;
        let src_address = self.next_address()?;
        let value = self.memory.read_uint(src_address, width)?;
        self.registers.write(dst, value);
        Ok(())
    }

    pub(super) fn exec_move_into_addr_in_reg_from_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let addr_reg = self.next_register()?;
        let src = self.next_register()?;
        let dst_address = self.registers.read(addr_reg);
        let value = self.registers.read(src);
        self.memory.write_uint(dst_address, width, value)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_in_reg_from_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_reg = self.next_register()?;
        let src_reg = self.next_register()?;
        let dst_address = self.registers.read(dst_reg);
        let src_address = self.registers.read(src_reg);
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_in_reg_from_const(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let addr_reg = self.next_register()?;
        let dst_address = self.registers.read(addr_reg);
        let bytes = self.next_bytes(width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_in_reg_from_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let addr_reg = self.next_register()?;
        let dst_address = self.registers.read(addr_reg);
        let src_address = self.next_address()?;
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_literal_from_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_address = self.next_address()?;
        let src = self.next_register()?;
        let value = self.registers.read(src);
        self.memory.write_uint(dst_address, width, value)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_literal_from_addr_in_reg(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_address = self.next_address()?;
        let addr_reg = self.next_register()?;
        let src_address = self.registers.read(addr_reg);
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_literal_from_const(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_address = self.next_address()?;
        let bytes = self.next_bytes(width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }

    pub(super) fn exec_move_into_addr_literal_from_addr_literal(&mut self) -> Result<(), ExecError> {
        let width = self.next_width()?;
        let dst_address = self.next_address()?;
        let src_address = self.next_address()?;
        let bytes = self.memory.get_bytes(src_address, width.bytes())?;
        self.memory.set_bytes(dst_address, &bytes)?;
        Ok(())
    }
}
