//! Executing instructions against a core

use crate::cpu::Core;
use crate::isa::{parse_instruction, Decoded, Instruction, Opcode, Operand, Program};
use crate::maths::{add, sub};
use crate::memory::Memory;
use crate::reg::{Location, Register, Registers};
use crate::{Error, Fault, Result};
use log::debug;

/// An operand after decoding, still tagged with the class of operand it was.
#[derive(Copy, Clone, Debug)]
enum Arg {
    None,
    Imm(u64),
    Reg(Location),
    Mem(u64),
}

impl Arg {
    fn decode(operand: &Operand, registers: &Registers) -> Self {
        match (operand, operand.decode(registers)) {
            (Operand::Empty, _) => Arg::None,
            (_, Decoded::Value(value)) => Arg::Imm(value),
            (_, Decoded::Location(location)) => Arg::Reg(location),
            (_, Decoded::Address(address)) => Arg::Mem(address),
        }
    }
}

/// Run one instruction: fetch the slot at `rip`, parse it, then execute it.
///
/// Any error aborts the instruction before it changes the core or memory,
/// and is returned as a `Fault` describing where it happened.
pub fn instruction_cycle<M>(
    core: &mut Core,
    memory: &mut M,
    program: &Program,
) -> std::result::Result<(), Fault>
where
    M: Memory + ?Sized,
{
    let pc = core.rip;
    let text = program.fetch(pc).map_err(|e| Fault::new(pc, "", None, e))?;

    debug!("{:#x}    {}", pc, text);

    let instruction =
        parse_instruction(text).map_err(|e| Fault::new(pc, text, Some(e.field), e.kind))?;

    execute(core, memory, program.slot_width(), &instruction)
        .map_err(|e| Fault::new(pc, text, None, e))
}

/// Execute an already-parsed instruction.
///
/// `slot_width` is the distance from this instruction to the next one.
pub fn execute<M>(
    core: &mut Core,
    memory: &mut M,
    slot_width: u64,
    instruction: &Instruction,
) -> Result<()>
where
    M: Memory + ?Sized,
{
    Cycle {
        core,
        memory,
        slot_width,
        instruction,
    }
    .execute()
}

/// The state one instruction operates on.
struct Cycle<'a, M: ?Sized> {
    core: &'a mut Core,
    memory: &'a mut M,
    slot_width: u64,
    instruction: &'a Instruction,
}

impl<'a, M> Cycle<'a, M>
where
    M: Memory + ?Sized,
{
    fn execute(&mut self) -> Result<()> {
        let src = Arg::decode(self.instruction.src(), &self.core.registers);
        let dst = Arg::decode(self.instruction.dst(), &self.core.registers);

        match self.instruction.opcode() {
            Opcode::Mov => self.mov(src, dst),
            Opcode::Push => self.push(src, dst),
            Opcode::Pop => self.pop(src, dst),
            Opcode::Leave => self.leave(src, dst),
            Opcode::Call => self.call(src, dst),
            Opcode::Ret => self.ret(src, dst),
            Opcode::Add => self.add(src, dst),
            Opcode::Sub => self.sub(src, dst),
            Opcode::Cmp => self.cmp(src, dst),
            Opcode::Jne => self.jne(src, dst),
            Opcode::Jmp => self.jmp(src, dst),
        }
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedOperandForm {
            opcode: self.instruction.opcode(),
            src: self.instruction.src().kind(),
            dst: self.instruction.dst().kind(),
        }
    }

    fn next_rip(&mut self) {
        self.core.rip = self.core.rip.wrapping_add(self.slot_width);
    }

    /// The target of a control transfer: an immediate, or the address a
    /// memory operand computes.
    fn target(&self, src: Arg, dst: Arg) -> Result<u64> {
        match (src, dst) {
            (Arg::Imm(target), Arg::None) | (Arg::Mem(target), Arg::None) => Ok(target),
            _ => Err(self.unsupported()),
        }
    }

    fn mov(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Reg(from), Arg::Reg(to)) => {
                let value = self.core.read(from);
                self.core.write(to, value);
            }
            (Arg::Reg(from), Arg::Mem(to)) => {
                let value = self.core.read(from);
                self.memory.write_virtual(to, value);
            }
            (Arg::Mem(from), Arg::Reg(to)) => {
                let value = self.memory.read_virtual(from);
                self.core.write(to, value);
            }
            (Arg::Imm(value), Arg::Reg(to)) => self.core.write(to, value),
            _ => return Err(self.unsupported()),
        }

        self.core.flags.reset();
        self.next_rip();

        Ok(())
    }

    fn push(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Reg(from), Arg::None) => {
                let value = self.core.read(from);
                self.core.push(&mut *self.memory, value);
            }
            _ => return Err(self.unsupported()),
        }

        self.core.flags.reset();
        self.next_rip();

        Ok(())
    }

    fn pop(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Reg(to), Arg::None) => {
                let value = self.core.pop(&*self.memory);
                self.core.write(to, value);
            }
            _ => return Err(self.unsupported()),
        }

        self.core.flags.reset();
        self.next_rip();

        Ok(())
    }

    fn leave(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::None, Arg::None) => {
                let rbp = self.core.registers.get(Register::BP);
                self.core.set_rsp(rbp);

                let saved = self.core.pop(&*self.memory);
                self.core.registers.set(Register::BP, saved);
            }
            _ => return Err(self.unsupported()),
        }

        self.core.flags.reset();
        self.next_rip();

        Ok(())
    }

    fn call(&mut self, src: Arg, dst: Arg) -> Result<()> {
        let target = self.target(src, dst)?;
        let return_address = self.core.rip.wrapping_add(self.slot_width);

        self.core.push(&mut *self.memory, return_address);
        self.core.rip = target;
        self.core.flags.reset();

        Ok(())
    }

    fn ret(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::None, Arg::None) => self.core.rip = self.core.pop(&*self.memory),
            _ => return Err(self.unsupported()),
        }

        self.core.flags.reset();

        Ok(())
    }

    fn add(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Reg(from), Arg::Reg(to)) => {
                let (result, flags) = add(self.core.read(to), self.core.read(from));

                self.core.write(to, result);
                self.core.flags = flags;
            }
            _ => return Err(self.unsupported()),
        }

        self.next_rip();

        Ok(())
    }

    fn sub(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Imm(value), Arg::Reg(to)) => {
                let (result, flags) = sub(self.core.read(to), value);

                self.core.write(to, result);
                self.core.flags = flags;
            }
            _ => return Err(self.unsupported()),
        }

        self.next_rip();

        Ok(())
    }

    fn cmp(&mut self, src: Arg, dst: Arg) -> Result<()> {
        match (src, dst) {
            (Arg::Imm(value), Arg::Mem(address)) => {
                let (_, flags) = sub(self.memory.read_virtual(address), value);

                self.core.flags = flags;
            }
            _ => return Err(self.unsupported()),
        }

        self.next_rip();

        Ok(())
    }

    fn jne(&mut self, src: Arg, dst: Arg) -> Result<()> {
        let target = self.target(src, dst)?;

        if self.core.flags.zf {
            self.next_rip();
        } else {
            self.core.rip = target;
        }

        self.core.flags.reset();

        Ok(())
    }

    /// Jump unconditionally; the zero flag plays no part.
    fn jmp(&mut self, src: Arg, dst: Arg) -> Result<()> {
        self.core.rip = self.target(src, dst)?;
        self.core.flags.reset();

        Ok(())
    }
}
