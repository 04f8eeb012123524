mod alu;
mod config;
mod control;
mod dispatch;
mod exec;
mod helpers;
mod regs;

pub use config::CpuConfig;
pub use control::Condition;
pub use dispatch::{
    DispatchTable, Handler, Instruction, InstructionGroup, OpcodeInfo, OPCODE_TABLE,
};
pub use regs::{Flags, PswBits, Registers};

use crate::bus::{Bus, Memory};
use crate::error::{Error, Result};

/// Intel 8080 CPU core.
///
/// The CPU owns its bus for the whole session. Load a program with
/// [`Cpu::load`], then drive it with [`Cpu::run`] or one instruction at a
/// time with [`Cpu::step`]. Any fault (bus access out of range, an opcode
/// without handler, an opcode that is not emulated) halts the CPU and is
/// returned to the caller.
pub struct Cpu<B: Bus = Memory> {
    pub regs: Registers,
    halted: bool,
    cycles: u64,
    bus: B,
    table: DispatchTable<B>,
    config: CpuConfig,
}

impl<B: Bus> Cpu<B> {
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, CpuConfig::default())
    }

    pub fn with_config(bus: B, config: CpuConfig) -> Self {
        Self {
            regs: Registers::default(),
            halted: false,
            cycles: 0,
            bus,
            table: DispatchTable::new(),
            config,
        }
    }

    /// Copy `program` to the bus starting at address 0.
    ///
    /// Fails without writing anything if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let length = self.bus.length();
        if program.len() > length as usize {
            return Err(Error::AddressOutOfBounds {
                address: length,
                length,
            });
        }

        for (address, &value) in (0..=u16::MAX).zip(program) {
            self.bus.write_byte_at(address, value)?;
        }
        log::debug!("loaded {} bytes (bus length 0x{:04X})", program.len(), length);
        Ok(())
    }

    /// Run until HLT or a fault.
    ///
    /// Returns immediately if the CPU is already halted.
    pub fn run(&mut self) -> Result<()> {
        while !self.halted {
            self.step()?;
            if let Some(delay) = self.config.cycle_delay {
                std::thread::sleep(delay);
            }
        }
        Ok(())
    }

    /// Execute a single instruction and return its cycle cost.
    ///
    /// A halted CPU executes nothing and reports 0 cycles.
    pub fn step(&mut self) -> Result<u32> {
        if self.halted {
            return Ok(0);
        }

        let pc = self.regs.pc;
        match self.fetch_byte().and_then(|opcode| self.dispatch(opcode)) {
            Ok(cycles) => Ok(cycles),
            Err(err) => {
                self.halted = true;
                log::error!("fault at PC={pc:04X}: {err}; {}", self.regs);
                Err(err)
            }
        }
    }

    /// Execute `opcode` as if it had just been fetched.
    ///
    /// Operands are still read from the bus at PC. Errors halt the CPU the
    /// same way [`Cpu::step`] does.
    pub fn execute(&mut self, opcode: u8) -> Result<()> {
        self.dispatch(opcode).map(|_| ()).inspect_err(|_| self.halted = true)
    }

    fn dispatch(&mut self, opcode: u8) -> Result<u32> {
        let instruction = self
            .table
            .get(opcode)
            .ok_or(Error::OpcodeNotFound { opcode })?;

        let mnemonic = instruction.info.mnemonic;
        if self.config.trace_instructions {
            log::debug!("{opcode:02X} {mnemonic:<8} {}", self.regs);
        } else {
            log::trace!("{opcode:02X} {mnemonic:<8} {}", self.regs);
        }

        (instruction.exec)(self, opcode)?;

        let cycles = instruction.info.cycles as u32;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Clear registers, flags, the halted state and the cycle counter.
    /// Bus contents are kept.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.halted = false;
        self.cycles = 0;
        log::debug!("cpu reset");
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Cycles executed since construction or the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    pub fn table(&self) -> &DispatchTable<B> {
        &self.table
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl Default for Cpu<Memory> {
    fn default() -> Self {
        Self::new(Memory::default())
    }
}

impl<B: Bus + std::fmt::Debug> std::fmt::Debug for Cpu<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("halted", &self.halted)
            .field("cycles", &self.cycles)
            .field("bus", &self.bus)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
