//! Intel 8080 CPU core.
//!
//! The core is split into a [`Bus`] that owns the addressable memory and a
//! [`Cpu`] that runs the fetch-decode-execute loop over it:
//!
//! ```
//! use retroboy_i8080::{Cpu, Memory};
//!
//! // MVI A, 0x05; INR A; HLT
//! let mut cpu = Cpu::new(Memory::new(0x100));
//! cpu.load(&[0x3E, 0x05, 0x3C, 0x76]).unwrap();
//! cpu.run().unwrap();
//! assert_eq!(cpu.regs.a, 0x06);
//! assert!(cpu.is_halted());
//! ```
//!
//! Port IO and interrupts are not emulated: IN, OUT, EI and DI fail with
//! [`Error::OpcodeNotImplemented`].

pub mod bus;
pub mod cpu;
pub mod error;

pub use bus::{Bus, Memory, MAX_MEMORY_SIZE};
pub use cpu::{
    Condition, Cpu, CpuConfig, DispatchTable, Flags, Handler, Instruction, InstructionGroup,
    OpcodeInfo, PswBits, Registers, OPCODE_TABLE,
};
pub use error::{Error, Result};
