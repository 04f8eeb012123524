use thiserror::Error;

/// Faults raised by the bus or the instruction decoder.
///
/// Every variant is fatal to the current run: the fetch-execute loop halts
/// and hands the error back to the caller untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A read or write targeted an address at or beyond the bus capacity.
    #[error("address 0x{address:04X} is out of bounds (bus length is 0x{length:04X})")]
    AddressOutOfBounds { address: u16, length: u16 },

    /// The byte has no entry in the dispatch table.
    #[error("opcode 0x{opcode:02X} not found")]
    OpcodeNotFound { opcode: u8 },

    /// The instruction is recognised but deliberately not emulated
    /// (port IO and interrupt control).
    #[error("opcode 0x{opcode:02X} ({mnemonic}) is not implemented")]
    OpcodeNotImplemented { opcode: u8, mnemonic: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
