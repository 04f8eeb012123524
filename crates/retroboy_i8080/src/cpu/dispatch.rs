//! Opcode metadata and the handler table built from it.
//!
//! [`OPCODE_TABLE`] holds the static description of all 256 opcodes: the
//! 244 documented 8080 instructions have an entry, the 12 undocumented
//! encodings (0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xCB, 0xD9, 0xDD,
//! 0xED, 0xFD) are `None`. [`DispatchTable`] pairs every entry with the
//! handler for a concrete bus type and is built once per [`Cpu`].

use std::fmt;

use super::{Bus, Cpu};
use crate::error::Result;

/// Functional group of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionGroup {
    MoveLoadStore,
    Stack,
    Jump,
    Call,
    Return,
    Restart,
    IncrementDecrement,
    AddSubtract,
    Logical,
    Rotate,
    /// CMA, STC, CMC and DAA.
    Special,
    InputOutput,
    /// NOP, HLT, EI and DI.
    Control,
}

/// Static metadata for a single opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub group: InstructionGroup,
    /// Total size including operands (1-3 bytes).
    pub size: u8,
    /// Base cycle cost. Conditional calls and returns take longer when the
    /// branch is taken; that difference is not modelled.
    pub cycles: u8,
}

const fn info(
    mnemonic: &'static str,
    group: InstructionGroup,
    size: u8,
    cycles: u8,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        group,
        size,
        cycles,
    }
}

use InstructionGroup::*;

/// Metadata for every opcode, indexed by the opcode byte.
pub static OPCODE_TABLE: [Option<OpcodeInfo>; 256] = [
    /* 0x00 */ Some(info("NOP", Control, 1, 4)),
    /* 0x01 */ Some(info("LXI B", MoveLoadStore, 3, 10)),
    /* 0x02 */ Some(info("STAX B", MoveLoadStore, 1, 7)),
    /* 0x03 */ Some(info("INX B", IncrementDecrement, 1, 5)),
    /* 0x04 */ Some(info("INR B", IncrementDecrement, 1, 5)),
    /* 0x05 */ Some(info("DCR B", IncrementDecrement, 1, 5)),
    /* 0x06 */ Some(info("MVI B", MoveLoadStore, 2, 7)),
    /* 0x07 */ Some(info("RLC", Rotate, 1, 4)),
    /* 0x08 */ None,
    /* 0x09 */ Some(info("DAD B", AddSubtract, 1, 10)),
    /* 0x0A */ Some(info("LDAX B", MoveLoadStore, 1, 7)),
    /* 0x0B */ Some(info("DCX B", IncrementDecrement, 1, 5)),
    /* 0x0C */ Some(info("INR C", IncrementDecrement, 1, 5)),
    /* 0x0D */ Some(info("DCR C", IncrementDecrement, 1, 5)),
    /* 0x0E */ Some(info("MVI C", MoveLoadStore, 2, 7)),
    /* 0x0F */ Some(info("RRC", Rotate, 1, 4)),
    /* 0x10 */ None,
    /* 0x11 */ Some(info("LXI D", MoveLoadStore, 3, 10)),
    /* 0x12 */ Some(info("STAX D", MoveLoadStore, 1, 7)),
    /* 0x13 */ Some(info("INX D", IncrementDecrement, 1, 5)),
    /* 0x14 */ Some(info("INR D", IncrementDecrement, 1, 5)),
    /* 0x15 */ Some(info("DCR D", IncrementDecrement, 1, 5)),
    /* 0x16 */ Some(info("MVI D", MoveLoadStore, 2, 7)),
    /* 0x17 */ Some(info("RAL", Rotate, 1, 4)),
    /* 0x18 */ None,
    /* 0x19 */ Some(info("DAD D", AddSubtract, 1, 10)),
    /* 0x1A */ Some(info("LDAX D", MoveLoadStore, 1, 7)),
    /* 0x1B */ Some(info("DCX D", IncrementDecrement, 1, 5)),
    /* 0x1C */ Some(info("INR E", IncrementDecrement, 1, 5)),
    /* 0x1D */ Some(info("DCR E", IncrementDecrement, 1, 5)),
    /* 0x1E */ Some(info("MVI E", MoveLoadStore, 2, 7)),
    /* 0x1F */ Some(info("RAR", Rotate, 1, 4)),
    /* 0x20 */ None,
    /* 0x21 */ Some(info("LXI H", MoveLoadStore, 3, 10)),
    /* 0x22 */ Some(info("SHLD", MoveLoadStore, 3, 16)),
    /* 0x23 */ Some(info("INX H", IncrementDecrement, 1, 5)),
    /* 0x24 */ Some(info("INR H", IncrementDecrement, 1, 5)),
    /* 0x25 */ Some(info("DCR H", IncrementDecrement, 1, 5)),
    /* 0x26 */ Some(info("MVI H", MoveLoadStore, 2, 7)),
    /* 0x27 */ Some(info("DAA", Special, 1, 4)),
    /* 0x28 */ None,
    /* 0x29 */ Some(info("DAD H", AddSubtract, 1, 10)),
    /* 0x2A */ Some(info("LHLD", MoveLoadStore, 3, 16)),
    /* 0x2B */ Some(info("DCX H", IncrementDecrement, 1, 5)),
    /* 0x2C */ Some(info("INR L", IncrementDecrement, 1, 5)),
    /* 0x2D */ Some(info("DCR L", IncrementDecrement, 1, 5)),
    /* 0x2E */ Some(info("MVI L", MoveLoadStore, 2, 7)),
    /* 0x2F */ Some(info("CMA", Special, 1, 4)),
    /* 0x30 */ None,
    /* 0x31 */ Some(info("LXI SP", MoveLoadStore, 3, 10)),
    /* 0x32 */ Some(info("STA", MoveLoadStore, 3, 13)),
    /* 0x33 */ Some(info("INX SP", IncrementDecrement, 1, 5)),
    /* 0x34 */ Some(info("INR M", IncrementDecrement, 1, 10)),
    /* 0x35 */ Some(info("DCR M", IncrementDecrement, 1, 10)),
    /* 0x36 */ Some(info("MVI M", MoveLoadStore, 2, 10)),
    /* 0x37 */ Some(info("STC", Special, 1, 4)),
    /* 0x38 */ None,
    /* 0x39 */ Some(info("DAD SP", AddSubtract, 1, 10)),
    /* 0x3A */ Some(info("LDA", MoveLoadStore, 3, 13)),
    /* 0x3B */ Some(info("DCX SP", IncrementDecrement, 1, 5)),
    /* 0x3C */ Some(info("INR A", IncrementDecrement, 1, 5)),
    /* 0x3D */ Some(info("DCR A", IncrementDecrement, 1, 5)),
    /* 0x3E */ Some(info("MVI A", MoveLoadStore, 2, 7)),
    /* 0x3F */ Some(info("CMC", Special, 1, 4)),
    /* 0x40 */ Some(info("MOV B,B", MoveLoadStore, 1, 5)),
    /* 0x41 */ Some(info("MOV B,C", MoveLoadStore, 1, 5)),
    /* 0x42 */ Some(info("MOV B,D", MoveLoadStore, 1, 5)),
    /* 0x43 */ Some(info("MOV B,E", MoveLoadStore, 1, 5)),
    /* 0x44 */ Some(info("MOV B,H", MoveLoadStore, 1, 5)),
    /* 0x45 */ Some(info("MOV B,L", MoveLoadStore, 1, 5)),
    /* 0x46 */ Some(info("MOV B,M", MoveLoadStore, 1, 7)),
    /* 0x47 */ Some(info("MOV B,A", MoveLoadStore, 1, 5)),
    /* 0x48 */ Some(info("MOV C,B", MoveLoadStore, 1, 5)),
    /* 0x49 */ Some(info("MOV C,C", MoveLoadStore, 1, 5)),
    /* 0x4A */ Some(info("MOV C,D", MoveLoadStore, 1, 5)),
    /* 0x4B */ Some(info("MOV C,E", MoveLoadStore, 1, 5)),
    /* 0x4C */ Some(info("MOV C,H", MoveLoadStore, 1, 5)),
    /* 0x4D */ Some(info("MOV C,L", MoveLoadStore, 1, 5)),
    /* 0x4E */ Some(info("MOV C,M", MoveLoadStore, 1, 7)),
    /* 0x4F */ Some(info("MOV C,A", MoveLoadStore, 1, 5)),
    /* 0x50 */ Some(info("MOV D,B", MoveLoadStore, 1, 5)),
    /* 0x51 */ Some(info("MOV D,C", MoveLoadStore, 1, 5)),
    /* 0x52 */ Some(info("MOV D,D", MoveLoadStore, 1, 5)),
    /* 0x53 */ Some(info("MOV D,E", MoveLoadStore, 1, 5)),
    /* 0x54 */ Some(info("MOV D,H", MoveLoadStore, 1, 5)),
    /* 0x55 */ Some(info("MOV D,L", MoveLoadStore, 1, 5)),
    /* 0x56 */ Some(info("MOV D,M", MoveLoadStore, 1, 7)),
    /* 0x57 */ Some(info("MOV D,A", MoveLoadStore, 1, 5)),
    /* 0x58 */ Some(info("MOV E,B", MoveLoadStore, 1, 5)),
    /* 0x59 */ Some(info("MOV E,C", MoveLoadStore, 1, 5)),
    /* 0x5A */ Some(info("MOV E,D", MoveLoadStore, 1, 5)),
    /* 0x5B */ Some(info("MOV E,E", MoveLoadStore, 1, 5)),
    /* 0x5C */ Some(info("MOV E,H", MoveLoadStore, 1, 5)),
    /* 0x5D */ Some(info("MOV E,L", MoveLoadStore, 1, 5)),
    /* 0x5E */ Some(info("MOV E,M", MoveLoadStore, 1, 7)),
    /* 0x5F */ Some(info("MOV E,A", MoveLoadStore, 1, 5)),
    /* 0x60 */ Some(info("MOV H,B", MoveLoadStore, 1, 5)),
    /* 0x61 */ Some(info("MOV H,C", MoveLoadStore, 1, 5)),
    /* 0x62 */ Some(info("MOV H,D", MoveLoadStore, 1, 5)),
    /* 0x63 */ Some(info("MOV H,E", MoveLoadStore, 1, 5)),
    /* 0x64 */ Some(info("MOV H,H", MoveLoadStore, 1, 5)),
    /* 0x65 */ Some(info("MOV H,L", MoveLoadStore, 1, 5)),
    /* 0x66 */ Some(info("MOV H,M", MoveLoadStore, 1, 7)),
    /* 0x67 */ Some(info("MOV H,A", MoveLoadStore, 1, 5)),
    /* 0x68 */ Some(info("MOV L,B", MoveLoadStore, 1, 5)),
    /* 0x69 */ Some(info("MOV L,C", MoveLoadStore, 1, 5)),
    /* 0x6A */ Some(info("MOV L,D", MoveLoadStore, 1, 5)),
    /* 0x6B */ Some(info("MOV L,E", MoveLoadStore, 1, 5)),
    /* 0x6C */ Some(info("MOV L,H", MoveLoadStore, 1, 5)),
    /* 0x6D */ Some(info("MOV L,L", MoveLoadStore, 1, 5)),
    /* 0x6E */ Some(info("MOV L,M", MoveLoadStore, 1, 7)),
    /* 0x6F */ Some(info("MOV L,A", MoveLoadStore, 1, 5)),
    /* 0x70 */ Some(info("MOV M,B", MoveLoadStore, 1, 7)),
    /* 0x71 */ Some(info("MOV M,C", MoveLoadStore, 1, 7)),
    /* 0x72 */ Some(info("MOV M,D", MoveLoadStore, 1, 7)),
    /* 0x73 */ Some(info("MOV M,E", MoveLoadStore, 1, 7)),
    /* 0x74 */ Some(info("MOV M,H", MoveLoadStore, 1, 7)),
    /* 0x75 */ Some(info("MOV M,L", MoveLoadStore, 1, 7)),
    /* 0x76 */ Some(info("HLT", Control, 1, 7)),
    /* 0x77 */ Some(info("MOV M,A", MoveLoadStore, 1, 7)),
    /* 0x78 */ Some(info("MOV A,B", MoveLoadStore, 1, 5)),
    /* 0x79 */ Some(info("MOV A,C", MoveLoadStore, 1, 5)),
    /* 0x7A */ Some(info("MOV A,D", MoveLoadStore, 1, 5)),
    /* 0x7B */ Some(info("MOV A,E", MoveLoadStore, 1, 5)),
    /* 0x7C */ Some(info("MOV A,H", MoveLoadStore, 1, 5)),
    /* 0x7D */ Some(info("MOV A,L", MoveLoadStore, 1, 5)),
    /* 0x7E */ Some(info("MOV A,M", MoveLoadStore, 1, 7)),
    /* 0x7F */ Some(info("MOV A,A", MoveLoadStore, 1, 5)),
    /* 0x80 */ Some(info("ADD B", AddSubtract, 1, 4)),
    /* 0x81 */ Some(info("ADD C", AddSubtract, 1, 4)),
    /* 0x82 */ Some(info("ADD D", AddSubtract, 1, 4)),
    /* 0x83 */ Some(info("ADD E", AddSubtract, 1, 4)),
    /* 0x84 */ Some(info("ADD H", AddSubtract, 1, 4)),
    /* 0x85 */ Some(info("ADD L", AddSubtract, 1, 4)),
    /* 0x86 */ Some(info("ADD M", AddSubtract, 1, 7)),
    /* 0x87 */ Some(info("ADD A", AddSubtract, 1, 4)),
    /* 0x88 */ Some(info("ADC B", AddSubtract, 1, 4)),
    /* 0x89 */ Some(info("ADC C", AddSubtract, 1, 4)),
    /* 0x8A */ Some(info("ADC D", AddSubtract, 1, 4)),
    /* 0x8B */ Some(info("ADC E", AddSubtract, 1, 4)),
    /* 0x8C */ Some(info("ADC H", AddSubtract, 1, 4)),
    /* 0x8D */ Some(info("ADC L", AddSubtract, 1, 4)),
    /* 0x8E */ Some(info("ADC M", AddSubtract, 1, 7)),
    /* 0x8F */ Some(info("ADC A", AddSubtract, 1, 4)),
    /* 0x90 */ Some(info("SUB B", AddSubtract, 1, 4)),
    /* 0x91 */ Some(info("SUB C", AddSubtract, 1, 4)),
    /* 0x92 */ Some(info("SUB D", AddSubtract, 1, 4)),
    /* 0x93 */ Some(info("SUB E", AddSubtract, 1, 4)),
    /* 0x94 */ Some(info("SUB H", AddSubtract, 1, 4)),
    /* 0x95 */ Some(info("SUB L", AddSubtract, 1, 4)),
    /* 0x96 */ Some(info("SUB M", AddSubtract, 1, 7)),
    /* 0x97 */ Some(info("SUB A", AddSubtract, 1, 4)),
    /* 0x98 */ Some(info("SBB B", AddSubtract, 1, 4)),
    /* 0x99 */ Some(info("SBB C", AddSubtract, 1, 4)),
    /* 0x9A */ Some(info("SBB D", AddSubtract, 1, 4)),
    /* 0x9B */ Some(info("SBB E", AddSubtract, 1, 4)),
    /* 0x9C */ Some(info("SBB H", AddSubtract, 1, 4)),
    /* 0x9D */ Some(info("SBB L", AddSubtract, 1, 4)),
    /* 0x9E */ Some(info("SBB M", AddSubtract, 1, 7)),
    /* 0x9F */ Some(info("SBB A", AddSubtract, 1, 4)),
    /* 0xA0 */ Some(info("ANA B", Logical, 1, 4)),
    /* 0xA1 */ Some(info("ANA C", Logical, 1, 4)),
    /* 0xA2 */ Some(info("ANA D", Logical, 1, 4)),
    /* 0xA3 */ Some(info("ANA E", Logical, 1, 4)),
    /* 0xA4 */ Some(info("ANA H", Logical, 1, 4)),
    /* 0xA5 */ Some(info("ANA L", Logical, 1, 4)),
    /* 0xA6 */ Some(info("ANA M", Logical, 1, 7)),
    /* 0xA7 */ Some(info("ANA A", Logical, 1, 4)),
    /* 0xA8 */ Some(info("XRA B", Logical, 1, 4)),
    /* 0xA9 */ Some(info("XRA C", Logical, 1, 4)),
    /* 0xAA */ Some(info("XRA D", Logical, 1, 4)),
    /* 0xAB */ Some(info("XRA E", Logical, 1, 4)),
    /* 0xAC */ Some(info("XRA H", Logical, 1, 4)),
    /* 0xAD */ Some(info("XRA L", Logical, 1, 4)),
    /* 0xAE */ Some(info("XRA M", Logical, 1, 7)),
    /* 0xAF */ Some(info("XRA A", Logical, 1, 4)),
    /* 0xB0 */ Some(info("ORA B", Logical, 1, 4)),
    /* 0xB1 */ Some(info("ORA C", Logical, 1, 4)),
    /* 0xB2 */ Some(info("ORA D", Logical, 1, 4)),
    /* 0xB3 */ Some(info("ORA E", Logical, 1, 4)),
    /* 0xB4 */ Some(info("ORA H", Logical, 1, 4)),
    /* 0xB5 */ Some(info("ORA L", Logical, 1, 4)),
    /* 0xB6 */ Some(info("ORA M", Logical, 1, 7)),
    /* 0xB7 */ Some(info("ORA A", Logical, 1, 4)),
    /* 0xB8 */ Some(info("CMP B", Logical, 1, 4)),
    /* 0xB9 */ Some(info("CMP C", Logical, 1, 4)),
    /* 0xBA */ Some(info("CMP D", Logical, 1, 4)),
    /* 0xBB */ Some(info("CMP E", Logical, 1, 4)),
    /* 0xBC */ Some(info("CMP H", Logical, 1, 4)),
    /* 0xBD */ Some(info("CMP L", Logical, 1, 4)),
    /* 0xBE */ Some(info("CMP M", Logical, 1, 7)),
    /* 0xBF */ Some(info("CMP A", Logical, 1, 4)),
    /* 0xC0 */ Some(info("RNZ", Return, 1, 5)),
    /* 0xC1 */ Some(info("POP B", Stack, 1, 10)),
    /* 0xC2 */ Some(info("JNZ", Jump, 3, 10)),
    /* 0xC3 */ Some(info("JMP", Jump, 3, 10)),
    /* 0xC4 */ Some(info("CNZ", Call, 3, 11)),
    /* 0xC5 */ Some(info("PUSH B", Stack, 1, 11)),
    /* 0xC6 */ Some(info("ADI", AddSubtract, 2, 7)),
    /* 0xC7 */ Some(info("RST 0", Restart, 1, 11)),
    /* 0xC8 */ Some(info("RZ", Return, 1, 5)),
    /* 0xC9 */ Some(info("RET", Return, 1, 10)),
    /* 0xCA */ Some(info("JZ", Jump, 3, 10)),
    /* 0xCB */ None,
    /* 0xCC */ Some(info("CZ", Call, 3, 11)),
    /* 0xCD */ Some(info("CALL", Call, 3, 17)),
    /* 0xCE */ Some(info("ACI", AddSubtract, 2, 7)),
    /* 0xCF */ Some(info("RST 1", Restart, 1, 11)),
    /* 0xD0 */ Some(info("RNC", Return, 1, 5)),
    /* 0xD1 */ Some(info("POP D", Stack, 1, 10)),
    /* 0xD2 */ Some(info("JNC", Jump, 3, 10)),
    /* 0xD3 */ Some(info("OUT", InputOutput, 2, 10)),
    /* 0xD4 */ Some(info("CNC", Call, 3, 11)),
    /* 0xD5 */ Some(info("PUSH D", Stack, 1, 11)),
    /* 0xD6 */ Some(info("SUI", AddSubtract, 2, 7)),
    /* 0xD7 */ Some(info("RST 2", Restart, 1, 11)),
    /* 0xD8 */ Some(info("RC", Return, 1, 5)),
    /* 0xD9 */ None,
    /* 0xDA */ Some(info("JC", Jump, 3, 10)),
    /* 0xDB */ Some(info("IN", InputOutput, 2, 10)),
    /* 0xDC */ Some(info("CC", Call, 3, 11)),
    /* 0xDD */ None,
    /* 0xDE */ Some(info("SBI", AddSubtract, 2, 7)),
    /* 0xDF */ Some(info("RST 3", Restart, 1, 11)),
    /* 0xE0 */ Some(info("RPO", Return, 1, 5)),
    /* 0xE1 */ Some(info("POP H", Stack, 1, 10)),
    /* 0xE2 */ Some(info("JPO", Jump, 3, 10)),
    /* 0xE3 */ Some(info("XTHL", Stack, 1, 18)),
    /* 0xE4 */ Some(info("CPO", Call, 3, 11)),
    /* 0xE5 */ Some(info("PUSH H", Stack, 1, 11)),
    /* 0xE6 */ Some(info("ANI", Logical, 2, 7)),
    /* 0xE7 */ Some(info("RST 4", Restart, 1, 11)),
    /* 0xE8 */ Some(info("RPE", Return, 1, 5)),
    /* 0xE9 */ Some(info("PCHL", Jump, 1, 5)),
    /* 0xEA */ Some(info("JPE", Jump, 3, 10)),
    /* 0xEB */ Some(info("XCHG", MoveLoadStore, 1, 4)),
    /* 0xEC */ Some(info("CPE", Call, 3, 11)),
    /* 0xED */ None,
    /* 0xEE */ Some(info("XRI", Logical, 2, 7)),
    /* 0xEF */ Some(info("RST 5", Restart, 1, 11)),
    /* 0xF0 */ Some(info("RP", Return, 1, 5)),
    /* 0xF1 */ Some(info("POP PSW", Stack, 1, 10)),
    /* 0xF2 */ Some(info("JP", Jump, 3, 10)),
    /* 0xF3 */ Some(info("DI", Control, 1, 4)),
    /* 0xF4 */ Some(info("CP", Call, 3, 11)),
    /* 0xF5 */ Some(info("PUSH PSW", Stack, 1, 11)),
    /* 0xF6 */ Some(info("ORI", Logical, 2, 7)),
    /* 0xF7 */ Some(info("RST 6", Restart, 1, 11)),
    /* 0xF8 */ Some(info("RM", Return, 1, 5)),
    /* 0xF9 */ Some(info("SPHL", Stack, 1, 5)),
    /* 0xFA */ Some(info("JM", Jump, 3, 10)),
    /* 0xFB */ Some(info("EI", Control, 1, 4)),
    /* 0xFC */ Some(info("CM", Call, 3, 11)),
    /* 0xFD */ None,
    /* 0xFE */ Some(info("CPI", Logical, 2, 7)),
    /* 0xFF */ Some(info("RST 7", Restart, 1, 11)),
];

/// Signature shared by all instruction handlers. The opcode is passed so
/// one handler can serve a whole encoding group.
pub type Handler<B> = fn(&mut Cpu<B>, u8) -> Result<()>;

/// A dispatch table entry.
pub struct Instruction<B: Bus> {
    pub info: OpcodeInfo,
    pub exec: Handler<B>,
}

impl<B: Bus> Clone for Instruction<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Bus> Copy for Instruction<B> {}

impl<B: Bus> fmt::Debug for Instruction<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Opcode to handler mapping, constructed once before the first run.
pub struct DispatchTable<B: Bus> {
    entries: [Option<Instruction<B>>; 256],
}

impl<B: Bus> DispatchTable<B> {
    pub fn new() -> Self {
        let entries = std::array::from_fn(|index| -> Option<Instruction<B>> {
            let info = OPCODE_TABLE[index]?;
            let exec = Self::handler(index as u8)?;
            Some(Instruction { info, exec })
        });
        Self { entries }
    }

    /// Look up the entry for `opcode`, `None` for undocumented encodings.
    #[inline]
    pub fn get(&self, opcode: u8) -> Option<Instruction<B>> {
        self.entries[opcode as usize]
    }

    /// Number of opcodes with a handler.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handler(opcode: u8) -> Option<Handler<B>> {
        let handler: Handler<B> = match opcode {
            0x00 => Cpu::exec_nop,
            0x76 => Cpu::exec_hlt,

            // MOV r1, r2 (HLT carved out above)
            0x40..=0x7F => Cpu::exec_mov,

            // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r
            0x80..=0xBF => Cpu::exec_alu_reg,

            op if op & 0xCF == 0x01 => Cpu::exec_lxi,
            op if op & 0xCF == 0x03 => Cpu::exec_inx,
            op if op & 0xCF == 0x09 => Cpu::exec_dad,
            op if op & 0xCF == 0x0B => Cpu::exec_dcx,
            op if op & 0xC7 == 0x04 => Cpu::exec_inr,
            op if op & 0xC7 == 0x05 => Cpu::exec_dcr,
            op if op & 0xC7 == 0x06 => Cpu::exec_mvi,

            0x02 | 0x12 => Cpu::exec_stax,
            0x0A | 0x1A => Cpu::exec_ldax,
            0x22 => Cpu::exec_shld,
            0x2A => Cpu::exec_lhld,
            0x32 => Cpu::exec_sta,
            0x3A => Cpu::exec_lda,
            0xEB => Cpu::exec_xchg,

            0x07 | 0x0F | 0x17 | 0x1F => Cpu::exec_rotate,
            0x27 => Cpu::exec_daa,
            0x2F => Cpu::exec_cma,
            0x37 => Cpu::exec_stc,
            0x3F => Cpu::exec_cmc,

            op if op & 0xC7 == 0xC0 => Cpu::exec_ret,
            0xC9 => Cpu::exec_ret,
            op if op & 0xC7 == 0xC2 => Cpu::exec_jump,
            0xC3 => Cpu::exec_jump,
            op if op & 0xC7 == 0xC4 => Cpu::exec_call,
            0xCD => Cpu::exec_call,
            op if op & 0xC7 == 0xC6 => Cpu::exec_alu_imm,
            op if op & 0xC7 == 0xC7 => Cpu::exec_rst,
            0xE9 => Cpu::exec_pchl,

            op if op & 0xCF == 0xC1 => Cpu::exec_pop,
            op if op & 0xCF == 0xC5 => Cpu::exec_push,
            0xE3 => Cpu::exec_xthl,
            0xF9 => Cpu::exec_sphl,

            // IN, OUT, DI, EI
            0xD3 | 0xDB | 0xF3 | 0xFB => Cpu::exec_unimplemented,

            _ => return None,
        };
        Some(handler)
    }
}

impl<B: Bus> Default for DispatchTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> fmt::Debug for DispatchTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::InstructionGroup::*;
    use super::*;
    use crate::bus::Memory;

    const UNDOCUMENTED: [u8; 12] = [
        0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xCB, 0xD9, 0xDD, 0xED, 0xFD,
    ];

    #[test]
    fn every_documented_opcode_has_a_handler() {
        for opcode in 0..=u8::MAX {
            let has_info = OPCODE_TABLE[opcode as usize].is_some();
            let has_handler = DispatchTable::<Memory>::handler(opcode).is_some();
            assert_eq!(has_info, has_handler, "opcode 0x{opcode:02X}");
            assert_eq!(
                has_info,
                !UNDOCUMENTED.contains(&opcode),
                "opcode 0x{opcode:02X}"
            );
        }

        let table = DispatchTable::<Memory>::new();
        assert_eq!(table.len(), 244);
        assert!(table.get(0xCB).is_none());
    }

    #[test]
    fn metadata_matches_encoding() {
        let table = DispatchTable::<Memory>::new();
        let lookup = |opcode: u8| table.get(opcode).map(|entry| entry.info);

        assert_eq!(lookup(0x00), Some(info("NOP", Control, 1, 4)));
        assert_eq!(lookup(0x76), Some(info("HLT", Control, 1, 7)));
        assert_eq!(lookup(0x41), Some(info("MOV B,C", MoveLoadStore, 1, 5)));
        assert_eq!(lookup(0x77), Some(info("MOV M,A", MoveLoadStore, 1, 7)));
        assert_eq!(lookup(0xCD), Some(info("CALL", Call, 3, 17)));
        assert_eq!(lookup(0xFF), Some(info("RST 7", Restart, 1, 11)));
        assert_eq!(lookup(0xF5), Some(info("PUSH PSW", Stack, 1, 11)));
        assert_eq!(lookup(0xDB), Some(info("IN", InputOutput, 2, 10)));
        assert_eq!(lookup(0xBE), Some(info("CMP M", Logical, 1, 7)));
    }

    #[test]
    fn sizes_follow_operand_kind() {
        for entry in OPCODE_TABLE.iter().flatten() {
            let expected = match (entry.group, entry.mnemonic) {
                (_, "PCHL") => 1,
                (Jump | Call, _) => 3,
                (_, "LDA" | "STA" | "LHLD" | "SHLD") => 3,
                (_, m) if m.starts_with("LXI") => 3,
                (_, m) if m.starts_with("MVI") => 2,
                // ADI, ACI, .. CPI carry no register in the mnemonic.
                (AddSubtract | Logical, m) if !m.contains(' ') => 2,
                (InputOutput, _) => 2,
                _ => 1,
            };
            assert_eq!(entry.size, expected, "{}", entry.mnemonic);
        }
    }
}
