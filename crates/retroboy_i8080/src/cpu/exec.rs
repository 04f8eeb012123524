//! Instruction handlers, one file per encoding family.
//!
//! Every handler has the [`Handler`](super::Handler) signature and receives
//! the opcode that selected it; register and condition fields are decoded
//! from its bits.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
