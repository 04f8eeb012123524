use crate::error::{Error, Result};

/// Byte-addressable memory as seen by the 8080 core.
///
/// The CPU uses this trait for every instruction fetch, operand read, stack
/// access and memory store without knowing anything about the backing store.
/// Accesses at or beyond [`Bus::length`] must fail with
/// [`Error::AddressOutOfBounds`]; they are never clamped or wrapped.
pub trait Bus {
    fn read_byte_at(&self, address: u16) -> Result<u8>;
    fn write_byte_at(&mut self, address: u16, value: u8) -> Result<()>;

    /// Capacity of the bus in bytes.
    fn length(&self) -> u16;
}

/// Largest capacity a [`Memory`] can be created with.
///
/// Lengths are reported as `u16`, so the last addressable byte is 0xFFFE and
/// address 0xFFFF is always out of bounds.
pub const MAX_MEMORY_SIZE: u16 = u16::MAX;

/// Flat RAM with a capacity fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a zero-filled memory of `size` bytes.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Raw view of the whole store, e.g. for dumps or test assertions.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn out_of_bounds(&self, address: u16) -> Error {
        Error::AddressOutOfBounds {
            address,
            length: self.length(),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(MAX_MEMORY_SIZE)
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("length", &self.data.len())
            .finish()
    }
}

impl Bus for Memory {
    fn read_byte_at(&self, address: u16) -> Result<u8> {
        self.data
            .get(address as usize)
            .copied()
            .ok_or_else(|| self.out_of_bounds(address))
    }

    fn write_byte_at(&mut self, address: u16, value: u8) -> Result<()> {
        let err = self.out_of_bounds(address);
        let slot = self.data.get_mut(address as usize).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    fn length(&self) -> u16 {
        // Capacity comes from a u16 in `new`, so this never truncates.
        self.data.len() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memory_is_zeroed() {
        let memory = Memory::new(32);
        assert_eq!(memory.length(), 32);
        for address in 0..32 {
            assert_eq!(memory.read_byte_at(address), Ok(0));
        }
    }

    #[test]
    fn default_memory_uses_full_capacity() {
        let memory = Memory::default();
        assert_eq!(memory.length(), 0xFFFF);
        assert_eq!(memory.read_byte_at(0xFFFE), Ok(0));
        assert_eq!(
            memory.read_byte_at(0xFFFF),
            Err(Error::AddressOutOfBounds {
                address: 0xFFFF,
                length: 0xFFFF
            })
        );
    }

    #[test]
    fn write_then_read_returns_value_at_every_address() {
        let mut memory = Memory::new(0x100);
        for address in 0..0x100u16 {
            let value = (address as u8).wrapping_mul(7) ^ 0x5A;
            memory.write_byte_at(address, value).unwrap();
            assert_eq!(memory.read_byte_at(address), Ok(value));
        }
    }

    #[test]
    fn every_value_round_trips() {
        let mut memory = Memory::new(4);
        for value in 0..=u8::MAX {
            memory.write_byte_at(3, value).unwrap();
            assert_eq!(memory.read_byte_at(3), Ok(value));
        }
    }

    #[test]
    fn out_of_range_accesses_fail() {
        let mut memory = Memory::new(16);
        for address in [16u16, 17, 0x1000, 0xFFFF] {
            let expected = Error::AddressOutOfBounds {
                address,
                length: 16,
            };
            assert_eq!(memory.read_byte_at(address), Err(expected));
            assert_eq!(memory.write_byte_at(address, 0xAA), Err(expected));
        }
        // Failed writes leave the store untouched.
        assert!(memory.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_sized_memory_rejects_everything() {
        let mut memory = Memory::new(0);
        assert_eq!(memory.length(), 0);
        assert!(memory.read_byte_at(0).is_err());
        assert!(memory.write_byte_at(0, 1).is_err());
    }
}
