use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use retroboy_i8080::{Cpu, CpuConfig, Memory, MAX_MEMORY_SIZE};

/// Bytes shown by the memory dump logged after a run.
pub const DUMP_LENGTH: usize = 0x100;

pub const USAGE: &str = "usage: retroboy-i8080 <program.bin> [memory-size] [delay-ms] [--trace]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub program_path: PathBuf,
    pub memory_size: u16,
    pub cycle_delay: Option<Duration>,
    pub trace: bool,
}

impl RunOptions {
    pub fn new(program_path: impl Into<PathBuf>) -> Self {
        Self {
            program_path: program_path.into(),
            memory_size: MAX_MEMORY_SIZE,
            cycle_delay: None,
            trace: false,
        }
    }

    /// Parse `<program.bin> [memory-size] [delay-ms] [--trace]`.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut trace = false;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--trace" => trace = true,
                "-h" | "--help" => bail!("{USAGE}"),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(path) = positional.next() else {
            bail!("missing program path\n{USAGE}");
        };

        let mut options = Self::new(path);
        options.trace = trace;
        if let Some(size) = positional.next() {
            options.memory_size =
                parse_number(&size).with_context(|| format!("invalid memory size '{size}'"))?;
        }
        if let Some(delay) = positional.next() {
            let millis: u64 = delay
                .parse()
                .with_context(|| format!("invalid delay '{delay}'"))?;
            options.cycle_delay = Some(Duration::from_millis(millis));
        }
        if let Some(extra) = positional.next() {
            bail!("unexpected argument '{extra}'\n{USAGE}");
        }
        Ok(options)
    }

    pub fn cpu_config(&self) -> CpuConfig {
        CpuConfig::builder()
            .cycle_delay(self.cycle_delay)
            .trace_instructions(self.trace)
            .build()
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal `u16`.
pub fn parse_number(text: &str) -> Result<u16> {
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16)?,
        None => text.parse()?,
    };
    Ok(value)
}

/// Load `program` at address 0 and run it until HLT.
///
/// Returns the halted CPU so the caller can inspect registers and memory.
pub fn run(program: &[u8], options: &RunOptions) -> Result<Cpu<Memory>> {
    let mut cpu = Cpu::with_config(Memory::new(options.memory_size), options.cpu_config());
    cpu.load(program).with_context(|| {
        format!(
            "program of {} bytes does not fit in 0x{:04X} bytes of memory",
            program.len(),
            options.memory_size
        )
    })?;

    if let Err(err) = cpu.run() {
        log::error!("final state: {}", cpu.regs);
        return Err(err).context(format!("execution stopped after {} cycles", cpu.cycles()));
    }

    log::info!("Halted after {} cycles", cpu.cycles());
    Ok(cpu)
}

/// Format `bytes` as lines of 16 hex values prefixed with their address.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:04X}:", line * 16);
        for byte in chunk {
            let _ = write!(out, " {byte:02X}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_positional_arguments() {
        let options = RunOptions::from_args(args(&["prog.bin", "0x100", "5"])).unwrap();
        assert_eq!(options.program_path, PathBuf::from("prog.bin"));
        assert_eq!(options.memory_size, 0x100);
        assert_eq!(options.cycle_delay, Some(Duration::from_millis(5)));
        assert!(!options.trace);

        let options = RunOptions::from_args(args(&["--trace", "prog.bin", "512"])).unwrap();
        assert_eq!(options.memory_size, 512);
        assert_eq!(options.cycle_delay, None);
        assert!(options.trace);
    }

    #[test]
    fn defaults_to_full_memory() {
        let options = RunOptions::from_args(args(&["prog.bin"])).unwrap();
        assert_eq!(options, RunOptions::new("prog.bin"));
        assert_eq!(options.memory_size, MAX_MEMORY_SIZE);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(RunOptions::from_args(args(&[])).is_err());
        assert!(RunOptions::from_args(args(&["prog.bin", "0x10000"])).is_err());
        assert!(RunOptions::from_args(args(&["prog.bin", "64", "soon"])).is_err());
        assert!(RunOptions::from_args(args(&["prog.bin", "64", "1", "extra"])).is_err());
    }

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!(parse_number("65535").unwrap(), 0xFFFF);
        assert_eq!(parse_number("0x1F").unwrap(), 31);
        assert_eq!(parse_number("0XFF").unwrap(), 255);
        assert!(parse_number("0xZZ").is_err());
        assert!(parse_number("").is_err());
    }

    #[test]
    fn runs_program_to_halt() {
        let mut options = RunOptions::new("inline");
        options.memory_size = 0x10;
        let cpu = run(&[0x3E, 0x05, 0x3C, 0x76], &options).unwrap();
        assert_eq!(cpu.regs.a, 0x06);
        assert!(cpu.is_halted());
    }

    #[test]
    fn reports_faults_with_context() {
        let mut options = RunOptions::new("inline");
        options.memory_size = 4;

        let err = run(&[0x00; 5], &options).unwrap_err();
        assert!(err.to_string().contains("does not fit"));

        let err = run(&[0x08], &options).unwrap_err();
        assert!(err.to_string().contains("execution stopped"));
        assert_eq!(
            err.downcast_ref::<retroboy_i8080::Error>(),
            Some(&retroboy_i8080::Error::OpcodeNotFound { opcode: 0x08 })
        );
    }

    #[test]
    fn hex_dump_groups_sixteen_bytes_per_line() {
        let bytes: Vec<u8> = (0..18).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000: 00 01 02"));
        assert!(lines[0].ends_with("0E 0F"));
        assert_eq!(lines[1], "0010: 10 11");
    }
}
