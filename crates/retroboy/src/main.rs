use anyhow::{Context, Result};
use retroboy::{RunOptions, DUMP_LENGTH};

fn main() {
    env_logger::init();

    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let options = RunOptions::from_args(std::env::args().skip(1))?;

    log::info!("Running program: '{}'", options.program_path.display());
    let program = std::fs::read(&options.program_path)
        .with_context(|| format!("failed to read '{}'", options.program_path.display()))?;

    let cpu = retroboy::run(&program, &options)?;
    println!("{}", cpu.regs);

    let memory = cpu.bus().as_slice();
    let shown = &memory[..memory.len().min(DUMP_LENGTH)];
    log::debug!("memory:\n{}", retroboy::hex_dump(shown));
    Ok(())
}
