use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

pub fn check_samtools(program: &Path) -> Result<()> {
    Command::new(program)
        .arg("--version")
        .output()
        .with_context(|| format!(
            "samtools not found at '{}'. Please install samtools (http://www.htslib.org/) and ensure it's in your PATH",
            program.display()
        ))
        .map(|_| ())
}
