use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::output_file;
use crate::output::table::{CallTable, DEFAULT_DELIMITER};
use crate::parsing::results::{result_files, RESULT_EXTENSION};
use crate::utils::validation::{validate_directory, validate_json, ValidationError};

#[derive(Args)]
pub struct TabulateArgs {
    /// Directory of result JSON files
    #[arg(short, long)]
    pub json_dir: PathBuf,

    /// Output table; '-' or absent writes to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Column delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
}

pub fn run(args: TabulateArgs) -> anyhow::Result<()> {
    validate(&args)?;

    let table = CallTable::from_dir(&args.json_dir)?;

    if let Some(path) = output_file(args.output.as_deref()) {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        table.write(file, args.delimiter)?;
        info!("Wrote {} genomes to {}", table.len(), path.display());
    } else {
        let mut handle = std::io::stdout().lock();
        table.write(&mut handle, args.delimiter)?;
        handle.flush()?;
    }

    Ok(())
}

fn validate(args: &TabulateArgs) -> Result<(), ValidationError> {
    let is_result = |path: &std::path::Path| path.extension().is_some_and(|e| e == RESULT_EXTENSION);

    let problems = match validate_directory(&args.json_dir, is_result) {
        Some(problem) => vec![problem],
        None => result_files(&args.json_dir)
            .map(|files| files.iter().filter_map(|path| validate_json(path)).collect())
            .unwrap_or_default(),
    };

    ValidationError::from_problems(problems)
}
