use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::aligner::{Aligner, AlignerError};
use crate::core::hit::AlignmentHit;
use crate::parsing::blast::{parse_blast_tabular, OUTPUT_COLUMNS};

/// Default program name, resolved through `PATH`
pub const DEFAULT_BLASTN: &str = "blastn";

/// NCBI `blastn` run as a child process with tabular output
#[derive(Debug, Clone)]
pub struct Blastn {
    program: PathBuf,
}

impl Default for Blastn {
    fn default() -> Self {
        Self::new(DEFAULT_BLASTN)
    }
}

impl Blastn {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The `-outfmt` argument selecting tabular output with our columns
    pub fn output_format() -> String {
        format!("6 {}", OUTPUT_COLUMNS.join(" "))
    }
}

impl Aligner for Blastn {
    fn align(&self, query: &Path, subject: &Path) -> Result<Vec<AlignmentHit>, AlignerError> {
        debug!(
            "Running {} on {} against {}",
            self.program.display(),
            query.display(),
            subject.display()
        );

        let output = Command::new(&self.program)
            .arg("-query")
            .arg(query)
            .arg("-subject")
            .arg(subject)
            .arg("-outfmt")
            .arg(Self::output_format())
            .output()
            .map_err(|source| AlignerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AlignerError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_blast_tabular(&stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format() {
        assert_eq!(
            Blastn::output_format(),
            "6 qseqid sseqid pident length qstart qend sstart send qlen slen bitscore gaps sseq qseq mismatch"
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let blastn = Blastn::new("/nonexistent/bin/blastn");
        let result = blastn.align(Path::new("q.fasta"), Path::new("s.fasta"));
        assert!(matches!(result, Err(AlignerError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        // `false` ignores its arguments and exits with status 1
        let blastn = Blastn::new("false");
        let result = blastn.align(Path::new("q.fasta"), Path::new("s.fasta"));
        assert!(matches!(result, Err(AlignerError::Failed { .. })));
    }
}
