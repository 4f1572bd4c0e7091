//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use curio_extractor::{Extractor, ExtractorConfig, ExtractionResult};
use std::fs;
use std::path::Path;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor_config = config.extractor_config(args.flags.strict, args.flags.pages);
    let result = extract_file(&args.path, extractor_config)?;

    println!("{}", formatter.format_extraction(&result)?);
    Ok(())
}

/// Read a local document and extract its clauses.
///
/// The format is chosen from the file name, as for uploads.
pub fn extract_file(path: &Path, config: ExtractorConfig) -> Result<ExtractionResult> {
    let file_name = file_name_of(path)?;
    let payload = fs::read(path)?;
    let extractor = Extractor::new(config)?;
    Ok(extractor.extract_from_bytes(&payload, &file_name)?)
}

/// Final path component as a string.
pub(crate) fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_extractor::ExtractorError;

    #[test]
    fn test_unsupported_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "The vendor must provide every mannequin").unwrap();

        let result = extract_file(&path, ExtractorConfig::default()).unwrap();
        assert!(result.clauses.is_empty());
        assert_eq!(result.total_pages, None);
    }

    #[test]
    fn test_strict_rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "The vendor must provide every mannequin").unwrap();

        let err = extract_file(&path, ExtractorConfig::strict()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Extractor(ExtractorError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_file(&dir.path().join("gone.pdf"), ExtractorConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_file_name_of_root() {
        assert!(file_name_of(Path::new("/")).is_err());
        assert_eq!(file_name_of(Path::new("docs/rfp.pdf")).unwrap(), "rfp.pdf");
    }
}
