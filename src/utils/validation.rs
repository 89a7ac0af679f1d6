use crate::utils::error::{GradeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Rejects an output path that names the same file as the input.
pub fn validate_distinct_paths(input: &str, output: &str) -> Result<()> {
    let same = match (std::fs::canonicalize(input), std::fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input.trim() == output.trim(),
    };

    if same {
        return Err(GradeError::InvalidConfigValueError {
            field: "output.path".to_string(),
            value: output.to_string(),
            reason: "Output would overwrite the input file".to_string(),
        });
    }
    Ok(())
}
