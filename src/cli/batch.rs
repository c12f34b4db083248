use crate::cli::convert::ConvertOptions;
use crate::error::Result;
use crate::field::FieldValue;
use std::path::Path;

/// Outcome of a batch conversion
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Number of values converted
    pub converted: usize,
    /// Converted values as pretty JSON
    pub json: String,
}

/// Decode every value with the same key
pub fn convert_values(values: &[FieldValue], key: &[u8]) -> Vec<FieldValue> {
    values.iter().map(|value| value.convert(key)).collect()
}

/// Decode a JSON file of `{"kind", "value"}` entries
///
/// The result is written to `output` when given; the JSON is returned in
/// the report either way.
pub fn convert_batch(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &ConvertOptions,
) -> Result<BatchReport> {
    let key = options.key_bytes()?;

    let data = std::fs::read(input_path)?;
    let values: Vec<FieldValue> = serde_json::from_slice(&data)?;
    log::debug!(
        "converting {} values from {}",
        values.len(),
        input_path.display()
    );

    let converted = convert_values(&values, &key);
    let json = serde_json::to_string_pretty(&converted)?;

    if let Some(path) = output_path {
        std::fs::write(path, &json)?;
    }

    Ok(BatchReport {
        converted: converted.len(),
        json,
    })
}
