use std::fs;
use std::path::Path;

use crate::predict::error::PredictError;
use crate::predict::types::ElementSet;

const TLE_LINE_LENGTH: usize = 69;

/// Load every element set from a TLE file.
pub fn load_tle_file(path: &Path) -> Result<Vec<ElementSet>, PredictError> {
    let content = fs::read_to_string(path)?;
    let origin = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let sets = parse_tle(&content, &origin)?;
    log::debug!("Loaded {} element sets from {}", sets.len(), path.display());
    Ok(sets)
}

/// Parse multi-satellite TLE content (2-line or 3-line records).
///
/// The whole input is rejected on the first malformed record.
pub fn parse_tle(content: &str, origin: &str) -> Result<Vec<ElementSet>, PredictError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(PredictError::format(
            origin,
            format!("expected at least two lines, found {}", lines.len()),
        ));
    }

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (name, first) = if is_line(lines[i], '1') {
            (None, i)
        } else if !is_line(lines[i], '2') {
            (Some(parse_name(lines[i])), i + 1)
        } else {
            return Err(PredictError::format(
                origin,
                format!("line {}: line 2 without a preceding line 1", i + 1),
            ));
        };

        let (Some(line1), Some(line2)) = (lines.get(first), lines.get(first + 1)) else {
            return Err(PredictError::format(
                origin,
                format!("line {}: incomplete record", i + 1),
            ));
        };

        validate_line(line1, '1').map_err(|m| {
            PredictError::format(origin, format!("line {}: {}", first + 1, m))
        })?;
        validate_line(line2, '2').map_err(|m| {
            PredictError::format(origin, format!("line {}: {}", first + 2, m))
        })?;
        if line1[2..7] != line2[2..7] {
            return Err(PredictError::format(
                origin,
                format!(
                    "line {}: catalog number {} does not match line 1 ({})",
                    first + 2,
                    line2[2..7].trim(),
                    line1[2..7].trim()
                ),
            ));
        }

        result.push(ElementSet {
            name,
            line1: line1.to_string(),
            line2: line2.to_string(),
        });
        i = first + 2;
    }

    Ok(result)
}

/// Modulo-10 checksum over the first 68 columns: digits count their value,
/// minus signs count one.
pub fn checksum(line: &str) -> u32 {
    line.chars()
        .take(TLE_LINE_LENGTH - 1)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}

fn validate_line(line: &str, number: char) -> Result<(), String> {
    if !line.is_ascii() {
        return Err("non-ASCII characters".into());
    }
    if line.len() != TLE_LINE_LENGTH {
        return Err(format!(
            "expected {} characters, found {}",
            TLE_LINE_LENGTH,
            line.len()
        ));
    }
    if !is_line(line, number) {
        return Err(format!("expected line number {}", number));
    }
    let expected = line[TLE_LINE_LENGTH - 1..]
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| "missing checksum digit".to_string())?;
    let actual = checksum(line);
    if actual != expected {
        return Err(format!(
            "checksum mismatch (expected {}, computed {})",
            expected, actual
        ));
    }
    Ok(())
}

fn is_line(line: &str, number: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(number) && chars.next() == Some(' ')
}

// 3LE files prefix the name with "0 ".
fn parse_name(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix("0 ").unwrap_or(line).trim().to_string()
}
