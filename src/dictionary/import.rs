//! Bulk import of dictionary entries from comma-delimited text.
//!
//! Each data line describes one entry:
//!
//! ```text
//! root,definition,part of speech[,extra word form...]
//! ```
//!
//! Fields follow CSV quoting rules, so a quoted definition may contain
//! commas. Blank lines and lines starting with `#` are skipped. A record
//! cannot span several lines.

use csv_core::ReadFieldResult;

use super::DictionaryError;
use crate::model::{Definition, DictionaryEntry, PartOfSpeech, WordForm, WordSense};

/// Minimum number of fields on a data line
const REQUIRED_FIELDS: usize = 3;

/// Parse every data line of `content` into an entry.
///
/// The root form becomes the first word form of the entry's single sense,
/// followed by any extra forms. Extra forms colliding with an earlier form
/// are dropped.
///
/// # Errors
///
/// `DictionaryError::Format` with the 1-based line number when a line has
/// fewer than three fields or an empty root form.
pub fn parse_entries(content: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let mut entries = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields = parse_csv_row(line).map_err(|message| DictionaryError::Format {
            line: line_no,
            message,
        })?;
        entries.push(entry_from_fields(&fields, line_no)?);
    }

    Ok(entries)
}

fn entry_from_fields(fields: &[String], line_no: usize) -> Result<DictionaryEntry, DictionaryError> {
    if fields.len() < REQUIRED_FIELDS {
        return Err(DictionaryError::Format {
            line: line_no,
            message: format!(
                "expected at least {} fields (root, definition, part of speech), found {}",
                REQUIRED_FIELDS,
                fields.len()
            ),
        });
    }

    let root = fields[0].trim();
    if root.is_empty() {
        return Err(DictionaryError::Format {
            line: line_no,
            message: "empty root word form".to_string(),
        });
    }

    let mut sense = WordSense::new(
        Definition::new(fields[1].trim()),
        PartOfSpeech::new(fields[2].trim()),
    );
    sense.add_word_form(WordForm::new(root));
    for extra in fields[REQUIRED_FIELDS..].iter().map(|f| f.trim()).filter(|f| !f.is_empty()) {
        if !sense.add_word_form(WordForm::new(extra)) {
            crate::debug!("Line {}: dropping duplicate word form '{}'", line_no, extra);
        }
    }

    let mut entry = DictionaryEntry::new(WordForm::new(root));
    entry.add_sense(sense);
    Ok(entry)
}

/// Split one CSV row into its unquoted fields
fn parse_csv_row(row: &str) -> Result<Vec<String>, String> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut field = Vec::new();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        bytes = &bytes[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            // Out of input: the next call with an empty slice ends the record
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let text = String::from_utf8(std::mem::take(&mut field))
                    .map_err(|e| format!("invalid UTF-8 in field {}: {}", fields.len() + 1, e))?;
                fields.push(text);
                if record_end {
                    break;
                }
            }
            ReadFieldResult::End => break,
        }
    }
    Ok(fields)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
