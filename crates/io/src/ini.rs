//! INI text: one `[header]`, `key = value` lines, a blank line after.

use ark_settings_engine::IniSection;

use crate::error::IniError;

/// Render one section the way the game reads it.
pub fn render(section: &IniSection) -> String {
    let mut out = String::with_capacity(32 + section.entries.len() * 32);
    out.push('[');
    out.push_str(&section.header);
    out.push_str("]\n");
    for (key, value) in &section.entries {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Parse every section in `text`, in file order.
///
/// Blank lines and `;`/`#` comments are skipped and CRLF endings are
/// accepted. A value is everything after the first `=` minus one leading
/// space; typed values are trimmed again when parsed. A key with no `=`
/// is kept with an empty value.
pub fn parse(text: &str) -> Result<Vec<IniSection>, IniError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections: Vec<IniSection> = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let header = rest.strip_suffix(']').ok_or_else(|| IniError::Parse {
                line: idx + 1,
                message: format!("unterminated section header '{line}'"),
            })?;
            let header = header.trim();
            if header.is_empty() {
                return Err(IniError::Parse {
                    line: idx + 1,
                    message: "empty section header".into(),
                });
            }
            sections.push(IniSection::new(header));
            continue;
        }

        let Some(current) = sections.last_mut() else {
            return Err(IniError::Parse {
                line: idx + 1,
                message: format!("'{line}' appears before any section header"),
            });
        };

        // Only the single space `render` writes after '=' is dropped, so
        // string values keep their own surrounding whitespace.
        let entry = raw_line.trim_start();
        let (key, value) = match entry.split_once('=') {
            Some((k, v)) => (k.trim(), v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        if key.is_empty() {
            return Err(IniError::Parse {
                line: idx + 1,
                message: "missing key before '='".into(),
            });
        }
        current.push(key, value);
    }

    Ok(sections)
}
