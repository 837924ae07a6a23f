//! JSON text emission helpers

use std::io::Write;

/// Write `level` tab characters
pub fn write_indent<W: Write>(out: &mut W, level: usize) -> std::io::Result<()> {
    for _ in 0..level {
        out.write_all(b"\t")?;
    }
    Ok(())
}

/// Write bytes as a quoted JSON string.
///
/// `"`, `\` and the named ASCII control characters get two-character
/// escapes; remaining bytes below 0x20 become `\u00XX`. Bytes at or
/// above 0x20 pass through unchanged, with no re-encoding.
pub fn write_json_string<W: Write>(out: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    out.write_all(b"\"")?;
    for &byte in bytes {
        match byte {
            b'"' => out.write_all(b"\\\"")?,
            b'\\' => out.write_all(b"\\\\")?,
            0x08 => out.write_all(b"\\b")?,
            0x0C => out.write_all(b"\\f")?,
            b'\n' => out.write_all(b"\\n")?,
            b'\r' => out.write_all(b"\\r")?,
            b'\t' => out.write_all(b"\\t")?,
            byte if byte < 0x20 => write!(out, "\\u{:04x}", byte)?,
            byte => out.write_all(&[byte])?,
        }
    }
    out.write_all(b"\"")
}

/// Write a float with at most `significant` digits, in the style of
/// printf's `%g`: scientific notation when the decimal exponent falls
/// outside `[-4, significant)`, plain decimal otherwise, trailing
/// zeros trimmed. Non-finite values have no JSON spelling and come
/// out as `null`.
pub fn write_real<W: Write>(out: &mut W, value: f64, significant: usize) -> std::io::Result<()> {
    if !value.is_finite() {
        return out.write_all(b"null");
    }
    if value == 0.0 {
        return out.write_all(b"0");
    }

    let scientific = format!("{:.*e}", significant - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return out.write_all(scientific.as_bytes());
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= significant as i32 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        write!(out, "{}e{}", mantissa, exponent)
    } else {
        // Re-render in plain decimal with enough fractional digits for
        // the requested significance, then trim.
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        let plain = format!("{:.*}", decimals, value);
        let trimmed = if plain.contains('.') {
            plain.trim_end_matches('0').trim_end_matches('.')
        } else {
            plain.as_str()
        };
        out.write_all(trimmed.as_bytes())
    }
}
