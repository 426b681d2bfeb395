//! Report assembly: ranking, deep links and export of report rows.

pub mod rank;
pub mod summary;
pub mod url;

pub use rank::*;
pub use summary::*;
pub use url::*;

use crate::error::Result;
use crate::expert::ReportRow;
use std::io::Write;

/// Write rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(rows: &[ReportRow], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Write rows as an XML document, one `<report-row>` per row with a child
/// element per field. Field names use dashes; absent values are
/// `nil="true"` and numbers carry a `type` attribute.
pub fn write_xml<W: Write>(rows: &[ReportRow], writer: &mut W) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<report-rows type="array">"#)?;
    for row in rows {
        writeln!(writer, "  <report-row>")?;
        if let serde_json::Value::Object(fields) = serde_json::to_value(row)? {
            for (key, value) in &fields {
                let tag = key.replace('_', "-");
                match value {
                    serde_json::Value::Null => writeln!(writer, r#"    <{tag} nil="true"/>"#)?,
                    serde_json::Value::Number(n) => {
                        let kind = if n.is_f64() { "float" } else { "integer" };
                        writeln!(writer, r#"    <{tag} type="{kind}">{n}</{tag}>"#)?
                    }
                    serde_json::Value::Bool(b) => {
                        writeln!(writer, r#"    <{tag} type="boolean">{b}</{tag}>"#)?
                    }
                    serde_json::Value::String(s) => {
                        writeln!(writer, "    <{tag}>{}</{tag}>", escape_xml(s))?
                    }
                    other => writeln!(writer, "    <{tag}>{}</{tag}>", escape_xml(&other.to_string()))?,
                }
            }
        }
        writeln!(writer, "  </report-row>")?;
    }
    writeln!(writer, "</report-rows>")?;
    Ok(())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
