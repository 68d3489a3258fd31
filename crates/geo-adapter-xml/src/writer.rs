//! Table to XML document writer

use std::io::Write;

use geo_model::{Record, cell_text};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Writer for one table per XML document
#[derive(Debug, Clone, Copy)]
pub struct XmlWriter {
    indent: usize,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per nesting level; 0 writes everything on one line.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Write `records` under `<root_tag>`, one `<item_tag>` each. Fields are
    /// written in record order; a field whose name is not a valid element
    /// name is left out with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a tag is not a valid element name, or the writer
    /// fails.
    pub fn write_table<W: Write>(
        &self,
        writer: W,
        root_tag: &str,
        item_tag: &str,
        records: &[Record],
    ) -> Result<()> {
        check_name(root_tag)?;
        check_name(item_tag)?;

        let mut xml = if self.indent > 0 {
            Writer::new_with_indent(writer, b' ', self.indent)
        } else {
            Writer::new(writer)
        };

        emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        emit(&mut xml, Event::Start(BytesStart::new(root_tag)))?;

        for record in records {
            emit(&mut xml, Event::Start(BytesStart::new(item_tag)))?;
            for (field, value) in record {
                if !is_valid_name(field) {
                    warn!(root_tag, field = %field, "Field name is not a valid XML element, skipped");
                    continue;
                }
                let text = cell_text(value);
                if text.is_empty() {
                    emit(&mut xml, Event::Empty(BytesStart::new(field.as_str())))?;
                } else {
                    emit(&mut xml, Event::Start(BytesStart::new(field.as_str())))?;
                    emit(&mut xml, Event::Text(BytesText::new(&text)))?;
                    emit(&mut xml, Event::End(BytesEnd::new(field.as_str())))?;
                }
            }
            emit(&mut xml, Event::End(BytesEnd::new(item_tag)))?;
        }

        emit(&mut xml, Event::End(BytesEnd::new(root_tag)))?;
        xml.into_inner().flush()?;

        debug!(root_tag, records = records.len(), "Wrote XML table");
        Ok(())
    }

    /// Render a table to bytes
    ///
    /// # Errors
    ///
    /// See [`XmlWriter::write_table`].
    pub fn render(&self, root_tag: &str, item_tag: &str, records: &[Record]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_table(&mut buffer, root_tag, item_tag, records)?;
        Ok(buffer)
    }
}

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event)
        .map_err(|e| Error::Write(e.to_string()))
}

/// Element names: a letter or `_` first, then letters, digits, `_`, `-`, `.`.
/// Names starting with `xml` in any case are reserved.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.to_ascii_lowercase().starts_with("xml")
}

fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}
