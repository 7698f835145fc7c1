//! JSON format
//!
//! Output matches what editors ship in `syntaxes/*.tmLanguage.json`: keys in
//! source order, `indent` spaces per level, `": "` after keys, and empty
//! collections written as `{}` / `[]`.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::document::GrammarDocument;
use crate::error::ConvertError;
use crate::format::{Format, OutputOptions};

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON grammar as loaded by editors"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<GrammarDocument, ConvertError> {
        serde_json::from_str(source)
            .map(GrammarDocument::from_json)
            .map_err(|e| ConvertError::Parse {
                path: Default::default(),
                format: self.name().to_string(),
                message: e.to_string(),
            })
    }

    fn serialize(
        &self,
        doc: &GrammarDocument,
        options: &OutputOptions,
    ) -> Result<String, ConvertError> {
        let mut out = if options.indent == 0 {
            serde_json::to_vec(doc.root()).map_err(|e| self.serialize_error(e))?
        } else {
            let indent = vec![b' '; options.indent];
            let mut buf = Vec::new();
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
            doc.root()
                .serialize(&mut ser)
                .map_err(|e| self.serialize_error(e))?;
            buf
        };
        if options.trailing_newline {
            out.push(b'\n');
        }
        String::from_utf8(out).map_err(|e| ConvertError::Serialize {
            format: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

impl JsonFormat {
    fn serialize_error(&self, e: serde_json::Error) -> ConvertError {
        ConvertError::Serialize {
            format: self.name().to_string(),
            message: e.to_string(),
        }
    }
}
