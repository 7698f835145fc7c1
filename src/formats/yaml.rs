//! YAML format
//!
//! The authoring format for grammars. Parsing accepts a single document;
//! streams with several `---` documents are rejected by the parser. A key
//! repeated within one mapping keeps its first position and its last value.
//! The YAML emitter has a fixed layout, so `OutputOptions::indent` does not
//! apply here.

use std::fmt;

use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_yaml::{Mapping, Value};

use crate::document::GrammarDocument;
use crate::error::ConvertError;
use crate::format::{Format, OutputOptions};

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML grammar source (tmLanguage.yaml)"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<GrammarDocument, ConvertError> {
        let LastWins(value) = serde_yaml::from_str(source).map_err(|e| ConvertError::Parse {
            path: Default::default(),
            format: self.name().to_string(),
            message: e.to_string(),
        })?;
        GrammarDocument::from_yaml(value)
    }

    fn serialize(
        &self,
        doc: &GrammarDocument,
        options: &OutputOptions,
    ) -> Result<String, ConvertError> {
        let mut out = serde_yaml::to_string(&doc.to_yaml()?).map_err(|e| {
            ConvertError::Serialize {
                format: self.name().to_string(),
                message: e.to_string(),
            }
        })?;
        if !options.trailing_newline {
            let trimmed = out.trim_end_matches('\n').len();
            out.truncate(trimmed);
        }
        Ok(out)
    }
}

/// A YAML value whose mappings accept repeated keys, the later entry
/// replacing the earlier one.
struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LastWinsVisitor).map(LastWins)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(i.into()))
    }

    fn visit_u64<E>(self, u: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(u.into()))
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(f.into()))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s))
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        LastWins::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(LastWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    // Tagged scalars and collections arrive as single-variant enums.
    fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant::<LastWins>().map(|v| v.0)
    }
}
