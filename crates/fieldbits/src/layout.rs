//! A [Layout] is an ordered set of named, non-overlapping [BitField]s that together describe the
//! format of a single [Word], such as an instruction encoding or a hardware register.

use crate::{
    error::{BitFieldError, BitFieldResult},
    field::BitField,
    types::{BitIndex, Word},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A named [BitField] within a [Layout].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayoutField", into = "RawLayoutField")]
pub struct LayoutField {
    /// The name of the field.
    pub name: String,
    /// The bits that the field occupies.
    pub field: BitField,
    /// Whether the field holds a two's-complement signed value.
    pub signed: bool,
}

/// The flat, serialized form of a [LayoutField].
#[derive(Clone, Serialize, Deserialize)]
struct RawLayoutField {
    name: String,
    low: BitIndex,
    high: BitIndex,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    signed: bool,
}

impl TryFrom<RawLayoutField> for LayoutField {
    type Error = BitFieldError;

    fn try_from(raw: RawLayoutField) -> Result<Self, Self::Error> {
        Ok(Self { name: raw.name, field: BitField::new(raw.low, raw.high)?, signed: raw.signed })
    }
}

impl From<LayoutField> for RawLayoutField {
    fn from(field: LayoutField) -> Self {
        Self {
            name: field.name,
            low: field.field.low(),
            high: field.field.high(),
            signed: field.signed,
        }
    }
}

impl LayoutField {
    /// Creates a new unsigned [LayoutField].
    pub fn unsigned(name: impl Into<String>, field: BitField) -> Self {
        Self { name: name.into(), field, signed: false }
    }

    /// Creates a new signed [LayoutField].
    pub fn signed(name: impl Into<String>, field: BitField) -> Self {
        Self { name: name.into(), field, signed: true }
    }

    /// Reads the field's value out of `word`, honoring its signedness.
    ///
    /// An unsigned field spanning all 128 bits is returned as the [Word] with the same bit
    /// pattern, so all ones reads as `-1`.
    pub fn read(&self, word: Word) -> Word {
        if self.signed {
            self.field.extract_signed(word)
        } else {
            // Fields up to 127 bits always fit; a 128 bit field keeps its bit pattern.
            self.field.extract(word) as Word
        }
    }
}

/// A single field value produced by [Layout::decode].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    /// The name of the field.
    pub name: String,
    /// The bits that the field occupies.
    pub field: BitField,
    /// The decoded value.
    ///
    /// Unsigned fields of up to 127 bits are always non-negative. An unsigned 128-bit field keeps
    /// its bit pattern, so a value with the top bit set is reported as negative.
    pub value: Word,
}

/// An ordered collection of named, pairwise disjoint [BitField]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    fields: Vec<LayoutField>,
}

#[derive(Deserialize)]
struct RawLayout {
    fields: Vec<LayoutField>,
}

impl TryFrom<RawLayout> for Layout {
    type Error = BitFieldError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Self::new(raw.fields)
    }
}

impl Layout {
    /// Creates a new [Layout], rejecting duplicate names and overlapping fields.
    pub fn new(fields: Vec<LayoutField>) -> BitFieldResult<Self> {
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                if a.name == b.name {
                    return Err(BitFieldError::DuplicateName(a.name.clone()));
                }
                if a.field.overlaps(&b.field) {
                    return Err(BitFieldError::Overlap { a: a.name.clone(), b: b.name.clone() });
                }
            }
        }
        Ok(Self { fields })
    }

    /// Parses a [Layout] from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Layout = serde_json::from_str(json).context("Failed to parse layout")?;
        tracing::debug!(target: "fieldbits::layout", "Parsed layout with {} fields", layout.fields.len());
        Ok(layout)
    }

    /// Loads a [Layout] from a JSON file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(target: "fieldbits::layout", "Loading layout from {}", path.display());
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Returns the fields of the layout, in declaration order.
    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&LayoutField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Decodes every field of `word`, in declaration order.
    pub fn decode(&self, word: Word) -> Vec<DecodedField> {
        self.fields
            .iter()
            .map(|f| DecodedField { name: f.name.clone(), field: f.field, value: f.read(word) })
            .collect()
    }

    /// Inserts each named value into `base`.
    ///
    /// Values are truncated to the width of their field, as with [BitField::insert]. Since fields
    /// never overlap, the order of `values` does not affect the result.
    pub fn encode<'a, I>(&self, values: I, base: Word) -> BitFieldResult<Word>
    where
        I: IntoIterator<Item = (&'a str, Word)>,
    {
        values.into_iter().try_fold(base, |word, (name, value)| {
            let f = self.field(name).ok_or_else(|| BitFieldError::UnknownField(name.to_string()))?;
            let fits = if f.signed { f.field.fits_signed(value) } else { f.field.fits(value) };
            if !fits {
                tracing::warn!(target: "fieldbits::layout", "Value {} truncated to fit field `{}` {}", value, name, f.field);
            }
            Ok(f.field.insert(value, word))
        })
    }
}
