//! Land-cover vocabulary shared by configuration and the classification slice.

use bitflags::bitflags;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw class value reported by the land-cover raster (`WorldCover` uses 10..=100).
pub type LandCoverCode = i64;

pub const CROPLAND: &str = "cropland";
pub const FOREST: &str = "forest";

bitflags! {
    /// Land-cover classes for which the area of the polygon is measured.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct QualifyingClasses: u8 {
        const CROPLAND = 1 << 0;
        const FOREST = 1 << 1;
    }
}

impl Default for QualifyingClasses {
    fn default() -> Self {
        Self::CROPLAND | Self::FOREST
    }
}

impl QualifyingClasses {
    /// Flag for a class label, if the label can qualify at all.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            CROPLAND => Some(Self::CROPLAND),
            FOREST => Some(Self::FOREST),
            _ => None,
        }
    }

    /// Labels of the enabled classes, in table order.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        [(Self::CROPLAND, CROPLAND), (Self::FOREST, FOREST)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, label)| label)
    }
}

impl Serialize for QualifyingClasses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels: Vec<_> = self.labels().collect();
        let mut seq = serializer.serialize_seq(Some(labels.len()))?;
        for label in labels {
            seq.serialize_element(label)?;
        }
        seq.end()
    }
}

/// Reads a list of class labels, e.g. `["cropland", "forest"]`.
impl<'de> Deserialize<'de> for QualifyingClasses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelsVisitor;

        impl<'de> Visitor<'de> for LabelsVisitor {
            type Value = QualifyingClasses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of land-cover labels (\"cropland\", \"forest\")")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut classes = QualifyingClasses::empty();
                while let Some(label) = seq.next_element::<String>()? {
                    let flag = QualifyingClasses::from_label(&label).ok_or_else(|| {
                        de::Error::invalid_value(de::Unexpected::Str(&label), &self)
                    })?;
                    classes |= flag;
                }
                Ok(classes)
            }
        }

        deserializer.deserialize_seq(LabelsVisitor)
    }
}
