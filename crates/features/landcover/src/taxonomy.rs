//! Land-cover classes of the `WorldCover` legend and the area-qualification policy.

use fcheck_kernel::domain::landcover::{LandCoverCode, QualifyingClasses};
use std::fmt;

/// Semantic class of a land-cover code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandCoverClass {
    Cropland,
    Forest,
    Shrubland,
    Grassland,
    Wetland,
    Water,
    BuiltUp,
    BareSparse,
    SnowIce,
    Unknown,
}

impl LandCoverClass {
    /// Total mapping; codes outside the legend are [`Self::Unknown`].
    #[must_use]
    pub const fn from_code(code: LandCoverCode) -> Self {
        match code {
            10 => Self::Cropland,
            20 => Self::Forest,
            30 => Self::Shrubland,
            40 => Self::Grassland,
            50 => Self::Wetland,
            60 => Self::Water,
            70 => Self::BuiltUp,
            80 => Self::BareSparse,
            90 => Self::SnowIce,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cropland => "cropland",
            Self::Forest => "forest",
            Self::Shrubland => "shrubland",
            Self::Grassland => "grassland",
            Self::Wetland => "wetland",
            Self::Water => "water",
            Self::BuiltUp => "built-up",
            Self::BareSparse => "bare/sparse vegetation",
            Self::SnowIce => "snow/ice",
            Self::Unknown => "unknown",
        }
    }

    /// Policy flag that lets this class qualify, if any can.
    #[must_use]
    pub const fn qualifying_flag(self) -> Option<QualifyingClasses> {
        match self {
            Self::Cropland => Some(QualifyingClasses::CROPLAND),
            Self::Forest => Some(QualifyingClasses::FOREST),
            _ => None,
        }
    }
}

impl fmt::Display for LandCoverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Proof that a classification qualifies for area measurement.
///
/// Only [`ClassificationResult::qualified`] creates one.
#[derive(Debug)]
pub struct Qualified {
    class: LandCoverClass,
}

impl Qualified {
    #[must_use]
    pub const fn class(&self) -> LandCoverClass {
        self.class
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    class: LandCoverClass,
    qualifies_for_area: bool,
}

impl ClassificationResult {
    #[must_use]
    pub const fn class(&self) -> LandCoverClass {
        self.class
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.class.label()
    }

    #[must_use]
    pub const fn qualifies_for_area(&self) -> bool {
        self.qualifies_for_area
    }

    #[must_use]
    pub const fn qualified(&self) -> Option<Qualified> {
        if self.qualifies_for_area { Some(Qualified { class: self.class }) } else { None }
    }
}

/// Classification policy: which classes have their area measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Taxonomy {
    qualifying: QualifyingClasses,
}

impl Taxonomy {
    #[must_use]
    pub const fn new(qualifying: QualifyingClasses) -> Self {
        Self { qualifying }
    }

    #[must_use]
    pub const fn qualifying(&self) -> QualifyingClasses {
        self.qualifying
    }

    /// Classifies a majority code; `None` (no pixel in the region) is [`LandCoverClass::Unknown`].
    #[must_use]
    pub fn classify(&self, code: Option<LandCoverCode>) -> ClassificationResult {
        let class = code.map_or(LandCoverClass::Unknown, LandCoverClass::from_code);
        let qualifies_for_area =
            class.qualifying_flag().is_some_and(|flag| self.qualifying.contains(flag));

        ClassificationResult { class, qualifies_for_area }
    }

    /// Message returned for a non-qualifying area, naming the qualifying classes.
    #[must_use]
    pub fn rejection_message(&self) -> String {
        let labels: Vec<_> = self.qualifying.labels().collect();
        if labels.is_empty() {
            "Selected area does not qualify for measurement.".to_owned()
        } else {
            format!("Selected area is not {}.", labels.join(" or "))
        }
    }
}

/// [`Taxonomy::classify`] under the default policy (cropland and forest qualify).
#[must_use]
pub fn classify(code: LandCoverCode) -> ClassificationResult {
    Taxonomy::default().classify(Some(code))
}
