//! Core data types for the gazetteer.
//!
//! The hierarchy is region → municipality → neighborhood. Codes are kept as
//! strings throughout: municipality codes like "091" and postal codes like
//! "00100" lose meaning as numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named area associated with a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Finnish name.
    pub name_fi: String,

    /// Swedish name.
    ///
    /// Absent only when segmentation ran out of Swedish tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_sv: Option<String>,

    /// Postal code, fixed width.
    pub zip: String,
}

impl Neighborhood {
    /// Create a neighborhood with both names present.
    #[must_use]
    pub fn new(
        name_fi: impl Into<String>,
        name_sv: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            name_fi: name_fi.into(),
            name_sv: Some(name_sv.into()),
            zip: zip.into(),
        }
    }
}

/// Second-level administrative division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    pub number: String,
    pub name_fi: String,
    pub name_sv: String,
    pub name_en: String,

    /// Neighborhoods in source order.
    pub neighborhoods: Vec<Neighborhood>,
}

/// Top-level administrative division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub number: String,
    pub name_fi: String,
    pub name_sv: String,
    pub name_en: String,

    /// Municipalities keyed by municipality code.
    pub municipalities: BTreeMap<String, Municipality>,
}

/// The full hierarchy, keyed by region code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gazetteer {
    pub regions: BTreeMap<String, Region>,
}

impl Gazetteer {
    /// Create an empty gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a municipality by region code and municipality code.
    #[must_use]
    pub fn municipality(&self, region: &str, municipality: &str) -> Option<&Municipality> {
        self.regions.get(region)?.municipalities.get(municipality)
    }

    /// Mutable variant of [`Gazetteer::municipality`].
    pub fn municipality_mut(
        &mut self,
        region: &str,
        municipality: &str,
    ) -> Option<&mut Municipality> {
        self.regions
            .get_mut(region)?
            .municipalities
            .get_mut(municipality)
    }

    /// Iterate over all municipalities across regions.
    pub fn municipalities(&self) -> impl Iterator<Item = &Municipality> {
        self.regions
            .values()
            .flat_map(|region| region.municipalities.values())
    }

    /// Total number of municipalities.
    #[must_use]
    pub fn municipality_count(&self) -> usize {
        self.municipalities().count()
    }

    /// Total number of neighborhoods.
    #[must_use]
    pub fn neighborhood_count(&self) -> usize {
        self.municipalities().map(|m| m.neighborhoods.len()).sum()
    }
}

/// One record of the municipality-to-region taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRow {
    pub region_code: String,
    pub region_name_fi: String,
    pub region_name_sv: String,
    pub region_name_en: String,
    pub municipality_code: String,
    pub municipality_name_fi: String,
    pub municipality_name_sv: String,
    pub municipality_name_en: String,
}

/// One record of the postal-code-to-municipality taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalRow {
    pub zip: String,
    pub region_code: String,
    pub municipality_code: String,
    pub name_fi: String,
    pub name_sv: String,
}

impl PostalRow {
    /// Build the unsplit neighborhood this row describes, with trimmed fields.
    #[must_use]
    pub fn to_neighborhood(&self) -> Neighborhood {
        Neighborhood::new(self.name_fi.trim(), self.name_sv.trim(), self.zip.trim())
    }
}
