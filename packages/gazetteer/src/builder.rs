//! Gazetteer builder that joins the municipality and postal code taxonomies.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::segmentation::Segmenter;
use crate::types::{Gazetteer, Municipality, MunicipalityRow, Neighborhood, PostalRow, Region};

/// A non-fatal problem found while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Municipality row without a region or municipality code.
    MissingCode { row: MunicipalityRow },

    /// Municipality code already seen; the first occurrence wins.
    DuplicateMunicipality {
        municipality_code: String,
        region_code: String,
        first_region_code: String,
    },

    /// Postal row whose (region, municipality) pair is not in the skeleton.
    UnresolvedJoin { row: PostalRow },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode { row } => write!(
                f,
                "municipality row without code (region '{}', municipality '{}'): {row:?}",
                row.region_code, row.municipality_code
            ),
            Self::DuplicateMunicipality {
                municipality_code,
                region_code,
                first_region_code,
            } => write!(
                f,
                "municipality {municipality_code} in region {region_code} already defined in region {first_region_code}"
            ),
            Self::UnresolvedJoin { row } => write!(
                f,
                "no municipality {} in region {} for postal code {}: {row:?}",
                row.municipality_code, row.region_code, row.zip
            ),
        }
    }
}

/// Result of a build: the raw join, the split join, and the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Gazetteer with one neighborhood per postal row.
    pub raw: Gazetteer,

    /// Gazetteer with every neighborhood passed through the segmenter.
    pub split: Gazetteer,

    /// Each problem reported once, in source order.
    pub warnings: Vec<BuildWarning>,
}

/// Builds the region → municipality → neighborhood hierarchy.
#[derive(Debug, Default)]
pub struct GazetteerBuilder {
    segmenter: Segmenter,
}

impl GazetteerBuilder {
    #[must_use]
    pub fn new(segmenter: Segmenter) -> Self {
        Self { segmenter }
    }

    /// Join the two taxonomies into raw and split gazetteers.
    ///
    /// The municipality skeleton is built separately for each output, so the
    /// two gazetteers share nothing. Row-level problems never abort the build.
    #[must_use]
    pub fn build(
        &self,
        municipality_rows: &[MunicipalityRow],
        postal_rows: &[PostalRow],
    ) -> BuildOutput {
        let (mut raw, mut warnings) = build_skeleton(municipality_rows);
        let (mut split, _) = build_skeleton(municipality_rows);

        warnings.extend(attach_neighborhoods(&mut raw, postal_rows, |n| vec![n]));
        // Same rows, same joins: the split pass reports nothing new
        let _ = attach_neighborhoods(&mut split, postal_rows, |n| self.segmenter.segment(n));

        for warning in &warnings {
            tracing::warn!(%warning, "Skipping row");
        }
        tracing::info!(
            regions = raw.regions.len(),
            municipalities = raw.municipality_count(),
            neighborhoods = raw.neighborhood_count(),
            split_neighborhoods = split.neighborhood_count(),
            warnings = warnings.len(),
            "Built gazetteer"
        );

        BuildOutput {
            raw,
            split,
            warnings,
        }
    }
}

/// Build regions and municipalities with empty neighborhood lists.
///
/// Names are trimmed. A region is created on the first row carrying its code;
/// a municipality code is accepted once across all regions.
#[must_use]
pub fn build_skeleton(rows: &[MunicipalityRow]) -> (Gazetteer, Vec<BuildWarning>) {
    let mut gazetteer = Gazetteer::new();
    let mut warnings = Vec::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for row in rows {
        if row.region_code.is_empty() || row.municipality_code.is_empty() {
            warnings.push(BuildWarning::MissingCode { row: row.clone() });
            continue;
        }

        if let Some(first_region_code) = seen.get(row.municipality_code.as_str()) {
            warnings.push(BuildWarning::DuplicateMunicipality {
                municipality_code: row.municipality_code.clone(),
                region_code: row.region_code.clone(),
                first_region_code: (*first_region_code).to_string(),
            });
            continue;
        }
        seen.insert(&row.municipality_code, &row.region_code);

        let region = gazetteer
            .regions
            .entry(row.region_code.clone())
            .or_insert_with(|| Region {
                number: row.region_code.clone(),
                name_fi: row.region_name_fi.trim().to_string(),
                name_sv: row.region_name_sv.trim().to_string(),
                name_en: row.region_name_en.trim().to_string(),
                municipalities: BTreeMap::new(),
            });

        region.municipalities.insert(
            row.municipality_code.clone(),
            Municipality {
                number: row.municipality_code.clone(),
                name_fi: row.municipality_name_fi.trim().to_string(),
                name_sv: row.municipality_name_sv.trim().to_string(),
                name_en: row.municipality_name_en.trim().to_string(),
                neighborhoods: Vec::new(),
            },
        );
    }

    (gazetteer, warnings)
}

/// Append the neighborhoods of each postal row to its municipality.
///
/// `expand` maps the row's neighborhood to the neighborhoods actually stored.
/// Processing stops at the first row with an empty postal code.
fn attach_neighborhoods(
    gazetteer: &mut Gazetteer,
    rows: &[PostalRow],
    mut expand: impl FnMut(Neighborhood) -> Vec<Neighborhood>,
) -> Vec<BuildWarning> {
    let mut warnings = Vec::new();

    for row in rows {
        if row.zip.trim().is_empty() {
            tracing::debug!("Empty postal code, end of data");
            break;
        }

        let Some(municipality) =
            gazetteer.municipality_mut(&row.region_code, &row.municipality_code)
        else {
            warnings.push(BuildWarning::UnresolvedJoin { row: row.clone() });
            continue;
        };

        municipality.neighborhoods.extend(expand(row.to_neighborhood()));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn municipality_row(region: &str, code: &str, name: &str) -> MunicipalityRow {
        MunicipalityRow {
            region_code: region.to_string(),
            region_name_fi: format!(" Maakunta {region} "),
            region_name_sv: format!("Landskap {region}"),
            region_name_en: format!("Region {region}"),
            municipality_code: code.to_string(),
            municipality_name_fi: format!("{name} "),
            municipality_name_sv: name.to_string(),
            municipality_name_en: name.to_string(),
        }
    }

    fn postal_row(zip: &str, region: &str, code: &str, fi: &str, sv: &str) -> PostalRow {
        PostalRow {
            zip: zip.to_string(),
            region_code: region.to_string(),
            municipality_code: code.to_string(),
            name_fi: fi.to_string(),
            name_sv: sv.to_string(),
        }
    }

    fn sample_municipalities() -> Vec<MunicipalityRow> {
        vec![
            municipality_row("01", "091", "Helsinki"),
            municipality_row("01", "049", "Espoo"),
            municipality_row("02", "853", "Turku"),
        ]
    }

    #[test]
    fn test_build_skeleton() {
        let (gazetteer, warnings) = build_skeleton(&sample_municipalities());

        assert!(warnings.is_empty());
        assert_eq!(gazetteer.regions.len(), 2);
        assert_eq!(gazetteer.regions["01"].municipalities.len(), 2);
        assert_eq!(gazetteer.regions["01"].name_fi, "Maakunta 01");
        let helsinki = gazetteer.municipality("01", "091").unwrap();
        assert_eq!(helsinki.name_fi, "Helsinki");
        assert!(helsinki.neighborhoods.is_empty());
    }

    #[test]
    fn test_build_skeleton_missing_code() {
        let mut rows = sample_municipalities();
        rows.push(municipality_row("", "999", "Nowhere"));
        rows.push(municipality_row("03", "", "Nameless"));

        let (gazetteer, warnings) = build_skeleton(&rows);
        assert_eq!(gazetteer.municipality_count(), 3);
        assert!(!gazetteer.regions.contains_key("03"));
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], BuildWarning::MissingCode { .. }));
    }

    #[test]
    fn test_build_skeleton_duplicate_municipality() {
        let mut rows = sample_municipalities();
        rows.push(municipality_row("02", "091", "Helsinki again"));

        let (gazetteer, warnings) = build_skeleton(&rows);
        assert_eq!(gazetteer.municipality_count(), 3);
        assert!(gazetteer.municipality("02", "091").is_none());
        assert_eq!(
            warnings,
            vec![BuildWarning::DuplicateMunicipality {
                municipality_code: "091".to_string(),
                region_code: "02".to_string(),
                first_region_code: "01".to_string(),
            }]
        );
    }

    #[test]
    fn test_build_raw_and_split() {
        let builder = GazetteerBuilder::default();
        let postal = vec![
            postal_row("00100", "01", "091", "Helsinki Keskusta", "Helsingfors centrum"),
            postal_row("00150", "01", "091", "Punavuori - Eira", "Rödbergen - Eira"),
            postal_row("20100", "02", "853", "Iso-Heikkilä", "Storheikkilä"),
        ];

        let output = builder.build(&sample_municipalities(), &postal);

        assert!(output.warnings.is_empty());
        assert_eq!(output.raw.neighborhood_count(), 3);
        assert_eq!(output.split.neighborhood_count(), 4);

        let helsinki = output.split.municipality("01", "091").unwrap();
        let names: Vec<_> = helsinki
            .neighborhoods
            .iter()
            .map(|n| n.name_fi.as_str())
            .collect();
        assert_eq!(names, vec!["Helsinki Keskusta", "Punavuori", "Eira"]);

        let raw_helsinki = output.raw.municipality("01", "091").unwrap();
        assert_eq!(raw_helsinki.neighborhoods[1].name_fi, "Punavuori - Eira");
    }

    #[test]
    fn test_unresolved_join_is_skipped_and_reported_once() {
        let builder = GazetteerBuilder::default();
        let postal = vec![
            postal_row("00100", "01", "091", "Keskusta", "Centrum"),
            postal_row("99999", "01", "999", "Tuntematon", "Okänd"),
        ];

        let output = builder.build(&sample_municipalities(), &postal);

        assert_eq!(output.raw.neighborhood_count(), 1);
        assert_eq!(output.split.neighborhood_count(), 1);
        assert_eq!(output.warnings.len(), 1);
        let BuildWarning::UnresolvedJoin { row } = &output.warnings[0] else {
            panic!("expected unresolved join, got {:?}", output.warnings[0]);
        };
        assert_eq!(row.municipality_code, "999");
        assert!(output.warnings[0].to_string().contains("999"));
    }

    #[test]
    fn test_region_mismatch_is_unresolved() {
        let builder = GazetteerBuilder::default();
        // Turku exists, but not in region 01
        let postal = vec![postal_row("20100", "01", "853", "Keskusta", "Centrum")];

        let output = builder.build(&sample_municipalities(), &postal);
        assert_eq!(output.raw.neighborhood_count(), 0);
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_empty_zip_ends_data() {
        let builder = GazetteerBuilder::default();
        let postal = vec![
            postal_row("00100", "01", "091", "Keskusta", "Centrum"),
            postal_row("", "", "", "Yhteensä", ""),
            postal_row("00200", "01", "091", "Lauttasaari", "Drumsö"),
        ];

        let output = builder.build(&sample_municipalities(), &postal);
        assert_eq!(output.raw.neighborhood_count(), 1);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_neighborhood_order_follows_source() {
        let builder = GazetteerBuilder::default();
        let postal = vec![
            postal_row("00990", "01", "091", "Aurinkolahti", "Solvik"),
            postal_row("00100", "01", "091", "Keskusta", "Centrum"),
            postal_row("00500", "01", "091", "Sörnäinen", "Sörnäs"),
        ];

        let output = builder.build(&sample_municipalities(), &postal);
        let zips: Vec<_> = output
            .raw
            .municipality("01", "091")
            .unwrap()
            .neighborhoods
            .iter()
            .map(|n| n.zip.as_str())
            .collect();
        assert_eq!(zips, vec!["00990", "00100", "00500"]);
    }

    #[test]
    fn test_outputs_are_independent() {
        let builder = GazetteerBuilder::default();
        let postal = vec![postal_row("00100", "01", "091", "Keskusta", "Centrum")];

        let mut output = builder.build(&sample_municipalities(), &postal);
        output
            .split
            .municipality_mut("01", "091")
            .unwrap()
            .neighborhoods
            .clear();

        assert_eq!(output.raw.neighborhood_count(), 1);
        assert_eq!(output.split.neighborhood_count(), 0);
    }
}
