use crate::common::{HitRecord, Locus, SequenceCategory};
use serde::Serialize;

/// One report line. A hit expands into one or more rows, each pointing at a
/// different destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Copy of the source hit with `hit` replaced by the derived tag.
    #[serde(flatten)]
    pub record: HitRecord,
    pub sequence_category: SequenceCategory,
    pub sequence_category_id: u32,
    /// Destination name for the derived tag.
    pub reference: String,
    pub species: Option<String>,
    pub ref_id: Option<i64>,
    /// Rank within the row's query; only set for multi-query reports.
    pub sort_order: Option<u32>,
    pub destination_url: Option<String>,
    pub element_display_name: Option<String>,
    pub element_url: Option<String>,
    pub contin_url: Option<String>,
    pub alpheus_url: Option<String>,
    pub genome_build_version: Option<String>,
}

impl ReportRow {
    pub fn from_hit(
        source: &HitRecord,
        derived_tag: String,
        category: SequenceCategory,
        reference: String,
    ) -> Self {
        let mut record = source.clone();
        record.hit = derived_tag;
        Self {
            record,
            sequence_category: category,
            sequence_category_id: category.id(),
            reference,
            species: None,
            ref_id: None,
            sort_order: None,
            destination_url: None,
            element_display_name: None,
            element_url: None,
            contin_url: None,
            alpheus_url: None,
            genome_build_version: None,
        }
    }

    pub fn with_species(mut self, species: Option<&str>) -> Self {
        self.species = species.map(str::to_string);
        self
    }

    pub fn with_ref_id(mut self, ref_id: Option<i64>) -> Self {
        self.ref_id = ref_id;
        self
    }

    pub fn query(&self) -> &str {
        &self.record.query
    }

    pub fn hit(&self) -> &str {
        &self.record.hit
    }

    pub fn bit_score(&self) -> f64 {
        self.record.bit_score
    }
}

impl Locus for ReportRow {
    fn locus(&self) -> &str {
        self.record.locus()
    }

    fn query(&self) -> &str {
        &self.record.query
    }

    fn hit_from(&self) -> i64 {
        self.record.hit_from
    }

    fn hit_to(&self) -> i64 {
        self.record.hit_to
    }
}
