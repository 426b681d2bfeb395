use crate::common::{build_name, build_tag, locus_piece, HitRecord, SequenceCategory};
use crate::config::SpeciesTable;
use crate::error::LookupMiss;
use crate::expert::row::ReportRow;
use crate::lookup::ReferenceTables;
use log::debug;
use rustc_hash::FxHashMap;

/// One row an expert produces: an optional `@source` for the derived tag
/// and the category the row is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpertRule {
    pub source: Option<String>,
    pub category: SequenceCategory,
}

impl ExpertRule {
    /// Row linking to `source` (derived tag `build@source:locus`).
    pub fn via(source: &str, category: SequenceCategory) -> Self {
        Self {
            source: Some(source.to_string()),
            category,
        }
    }

    /// Row keeping the hit's own tag (`build:locus`).
    pub fn same(category: SequenceCategory) -> Self {
        Self {
            source: None,
            category,
        }
    }
}

/// Builds with special handling and the rows each one expands into.
pub fn default_experts() -> Vec<(&'static str, Vec<ExpertRule>)> {
    use SequenceCategory::*;
    vec![
        (
            "mt_genome_3_0",
            vec![ExpertRule::via("hapmap", GenomicContext), ExpertRule::via("jcvi", GenomicContext)],
        ),
        ("mt_genome_3_5_1", vec![ExpertRule::via("medicago", GenomicContext)]),
        ("gm_genome_rel_1_01", vec![ExpertRule::via("soybase", GenomicContext)]),
        ("lj_genome_2_5", vec![ExpertRule::via("kazusa", GenomicContext)]),
        ("cc_genome_1_0", vec![ExpertRule::via("lis", GenomicContext)]),
        ("ca_transcripts_201006", vec![ExpertRule::via("alpheus", Expression)]),
        ("mt_affy_genechip_target", vec![ExpertRule::same(Expression)]),
        ("swissprot_viridiplantae_201011", vec![ExpertRule::same(RoleAndFunction)]),
    ]
}

/// `build[@source]:locus` for a hit and an optional source.
pub fn derive_tag(hit: &str, source: Option<&str>) -> String {
    let build = build_name(hit);
    let locus = locus_piece(hit);
    match source {
        Some(s) => format!("{}@{}:{}", build, s, locus),
        None => format!("{}:{}", build, locus),
    }
}

/// Static build-tag → expert table, fixed at construction. Builds without an
/// entry expand into nothing.
#[derive(Debug, Clone)]
pub struct ExpertRegistry {
    experts: FxHashMap<String, Vec<ExpertRule>>,
    species: SpeciesTable,
}

impl ExpertRegistry {
    pub fn new(species: SpeciesTable) -> Self {
        let mut registry = Self::empty(species);
        for (build, rules) in default_experts() {
            registry.register(build, rules);
        }
        registry
    }

    pub fn empty(species: SpeciesTable) -> Self {
        Self {
            experts: FxHashMap::default(),
            species,
        }
    }

    pub fn register(&mut self, build: &str, rules: Vec<ExpertRule>) {
        self.experts.insert(build.to_string(), rules);
    }

    pub fn rules(&self, build: &str) -> &[ExpertRule] {
        self.experts.get(build).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_registered(&self, build: &str) -> bool {
        self.experts.contains_key(build)
    }

    /// Expand one hit. Every row's destination must resolve; a miss aborts
    /// the whole hit so no partially described rows escape.
    pub fn expand<T: ReferenceTables + ?Sized>(
        &self,
        hit: &HitRecord,
        tables: &T,
    ) -> Result<Vec<ReportRow>, LookupMiss> {
        let build = hit.build_name();
        let rules = self.rules(build);
        if rules.is_empty() {
            debug!("no expert for build {:?}, dropping hit {}", build, hit.hit);
            return Ok(Vec::new());
        }

        let species = self.species.lookup(build);
        let ref_id = tables.alpheus_ref_id(&hit.hit);

        rules
            .iter()
            .map(|rule| -> Result<ReportRow, LookupMiss> {
                let tag = derive_tag(&hit.hit, rule.source.as_deref());
                let reference = tables.require_destination(build_tag(&tag))?.name.clone();
                Ok(ReportRow::from_hit(hit, tag, rule.category, reference)
                    .with_species(species)
                    .with_ref_id(ref_id))
            })
            .collect()
    }
}
