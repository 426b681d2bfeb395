use crate::common::{build_name, build_tag, locus_tag, Neighbors};
use crate::config::{render_template, PipelineConfig, ProviderTemplates, TrackLabel};
use crate::error::LookupMiss;
use crate::expert::ReportRow;
use crate::lookup::ReferenceTables;
use indexmap::IndexMap;

/// Where a described row links to, keyed by its `build@source` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Kazusa,
    Soybase,
    Jcvi,
    Hapmap,
    Medicago,
    Lis,
    GeneAtlas,
    Uniprot,
    Alpheus,
}

impl Provider {
    pub fn for_tag(tag: &str) -> Option<Self> {
        match tag {
            "lj_genome_2_5@kazusa" => Some(Provider::Kazusa),
            "gm_genome_rel_1_01@soybase" => Some(Provider::Soybase),
            "mt_genome_3_0@jcvi" => Some(Provider::Jcvi),
            "mt_genome_3_0@hapmap" => Some(Provider::Hapmap),
            "mt_genome_3_5_1@medicago" => Some(Provider::Medicago),
            "cc_genome_1_0@lis" => Some(Provider::Lis),
            "mt_affy_genechip_target" => Some(Provider::GeneAtlas),
            "swissprot_viridiplantae_201011" => Some(Provider::Uniprot),
            "gm_genome_rel_1_01@alpheus" | "ca_transcripts_201006@alpheus" => Some(Provider::Alpheus),
            _ => None,
        }
    }

    /// Genome browsers get a viewing window and a continuous-hit link.
    pub fn is_genome_browser(self) -> bool {
        matches!(
            self,
            Provider::Kazusa
                | Provider::Soybase
                | Provider::Jcvi
                | Provider::Hapmap
                | Provider::Medicago
                | Provider::Lis
        )
    }

    /// These browsers drop the custom query track when start > stop.
    pub fn needs_ordered_window(self) -> bool {
        matches!(self, Provider::Kazusa | Provider::Medicago | Provider::Lis)
    }

    pub fn ref_style(self) -> RefStyle {
        match self {
            Provider::Soybase => RefStyle::Soybase,
            Provider::Jcvi => RefStyle::Jcvi,
            Provider::Medicago => RefStyle::Medicago,
            Provider::Hapmap => RefStyle::Hapmap,
            Provider::Lis => RefStyle::Cajca,
            _ => RefStyle::Plain,
        }
    }

    fn template(self, templates: &ProviderTemplates) -> Option<&str> {
        match self {
            Provider::Kazusa => Some(templates.kazusa.as_str()),
            Provider::Soybase => Some(templates.soybase.as_str()),
            Provider::Jcvi => Some(templates.jcvi.as_str()),
            Provider::Hapmap => Some(templates.hapmap.as_str()),
            Provider::Medicago => Some(templates.medicago.as_str()),
            Provider::Lis => Some(templates.lis.as_str()),
            Provider::GeneAtlas => Some(templates.gene_atlas.as_str()),
            Provider::Uniprot => Some(templates.uniprot.as_str()),
            Provider::Alpheus => templates.alpheus.as_deref(),
        }
    }
}

/// Reference-name conventions of the individual browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStyle {
    /// `gm8` -> `gm08`
    Soybase,
    /// `chr8` -> `chr08`
    Jcvi,
    /// `chr5` -> `Mt5`
    Medicago,
    /// every `0` removed
    Hapmap,
    /// `CcLG07` -> `Cc07`
    Cajca,
    Plain,
}

fn first_digit_run(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let len = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - start);
    Some(&s[start..start + len])
}

/// `prefix` immediately followed by at least one digit, anywhere in `s`.
fn has_prefixed_digit(s: &str, prefix: &str) -> bool {
    s.match_indices(prefix).any(|(i, _)| {
        s[i + prefix.len()..]
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit())
    })
}

/// Rewrite a reference name for a browser. Names the style does not
/// recognise pass through unchanged.
pub fn format_ref(reference: &str, style: RefStyle) -> String {
    match style {
        RefStyle::Soybase if reference.len() < 4 => {
            format!("gm0{}", reference.get(2..).unwrap_or(""))
        }
        RefStyle::Jcvi if reference.len() < 5 => {
            format!("chr0{}", reference.get(3..).unwrap_or(""))
        }
        RefStyle::Medicago if has_prefixed_digit(reference, "chr") => {
            // Only the first digit is kept.
            let digit = reference.chars().find(|c| c.is_ascii_digit()).unwrap_or('0');
            format!("Mt{}", digit)
        }
        RefStyle::Hapmap => reference.replace('0', ""),
        RefStyle::Cajca if has_prefixed_digit(reference, "CcLG") => {
            format!("Cc{}", first_digit_run(reference).unwrap_or(""))
        }
        _ => reference.to_string(),
    }
}

/// Browser reference for a locus element: the last `_` piece, with a
/// `scaffold_` prefix for every `scaffold` piece.
pub fn browser_reference(element: &str) -> String {
    let pieces: Vec<&str> = element.split('_').collect();
    let mut reference = pieces.last().copied().unwrap_or(element).to_string();
    for piece in &pieces {
        if *piece == "scaffold" {
            reference = format!("scaffold_{}", reference);
        }
    }
    reference
}

/// Widen a hit by `area` on both sides, clamping the low end at 1 and
/// keeping the hit's orientation.
pub fn viewing_window(hit_from: i64, hit_to: i64, area: i64) -> (i64, i64) {
    if hit_from <= hit_to {
        let a = if hit_from > area { hit_from.saturating_sub(area) } else { 1 };
        (a, hit_to.saturating_add(area))
    } else {
        let b = if hit_to > area { hit_to.saturating_sub(area) } else { 1 };
        (hit_from.saturating_add(area), b)
    }
}

pub fn ordered(start: i64, stop: i64) -> (i64, i64) {
    if start > stop {
        (stop, start)
    } else {
        (start, stop)
    }
}

/// Fold a row's neighbors into one browser link.
///
/// Neighbors from the row's own query are appended to the base URL as
/// extra `,start..stop` ranges. Neighbors from other queries get one
/// `;add=` custom-track fragment per query, in first-seen order, holding
/// that query's ranges in scan order.
pub fn continuous_url(
    url: Option<&str>,
    reference: Option<&str>,
    query: Option<&str>,
    neighbors: Option<&Neighbors>,
    track: &TrackLabel,
) -> Option<String> {
    let (url, reference, query, neighbors) = (url?, reference?, query?, neighbors?);
    if neighbors.is_empty() {
        return None;
    }

    let mut out = url.to_string();
    let mut others: IndexMap<&str, Vec<(i64, i64)>> = IndexMap::new();

    for n in neighbors {
        if n.query == query {
            out.push_str(&format!(",{}..{}", n.start, n.stop));
        } else {
            others.entry(n.query.as_str()).or_default().push((n.start, n.stop));
        }
    }

    for (other, ranges) in &others {
        let joined: Vec<String> = ranges.iter().map(|(s, e)| format!("{}..{}", s, e)).collect();
        out.push_str(&format!(
            ";add={}+{}+{}_{}+{}",
            reference,
            track.kind,
            track.name,
            other,
            joined.join(",")
        ));
    }
    Some(out)
}

/// Fills in the link fields of report rows.
#[derive(Debug, Clone)]
pub struct UrlComposer {
    templates: ProviderTemplates,
    viewing_area: i64,
    track: TrackLabel,
}

impl UrlComposer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            templates: config.templates.clone(),
            viewing_area: config.viewing_area,
            track: config.track(),
        }
    }

    pub fn track(&self) -> &TrackLabel {
        &self.track
    }

    /// Genome-browser link for a hit window.
    pub fn browser_url(
        &self,
        provider: Provider,
        reference: &str,
        hit_from: i64,
        hit_to: i64,
        query: &str,
    ) -> Option<String> {
        let template = provider.template(&self.templates)?;
        let (mut start, mut stop) = viewing_window(hit_from, hit_to, self.viewing_area);
        if provider.needs_ordered_window() {
            (start, stop) = ordered(start, stop);
        }
        let formatted = format_ref(reference, provider.ref_style());
        let (start, stop) = (start.to_string(), stop.to_string());
        let (from, to) = (hit_from.to_string(), hit_to.to_string());
        Some(render_template(
            template,
            &[
                ("ref", formatted.as_str()),
                ("start", start.as_str()),
                ("stop", stop.as_str()),
                ("hit_from", from.as_str()),
                ("hit_to", to.as_str()),
                ("query", query),
            ],
        ))
    }

    /// Resolve destination and element, then set the row's link fields.
    /// The row is left untouched when either lookup misses.
    pub fn describe<T: ReferenceTables + ?Sized>(
        &self,
        row: &mut ReportRow,
        tables: &T,
    ) -> Result<(), LookupMiss> {
        let tag = build_tag(row.hit()).to_string();
        let element = locus_tag(row.hit()).to_string();

        let destination = tables.require_destination(&tag)?;
        let target = tables.require_target_element(&element)?;

        row.destination_url = destination.url.clone();
        row.element_display_name = Some(target.display_name.clone());
        row.genome_build_version = Some(build_name(&tag).to_string());
        row.element_url = None;
        row.contin_url = None;
        row.alpheus_url = None;

        let reference = browser_reference(&element);
        let Some(provider) = Provider::for_tag(&tag) else {
            return Ok(());
        };

        match provider {
            p if p.is_genome_browser() => {
                let url = self.browser_url(p, &reference, row.record.hit_from, row.record.hit_to, &row.record.query);
                row.contin_url = continuous_url(
                    url.as_deref(),
                    Some(reference.as_str()),
                    Some(row.record.query.as_str()),
                    row.record.neighbors.as_ref(),
                    &self.track,
                );
                row.element_url = url;
            }
            Provider::GeneAtlas => {
                row.element_url = provider
                    .template(&self.templates)
                    .map(|t| render_template(t, &[("element", element.as_str())]));
            }
            Provider::Uniprot => {
                row.element_url = provider
                    .template(&self.templates)
                    .map(|t| render_template(t, &[("ref", reference.as_str())]));
            }
            Provider::Alpheus => {
                if let (Some(t), Some(ref_id)) = (provider.template(&self.templates), row.ref_id) {
                    let ref_id = ref_id.to_string();
                    let from = row.record.hit_from.to_string();
                    let to = row.record.hit_to.to_string();
                    row.alpheus_url = Some(render_template(
                        t,
                        &[
                            ("ref_id", ref_id.as_str()),
                            ("hit_from", from.as_str()),
                            ("hit_to", to.as_str()),
                        ],
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
