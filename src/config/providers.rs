use serde::{Deserialize, Serialize};

/// Deep-link templates per browser provider.
///
/// Placeholders: `{ref}` browser reference name, `{start}`/`{stop}` viewing
/// window, `{hit_from}`/`{hit_to}` raw hit coordinates, `{query}` query id,
/// `{element}` locus element tag, `{ref_id}` Alpheus reference id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderTemplates {
    pub kazusa: String,
    pub soybase: String,
    pub jcvi: String,
    pub hapmap: String,
    pub medicago: String,
    pub lis: String,
    pub gene_atlas: String,
    pub uniprot: String,
    /// No public default; Alpheus links are only produced when configured.
    pub alpheus: Option<String>,
}

impl Default for ProviderTemplates {
    fn default() -> Self {
        Self {
            kazusa: concat!(
                "http://gsv.kazusa.or.jp/cgi-bin/gbrowse/lotus/?ref={ref};start={start};stop={stop};",
                "width=1024;version=100;label=contig-phase3-phase1%2C2-annotation-GMhmm-GenScan-blastn-tigrgi-blastx-marker;",
                "grid=on;add={ref}+LIS+LIS_Query_{query}+{hit_from}..{hit_to}"
            )
            .to_string(),
            soybase: concat!(
                "http://soybase.org/gbrowse/cgi-bin/gbrowse/gmax1.01/?ref={ref};start={start};stop={stop};",
                "version=100;cache=on;drag_and_drop=on;show_tooltips=on;grid=on;",
                "add={ref}+LIS+LIS_Query_{query}+{hit_to}..{hit_from}"
            )
            .to_string(),
            jcvi: concat!(
                "http://gbrowse.jcvi.org/cgi-bin/gbrowse/medicago/?ref={ref};start={start};",
                "stop={stop};width=1024;version=100;cache=on;drag_and_drop=on;show_tooltips=on;grid=on;",
                "label=Gene-Transcripts_all-Transcripts_Bud-Transcripts_Blade-Transcripts_Root-Transcripts_Flower",
                "-Transcripts_Seed-Transcripts_mtg-Gene_Models-mt_fgenesh-genemarkHMM-genscan-fgenesh-TC_poplar",
                "-TC_maize-TC_arabidopsis-TC_Lotus-TC_soybean-TC_cotton-TC_medicago-TC_rice-TC_sorghum;",
                "add={ref}+LIS+LIS_Query_{query}+{hit_to}..{hit_from}"
            )
            .to_string(),
            hapmap: concat!(
                "http://www.medicagohapmap.org/cgi-bin/gbrowse/mthapmap/?q={ref}:{start}..{stop};",
                "t=Genes+Transcript+ReadingFrame+Translation+SNP+SNP_HM005+CovU_HM005+SNP_HM006+CovU_HM006+SNP_HM029+CovU_HM029;",
                "c=1;add={ref}+LIS+LIS_Query_{query}+{hit_to}..{hit_from}"
            )
            .to_string(),
            medicago: concat!(
                "http://medtr.comparative-legumes.org/gb2/gbrowse/3.5.1/?ref={ref};start={start};",
                "stop={stop};width=1024;version=100;flip=0;grid=1;",
                "add={ref}+LIS+LIS_Query_{query}+{hit_to}..{hit_from}"
            )
            .to_string(),
            lis: concat!(
                "http://cajca.comparative-legumes.org/gb2/gbrowse/1.0/?ref={ref};start={start};",
                "stop={stop};width=1024;version=100;flip=0;grid=1;",
                "add={ref}+LIS+LIS_Query_{query}+{hit_to}..{hit_from}"
            )
            .to_string(),
            gene_atlas: "http://bioinfo.noble.org/gene-atlas/v2/probeset.php?id={element}&submit=Go"
                .to_string(),
            uniprot: "http://www.uniprot.org/uniprot/{ref}".to_string(),
            alpheus: None,
        }
    }
}

/// Substitute `{name}` placeholders in one pass. Unknown placeholders and
/// stray braces are copied through untouched.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
