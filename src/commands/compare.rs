use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use intercoder::input::LoadedInput;
use intercoder::model::{PairDisagreements, REPORT_MANIFEST_VERSION, ReliabilityReportManifest};
use intercoder::reliability::{
    AlphaInterpretation, MultiCoderReport, compare_coders, locate_disagreements,
};
use intercoder::util::{now_utc_string, write_json_pretty};

use crate::cli::CompareArgs;

pub fn run(args: CompareArgs) -> Result<()> {
    let loaded = super::load_input(&args.input)?;
    let manifest = build_manifest(loaded)?;

    if let Some(path) = &args.report_path {
        write_json_pretty(path, &manifest)?;
        info!(path = %path.display(), "wrote reliability report");
    }

    if args.json {
        write_json_response(&manifest)
    } else {
        let mut output = io::BufWriter::new(io::stdout().lock());
        write_text_response(&mut output, &manifest, args.max_disagreements)?;
        output.flush()?;
        Ok(())
    }
}

pub fn build_manifest(loaded: LoadedInput) -> Result<ReliabilityReportManifest> {
    let report = compare_coders(&loaded.coders).context("reliability computation failed")?;
    log_degenerate_results(&report);

    let contexts = loaded.contexts.as_deref();
    let mut disagreements = Vec::with_capacity(report.pairwise.len());
    for comparison in &report.pairwise {
        let (Some(labels_a), Some(labels_b)) = (
            loaded.coders.get(&comparison.coder_a),
            loaded.coders.get(&comparison.coder_b),
        ) else {
            continue;
        };
        let records = locate_disagreements(labels_a, labels_b, contexts).with_context(|| {
            format!(
                "failed to locate disagreements between {} and {}",
                comparison.coder_a, comparison.coder_b
            )
        })?;
        disagreements.push(PairDisagreements {
            coder_a: comparison.coder_a.clone(),
            coder_b: comparison.coder_b.clone(),
            total: records.len(),
            records,
        });
    }

    info!(
        coders = report.n_coders,
        items = report.n_items,
        alpha = report.overall_alpha.alpha,
        interpretation = %report.overall_alpha.interpretation,
        "reliability computed"
    );

    Ok(ReliabilityReportManifest {
        manifest_version: REPORT_MANIFEST_VERSION,
        generated_at: now_utc_string(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        missing_marker: loaded.missing_marker.token().map(ToOwned::to_owned),
        inputs: loaded.sources,
        report,
        disagreements,
    })
}

fn log_degenerate_results(report: &MultiCoderReport) {
    if report.overall_alpha.interpretation == AlphaInterpretation::NoValidCodings {
        warn!(
            items = report.n_items,
            "no unit was coded by two or more coders; alpha reported as 0"
        );
    }
    for comparison in &report.pairwise {
        if let Some(kappa) = &comparison.kappa
            && kappa.expected_agreement >= 1.0
        {
            warn!(
                coder_a = %comparison.coder_a,
                coder_b = %comparison.coder_b,
                "both coders used one identical category throughout; kappa reported as 1"
            );
        }
    }
}

fn write_json_response(manifest: &ReliabilityReportManifest) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, manifest)
        .context("failed to serialize reliability json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(
    output: &mut impl Write,
    manifest: &ReliabilityReportManifest,
    max_disagreements: usize,
) -> Result<()> {
    let report = &manifest.report;
    let alpha = &report.overall_alpha;

    writeln!(
        output,
        "Coders: {} ({})",
        report.n_coders,
        report.coder_names.join(", ")
    )?;
    writeln!(output, "Items: {}", report.n_items)?;
    writeln!(
        output,
        "Krippendorff's Alpha: {:.3}\t{}\tDo={:.4} De={:.4}",
        alpha.alpha, alpha.interpretation, alpha.observed_disagreement, alpha.expected_disagreement
    )?;

    for comparison in &report.pairwise {
        writeln!(output)?;
        writeln!(output, "{} vs {}", comparison.coder_a, comparison.coder_b)?;
        match (&comparison.percent_agreement, &comparison.kappa) {
            (Some(percent), Some(kappa)) => {
                writeln!(
                    output,
                    "\tpercent_agreement: {:.1}%\tcompared: {}",
                    percent.as_percent(),
                    comparison.n_compared
                )?;
                writeln!(
                    output,
                    "\tcohens_kappa: {:.3}\t{}\tPo={:.4} Pe={:.4}",
                    kappa.kappa,
                    kappa.interpretation,
                    kappa.observed_agreement,
                    kappa.expected_agreement
                )?;
            }
            _ => writeln!(output, "\tno jointly coded units")?,
        }

        let Some(pair) = manifest.disagreements.iter().find(|pair| {
            pair.coder_a == comparison.coder_a && pair.coder_b == comparison.coder_b
        }) else {
            continue;
        };
        if pair.records.is_empty() {
            continue;
        }

        writeln!(output, "\tdisagreements: {}", pair.total)?;
        for record in pair.records.iter().take(max_disagreements) {
            write!(
                output,
                "\t  #{}: {} vs {}",
                record.index, record.label_a, record.label_b
            )?;
            match &record.context {
                Some(context) => writeln!(output, "\t{context}")?,
                None => writeln!(output)?,
            }
        }
        if pair.total > max_disagreements {
            writeln!(output, "\t  ... {} more", pair.total - max_disagreements)?;
        }
    }

    Ok(())
}
