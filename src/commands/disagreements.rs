use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use intercoder::input::LoadedInput;
use intercoder::model::DisagreementListing;
use intercoder::reliability::locate_disagreements;

use crate::cli::DisagreementsArgs;

pub fn run(args: DisagreementsArgs) -> Result<()> {
    let loaded = super::load_input(&args.input)?;
    let listing = build_listing(&loaded)?;

    info!(
        coder_a = %listing.coder_a,
        coder_b = %listing.coder_b,
        items = listing.n_items,
        disagreements = listing.disagreements.len(),
        "located disagreements"
    );

    if args.json {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, &listing)
            .context("failed to serialize disagreement json output")?;
        writeln!(output)?;
        output.flush()?;
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    write_text_response(&mut output, &listing, args.limit)?;
    output.flush()?;
    Ok(())
}

pub fn build_listing(loaded: &LoadedInput) -> Result<DisagreementListing> {
    let coders: Vec<_> = loaded.coders.iter().collect();
    let [(name_a, labels_a), (name_b, labels_b)] = coders.as_slice() else {
        bail!(
            "disagreements compares exactly 2 coders, got {}",
            coders.len()
        );
    };

    let disagreements = locate_disagreements(labels_a, labels_b, loaded.contexts.as_deref())
        .with_context(|| format!("failed to locate disagreements between {name_a} and {name_b}"))?;

    Ok(DisagreementListing {
        coder_a: (*name_a).to_string(),
        coder_b: (*name_b).to_string(),
        n_items: labels_a.len(),
        agreements: labels_a.len() - disagreements.len(),
        disagreements,
    })
}

fn write_text_response(
    output: &mut impl Write,
    listing: &DisagreementListing,
    limit: Option<usize>,
) -> Result<()> {
    writeln!(output, "{} vs {}", listing.coder_a, listing.coder_b)?;
    writeln!(
        output,
        "Items: {}\tagreements: {}\tdisagreements: {}",
        listing.n_items,
        listing.agreements,
        listing.disagreements.len()
    )?;

    let shown = limit.unwrap_or(listing.disagreements.len());
    for record in listing.disagreements.iter().take(shown) {
        writeln!(
            output,
            "{}\t{}\t{}\t{}",
            record.index,
            record.label_a,
            record.label_b,
            record.context.as_deref().unwrap_or("")
        )?;
    }
    if listing.disagreements.len() > shown {
        writeln!(output, "... {} more", listing.disagreements.len() - shown)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_listing, write_text_response};
    use intercoder::input::parse_manifest;
    use intercoder::model::DisagreementListing;
    use intercoder::reliability::{Label, MissingMarker};

    fn listing_with_three_disagreements() -> DisagreementListing {
        let raw = r#"{
            "coders": [
                { "name": "a", "labels": ["x", "y", "x", "x"] },
                { "name": "b", "labels": ["y", "x", "x", "y"] }
            ],
            "contexts": ["u0", "u1", "u2", "u3"]
        }"#;
        let loaded = parse_manifest(raw, MissingMarker::none()).expect("manifest should parse");
        build_listing(&loaded).expect("listing should build")
    }

    fn render(listing: &DisagreementListing, limit: Option<usize>) -> String {
        let mut output = Vec::new();
        write_text_response(&mut output, listing, limit).expect("text output should render");
        String::from_utf8(output).expect("text output should be utf-8")
    }

    #[test]
    fn listing_counts_agreements_and_keeps_missing_divergence() {
        let raw = r#"{
            "coders": [
                { "name": "human", "labels": ["A", null, "C", "D"] },
                { "name": "model", "labels": ["A", "B", "C", "E"] }
            ]
        }"#;
        let loaded = parse_manifest(raw, MissingMarker::none()).expect("manifest should parse");

        let listing = build_listing(&loaded).expect("listing should build");

        assert_eq!(listing.n_items, 4);
        assert_eq!(listing.agreements, 2);
        let indices: Vec<usize> = listing.disagreements.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(listing.disagreements[0].label_a, Label::Missing);
    }

    #[test]
    fn listing_requires_exactly_two_coders() {
        let raw = r#"{ "coders": [
            { "name": "a", "labels": ["x"] },
            { "name": "b", "labels": ["x"] },
            { "name": "c", "labels": ["y"] }
        ] }"#;
        let loaded = parse_manifest(raw, MissingMarker::none()).expect("manifest should parse");

        let error = build_listing(&loaded).expect_err("three coders should fail");
        assert!(error.to_string().contains("exactly 2 coders"), "unexpected error: {error}");
    }

    #[test]
    fn listing_rejects_short_context() {
        let raw = r#"{
            "coders": [
                { "name": "a", "labels": ["x", "y"] },
                { "name": "b", "labels": ["x", "z"] }
            ],
            "contexts": ["only one"]
        }"#;
        let loaded = parse_manifest(raw, MissingMarker::none()).expect("manifest should parse");

        assert!(build_listing(&loaded).is_err());
    }

    #[test]
    fn text_output_honours_limit_and_trailer() {
        let listing = listing_with_three_disagreements();

        let none_shown = render(&listing, Some(0));
        assert!(none_shown.contains("Items: 4\tagreements: 1\tdisagreements: 3\n"));
        assert!(!none_shown.contains("u0"), "{none_shown}");
        assert!(none_shown.ends_with("... 3 more\n"), "{none_shown}");

        let truncated = render(&listing, Some(1));
        assert!(truncated.contains("0\tx\ty\tu0\n"), "{truncated}");
        assert!(!truncated.contains("u1"), "{truncated}");
        assert!(truncated.ends_with("... 2 more\n"), "{truncated}");

        for limit in [Some(3), Some(8), None] {
            let full = render(&listing, limit);
            assert!(full.ends_with("3\tx\ty\tu3\n"), "{full}");
            assert!(!full.contains("more"), "{full}");
        }
    }
}
