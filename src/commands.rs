pub mod compare;
pub mod disagreements;

use anyhow::{Result, bail};

use intercoder::input::{LoadedInput, load_context_file, load_label_files, load_manifest};
use intercoder::reliability::MissingMarker;

use crate::cli::InputArgs;

/// Loads coders from label files or a manifest; `--context` wins over
/// contexts embedded in a manifest.
fn load_input(args: &InputArgs) -> Result<LoadedInput> {
    let marker = if args.no_missing_marker {
        MissingMarker::none()
    } else {
        MissingMarker::new(args.missing_marker.clone())
    };

    match &args.manifest {
        Some(path) => {
            let mut loaded = load_manifest(path, marker)?;
            if let Some(context_path) = &args.context {
                let (contexts, source) = load_context_file(context_path)?;
                loaded.contexts = Some(contexts);
                loaded.sources.push(source);
            }
            Ok(loaded)
        }
        None if args.coders.is_empty() => {
            bail!("no coders supplied; pass --coder NAME=PATH (twice or more) or --input PATH")
        }
        None => load_label_files(&args.coders, marker, args.context.as_deref()),
    }
}
