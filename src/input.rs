use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::reliability::{CoderSet, Label, LabelSequence, MissingMarker};
use crate::util::read_text_with_digest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoderSpec {
    pub name: String,
    pub path: PathBuf,
}

impl FromStr for CoderSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, path) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got `{raw}`"))?;
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() {
            return Err(format!("coder name is empty in `{raw}`"));
        }
        if path.is_empty() {
            return Err(format!("label file path is empty in `{raw}`"));
        }
        Ok(Self {
            name: name.to_string(),
            path: PathBuf::from(path),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    LabelFile,
    ContextFile,
    Manifest,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSource {
    pub kind: InputKind,
    pub path: String,
    pub sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coder: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub coders: CoderSet,
    pub contexts: Option<Vec<String>>,
    pub missing_marker: MissingMarker,
    pub sources: Vec<InputSource>,
}

#[derive(Debug, Deserialize)]
struct InputManifest {
    #[serde(default)]
    missing_marker: Option<String>,
    coders: Vec<ManifestCoder>,
    #[serde(default)]
    contexts: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ManifestCoder {
    name: String,
    labels: Vec<Option<String>>,
}

pub fn parse_label_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub fn load_label_files(
    specs: &[CoderSpec],
    marker: MissingMarker,
    context_path: Option<&Path>,
) -> Result<LoadedInput> {
    let mut coders = CoderSet::new();
    let mut sources = Vec::with_capacity(specs.len() + 1);

    for spec in specs {
        let (text, sha256) = read_text_with_digest(&spec.path)?;
        let labels = LabelSequence::from_raw(parse_label_lines(&text), &marker);
        info!(
            coder = %spec.name,
            path = %spec.path.display(),
            labels = labels.len(),
            missing = labels.missing_count(),
            "loaded coder labels"
        );

        coders
            .insert(spec.name.clone(), labels)
            .with_context(|| format!("failed to register coder from {}", spec.path.display()))?;
        sources.push(InputSource {
            kind: InputKind::LabelFile,
            path: spec.path.display().to_string(),
            sha256,
            coder: Some(spec.name.clone()),
        });
    }

    let contexts = match context_path {
        Some(path) => {
            let (contexts, source) = load_context_file(path)?;
            sources.push(source);
            Some(contexts)
        }
        None => None,
    };

    Ok(LoadedInput {
        coders,
        contexts,
        missing_marker: marker,
        sources,
    })
}

pub fn load_context_file(path: &Path) -> Result<(Vec<String>, InputSource)> {
    let (text, sha256) = read_text_with_digest(path)?;
    let contexts = parse_label_lines(&text);
    info!(path = %path.display(), fragments = contexts.len(), "loaded unit contexts");

    Ok((
        contexts,
        InputSource {
            kind: InputKind::ContextFile,
            path: path.display().to_string(),
            sha256,
            coder: None,
        },
    ))
}

pub fn load_manifest(path: &Path, fallback_marker: MissingMarker) -> Result<LoadedInput> {
    let (text, sha256) = read_text_with_digest(path)?;
    let mut loaded = parse_manifest(&text, fallback_marker)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    loaded.sources.push(InputSource {
        kind: InputKind::Manifest,
        path: path.display().to_string(),
        sha256,
        coder: None,
    });

    info!(
        path = %path.display(),
        coders = loaded.coders.len(),
        "loaded coder manifest"
    );
    Ok(loaded)
}

pub fn parse_manifest(text: &str, fallback_marker: MissingMarker) -> Result<LoadedInput> {
    let manifest: InputManifest =
        serde_json::from_str(text).context("invalid coder manifest json")?;
    if manifest.coders.is_empty() {
        bail!("coder manifest lists no coders");
    }

    let marker = manifest
        .missing_marker
        .map(MissingMarker::new)
        .unwrap_or(fallback_marker);

    let mut coders = CoderSet::new();
    for coder in manifest.coders {
        let labels = coder
            .labels
            .into_iter()
            .map(|raw| match raw {
                Some(value) if marker.matches(&value) => Label::Missing,
                other => Label::from(other),
            })
            .collect();
        coders
            .insert(coder.name, labels)
            .context("invalid coder entry in manifest")?;
    }

    Ok(LoadedInput {
        coders,
        contexts: manifest.contexts,
        missing_marker: marker,
        sources: Vec::new(),
    })
}
