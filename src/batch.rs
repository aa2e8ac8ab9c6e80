//! Batch job-list files
//!
//! A batch file is a TOML document with one `[[job]]` table per render:
//!
//! ```toml
//! [[job]]
//! scene = "/shots/seq010/shot.usd"
//! start = 1
//! end = 240
//! res = 100
//! renderer = "karma"   # or "karma-xpu"
//! mode = "full"        # or "fml"
//! ```
//!
//! Numeric fields may be written as integers or quoted strings; either
//! way they pass through the same form validation as interactive input.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::domain::{JobForm, RenderMode, Renderer};
use crate::queue::{Queued, RenderQueue};

#[derive(Debug, Deserialize)]
struct BatchFile {
    #[serde(default)]
    job: Vec<BatchJob>,
}

/// One `[[job]]` entry as written in the file
#[derive(Debug, Deserialize)]
struct BatchJob {
    scene: String,
    #[serde(deserialize_with = "int_or_string")]
    start: String,
    #[serde(deserialize_with = "int_or_string")]
    end: String,
    #[serde(deserialize_with = "int_or_string")]
    res: String,
    #[serde(default)]
    renderer: Renderer,
    #[serde(default)]
    mode: RenderMode,
}

impl From<BatchJob> for JobForm {
    fn from(entry: BatchJob) -> Self {
        JobForm::new(
            entry.scene,
            entry.start,
            entry.end,
            entry.res,
            entry.renderer,
            entry.mode,
        )
    }
}

/// Accept a TOML integer or string, keeping it as the raw string
fn int_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntOrString;

    impl serde::de::Visitor<'_> for IntOrString {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("an integer or a string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IntOrString)
}

/// Read a batch file and return its jobs as unvalidated forms, in file order
pub fn load_jobs(path: &Path) -> Result<Vec<JobForm>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;

    let batch: BatchFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse batch file: {}", path.display()))?;

    Ok(batch.job.into_iter().map(JobForm::from).collect())
}

/// Enqueue every form in order, stopping at the first invalid entry
///
/// The error names the 1-based position of the offending entry and the
/// file it came from; entries before it remain queued. Receipts come
/// back in queue order so callers can echo the command previews.
pub fn enqueue_all(
    queue: &mut RenderQueue,
    forms: &[JobForm],
    source: &Path,
) -> Result<Vec<Queued>> {
    let mut receipts = Vec::with_capacity(forms.len());
    for (position, form) in forms.iter().enumerate() {
        let queued = queue
            .enqueue(form)
            .with_context(|| format!("job #{} in {}", position + 1, source.display()))?;
        receipts.push(queued);
    }
    Ok(receipts)
}
