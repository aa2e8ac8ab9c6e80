use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The render backend husk should load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Renderer {
    /// CPU Karma
    #[default]
    Karma,
    /// GPU Karma
    #[value(alias = "karmaxpu")]
    KarmaXpu,
}

impl Renderer {
    /// Get the Hydra delegate token passed to husk's --renderer flag
    pub fn hydra_delegate(&self) -> &'static str {
        match self {
            Renderer::Karma => "BRAY_HdKarma",
            Renderer::KarmaXpu => "BRAY_HdKarmaXPU",
        }
    }
}

impl std::fmt::Display for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Renderer::Karma => write!(f, "Karma"),
            Renderer::KarmaXpu => write!(f, "KarmaXPU"),
        }
    }
}

/// How much of the frame range a job renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum RenderMode {
    /// Every frame from start to end
    #[default]
    #[serde(rename = "full")]
    #[value(name = "full")]
    FullSequence,
    /// First, middle and last frame only (preview sampling)
    #[serde(rename = "fml")]
    #[value(name = "fml")]
    Fml,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::FullSequence => write!(f, "full"),
            RenderMode::Fml => write!(f, "fml"),
        }
    }
}

/// Why a job form could not be turned into a render job
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("required field '{field}' is empty")]
    MissingField { field: &'static str },
    /// A numeric field did not parse as an integer
    #[error("field '{field}' must be an integer, got '{value}'")]
    NotANumber { field: &'static str, value: String },
}

/// A validated render job, immutable once queued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Path to the USD scene file, passed through verbatim
    pub scene_path: String,

    /// First frame of the range (inclusive)
    pub start_frame: i64,

    /// Last frame of the range (inclusive)
    pub end_frame: i64,

    /// Resolution scale percentage (100 = full resolution)
    pub res_scale: i64,

    /// Render backend
    pub renderer: Renderer,

    /// Full sequence or first/middle/last sampling
    pub mode: RenderMode,
}

impl RenderJob {
    /// Number of frames husk is asked to render, end - start + 1
    ///
    /// Not clamped: a reversed range yields zero or a negative count,
    /// which is passed to husk as-is. Saturates at the i64 limits when
    /// the true count does not fit.
    pub fn frame_count(&self) -> i64 {
        self.end_frame
            .saturating_sub(self.start_frame)
            .saturating_add(1)
    }
}

/// Raw user input for one render job, before validation
///
/// Numeric fields are kept as the strings the user typed so that
/// validation failures can echo the offending value back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobForm {
    /// Path to the USD scene file
    pub scene_path: String,
    /// First frame, as typed
    pub start_frame: String,
    /// Last frame, as typed
    pub end_frame: String,
    /// Resolution scale percentage, as typed
    pub res_scale: String,
    /// Render backend (already resolved, no free text)
    pub renderer: Renderer,
    /// Render mode (already resolved, no free text)
    pub mode: RenderMode,
}

impl JobForm {
    /// Create a form from raw field values
    pub fn new(
        scene_path: impl Into<String>,
        start_frame: impl Into<String>,
        end_frame: impl Into<String>,
        res_scale: impl Into<String>,
        renderer: Renderer,
        mode: RenderMode,
    ) -> Self {
        Self {
            scene_path: scene_path.into(),
            start_frame: start_frame.into(),
            end_frame: end_frame.into(),
            res_scale: res_scale.into(),
            renderer,
            mode,
        }
    }

    /// Validate the form and produce an immutable render job
    ///
    /// All fields are checked for emptiness first (in field order), then
    /// the numeric fields are parsed in the same order. Surrounding
    /// whitespace is tolerated in numeric fields. The frame range is not
    /// checked for ordering; a reversed range is accepted.
    pub fn validate(&self) -> Result<RenderJob, ValidationError> {
        let required = [
            ("scene", &self.scene_path),
            ("start", &self.start_frame),
            ("end", &self.end_frame),
            ("res", &self.res_scale),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }

        let start_frame = parse_int("start", &self.start_frame)?;
        let end_frame = parse_int("end", &self.end_frame)?;
        let res_scale = parse_int("res", &self.res_scale)?;

        Ok(RenderJob {
            scene_path: self.scene_path.clone(),
            start_frame,
            end_frame,
            res_scale,
            renderer: self.renderer,
            mode: self.mode,
        })
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> JobForm {
        JobForm::new(
            "/shots/seq010/shot.usd",
            "1",
            "240",
            "100",
            Renderer::Karma,
            RenderMode::FullSequence,
        )
    }

    #[test]
    fn validate_accepts_complete_form() {
        let job = full_form().validate().expect("complete form should validate");
        assert_eq!(job.scene_path, "/shots/seq010/shot.usd");
        assert_eq!(job.start_frame, 1);
        assert_eq!(job.end_frame, 240);
        assert_eq!(job.res_scale, 100);
        assert_eq!(job.frame_count(), 240);
    }

    #[test]
    fn validate_reports_first_empty_field() {
        let mut form = full_form();
        form.scene_path = String::new();
        form.start_frame = String::new();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "scene" }),
            "scene should be reported before start when both are empty"
        );
    }

    #[test]
    fn validate_checks_all_empties_before_parsing() {
        let mut form = full_form();
        form.start_frame = "abc".to_string();
        form.res_scale = String::new();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "res" }),
            "empty res should win over the unparsable start field"
        );
    }

    #[test]
    fn validate_reports_first_unparsable_field() {
        let mut form = full_form();
        form.start_frame = "one".to_string();
        form.end_frame = "ten".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::NotANumber {
                field: "start",
                value: "one".to_string()
            })
        );
    }

    #[test]
    fn validate_tolerates_whitespace_around_numbers() {
        let mut form = full_form();
        form.start_frame = " 5 ".to_string();
        form.end_frame = "\t9".to_string();
        let job = form.validate().expect("padded integers should parse");
        assert_eq!(job.start_frame, 5);
        assert_eq!(job.end_frame, 9);
    }

    #[test]
    fn validate_rejects_whitespace_only_number() {
        let mut form = full_form();
        form.end_frame = "   ".to_string();
        // Whitespace is not empty, so this is a parse failure rather
        // than a missing field.
        assert_eq!(
            form.validate(),
            Err(ValidationError::NotANumber {
                field: "end",
                value: "   ".to_string()
            })
        );
    }

    #[test]
    fn validate_accepts_negative_and_reversed_frames() {
        let mut form = full_form();
        form.start_frame = "10".to_string();
        form.end_frame = "-5".to_string();
        let job = form.validate().expect("reversed range should validate");
        assert_eq!(job.frame_count(), -14, "frame count is not clamped");
    }

    #[test]
    fn frame_count_saturates_at_extreme_ranges() {
        let mut form = full_form();
        form.start_frame = i64::MIN.to_string();
        form.end_frame = i64::MAX.to_string();
        let job = form.validate().expect("extreme frames are still integers");
        assert_eq!(
            job.frame_count(),
            i64::MAX,
            "count saturates instead of overflowing"
        );
    }

    #[test]
    fn renderer_tokens_match_hydra_delegates() {
        assert_eq!(Renderer::Karma.hydra_delegate(), "BRAY_HdKarma");
        assert_eq!(Renderer::KarmaXpu.hydra_delegate(), "BRAY_HdKarmaXPU");
    }

    #[test]
    fn renderer_displays_ui_labels() {
        assert_eq!(Renderer::Karma.to_string(), "Karma");
        assert_eq!(Renderer::KarmaXpu.to_string(), "KarmaXPU");
    }
}
