//! The `MusicRequest` input type and its validation.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How the rendered track is meant to be used; influences tempo and
/// structure defaults in the producer-plan builder (spec.md §4.6 rule 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsageContext {
    Tiktok,
    Shorts,
    Background,
    FullSong,
    Longform,
    #[default]
    Unspecified,
}

/// User-facing request: free-form influence hints plus a handful of
/// optional structured overrides.
///
/// `artist_style`, `influence_text`, `influence_artists`, `usage_context`
/// and `mood` are the fields spec.md §9 flags as referenced by the plan
/// builder but not declared on the original schema; they are declared here
/// directly rather than guessed via an untyped map (see DESIGN.md Open
/// Question #2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicRequest {
    /// Ordered list of artist-name strings; the first is primary.
    pub artist_influences: Vec<String>,
    /// Free-form influence text, matched by keyword in the plan builder.
    #[serde(default)]
    pub influence_text: Option<String>,
    /// How the track will be used.
    #[serde(default)]
    pub usage_context: UsageContext,
    /// Desired mood, if the caller already knows it.
    #[serde(default)]
    pub mood: Option<String>,
    /// Desired tempo in BPM, must be in `[60, 200]` if present.
    #[serde(default)]
    pub tempo_bpm: Option<u32>,
    /// Optional explicit instrument list (informational; merged into the
    /// artist-merge instrument set, never removes instruments).
    #[serde(default)]
    pub instruments: Option<Vec<String>>,
    /// Optional production era hint, carried through to the summary text
    /// but not otherwise interpreted.
    #[serde(default)]
    pub production_era: Option<String>,
    /// Optional explicit section name list; defaults to 7 sections when
    /// absent (spec.md §4.8, invariant #4).
    #[serde(default)]
    pub sections: Option<Vec<String>>,
    /// Optional free text used to seed the title/hook generator.
    #[serde(default)]
    pub reference_text: Option<String>,
    /// Optional identifier for the owning project; not interpreted here.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Pre-resolved artist style override (normally derived by the plan
    /// builder from `artist_influences`, but can be forced by the caller).
    #[serde(default)]
    pub artist_style: Option<String>,
    /// Alias of `artist_influences` used by some legacy callers.
    #[serde(default)]
    pub influence_artists: Option<Vec<String>>,
}

impl MusicRequest {
    /// Validates the request at the boundary. The renderer assumes a
    /// well-formed plan built from an already-validated request (spec.md §7
    /// propagation policy).
    pub fn validate(&self) -> EngineResult<()> {
        if self.artist_influences.is_empty()
            && self
                .influence_artists
                .as_ref()
                .map(|v| v.is_empty())
                .unwrap_or(true)
        {
            return Err(EngineError::validation(
                "artist_influences",
                "at least one artist influence (or legacy influence_artists) is required",
            ));
        }

        if let Some(tempo) = self.tempo_bpm {
            if !(60..=200).contains(&tempo) {
                return Err(EngineError::validation(
                    "tempo_bpm",
                    format!("tempo {tempo} is outside the allowed range [60, 200]"),
                ));
            }
        }

        Ok(())
    }

    /// Returns the effective artist list, preferring `artist_influences`
    /// and falling back to the legacy `influence_artists` alias.
    pub fn artists(&self) -> &[String] {
        if !self.artist_influences.is_empty() {
            &self.artist_influences
        } else {
            self.influence_artists.as_deref().unwrap_or(&[])
        }
    }

    /// Canonical bytes used to derive the render's base seed and
    /// `track_id`. Field order is fixed so identical requests always
    /// produce identical bytes regardless of JSON key ordering.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for artist in self.artists() {
            buf.extend_from_slice(artist.as_bytes());
            buf.push(0);
        }
        buf.extend_from_slice(self.mood.as_deref().unwrap_or("").as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.reference_text.as_deref().unwrap_or("").as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.influence_text.as_deref().unwrap_or("").as_bytes());
        buf.push(0);
        if let Some(tempo) = self.tempo_bpm {
            buf.extend_from_slice(&tempo.to_le_bytes());
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> MusicRequest {
        MusicRequest {
            artist_influences: vec!["Depeche Mode".into()],
            influence_text: None,
            usage_context: UsageContext::Unspecified,
            mood: Some("dark".into()),
            tempo_bpm: Some(120),
            instruments: None,
            production_era: None,
            sections: None,
            reference_text: None,
            project_id: None,
            artist_style: None,
            influence_artists: None,
        }
    }

    #[test]
    fn rejects_missing_artist_influences() {
        let mut req = base_request();
        req.artist_influences.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn accepts_legacy_influence_artists_alias() {
        let mut req = base_request();
        req.artist_influences.clear();
        req.influence_artists = Some(vec!["Kraftwerk".into()]);
        assert!(req.validate().is_ok());
        assert_eq!(req.artists(), &["Kraftwerk".to_string()]);
    }

    #[test]
    fn rejects_out_of_range_tempo() {
        let mut req = base_request();
        req.tempo_bpm = Some(40);
        assert!(req.validate().is_err());

        req.tempo_bpm = Some(250);
        assert!(req.validate().is_err());
    }

    #[test]
    fn canonical_bytes_are_stable() {
        let req = base_request();
        assert_eq!(req.canonical_bytes(), req.canonical_bytes());
    }
}
