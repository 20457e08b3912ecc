//! Static artist-profile registry (spec.md §3, §4.5).
//!
//! Loaded once as a read-only table keyed by a normalized slug, following
//! the teacher's "static table of records keyed by string... a one-time
//! initialization of an immutable map" convention (DESIGN NOTES §9). Lookup
//! misses fall back to `depeche_mode` rather than erroring.

use crate::theory::Scale;

/// How often chords change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmonicRhythm {
    Static,
    Rigid,
    Slow,
    Normal,
}

/// A 16-step groove template at sixteenth-note resolution.
#[derive(Debug, Clone)]
pub struct GrooveTemplate {
    pub kick: [u8; 16],
    pub snare: [u8; 16],
    pub hihat_closed: [u8; 16],
    pub hihat_open: [u8; 16],
    pub swing_amount: f64,
}

/// Static musical DNA for one artist.
#[derive(Debug, Clone)]
pub struct ArtistProfile {
    pub slug: &'static str,
    pub scale_name: Scale,
    pub root_midi: i32,
    pub tempo_range: (u32, u32),
    /// Four-length Roman-numeral chord progression templates.
    pub chord_progressions: Vec<[&'static str; 4]>,
    pub harmonic_rhythm: HarmonicRhythm,
    pub groove_templates: Vec<GrooveTemplate>,
    pub arp_patterns: Vec<Vec<usize>>,
    pub drum_machine: &'static str,
    pub bass_style: &'static str,
    pub synth_style: &'static str,
    pub use_sidechain: bool,
    pub use_gated_reverb: bool,
    pub instruments: Vec<&'static str>,
}

impl ArtistProfile {
    /// Root frequency in Hz from `root_midi` (A4 = MIDI 69 = 440 Hz).
    pub fn root_frequency(&self) -> f64 {
        440.0 * 2f64.powf((self.root_midi - 69) as f64 / 12.0)
    }
}

fn groove(kick: [u8; 16], snare: [u8; 16], hihat_closed: [u8; 16], swing: f64) -> GrooveTemplate {
    GrooveTemplate {
        kick,
        snare,
        hihat_closed,
        hihat_open: [0; 16],
        swing_amount: swing,
    }
}

/// Normalizes an artist name for lookup: lowercase, leading `"the "`
/// stripped, spaces collapsed to underscores.
pub fn normalize_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    let stripped = lower.strip_prefix("the ").unwrap_or(&lower);
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Looks up an artist profile by name, falling back to `depeche_mode` on a
/// miss (spec.md §4.5 — not an error, logged and substituted).
pub fn lookup(name: &str) -> &'static ArtistProfile {
    let slug = normalize_name(name);
    registry()
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            log::warn!("unknown artist '{name}' (slug '{slug}'), falling back to depeche_mode");
            registry().iter().find(|p| p.slug == "depeche_mode").unwrap()
        })
}

/// Merges multiple artist profiles per spec.md §4.5: first is primary; the
/// `instruments` field is the set-union; the default tempo is the midpoint
/// of the averaged tempo ranges.
pub struct MergedArtists {
    pub primary: &'static ArtistProfile,
    pub instruments: Vec<String>,
    pub default_tempo: u32,
}

pub fn merge(names: &[String]) -> MergedArtists {
    let profiles: Vec<&'static ArtistProfile> = names.iter().map(|n| lookup(n)).collect();
    let primary = *profiles.first().unwrap_or(&registry().first().unwrap());

    let mut instruments: Vec<String> = Vec::new();
    for p in &profiles {
        for inst in &p.instruments {
            let s = inst.to_string();
            if !instruments.contains(&s) {
                instruments.push(s);
            }
        }
    }

    let default_tempo = if profiles.is_empty() {
        100
    } else {
        let avg_min: f64 =
            profiles.iter().map(|p| p.tempo_range.0 as f64).sum::<f64>() / profiles.len() as f64;
        let avg_max: f64 =
            profiles.iter().map(|p| p.tempo_range.1 as f64).sum::<f64>() / profiles.len() as f64;
        ((avg_min + avg_max) / 2.0).round() as u32
    };

    MergedArtists {
        primary,
        instruments,
        default_tempo,
    }
}

/// The full static registry, built once per call (cheap: a handful of
/// small structs) rather than behind a `once_cell`, since the teacher's
/// other registries (e.g. the section map) are likewise plain functions
/// returning owned data — see `crate::sections`.
pub fn registry() -> Vec<ArtistProfile> {
    vec![
        ArtistProfile {
            slug: "depeche_mode",
            scale_name: Scale::NaturalMinor,
            root_midi: 50, // D3
            tempo_range: (100, 130),
            chord_progressions: vec![["i", "VI", "III", "VII"], ["i", "iv", "v", "i"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.1,
            )],
            arp_patterns: vec![vec![0, 2, 4, 2]],
            drum_machine: "808",
            bass_style: "moog",
            synth_style: "dark_analog",
            use_sidechain: true,
            use_gated_reverb: true,
            instruments: vec!["drums", "bass", "pad", "lead"],
        },
        ArtistProfile {
            slug: "gary_numan",
            scale_name: Scale::NaturalMinor,
            root_midi: 45, // A2
            tempo_range: (110, 140),
            chord_progressions: vec![["i", "VII", "VI", "VII"]],
            harmonic_rhythm: HarmonicRhythm::Rigid,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 5, 4, 2]],
            drum_machine: "linn_drum",
            bass_style: "sequenced",
            synth_style: "metallic_ring_mod",
            use_sidechain: false,
            use_gated_reverb: false,
            instruments: vec!["drums", "bass", "pad", "lead", "arp"],
        },
        ArtistProfile {
            slug: "kraftwerk",
            scale_name: Scale::Major,
            root_midi: 48, // C3
            tempo_range: (115, 125),
            chord_progressions: vec![["I", "V", "vi", "IV"]],
            harmonic_rhythm: HarmonicRhythm::Static,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 7]],
            drum_machine: "808",
            bass_style: "sequenced",
            synth_style: "clean_sine",
            use_sidechain: false,
            use_gated_reverb: false,
            instruments: vec!["drums", "bass", "pad", "arp"],
        },
        ArtistProfile {
            slug: "pet_shop_boys",
            scale_name: Scale::Major,
            root_midi: 53, // F3
            tempo_range: (118, 128),
            chord_progressions: vec![["I", "vi", "IV", "V"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 2, 0, 2, 4, 7]],
            drum_machine: "909",
            bass_style: "driving",
            synth_style: "bright_digital_fm",
            use_sidechain: true,
            use_gated_reverb: true,
            instruments: vec!["drums", "bass", "pad", "lead"],
        },
        ArtistProfile {
            slug: "new_order",
            scale_name: Scale::Major,
            root_midi: 45,
            tempo_range: (120, 135),
            chord_progressions: vec![["I", "V", "vi", "iii"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 5, 7, 5, 4, 2]],
            drum_machine: "909",
            bass_style: "driving",
            synth_style: "warm_analog",
            use_sidechain: true,
            use_gated_reverb: false,
            instruments: vec!["drums", "bass", "pad", "lead", "arp"],
        },
        ArtistProfile {
            slug: "human_league",
            scale_name: Scale::Major,
            root_midi: 50,
            tempo_range: (110, 125),
            chord_progressions: vec![["I", "IV", "V", "I"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4]],
            drum_machine: "808",
            bass_style: "synth",
            synth_style: "bright_digital_fm",
            use_sidechain: false,
            use_gated_reverb: true,
            instruments: vec!["drums", "bass", "pad", "lead"],
        },
        ArtistProfile {
            slug: "omd",
            scale_name: Scale::NaturalMinor,
            root_midi: 48,
            tempo_range: (105, 120),
            chord_progressions: vec![["i", "VI", "VII", "i"]],
            harmonic_rhythm: HarmonicRhythm::Slow,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
                0.0,
            )],
            arp_patterns: vec![vec![0, 3, 5, 7]],
            drum_machine: "linn_drum",
            bass_style: "synth",
            synth_style: "warm_analog",
            use_sidechain: false,
            use_gated_reverb: true,
            instruments: vec!["drums", "bass", "pad"],
        },
        ArtistProfile {
            slug: "tears_for_fears",
            scale_name: Scale::Major,
            root_midi: 52,
            tempo_range: (100, 120),
            chord_progressions: vec![["I", "V", "vi", "IV"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 5]],
            drum_machine: "linn_drum",
            bass_style: "driving",
            synth_style: "orchestral",
            use_sidechain: false,
            use_gated_reverb: true,
            instruments: vec!["drums", "bass", "pad", "lead"],
        },
        ArtistProfile {
            slug: "eurythmics",
            scale_name: Scale::NaturalMinor,
            root_midi: 47,
            tempo_range: (112, 126),
            chord_progressions: vec![["i", "VII", "VI", "v"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                0.05,
            )],
            arp_patterns: vec![vec![0, 2, 4, 2, 0]],
            drum_machine: "909",
            bass_style: "sequenced",
            synth_style: "dark_analog",
            use_sidechain: true,
            use_gated_reverb: false,
            instruments: vec!["drums", "bass", "pad", "lead"],
        },
        ArtistProfile {
            slug: "yazoo",
            scale_name: Scale::NaturalMinor,
            root_midi: 50,
            tempo_range: (108, 122),
            chord_progressions: vec![["i", "iv", "VII", "III"]],
            harmonic_rhythm: HarmonicRhythm::Normal,
            groove_templates: vec![groove(
                [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
                [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
                [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
                0.0,
            )],
            arp_patterns: vec![vec![0, 2, 4, 2]],
            drum_machine: "808",
            bass_style: "sequenced",
            synth_style: "clean_sine",
            use_sidechain: false,
            use_gated_reverb: false,
            instruments: vec!["drums", "bass", "pad"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_leading_the_and_spaces() {
        assert_eq!(normalize_name("Depeche Mode"), "depeche_mode");
        assert_eq!(normalize_name("The Human League"), "human_league");
    }

    #[test]
    fn unknown_artist_falls_back_to_depeche_mode() {
        let profile = lookup("Unknown Band");
        assert_eq!(profile.slug, "depeche_mode");
    }

    #[test]
    fn known_artist_resolves_directly() {
        let profile = lookup("Kraftwerk");
        assert_eq!(profile.slug, "kraftwerk");
    }

    #[test]
    fn merge_unions_instruments_across_artists() {
        let merged = merge(&[
            "Depeche Mode".to_string(),
            "Gary Numan".to_string(),
            "New Order".to_string(),
        ]);
        assert!(merged.instruments.contains(&"arp".to_string()));
        assert!(merged.instruments.contains(&"lead".to_string()));
        assert!(merged.instruments.contains(&"drums".to_string()));
    }

    #[test]
    fn merge_averages_tempo_as_midpoint() {
        let merged = merge(&["Depeche Mode".to_string()]);
        // depeche_mode range is (100, 130) -> midpoint 115.
        assert_eq!(merged.default_tempo, 115);
    }

    #[test]
    fn registry_has_all_ten_required_artists() {
        let required = [
            "depeche_mode",
            "gary_numan",
            "kraftwerk",
            "pet_shop_boys",
            "new_order",
            "human_league",
            "omd",
            "tears_for_fears",
            "eurythmics",
            "yazoo",
        ];
        let slugs: Vec<&str> = registry().iter().map(|p| p.slug).collect();
        for r in required {
            assert!(slugs.contains(&r), "missing artist {r}");
        }
    }
}
