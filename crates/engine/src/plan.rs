//! The rule-based producer-plan interpreter (spec.md §4.6).
//!
//! Implemented as an explicit ordered list of rule functions rather than a
//! single tangle of `if`s, per DESIGN NOTES §9 ("explicit ordered list of
//! `(predicate, mutator)` pairs so the rule that wins a conflict is
//! obvious and reorderable"). Each rule may append a line to the summary;
//! rule order is the authoritative tie-breaker.

use crate::artist;
use crate::request::{MusicRequest, UsageContext};

/// Structured parameters the renderer consumes.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub tempo_bpm: u32,
    pub key: String,
    pub artist_style: String,
    pub energy_curve: String,
    pub structure: Vec<String>,
    pub drum_profile: String,
    pub guitar_profile: Option<String>,
    pub synth_profile: Option<String>,
    pub mood: String,
}

/// The interpreted, renderer-ready plan.
#[derive(Debug, Clone)]
pub struct ProducerPlan {
    pub config: ProducerConfig,
    pub summary: String,
}

fn default_structure() -> Vec<String> {
    ["intro", "verse", "chorus", "verse", "chorus", "outro"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

struct Builder {
    config: ProducerConfig,
    summary_lines: Vec<String>,
    tempo_user_supplied: bool,
    linkin_park_hit: bool,
}

impl Builder {
    fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("plan rule fired: {line}");
        self.summary_lines.push(line);
    }
}

/// Builds a `ProducerPlan` from a validated `MusicRequest` (spec.md §4.6).
pub fn build_plan(req: &MusicRequest) -> ProducerPlan {
    let artists: Vec<String> = req.artists().to_vec();
    let artists_joined = artists.join(" ").to_ascii_lowercase();
    let influence_text = req.influence_text.clone().unwrap_or_default().to_ascii_lowercase();
    let haystack = format!("{artists_joined} {influence_text}");

    // Rule 1: defaults.
    let mut b = Builder {
        config: ProducerConfig {
            tempo_bpm: req.tempo_bpm.unwrap_or(100),
            key: "C minor".to_string(),
            artist_style: req.artist_style.clone().unwrap_or_else(|| "generic".to_string()),
            energy_curve: "medium".to_string(),
            structure: default_structure(),
            drum_profile: "generic".to_string(),
            guitar_profile: None,
            synth_profile: None,
            mood: req.mood.clone().unwrap_or_else(|| "neutral".to_string()),
        },
        summary_lines: Vec::new(),
        tempo_user_supplied: req.tempo_bpm.is_some(),
        linkin_park_hit: false,
    };

    // Rule 2: keyword families over influence_text.
    if contains_any(&influence_text, &["slow", "ballad", "intimate", "soft"]) {
        b.config.tempo_bpm = b.config.tempo_bpm.min(85);
        b.config.energy_curve = "slow_build".to_string();
        b.note("influence text suggests a slower, intimate feel");
    }
    if contains_any(&influence_text, &["fast", "energetic", "aggressive", "intense", "hype"]) {
        b.config.tempo_bpm = b.config.tempo_bpm.max(125);
        b.config.energy_curve = "high".to_string();
        b.note("influence text suggests high energy");
    }
    if contains_any(&influence_text, &["tiktok", "shorts", "viral"])
        || matches!(req.usage_context, UsageContext::Tiktok | UsageContext::Shorts)
    {
        b.config.structure = ["intro", "hook", "drop", "chorus"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        b.config.energy_curve = "hook_first".to_string();
        b.config.tempo_bpm = b.config.tempo_bpm.max(110);
        b.note("short-form usage context: hook-first structure");
    }
    if contains_any(&influence_text, &["dark", "emotional", "moody", "heavy"]) {
        b.config.key = "D minor".to_string();
        b.config.mood = "dark".to_string();
        b.note("influence text suggests a dark mood");
    }
    if contains_any(&influence_text, &["bright", "uplifting", "hopeful", "happy"]) {
        b.config.key = "F major".to_string();
        b.config.mood = "uplifting".to_string();
        b.note("influence text suggests an uplifting mood");
    }

    // Rule 3: artist hits.
    if haystack.contains("linkin park") {
        b.config.artist_style = "linkin_park".to_string();
        b.config.guitar_profile = Some("lp_heavy_guitars".to_string());
        b.config.drum_profile = "lp_rock_drums".to_string();
        if !b.tempo_user_supplied {
            b.config.tempo_bpm = 95;
        }
        b.config.key = "D minor".to_string();
        b.linkin_park_hit = true;
        b.note("Linkin Park influence detected");
    }
    if haystack.contains("eminem") {
        if b.linkin_park_hit {
            b.config.artist_style = "linkin_park_eminem_hybrid".to_string();
        } else {
            b.config.artist_style = "eminem".to_string();
        }
        b.config.drum_profile = "eminem_bounce".to_string();
        if !b.tempo_user_supplied {
            b.config.tempo_bpm = 92;
        }
        b.note("Eminem influence detected");
    }
    for (needle, slug) in [
        ("depeche mode", "depeche_mode"),
        ("gary numan", "gary_numan"),
        ("kraftwerk", "kraftwerk"),
        ("pet shop boys", "pet_shop_boys"),
    ] {
        if haystack.contains(needle) {
            let profile = artist::lookup(slug);
            b.config.artist_style = slug.to_string();
            b.config.mood = match profile.scale_name {
                crate::theory::Scale::Major => "uplifting".to_string(),
                _ => "dark".to_string(),
            };
            b.config.key = key_string_for_profile(profile);
            b.note(format!("{slug} influence detected"));
        }
    }

    // Rule 4: usage context.
    match req.usage_context {
        UsageContext::Background => {
            b.config.energy_curve = "steady".to_string();
            b.config.structure = vec!["loop".to_string()];
            b.config.tempo_bpm = b.config.tempo_bpm.min(100);
            b.note("background usage: steady single-loop structure");
        }
        UsageContext::Longform | UsageContext::FullSong => {
            b.config.structure = ["intro", "verse", "chorus", "verse", "bridge", "chorus", "outro"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            b.config.energy_curve = "dynamic".to_string();
            b.note("long-form usage: full song structure");
        }
        _ => {}
    }

    // Rule 5: instrumentation mentions.
    if contains_any(&haystack, &["guitar", "riff", "rock", "metal"]) && b.config.guitar_profile.is_none() {
        b.config.guitar_profile = Some("generic_guitars".to_string());
        b.note("guitar-oriented instrumentation mentioned");
    }
    if contains_any(&haystack, &["synth", "electronic", "digital"]) {
        b.config.guitar_profile = None;
        b.config.synth_profile = Some("prominent_digital".to_string());
        b.note("synth-oriented instrumentation mentioned");
    }

    let header = format!("{} BPM in {}", b.config.tempo_bpm, b.config.key);
    let mut summary_lines = vec![header];
    summary_lines.extend(b.summary_lines);

    ProducerPlan {
        config: b.config,
        summary: summary_lines.join(". "),
    }
}

fn key_string_for_profile(profile: &artist::ArtistProfile) -> String {
    let letter_freq = profile.root_frequency();
    let letter = if (letter_freq - 220.0).abs() < 40.0 {
        "A"
    } else if (letter_freq - 261.63).abs() < 40.0 {
        "C"
    } else if (letter_freq - 293.66).abs() < 40.0 {
        "D"
    } else if (letter_freq - 349.23).abs() < 40.0 {
        "F"
    } else {
        "G"
    };
    let quality = match profile.scale_name {
        crate::theory::Scale::Major => "major",
        _ => "minor",
    };
    format!("{letter} {quality}")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Optional post-processing stage over an already-built plan (spec.md
/// §4.6, §9 — "interface is a single async function `refine(req, plan) ->
/// plan`"; kept synchronous here since no real network call is wired up,
/// per DESIGN.md Open Question #3).
pub trait PlanRefiner {
    fn refine(&self, req: &MusicRequest, plan: ProducerPlan) -> ProducerPlan;
}

/// The always-available deterministic refiner. Additive rules only: it
/// never contradicts a decision `build_plan` already made, only adds
/// energy/structure nuance. Idempotent on an already-refined plan.
pub struct DeterministicRefiner;

impl PlanRefiner for DeterministicRefiner {
    fn refine(&self, req: &MusicRequest, mut plan: ProducerPlan) -> ProducerPlan {
        let influence_text = req.influence_text.clone().unwrap_or_default().to_ascii_lowercase();

        if contains_any(&influence_text, &["massive", "huge", "epic"]) {
            plan.config.energy_curve = "dynamic_build".to_string();
            plan.summary.push_str(". refined: epic scale detected");
        }

        if contains_any(&influence_text, &["drop", "buildup", "crescendo"]) {
            let already_has_build = plan.config.structure.iter().any(|s| s == "build");
            if !already_has_build {
                if let Some(last) = plan.config.structure.last().cloned() {
                    let insert_at = plan.config.structure.len() - 1;
                    plan.config.structure.insert(insert_at, "build".to_string());
                    plan.summary
                        .push_str(&format!(". refined: inserted build section before {last}"));
                }
            }
        }

        if plan.config.artist_style == "linkin_park_eminem_hybrid" {
            plan.config.drum_profile = "lp_rock_drums_with_bounce".to_string();
            plan.summary.push_str(". refined: linkin park / eminem hybrid balance");
        }

        plan
    }
}

/// Selects a refiner based on environment variables (spec.md §6
/// `MUSIC_LLM_API_KEY` / `MUSIC_LLM_MODEL`). No network-backed refiner is
/// implemented; presence of the key simply documents the future extension
/// point (DESIGN.md Open Question #3) and still resolves to the
/// deterministic refiner today.
pub fn select_refiner() -> DeterministicRefiner {
    if std::env::var("MUSIC_LLM_API_KEY").is_ok() {
        log::debug!("MUSIC_LLM_API_KEY present, but no network refiner is wired up; using deterministic refiner");
    }
    DeterministicRefiner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(artists: &[&str], influence_text: Option<&str>, usage: UsageContext, tempo: Option<u32>) -> MusicRequest {
        MusicRequest {
            artist_influences: artists.iter().map(|s| s.to_string()).collect(),
            influence_text: influence_text.map(|s| s.to_string()),
            usage_context: usage,
            mood: None,
            tempo_bpm: tempo,
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
    fn defaults_apply_with_no_hints() {
        let plan = build_plan(&req(&["Unknown Band"], None, UsageContext::Unspecified, None));
        assert_eq!(plan.config.tempo_bpm, 100);
        assert_eq!(plan.config.key, "C minor");
        assert_eq!(plan.config.structure, default_structure());
    }

    #[test]
    fn tiktok_floor_wins_over_slow_cap_because_it_runs_later() {
        let plan = build_plan(&req(
            &["Depeche Mode"],
            Some("slow emotional tiktok hook"),
            UsageContext::Tiktok,
            None,
        ));
        assert_eq!(plan.config.tempo_bpm, 110);
        assert_eq!(plan.config.structure, vec!["intro", "hook", "drop", "chorus"]);
        assert_eq!(plan.config.energy_curve, "hook_first");
    }

    #[test]
    fn background_usage_forces_single_loop_structure() {
        let plan = build_plan(&req(&["Kraftwerk"], None, UsageContext::Background, Some(140)));
        assert_eq!(plan.config.structure, vec!["loop".to_string()]);
        assert_eq!(plan.config.tempo_bpm, 100);
    }

    #[test]
    fn linkin_park_and_eminem_merge_to_hybrid() {
        let plan = build_plan(&req(&["Linkin Park", "Eminem"], None, UsageContext::Unspecified, None));
        assert_eq!(plan.config.artist_style, "linkin_park_eminem_hybrid");
    }

    #[test]
    fn refiner_inserts_build_before_last_section_once() {
        let plan = build_plan(&req(
            &["Depeche Mode"],
            Some("big crescendo into the drop"),
            UsageContext::Unspecified,
            None,
        ));
        let refined = DeterministicRefiner.refine(&req(&["Depeche Mode"], Some("big crescendo into the drop"), UsageContext::Unspecified, None), plan);
        assert!(refined.config.structure.contains(&"build".to_string()));

        // Idempotent: refining again doesn't insert a second "build".
        let twice = DeterministicRefiner.refine(
            &req(&["Depeche Mode"], Some("big crescendo into the drop"), UsageContext::Unspecified, None),
            refined.clone(),
        );
        let build_count = twice.config.structure.iter().filter(|s| *s == "build").count();
        assert_eq!(build_count, 1);
    }
}
