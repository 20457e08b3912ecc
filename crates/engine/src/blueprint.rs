//! Song-blueprint assembly (spec.md §4.8): derives a title, hook, chorus,
//! per-section lyric sketch and vocal style from the same deterministic
//! inputs the audio render used, so the two outputs describe the same song.

use crate::artist::{self, ArtistProfile};
use crate::plan::ProducerPlan;
use crate::request::MusicRequest;
use crate::sections;

const TITLE_TEMPLATES: [&str; 8] = [
    "Neon Tide",
    "Glass Horizon",
    "Static Bloom",
    "Afterglow Static",
    "Wire and Rain",
    "Midnight Frequency",
    "Paper Satellites",
    "Concrete Halo",
];

const HOOK_TEMPLATES: [&str; 5] = [
    "we could be the signal in the dark",
    "hold the line until the static clears",
    "every heartbeat on a borrowed wire",
    "we're the echo that the city keeps",
    "running colder than the neon says",
];

/// Placeholder for a future text-to-speech integration. Never populated in
/// this engine; present only so callers can distinguish "no vocal synth
/// attempted" from "vocal synth failed" without a schema break later.
#[derive(Debug, Clone, Default)]
pub struct VocalSynthesisRef {
    pub provider: Option<String>,
    pub voice_id: Option<String>,
}

/// A single lyric-sketch section entry.
#[derive(Debug, Clone)]
pub struct BlueprintSection {
    pub name: String,
    pub bars: u32,
    pub description: String,
    pub lyrics: String,
}

/// Vocal delivery hints accompanying the instrumental render.
#[derive(Debug, Clone)]
pub struct VocalStyle {
    pub gender: String,
    pub tone: String,
    pub energy: String,
}

/// The fully assembled creative brief for a rendered track (spec.md §3).
#[derive(Debug, Clone)]
pub struct SongBlueprint {
    pub track_id: String,
    pub title: String,
    pub hook: String,
    pub chorus: String,
    pub tempo_bpm: u32,
    pub mood: String,
    pub sections: Vec<BlueprintSection>,
    pub vocal_style: VocalStyle,
    pub vocal_synthesis_ref: Option<VocalSynthesisRef>,
    /// Filled in by the caller once the WAV has actually been written to its
    /// final location (unset by [`assemble`] itself, which only knows the
    /// track's content, not where it will end up on disk).
    pub audio_url: Option<String>,
}

fn hash_to_index(input: &str, modulus: usize) -> usize {
    let hash = blake3::hash(input.as_bytes());
    let bytes: [u8; 8] = hash.as_bytes()[0..8].try_into().unwrap();
    (u64::from_le_bytes(bytes) % modulus as u64) as usize
}

/// Derives the track id as the first 12 hex characters of a BLAKE3 hash
/// over the plan's identifying fields (DESIGN.md Open Question #1: BLAKE3
/// stands in for the spec's literal MD5 example, since BLAKE3 is the only
/// hash function this codebase's dependency stack carries).
fn track_id(plan: &ProducerPlan, req: &MusicRequest) -> String {
    let mut input = Vec::new();
    input.extend_from_slice(plan.config.artist_style.as_bytes());
    input.extend_from_slice(&plan.config.tempo_bpm.to_le_bytes());
    input.extend_from_slice(req.canonical_bytes().as_slice());
    blake3::hash(&input).to_hex().to_string()[..12].to_string()
}

/// Capitalizes the first letter of a word, leaving the rest as-is.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn derive_title(req: &MusicRequest, primary_artist_slug: &str) -> String {
    if let Some(reference) = req.reference_text.as_ref().filter(|s| s.len() > 10) {
        let words: Vec<String> = reference
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .take(4)
            .map(capitalize)
            .collect();
        if !words.is_empty() {
            let title = words.join(" ");
            return title.chars().take(40).collect();
        }
    }
    let idx = hash_to_index(primary_artist_slug, TITLE_TEMPLATES.len());
    TITLE_TEMPLATES[idx].to_string()
}

fn derive_hook(artists_joined: &str, mood: &str) -> String {
    let key = format!("{artists_joined}{mood}");
    let idx = hash_to_index(&key, HOOK_TEMPLATES.len());
    HOOK_TEMPLATES[idx].to_string()
}

fn derive_chorus(hook: &str) -> String {
    format!(
        "{hook}\n{hook}\nand we won't let it fade away\n{hook}\nthis is how we stay",
    )
}

/// Bar count for a section class, with unrecognized names defaulting to a
/// 12-bar verse-style sketch (spec.md §4.8). Matched case-insensitively so
/// caller-supplied section names like `"Intro"`/`"Verse"` classify the same
/// as the lowercase names the plan builder and section map use internally.
fn lyric_bars_for(name: &str) -> u32 {
    match name.to_ascii_lowercase().as_str() {
        "intro" | "outro" => 8,
        "verse" => 16,
        "chorus" | "hook" | "drop" => 8,
        "bridge" | "build" => 16,
        _ => 12,
    }
}

fn section_description(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "intro" => "sparse pad and a distant pulse, the hook not yet spoken".to_string(),
        "verse" => "narrative detail over a steady groove, holding back the chorus".to_string(),
        "pre_chorus" => "tension building, harmonic rhythm quickening".to_string(),
        "chorus" => "full hook stated plainly, the widest the mix gets".to_string(),
        "drop" => "instrumental hook restated without vocals, beat foregrounded".to_string(),
        "bridge" => "harmonic detour, a single new idea before the last chorus".to_string(),
        "outro" => "the hook decaying back into the intro's sparseness".to_string(),
        "loop" => "a single cell repeated, built to sit under other media".to_string(),
        "hook" => "the hook arrives immediately, front-loaded for short-form".to_string(),
        "build" => "rising energy into the next section, filters opening up".to_string(),
        _ => "a verse-style passage carrying the song forward".to_string(),
    }
}

fn lyric_line_for(name: &str, hook: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "chorus" | "hook" => hook.to_string(),
        "drop" => format!("({hook})"),
        _ => format!("[{name} lyric sketch, pending full lyric pass]"),
    }
}

fn vocal_style_for(profile: &ArtistProfile, mood: &str) -> VocalStyle {
    let (gender, base_tone, energy) = match profile.slug {
        "depeche_mode" => ("male", "brooding baritone", "restrained"),
        "gary_numan" => ("male", "detached monotone", "clinical"),
        "kraftwerk" => ("male", "vocoder-processed", "mechanical"),
        "pet_shop_boys" => ("male", "deadpan tenor", "wry"),
        "new_order" => ("male", "plaintive tenor", "driving"),
        "human_league" => ("mixed", "bright conversational", "buoyant"),
        "omd" => ("male", "warm baritone", "wistful"),
        "tears_for_fears" => ("male", "soaring tenor", "anthemic"),
        "eurythmics" => ("female", "powerful alto", "commanding"),
        "yazoo" => ("female", "soulful alto", "intimate"),
        _ => ("mixed", "neutral mid-range", "steady"),
    };
    let tone = format!("{mood} {base_tone}");
    VocalStyle {
        gender: gender.to_string(),
        tone,
        energy: energy.to_string(),
    }
}

/// Assembles a full [`SongBlueprint`] from the already-built plan and its
/// source request.
pub fn assemble(plan: &ProducerPlan, req: &MusicRequest) -> SongBlueprint {
    let primary_artist = req.artists().first().cloned().unwrap_or_else(|| "depeche_mode".to_string());
    let profile = artist::lookup(&primary_artist);
    let artists_joined = req.artists().join(" ").to_ascii_lowercase();

    let title = derive_title(req, &artist::normalize_name(&primary_artist));
    let hook = derive_hook(&artists_joined, &plan.config.mood);
    let chorus = derive_chorus(&hook);

    let section_names: Vec<String> = req
        .sections
        .clone()
        .unwrap_or_else(|| {
            ["intro", "verse", "chorus", "verse", "chorus", "bridge", "outro"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

    let sections = section_names
        .iter()
        .map(|name| BlueprintSection {
            name: name.clone(),
            bars: lyric_bars_for(name),
            description: section_description(name),
            lyrics: lyric_line_for(name, &hook),
        })
        .collect();

    SongBlueprint {
        track_id: track_id(plan, req),
        title,
        hook,
        chorus,
        tempo_bpm: plan.config.tempo_bpm,
        mood: plan.config.mood.clone(),
        sections,
        vocal_style: vocal_style_for(profile, &plan.config.mood),
        vocal_synthesis_ref: None,
        audio_url: None,
    }
}
