//! Top-level arrangement and render pipeline (spec.md §4.7): turns a
//! [`crate::plan::ProducerPlan`] into a fully mixed, mastered stereo
//! render.

use crate::artist::{self, ArtistProfile};
use crate::effects;
use crate::mixer::StereoOutput;
use crate::plan::ProducerPlan;
use crate::rng;
use crate::sections;
use crate::sequencer;
use crate::theory;
use crate::util::add_into;
use crate::voices::{arp, bass, drums, lead, pad};
use crate::wav;
use crate::SAMPLE_RATE;

const BEATS_PER_BAR: f64 = 4.0;
const MAX_DURATION_SECONDS: f64 = 60.0;

/// The finished render: mastered stereo WAV bytes plus derived metadata
/// callers need without re-parsing the file (spec.md §3).
#[derive(Debug, Clone)]
pub struct RenderedAudio {
    pub wav_bytes: Vec<u8>,
    pub pcm_hash: String,
    pub sample_rate: u32,
    pub duration_seconds: f64,
}

fn bar_samples(tempo_bpm: f64) -> usize {
    (BEATS_PER_BAR * 60.0 / tempo_bpm * SAMPLE_RATE as f64).round() as usize
}

/// Builds the groove this artist uses, with the two explicit per-artist
/// overrides spec.md §4.7 calls out on top of the registry's base
/// template: Kraftwerk's hihat is forced to straight eighths, and
/// Depeche Mode / Gary Numan shift their kick pattern forward by a
/// quarter-bar (4 sixteenth-steps).
fn effective_groove(profile: &ArtistProfile) -> ([u8; 16], [u8; 16], [u8; 16], f64) {
    let template = profile
        .groove_templates
        .first()
        .cloned()
        .unwrap_or_else(|| artist::registry()[0].groove_templates[0].clone());

    let mut kick = template.kick;
    let mut hihat = template.hihat_closed;

    if profile.slug == "kraftwerk" {
        hihat = [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0];
    }
    if profile.slug == "depeche_mode" || profile.slug == "gary_numan" {
        kick.rotate_right(4);
    }

    (kick, template.snare, hihat, template.swing_amount)
}

/// Renders the full backing track for a built plan, deterministically
/// seeded from the original request's canonical bytes.
pub fn render(plan: &ProducerPlan, request_bytes: &[u8]) -> RenderedAudio {
    let base_seed = rng::derive_base_seed(request_bytes);
    let profile = artist::lookup(&plan.config.artist_style);

    let drum_machine = drums::DrumMachine::from_name(profile.drum_machine);
    let bass_style = bass::BassStyle::from_name(profile.bass_style);
    let pad_style = pad::PadStyle::from_name(profile.synth_style);

    let (root, scale) = theory::root_from_key(&plan.config.key);
    let minor = theory::is_minor_key(&plan.config.key);
    let progression = theory::chord_progression(root, scale, minor);
    let scale_freqs = theory::scale_frequencies(root, scale);

    let total_bars = sections::total_bars(&plan.config.structure).max(1);
    let samples_per_bar = bar_samples(plan.config.tempo_bpm as f64);
    let full_samples = total_bars as usize * samples_per_bar;

    // --- drums ---
    let (kick_pattern, snare_pattern, hihat_pattern, swing) = effective_groove(profile);
    let step_size = sequencer::sixteenth_step_samples(plan.config.tempo_bpm as f64, SAMPLE_RATE);

    let mut kick_rng = rng::create_component_rng(base_seed, "kick");
    let mut snare_rng = rng::create_component_rng(base_seed, "snare");
    let mut hihat_rng = rng::create_component_rng(base_seed, "hihat");

    let kick_voice = drums::kick(drum_machine, &mut kick_rng);
    let snare_voice = drums::snare(drum_machine, &mut snare_rng);
    let hihat_voice = drums::hihat(&mut hihat_rng);

    let kick_track = sequencer::scatter(&kick_pattern, &kick_voice, step_size, full_samples, swing);
    let snare_track = sequencer::scatter(&snare_pattern, &snare_voice, step_size, full_samples, swing);
    let hihat_track = sequencer::scatter(&hihat_pattern, &hihat_voice, step_size, full_samples, 0.0);

    let mut drums_full = kick_track.clone();
    add_into(&mut drums_full, &snare_track);
    add_into(&mut drums_full, &hihat_track);

    // --- bass / pads, cycling the 4-chord progression across every bar ---
    let chord_roots: Vec<f64> = (0..total_bars as usize)
        .map(|bar_idx| progression[bar_idx % progression.len()][0])
        .collect();
    let chords: Vec<[f64; 3]> = (0..total_bars as usize)
        .map(|bar_idx| progression[bar_idx % progression.len()])
        .collect();

    let bass_full = bass::render(bass_style, &chord_roots, plan.config.tempo_bpm as f64, BEATS_PER_BAR);
    let pad_full = pad::render(pad_style, &chords, plan.config.tempo_bpm as f64, BEATS_PER_BAR);

    // --- lead / arp ---
    let lead_full = lead::render(&scale_freqs, plan.config.tempo_bpm as f64, BEATS_PER_BAR, total_bars as usize);
    let arp_pattern = profile.arp_patterns.first().cloned().unwrap_or_default();
    let arp_full = arp::render(
        &arp_pattern,
        &scale_freqs,
        plan.config.tempo_bpm as f64,
        BEATS_PER_BAR,
        total_bars as usize,
    );

    // --- section-by-section instrumentation walk (spec.md §6) ---
    let mut mix = vec![0.0f32; full_samples];
    let mut pad_layer = vec![0.0f32; full_samples];
    let mut kick_layer = vec![0.0f32; full_samples];
    let mut snare_layer = vec![0.0f32; full_samples];

    let mut cursor_bars = 0u32;
    for section_name in &plan.config.structure {
        let Some(spec) = sections::section_spec(section_name) else {
            continue;
        };
        let start = (cursor_bars as usize) * samples_per_bar;
        let end = ((cursor_bars + spec.bars) as usize * samples_per_bar).min(full_samples);
        cursor_bars += spec.bars;
        if start >= end {
            continue;
        }

        for inst in &spec.instruments {
            use sections::Instrument::*;
            let (source, gain): (&[f32], f64) = match inst {
                Drums => (&drums_full, 1.0),
                LightDrums => (&drums_full, 0.5),
                Bass => (&bass_full, 1.0),
                Pad => (&pad_full, 1.0),
                Lead => (&lead_full, 1.0),
                LightLead => (&lead_full, 0.6),
            };
            for i in start..end.min(source.len()) {
                mix[i] += source[i] * gain as f32;
            }
            if matches!(inst, Pad) {
                for i in start..end.min(pad_full.len()) {
                    pad_layer[i] = pad_full[i];
                }
            }
            if matches!(inst, Drums | LightDrums) {
                for i in start..end.min(kick_track.len()) {
                    kick_layer[i] = kick_track[i] * gain as f32;
                }
                for i in start..end.min(snare_track.len()) {
                    snare_layer[i] = snare_track[i] * gain as f32;
                }
            }
        }

        // Arp is not in the fixed section map; artists that use it (spec.md
        // §4.5 arp_patterns) get it layered under any section carrying Pad.
        if spec.instruments.contains(&sections::Instrument::Pad) && !arp_full.is_empty() {
            for i in start..end.min(arp_full.len()) {
                mix[i] += arp_full[i];
            }
        }
    }

    // --- effects chain, gated by the artist profile's own flags rather
    // --- than a second artist_style lookup table (single source of truth) ---
    if profile.use_sidechain {
        effects::sidechain_duck(&mut mix, &kick_layer);
    }
    if profile.use_gated_reverb {
        effects::gated_reverb(&mut mix, &snare_layer);
    }

    let duration_cap_samples =
        ((MAX_DURATION_SECONDS * SAMPLE_RATE as f64).round() as usize).min(mix.len());
    mix.truncate(duration_cap_samples.max(1));
    pad_layer.truncate(mix.len());

    effects::normalize(&mut mix);
    effects::fade(&mut mix);
    let stereo: StereoOutput = effects::widen(&mix, &pad_layer);

    let wav_result = wav::WavResult::from_stereo_output(&stereo);

    log::info!(
        "rendered {:.1}s track (artist_style={}, tempo={} bpm)",
        wav_result.duration_seconds(),
        plan.config.artist_style,
        plan.config.tempo_bpm
    );

    RenderedAudio {
        wav_bytes: wav_result.wav_data,
        pcm_hash: wav_result.pcm_hash,
        sample_rate: SAMPLE_RATE,
        duration_seconds: wav_result.duration_seconds(),
    }
}
