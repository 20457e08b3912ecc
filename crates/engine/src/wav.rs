//! Deterministic stereo WAV writer, adapted from the teacher's
//! `speccade-backend-audio::wav` module: no timestamps or variable
//! metadata, so the PCM hash is reproducible across runs (spec.md §6).
//!
//! Trimmed to stereo-only and `f32` buffers, since this engine never
//! produces a mono master (spec.md §6 format is fixed: 44.1 kHz / 16-bit /
//! stereo).

use std::io::{self, Write};

use crate::mixer::StereoOutput;

const SAMPLE_RATE: u32 = crate::SAMPLE_RATE;
const BITS_PER_SAMPLE: u16 = 16;
const CHANNELS: u16 = 2;

fn block_align() -> u16 {
    CHANNELS * (BITS_PER_SAMPLE / 8)
}

fn byte_rate() -> u32 {
    SAMPLE_RATE * block_align() as u32
}

/// Writes a complete stereo WAV file to `writer`.
pub fn write_wav<W: Write>(writer: &mut W, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&SAMPLE_RATE.to_le_bytes())?;
    writer.write_all(&byte_rate().to_le_bytes())?;
    writer.write_all(&block_align().to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a complete stereo WAV file to a fresh byte vector.
pub fn write_wav_to_vec(pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(44 + pcm_data.len());
    write_wav(&mut buffer, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts interleaved stereo `f32` samples (expected in `[-1.0, 1.0]`,
/// clipped otherwise) to little-endian 16-bit PCM bytes.
pub fn stereo_to_pcm16(left: &[f32], right: &[f32]) -> Vec<u8> {
    let len = left.len().min(right.len());
    let mut pcm = Vec::with_capacity(len * 4);

    for i in 0..len {
        let l = (left[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        let r = (right[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&l.to_le_bytes());
        pcm.extend_from_slice(&r.to_le_bytes());
    }

    pcm
}

/// BLAKE3 hash of the PCM data only (spec.md §7 testable-determinism
/// invariant), not the full WAV file, so the hash is unaffected by header
/// composition.
pub fn pcm_hash(left: &[f32], right: &[f32]) -> String {
    let pcm = stereo_to_pcm16(left, right);
    blake3::hash(&pcm).to_hex().to_string()
}

/// The finished artifact: WAV bytes plus its PCM hash and sample count.
#[derive(Debug)]
pub struct WavResult {
    pub wav_data: Vec<u8>,
    pub pcm_hash: String,
    pub num_samples: usize,
}

impl WavResult {
    pub fn from_stereo_output(stereo: &StereoOutput) -> Self {
        let pcm = stereo_to_pcm16(&stereo.left, &stereo.right);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&pcm);
        Self {
            wav_data,
            pcm_hash,
            num_samples: stereo.left.len().min(stereo.right.len()),
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / SAMPLE_RATE as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fields_match_fixed_format() {
        let wav = write_wav_to_vec(&stereo_to_pcm16(&[0.0; 10], &[0.0; 10]));
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        let channels = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(channels, 2);
        let sample_rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sample_rate, 44_100);
    }

    #[test]
    fn clips_out_of_range_samples() {
        let pcm = stereo_to_pcm16(&[2.0], &[-2.0]);
        let l = i16::from_le_bytes([pcm[0], pcm[1]]);
        let r = i16::from_le_bytes([pcm[2], pcm[3]]);
        assert_eq!(l, 32767);
        assert_eq!(r, -32767);
    }

    #[test]
    fn pcm_hash_is_deterministic_and_header_independent() {
        let left = vec![0.5, -0.5, 0.25];
        let right = vec![-0.5, 0.5, -0.25];
        let a = pcm_hash(&left, &right);
        let b = pcm_hash(&left, &right);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
