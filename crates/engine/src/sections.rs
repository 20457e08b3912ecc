//! The section -> instrumentation map and bar counts (spec.md §6).

/// Instruments (plus the two "light" variants) a section can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Drums,
    LightDrums,
    Bass,
    Pad,
    Lead,
    LightLead,
}

/// A section's instrumentation and bar count.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: String,
    pub bars: u32,
    pub instruments: Vec<Instrument>,
}

/// Returns the fixed `SECTION_INSTRUMENTS`/`SECTION_DURATIONS` entry for a
/// section name, or `None` for an unrecognized name (callers should treat
/// an unknown section as contributing zero bars and no instruments).
pub fn section_spec(name: &str) -> Option<SectionSpec> {
    use Instrument::*;
    let (bars, instruments): (u32, Vec<Instrument>) = match name {
        "intro" => (4, vec![Pad, LightDrums]),
        "verse" => (8, vec![Drums, Bass, Pad]),
        "pre_chorus" => (4, vec![Drums, Bass, Pad, LightLead]),
        "chorus" => (8, vec![Drums, Bass, Pad, Lead]),
        "drop" => (8, vec![Drums, Bass, Lead]),
        "bridge" => (4, vec![Pad, LightDrums]),
        "outro" => (4, vec![Pad, LightDrums]),
        "loop" => (16, vec![Drums, Bass, Pad]),
        "hook" => (4, vec![Drums, Bass, Pad, Lead]),
        "build" => (4, vec![Drums, Bass, LightLead]),
        _ => return None,
    };
    Some(SectionSpec {
        name: name.to_string(),
        bars,
        instruments,
    })
}

/// Sums `section_spec(name).bars` over a structure, treating unrecognized
/// section names as contributing zero bars.
pub fn total_bars(structure: &[String]) -> u32 {
    structure
        .iter()
        .filter_map(|s| section_spec(s))
        .map(|s| s.bars)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_map_matches_spec_bar_counts() {
        assert_eq!(section_spec("intro").unwrap().bars, 4);
        assert_eq!(section_spec("verse").unwrap().bars, 8);
        assert_eq!(section_spec("pre_chorus").unwrap().bars, 4);
        assert_eq!(section_spec("chorus").unwrap().bars, 8);
        assert_eq!(section_spec("drop").unwrap().bars, 8);
        assert_eq!(section_spec("bridge").unwrap().bars, 4);
        assert_eq!(section_spec("outro").unwrap().bars, 4);
        assert_eq!(section_spec("loop").unwrap().bars, 16);
    }

    #[test]
    fn unknown_section_is_none() {
        assert!(section_spec("nonexistent").is_none());
    }

    #[test]
    fn total_bars_sums_default_structure() {
        let structure: Vec<String> = ["intro", "verse", "chorus", "verse", "chorus", "outro"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(total_bars(&structure), 4 + 8 + 8 + 8 + 8 + 4);
    }
}
