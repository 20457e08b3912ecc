//! Music-theory helpers: scales, key roots, and Roman-numeral chords.

/// Named scale, used to pick a degree table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    NaturalMinor,
    Major,
    Dorian,
}

impl Scale {
    /// Looks up a scale by name, defaulting to natural minor for anything
    /// unrecognized (spec.md §4.4).
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "major" => Scale::Major,
            "dorian" => Scale::Dorian,
            _ => Scale::NaturalMinor,
        }
    }

    /// The scale's degree offsets in semitones from the root.
    pub fn degrees(&self) -> [i32; 7] {
        match self {
            Scale::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            Scale::Major => [0, 2, 4, 5, 7, 9, 11],
            Scale::Dorian => [0, 2, 3, 5, 7, 9, 10],
        }
    }
}

/// Root frequencies in Hz for the natural-note letters the key parser
/// recognizes (spec.md §4.4).
fn root_table(letter: char) -> f64 {
    match letter.to_ascii_uppercase() {
        'A' => 220.0,
        'C' => 261.63,
        'D' => 293.66,
        'F' => 349.23,
        'G' => 392.0,
        _ => 220.0,
    }
}

/// Parses a key string (e.g. `"D minor"`, `"F major"`) into a root
/// frequency and a scale, defaulting to A minor when the key doesn't start
/// with a recognized letter.
pub fn root_from_key(key: &str) -> (f64, Scale) {
    let letter = key.trim().chars().next().unwrap_or('A');
    let root = root_table(letter);
    let scale = if key.to_ascii_lowercase().contains("major") {
        Scale::Major
    } else if key.to_ascii_lowercase().contains("dorian") {
        Scale::Dorian
    } else {
        Scale::NaturalMinor
    };
    (root, scale)
}

/// Builds an 8-note scale (including the octave) as frequencies, from a
/// root frequency and a scale.
pub fn scale_frequencies(root: f64, scale: Scale) -> Vec<f64> {
    let degrees = scale.degrees();
    let mut freqs: Vec<f64> = degrees
        .iter()
        .map(|&semitones| root * 2f64.powf(semitones as f64 / 12.0))
        .collect();
    freqs.push(root * 2.0);
    freqs
}

/// Decodes a Roman numeral (`i`..`vii`, case-insensitive) to a zero-based
/// scale-degree index.
pub fn roman_to_degree(numeral: &str) -> usize {
    match numeral.to_ascii_lowercase().as_str() {
        "i" => 0,
        "ii" => 1,
        "iii" => 2,
        "iv" => 3,
        "v" => 4,
        "vi" => 5,
        "vii" => 6,
        _ => 0,
    }
}

/// Returns the three frequencies of a triad built from a Roman numeral
/// over a scale, wrapping octaves up so root < third < fifth (spec.md
/// §4.4).
pub fn roman_to_triad(numeral: &str, root: f64, scale: Scale) -> [f64; 3] {
    let degrees = scale.degrees();
    let len = degrees.len();
    let d = roman_to_degree(numeral);

    let pitch_for = |degree_index: usize| -> f64 {
        let octave = degree_index / len;
        let degree = degrees[degree_index % len];
        root * 2f64.powf((degree as f64 + 12.0 * octave as f64) / 12.0)
    };

    [pitch_for(d), pitch_for(d + 2), pitch_for(d + 4)]
}

/// Whether a key string denotes a minor key (case-insensitive substring
/// match, defaulting to minor when neither "major" nor "minor" appears).
pub fn is_minor_key(key: &str) -> bool {
    !key.to_ascii_lowercase().contains("major")
}

/// A four-chord triad progression built from the scale's default root
/// progression (spec.md §4.4): scale degrees `[0, 3, 1, 0]`, each expanded
/// to root + third + fifth, third interval 3 semitones (minor) or 4
/// (major).
pub fn chord_progression(root: f64, scale: Scale, minor: bool) -> Vec<[f64; 3]> {
    let degrees = scale.degrees();
    let len = degrees.len();
    let root_degrees = [0usize, 3, 1, 0];
    let third_semitones = if minor { 3.0 } else { 4.0 };

    root_degrees
        .iter()
        .map(|&idx| {
            let base = root * 2f64.powf(degrees[idx % len] as f64 / 12.0);
            let third = base * 2f64.powf(third_semitones / 12.0);
            let fifth = base * 2f64.powf(7.0 / 12.0);
            [base, third, fifth]
        })
        .collect()
}
