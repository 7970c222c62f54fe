//! Chord formulas and their resolution to concrete pitch classes.

use crate::pitch::PitchClass;
use crate::scale;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// A single element of a chord formula: a 1-based scale degree plus an accidental offset.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tone {
    degree: u8,
    accidental: i8,
}

impl Tone {
    pub fn degree(self) -> u8 {
        self.degree
    }

    pub fn accidental(self) -> i8 {
        self.accidental
    }

    /// Resolves the tone against a root pitch class using the scale-degree table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::chord::Tone;
    /// # use fretboard::pitch::PitchClass;
    /// let c = PitchClass::from_semitone(0);
    /// assert_eq!("5".parse::<Tone>().unwrap().resolve(c).semitone(), 7);
    /// assert_eq!("3b".parse::<Tone>().unwrap().resolve(c).semitone(), 3);
    /// assert_eq!("7bb".parse::<Tone>().unwrap().resolve(c).semitone(), 9);
    /// ```
    pub fn resolve(self, root: PitchClass) -> PitchClass {
        PitchClass::from_semitone(
            scale::degree_semitones(root, self.degree) + i32::from(self.accidental),
        )
    }
}

impl FromStr for Tone {
    type Err = String;

    /// ```
    /// # use fretboard::chord::Tone;
    /// let tone: Tone = "7b".parse().unwrap();
    /// assert_eq!((tone.degree(), tone.accidental()), (7, -1));
    ///
    /// assert!("".parse::<Tone>().is_err());
    /// assert!("b7".parse::<Tone>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        if digits_end == 0 {
            return Err(format!("Tone '{s}' must start with a scale degree"));
        }
        let degree: u8 = s[..digits_end]
            .parse()
            .map_err(|_| format!("Invalid scale degree '{}'", &s[..digits_end]))?;
        if !(1..=scale::MAX_DEGREE).contains(&degree) {
            return Err(format!(
                "Scale degree must be in 1..={} but was {degree}",
                scale::MAX_DEGREE
            ));
        }
        let accidental = match &s[digits_end..] {
            "" => 0,
            "#" => 1,
            "##" => 2,
            "b" => -1,
            "bb" => -2,
            other => return Err(format!("Invalid accidental '{other}'")),
        };
        Ok(Tone { degree, accidental })
    }
}

impl Display for Tone {
    /// ```
    /// # use fretboard::chord::Tone;
    /// assert_eq!("9#".parse::<Tone>().unwrap().to_string(), "9#");
    /// ```
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let marker = match self.accidental {
            -2 => "bb",
            -1 => "b",
            0 => "",
            1 => "#",
            2 => "##",
            other => unreachable!("accidental was {}", other),
        };
        write!(f, "{}{}", self.degree, marker)
    }
}

/// A named chord formula, immutable and drawn from the static [`chords`] catalog.
#[derive(Copy, Clone, Debug)]
pub struct ChordSpelling {
    name: &'static str,
    aliases: &'static [&'static str],
    tones: &'static [Tone],
}

impl ChordSpelling {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn tones(&self) -> &'static [Tone] {
        self.tones
    }

    /// Resolves every tone of the formula, in formula order, against `root`.
    ///
    /// Repeated pitch classes are preserved: a formula whose tones resolve to the same
    /// pitch class twice yields a repeated entry. This is intentional catalog data, not
    /// something to deduplicate here.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::chord;
    /// # use fretboard::pitch::PitchClass;
    /// let minor = chord::chord_by_name("Min.").unwrap();
    /// let pitch_classes: Vec<_> = minor
    ///     .pitch_classes(PitchClass::from_semitone(0))
    ///     .iter()
    ///     .map(|pc| pc.semitone())
    ///     .collect();
    /// assert_eq!(pitch_classes, [0, 3, 7]);
    /// ```
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.tones.iter().map(|tone| tone.resolve(root)).collect()
    }

    /// Maps each sounding pitch class to the 1-based position of its tone within the
    /// formula. If two tones resolve to the same pitch class, the later position wins.
    pub fn inversion_map(&self, root: PitchClass) -> [Option<u8>; 12] {
        let mut map = [None; 12];
        for (position, pitch_class) in self.pitch_classes(root).into_iter().enumerate() {
            map[pitch_class.as_usize()] = Some(position as u8 + 1);
        }
        map
    }
}

const fn tone(degree: u8, accidental: i8) -> Tone {
    Tone { degree, accidental }
}

const fn spelling(
    name: &'static str,
    aliases: &'static [&'static str],
    tones: &'static [Tone],
) -> ChordSpelling {
    assert!(!tones.is_empty(), "Chord formula must be non-empty");
    ChordSpelling { name, aliases, tones }
}

// The empty alias of "Maj." makes a bare note name parse as a major chord.
static CHORDS: [ChordSpelling; 51] = [
    spelling("Maj.", &["", "maj"], &[tone(1, 0), tone(3, 0), tone(5, 0)]),
    spelling(
        "11th",
        &["11"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, 0), tone(11, 0)],
    ),
    spelling(
        "11th-9",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, -1), tone(11, 0)],
    ),
    spelling(
        "13th",
        &["13"],
        &[
            tone(1, 0),
            tone(3, 0),
            tone(5, 0),
            tone(7, -1),
            tone(9, 0),
            tone(11, 0),
            tone(13, 0),
        ],
    ),
    spelling(
        "13th no 5th",
        &[],
        &[tone(1, 0), tone(3, 0), tone(7, -1), tone(9, 0), tone(11, 0), tone(13, 0)],
    ),
    spelling("6th", &["6"], &[tone(1, 0), tone(3, 0), tone(5, 0), tone(6, 0)]),
    spelling(
        "6th-7",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(6, 0), tone(7, -1)],
    ),
    spelling(
        "6th-7 Sus.",
        &[],
        &[tone(1, 0), tone(4, 0), tone(5, 0), tone(6, 0), tone(7, -1)],
    ),
    spelling("7th", &["7"], &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1)]),
    spelling(
        "7th-9+5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 1), tone(7, -1), tone(9, -1)],
    ),
    spelling(
        "7th+11",
        &["7+11"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, 0), tone(11, 1)],
    ),
    spelling("7th+5", &["7+5"], &[tone(1, 0), tone(3, 0), tone(5, 1), tone(7, -1)]),
    spelling(
        "7th+9",
        &["7+9"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, 1)],
    ),
    spelling(
        "7th+9+5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 1), tone(7, -1), tone(9, 1)],
    ),
    spelling(
        "7th+9-5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, -1), tone(7, -1), tone(9, 1)],
    ),
    spelling("7th-5", &["7-5"], &[tone(1, 0), tone(3, 0), tone(5, -1), tone(7, -1)]),
    spelling(
        "7th-9",
        &["7-9"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, -1)],
    ),
    spelling(
        "7th-9-5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, -1), tone(7, -1), tone(9, -1)],
    ),
    spelling(
        "7th Sus. 4",
        &["7sus4"],
        &[tone(1, 0), tone(4, 0), tone(5, 0), tone(7, -1)],
    ),
    spelling(
        "7th-11",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(11, 0)],
    ),
    spelling(
        "9th",
        &["9"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, -1), tone(9, 0)],
    ),
    spelling(
        "9th+5",
        &["9+5"],
        &[tone(1, 0), tone(3, 0), tone(5, 1), tone(7, -1), tone(9, 0)],
    ),
    spelling(
        "9th-5",
        &["9-5"],
        &[tone(1, 0), tone(3, 0), tone(5, -1), tone(7, -1), tone(9, 0)],
    ),
    spelling("Add +11", &[], &[tone(1, 0), tone(3, 0), tone(5, 0), tone(11, 1)]),
    spelling("Add 9", &["add9"], &[tone(1, 0), tone(3, 0), tone(5, 0), tone(9, 0)]),
    spelling("Aug.", &["aug"], &[tone(1, 0), tone(3, 0), tone(5, 1)]),
    spelling("Dim.", &["dim"], &[tone(1, 0), tone(3, -1), tone(5, -1)]),
    spelling(
        "Dim. 7th",
        &["dim7", "7dim"],
        &[tone(1, 0), tone(3, -1), tone(5, -1), tone(7, -2)],
    ),
    spelling(
        "Maj. 6 add 9",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(6, 0), tone(9, 0)],
    ),
    spelling(
        "Maj. 7th",
        &["maj7", "7maj"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, 0)],
    ),
    spelling(
        "Maj. 7th+11",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, 0), tone(11, 1)],
    ),
    spelling(
        "Maj. 7th+5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 1), tone(7, 0)],
    ),
    spelling(
        "Maj. 7th-5",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, -1), tone(7, 0)],
    ),
    spelling(
        "Maj. 9th",
        &["maj9", "9maj"],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, 0), tone(9, 0)],
    ),
    spelling(
        "Maj. 9th+11",
        &[],
        &[tone(1, 0), tone(3, 0), tone(5, 0), tone(7, 0), tone(9, 0), tone(11, 1)],
    ),
    spelling(
        "Maj.-Min. 7th",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, 0)],
    ),
    spelling("Min.", &["m", "min"], &[tone(1, 0), tone(3, -1), tone(5, 0)]),
    spelling(
        "Min. 11th",
        &["maj11"],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, -1), tone(9, 0), tone(11, 0)],
    ),
    spelling(
        "Min. 6th",
        &["maj6"],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(6, 0)],
    ),
    spelling(
        "Min. 6th Add 9",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(6, 0), tone(9, 0)],
    ),
    spelling(
        "Min. 6th-7",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(6, 0), tone(7, -1)],
    ),
    spelling(
        "Min. 6th-7-11",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(6, 0), tone(7, -1), tone(11, 0)],
    ),
    spelling(
        "Min. 7th",
        &["maj7"],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, -1)],
    ),
    spelling(
        "Min. 7th-5",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, -1), tone(7, -1)],
    ),
    spelling(
        "Min. 7th-9",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, -1), tone(9, -1)],
    ),
    spelling(
        "Min. 7th-11",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, -1), tone(11, 0)],
    ),
    spelling(
        "Min. 9th",
        &["maj9"],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, -1), tone(9, 0)],
    ),
    spelling(
        "Min. 9th-5",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, -1), tone(7, -1), tone(9, 0)],
    ),
    spelling(
        "Min. Add 9",
        &["min+9"],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(9, 0)],
    ),
    spelling(
        "Min.-Maj. 9th",
        &[],
        &[tone(1, 0), tone(3, -1), tone(5, 0), tone(7, 0), tone(9, 0)],
    ),
    spelling("Sus. 4", &["sus4"], &[tone(1, 0), tone(4, 0), tone(5, 0)]),
];

pub fn chords() -> &'static [ChordSpelling] {
    &CHORDS
}

/// Looks up a chord spelling by its exact display name, e.g. `"Maj. 7th"`.
///
/// A miss is reported as `None` instead of falling back to a default entry, which would
/// mask typos.
pub fn chord_by_name(name: &str) -> Option<&'static ChordSpelling> {
    CHORDS.iter().find(|spelling| spelling.name == name)
}

/// Looks up a chord spelling by one of its aliases, e.g. `"m7"` is not in the catalog
/// but `"maj7"` resolves to "Maj. 7th" (the first catalog entry carrying that alias).
pub fn chord_by_alias(alias: &str) -> Option<&'static ChordSpelling> {
    CHORDS
        .iter()
        .find(|spelling| spelling.aliases.contains(&alias))
}

/// Splits a chord symbol like `"F#m7"` into its root pitch class and the aliased
/// spelling. A bare note name yields the major chord via the empty alias.
///
/// # Examples
///
/// ```
/// # use fretboard::chord;
/// let (root, spelling) = chord::parse_chord_symbol("F#m").unwrap();
/// assert_eq!(root.semitone(), 6);
/// assert_eq!(spelling.name(), "Min.");
///
/// let (root, spelling) = chord::parse_chord_symbol("Eb").unwrap();
/// assert_eq!(root.semitone(), 3);
/// assert_eq!(spelling.name(), "Maj.");
/// ```
pub fn parse_chord_symbol(symbol: &str) -> Result<(PitchClass, &'static ChordSpelling), String> {
    if !symbol.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(format!("Chord symbol '{symbol}' must start with a note name"));
    }
    let root_len = match symbol.get(1..2) {
        Some("#") | Some("b") => 2,
        _ => 1,
    };
    let root = symbol[..root_len].parse()?;
    let alias = &symbol[root_len..];
    let spelling =
        chord_by_alias(alias).ok_or_else(|| format!("Unknown chord alias '{alias}'"))?;
    Ok((root, spelling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn semitones(spelling: &ChordSpelling, root: i32) -> Vec<u8> {
        spelling
            .pitch_classes(PitchClass::from_semitone(root))
            .iter()
            .map(|pc| pc.semitone())
            .collect()
    }

    #[test]
    fn spellings_resolve_to_expected_pitch_classes() {
        assert_eq!(semitones(chord_by_name("Maj.").unwrap(), 0), [0, 4, 7]);
        assert_eq!(semitones(chord_by_name("Min.").unwrap(), 0), [0, 3, 7]);
        assert_eq!(semitones(chord_by_name("7th").unwrap(), 0), [0, 4, 7, 10]);
        assert_eq!(semitones(chord_by_name("Dim. 7th").unwrap(), 0), [0, 3, 6, 9]);
        // Transposition: G7 contains the same intervals above G.
        assert_eq!(semitones(chord_by_name("7th").unwrap(), 7), [7, 11, 2, 5]);
    }

    #[test]
    fn inversion_map_positions_are_one_based_and_bounded() {
        let thirteenth = chord_by_name("13th").unwrap();
        let root = PitchClass::from_semitone(0);

        let map = thirteenth.inversion_map(root);
        let distinct: std::collections::HashSet<_> =
            thirteenth.pitch_classes(root).into_iter().collect();
        assert_eq!(map.iter().filter(|entry| entry.is_some()).count(), distinct.len());
        assert_eq!(map[0], Some(1));
        assert_eq!(map[4], Some(2));
    }

    #[test]
    fn inversion_map_last_write_wins_on_repeats() {
        // Degrees 1 and 8 are an octave apart and resolve to the same pitch class.
        static OCTAVE_TONES: [Tone; 4] = [tone(1, 0), tone(3, 0), tone(5, 0), tone(8, 0)];
        let octave_doubled = spelling("Octave", &[], &OCTAVE_TONES);
        let root = PitchClass::from_semitone(0);

        assert_eq!(semitones(&octave_doubled, 0), [0, 4, 7, 0]);
        assert_eq!(octave_doubled.inversion_map(root)[0], Some(4));
    }

    #[test]
    fn alias_lookup_prefers_earlier_catalog_entries() {
        // "maj7" is carried by both "Maj. 7th" and "Min. 7th" in the source data.
        assert_eq!(chord_by_alias("maj7").unwrap().name(), "Maj. 7th");
        assert_eq!(chord_by_alias("").unwrap().name(), "Maj.");
        assert!(chord_by_alias("nope").is_none());
    }

    #[test]
    fn chord_symbols_with_alterations() {
        let (root, spelling) = parse_chord_symbol("Bbdim7").unwrap();
        assert_eq!(root.semitone(), 10);
        assert_eq!(spelling.name(), "Dim. 7th");

        assert!(parse_chord_symbol("").is_err());
        assert!(parse_chord_symbol("7th").is_err());
        assert!(parse_chord_symbol("Cxyz").is_err());
    }
}
