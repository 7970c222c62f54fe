use crate::math;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

pub const SEMITONES_PER_OCTAVE: u32 = 12;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A note identity with the octave factored out.
///
/// The contained semitone residue is always in the range `[0, 12)` with 0&nbsp;=&nbsp;C and
/// 11&nbsp;=&nbsp;B. Absolute pitches, in contrast, are plain MIDI-style semitone numbers
/// (`i32`) throughout this crate.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PitchClass {
    semitone: u8,
}

impl PitchClass {
    /// Reduces an arbitrary semitone offset to its pitch class.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::pitch::PitchClass;
    /// assert_eq!(PitchClass::from_semitone(0).semitone(), 0);
    /// assert_eq!(PitchClass::from_semitone(19).semitone(), 7);
    /// assert_eq!(PitchClass::from_semitone(-1).semitone(), 11);
    /// ```
    pub fn from_semitone(semitone: i32) -> Self {
        Self {
            semitone: math::floor_div_mod(semitone, SEMITONES_PER_OCTAVE).1 as u8,
        }
    }

    /// Retrieves the pitch class of a MIDI note number, e.g. 4&nbsp;(E) for the low string
    /// of a standard-tuned guitar (MIDI number 40).
    pub fn from_midi_number(midi_number: i32) -> Self {
        Self::from_semitone(midi_number)
    }

    pub fn semitone(self) -> u8 {
        self.semitone
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.semitone)
    }
}

impl Display for PitchClass {
    /// ```
    /// # use fretboard::pitch::PitchClass;
    /// assert_eq!(PitchClass::from_semitone(0).to_string(), "C");
    /// assert_eq!(PitchClass::from_semitone(6).to_string(), "F#");
    /// assert_eq!(PitchClass::from_semitone(11).to_string(), "B");
    /// ```
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(NOTE_NAMES[self.as_usize()])
    }
}

impl FromStr for PitchClass {
    type Err = String;

    /// ```
    /// # use fretboard::pitch::PitchClass;
    /// assert_eq!("C".parse::<PitchClass>(), Ok(PitchClass::from_semitone(0)));
    /// assert_eq!("f#".parse::<PitchClass>(), Ok(PitchClass::from_semitone(6)));
    /// assert_eq!("Eb".parse::<PitchClass>(), Ok(PitchClass::from_semitone(3)));
    /// assert_eq!("Cb".parse::<PitchClass>(), Ok(PitchClass::from_semitone(11)));
    /// assert!("H".parse::<PitchClass>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| "Note name must not be empty".to_string())?;
        let natural = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            other => return Err(format!("Invalid note letter '{other}'")),
        };
        let alteration = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "b" => -1,
            other => return Err(format!("Invalid alteration '{other}'")),
        };
        Ok(PitchClass::from_semitone(natural + alteration))
    }
}
