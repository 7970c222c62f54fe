//! Tunings, stringed instruments and fretboard locations.

use crate::math;
use crate::pitch::{PitchClass, SEMITONES_PER_OCTAVE};

/// The fret value denoting a muted/unused string.
pub const MUTED: i32 = -1;

/// MIDI number of the lowest open string of a standard-tuned guitar (E2).
pub const GUITAR_START_NOTE: i32 = 40;

/// MIDI number of the lowest open string of a standard-tuned bass (E1).
pub const BASS_START_NOTE: i32 = 28;

pub const STANDARD_FRET_COUNT: i32 = 22;

/// A named sequence of semitone offsets between a start note and the open strings,
/// applied cumulatively. The offset count equals the string count.
#[derive(Copy, Clone, Debug)]
pub struct Tuning {
    name: &'static str,
    intervals: &'static [i32],
}

impl Tuning {
    /// Creates a custom tuning; the catalog tunings are available via [`tunings`].
    ///
    /// # Panics
    ///
    /// Panics if `intervals` is empty.
    pub const fn new(name: &'static str, intervals: &'static [i32]) -> Self {
        assert!(!intervals.is_empty(), "Tuning must have at least one string");
        Self { name, intervals }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn intervals(&self) -> &'static [i32] {
        self.intervals
    }

    pub fn string_count(&self) -> usize {
        self.intervals.len()
    }
}

static TUNINGS: [Tuning; 16] = [
    tuning("Guitar Standard", &[0, 5, 5, 5, 4, 5]),
    tuning("D Modal", &[-2, 7, 5, 5, 2, 5]),
    tuning("Dropped D", &[-2, 7, 5, 5, 4, 5]),
    tuning("Dropped D & A", &[-2, 7, 5, 5, 2, 7]),
    tuning("Dropped semi-tone", &[-1, 5, 5, 5, 4, 5]),
    tuning("Dropped whole-tone", &[-2, 5, 5, 5, 4, 5]),
    tuning("G Modal", &[-2, 5, 7, 5, 5, 2]),
    tuning("Open C", &[-4, 7, 5, 7, 5, 4]),
    tuning("Open C II", &[0, 3, 5, 4, 8, 7]),
    tuning("Open D", &[-2, 7, 5, 4, 3, 5]),
    tuning("Open D Minor", &[-2, 7, 5, 3, 4, 5]),
    tuning("Open E", &[0, 7, 5, 4, 3, 5]),
    tuning("Open E Minor", &[0, 7, 5, 3, 4, 5]),
    tuning("Open Eb", &[-1, 5, 5, 5, 4, 5]),
    tuning("Open G", &[-2, 5, 7, 5, 4, 3]),
    tuning("Bass Standard", &[0, 5, 5, 5]),
];

const fn tuning(name: &'static str, intervals: &'static [i32]) -> Tuning {
    Tuning::new(name, intervals)
}

pub fn tunings() -> &'static [Tuning] {
    &TUNINGS
}

/// Looks up a tuning by its exact name. A miss is reported as `None` instead of falling
/// back to the first catalog entry.
pub fn tuning_by_name(name: &str) -> Option<&'static Tuning> {
    TUNINGS.iter().find(|tuning| tuning.name == name)
}

pub fn tunings_with_string_count(count: usize) -> impl Iterator<Item = &'static Tuning> {
    TUNINGS.iter().filter(move |tuning| tuning.string_count() == count)
}

/// A (string, fret) pair on a concrete instrument.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub string: usize,
    pub fret: i32,
}

/// A [`Tuning`] applied to a start note and fret range.
///
/// The per-string open pitches are derived once at construction; the value is immutable
/// afterwards and shared by every [`Fingering`](crate::fingering::Fingering) built on it.
#[derive(Clone, Debug)]
pub struct Instrument {
    tuning_name: &'static str,
    start_note: i32,
    fret_count: i32,
    open_pitches: Vec<i32>,
    open_pitch_classes: Vec<PitchClass>,
}

impl Instrument {
    /// Builds an instrument by running a cumulative sum over the tuning's intervals,
    /// starting at `start_note`.
    ///
    /// # Panics
    ///
    /// Panics if `fret_count` is not positive.
    pub fn new(start_note: i32, fret_count: i32, tuning: &'static Tuning) -> Self {
        assert!(fret_count > 0, "Fret count must be positive but was {fret_count}");

        let mut open_pitches = Vec::with_capacity(tuning.string_count());
        let mut pitch = start_note;
        for interval in tuning.intervals() {
            pitch += interval;
            open_pitches.push(pitch);
        }

        Self {
            tuning_name: tuning.name(),
            start_note,
            fret_count,
            open_pitch_classes: open_pitches
                .iter()
                .map(|&pitch| PitchClass::from_midi_number(pitch))
                .collect(),
            open_pitches,
        }
    }

    /// A 22-fret guitar in standard E-A-D-G-B-E tuning.
    pub fn guitar() -> Self {
        Self::new(
            GUITAR_START_NOTE,
            STANDARD_FRET_COUNT,
            tuning_by_name("Guitar Standard").expect("catalog entry"),
        )
    }

    /// A 22-fret bass in standard E-A-D-G tuning.
    pub fn bass() -> Self {
        Self::new(
            BASS_START_NOTE,
            STANDARD_FRET_COUNT,
            tuning_by_name("Bass Standard").expect("catalog entry"),
        )
    }

    pub fn tuning_name(&self) -> &'static str {
        self.tuning_name
    }

    pub fn start_note(&self) -> i32 {
        self.start_note
    }

    pub fn fret_count(&self) -> i32 {
        self.fret_count
    }

    pub fn string_count(&self) -> usize {
        self.open_pitches.len()
    }

    /// The absolute pitch of the given open string.
    pub fn open_pitch(&self, string: usize) -> i32 {
        self.open_pitches[string]
    }

    pub fn open_pitch_class(&self, string: usize) -> PitchClass {
        self.open_pitch_classes[string]
    }

    /// Note names of the open strings, lowest string first.
    pub fn open_names(&self) -> Vec<String> {
        self.open_pitch_classes.iter().map(ToString::to_string).collect()
    }

    /// The absolute pitch sounding at `fret` on `string`, or [`MUTED`] for a muted string.
    pub fn pitch_at(&self, string: usize, fret: i32) -> i32 {
        if fret == MUTED {
            MUTED
        } else {
            self.open_pitches[string] + fret
        }
    }

    /// Enumerates every location producing the target pitch class, ordered by ascending
    /// string index, then ascending fret. An empty result is valid: no string may reach
    /// the pitch class within the fret range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::instrument::{Instrument, Location};
    /// let guitar = Instrument::guitar();
    /// let locations = guitar.find_locations("C".parse().unwrap());
    /// assert_eq!(locations[0], Location { string: 0, fret: 8 });
    /// assert_eq!(locations[1], Location { string: 0, fret: 20 });
    /// ```
    pub fn find_locations(&self, target: PitchClass) -> Vec<Location> {
        let mut locations = Vec::new();
        for (string, open) in self.open_pitch_classes.iter().enumerate() {
            let offset = i32::from(target.semitone()) - i32::from(open.semitone());
            let mut fret = math::floor_div_mod(offset, SEMITONES_PER_OCTAVE).1 as i32;
            while fret < self.fret_count {
                locations.push(Location { string, fret });
                fret += SEMITONES_PER_OCTAVE as i32;
            }
        }
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn guitar_open_strings() {
        let guitar = Instrument::guitar();
        assert_eq!(guitar.string_count(), 6);
        assert_eq!(guitar.open_pitch(0), 40);
        assert_eq!(guitar.open_pitch(5), 64);
        assert_eq!(guitar.open_pitch_class(0).semitone(), 4);
        assert_eq!(guitar.open_names(), ["E", "A", "D", "G", "B", "E"]);
    }

    #[test]
    fn bass_open_strings() {
        let bass = Instrument::bass();
        assert_eq!(bass.string_count(), 4);
        assert_eq!(bass.open_names(), ["E", "A", "D", "G"]);
    }

    #[test]
    fn dropped_d_lowers_the_bottom_string() {
        let dropped = Instrument::new(
            GUITAR_START_NOTE,
            STANDARD_FRET_COUNT,
            tuning_by_name("Dropped D").unwrap(),
        );
        assert_eq!(dropped.open_pitch(0), 38);
        assert_eq!(dropped.open_names(), ["D", "A", "D", "G", "B", "E"]);
    }

    #[test]
    fn locations_agree_with_pitch_at() {
        let guitar = Instrument::guitar();
        for semitone in 0..12 {
            let target = PitchClass::from_semitone(semitone);
            let locations = guitar.find_locations(target);
            assert!(!locations.is_empty());
            for location in locations {
                assert!((0..guitar.fret_count()).contains(&location.fret));
                assert_eq!(
                    PitchClass::from_midi_number(guitar.pitch_at(location.string, location.fret)),
                    target
                );
            }
        }
    }

    #[test]
    fn locations_are_ordered_by_string_then_fret() {
        let guitar = Instrument::guitar();
        let locations = guitar.find_locations(PitchClass::from_semitone(0));
        let mut sorted = locations.clone();
        sorted.sort_by_key(|location| (location.string, location.fret));
        assert_eq!(locations, sorted);
    }

    #[test]
    fn tuning_catalog_lookup() {
        assert_eq!(tuning_by_name("Open G").unwrap().intervals(), [-2, 5, 7, 5, 4, 3]);
        assert!(tuning_by_name("Open H").is_none());
        assert_eq!(tunings_with_string_count(4).count(), 1);
        assert_eq!(tunings_with_string_count(6).count(), 15);
    }

    #[test]
    fn muted_strings_have_no_pitch() {
        let guitar = Instrument::guitar();
        assert_eq!(guitar.pitch_at(3, MUTED), MUTED);
        // String 3 is the open G (55).
        assert_eq!(guitar.pitch_at(3, 2), 57);
        assert_eq!(guitar.pitch_at(2, 2), 52);
    }
}
