//! Immutable fingering values produced by the search.

use crate::instrument::{Instrument, MUTED};
use crate::pitch::PitchClass;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// An assignment of a fret (or mute) to every string of an instrument.
///
/// Fingerings are immutable values: [`with_note`](Self::with_note) produces a new value
/// instead of aliasing a shared fret array, so candidates never corrupt each other during
/// the branching search. The playability score, extras count and inversion label are
/// filled in by the search before a fingering is returned; a returned fingering is frozen.
#[derive(Clone, Debug)]
pub struct Fingering<'a> {
    instrument: &'a Instrument,
    frets: Vec<i32>,
    playability: u32,
    extras: u32,
    inversion: Option<u8>,
}

impl<'a> Fingering<'a> {
    /// A fingering with every string muted.
    pub fn muted(instrument: &'a Instrument) -> Self {
        Self {
            instrument,
            frets: vec![MUTED; instrument.string_count()],
            playability: 0,
            extras: 0,
            inversion: None,
        }
    }

    /// Returns a copy of `self` with `fret` assigned to `string`.
    pub fn with_note(&self, string: usize, fret: i32) -> Self {
        let mut next = self.clone();
        next.frets[string] = fret;
        next
    }

    pub(crate) fn scored(mut self, playability: u32, extras: u32) -> Self {
        self.playability = playability;
        self.extras = extras;
        self
    }

    pub(crate) fn labeled(mut self, inversion: Option<u8>) -> Self {
        self.inversion = inversion;
        self
    }

    pub fn instrument(&self) -> &'a Instrument {
        self.instrument
    }

    /// The per-string fret assignments, [`MUTED`] for unused strings.
    pub fn frets(&self) -> &[i32] {
        &self.frets
    }

    pub fn playability(&self) -> u32 {
        self.playability
    }

    pub fn extras(&self) -> u32 {
        self.extras
    }

    /// 1-based position of the lowest sounding tone within the chord formula, if the
    /// lowest sounding pitch class is part of the chord at all.
    pub fn inversion(&self) -> Option<u8> {
        self.inversion
    }

    pub fn has_note(&self, string: usize) -> bool {
        self.frets[string] != MUTED
    }

    /// Number of sounding (non-muted) strings.
    pub fn sounding_count(&self) -> usize {
        self.frets.iter().filter(|&&fret| fret != MUTED).count()
    }

    /// The highest fretted position. Muted strings never win since [`MUTED`] is below
    /// every valid fret.
    pub fn max_fret(&self) -> i32 {
        self.frets.iter().copied().max().unwrap_or(MUTED)
    }

    /// The lowest fretted position, `None` if every string is muted.
    pub fn min_fret(&self) -> Option<i32> {
        self.frets.iter().copied().filter(|&fret| fret != MUTED).min()
    }

    /// The per-string absolute-pitch signature, muted strings included. Two fingerings
    /// with equal signatures sound identical and are collapsed by the search.
    pub fn pitches(&self) -> Vec<i32> {
        self.frets
            .iter()
            .enumerate()
            .map(|(string, &fret)| self.instrument.pitch_at(string, fret))
            .collect()
    }

    /// The pitch class of the lowest sounding note, `None` if every string is muted.
    pub fn lowest_pitch_class(&self) -> Option<PitchClass> {
        self.pitches()
            .into_iter()
            .filter(|&pitch| pitch != MUTED)
            .min()
            .map(PitchClass::from_midi_number)
    }

    /// Whether `self` fully covers `other`: on every string, `other` is either muted or
    /// frets the exact position `self` does.
    pub fn covers(&self, other: &Fingering<'_>) -> bool {
        self.frets
            .iter()
            .zip(&other.frets)
            .all(|(mine, theirs)| *theirs == MUTED || theirs == mine)
    }
}

impl Display for Fingering<'_> {
    /// Space-joined fret pattern with `x` marking muted strings, e.g. `x 3 2 0 1 0`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut separate = false;
        for &fret in &self.frets {
            if separate {
                write!(f, " ")?;
            }
            separate = true;
            if fret == MUTED {
                write!(f, "x")?;
            } else {
                write!(f, "{fret}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fingering<'a>(instrument: &'a Instrument, frets: &[i32]) -> Fingering<'a> {
        frets
            .iter()
            .enumerate()
            .filter(|(_, &fret)| fret != MUTED)
            .fold(Fingering::muted(instrument), |fingering, (string, &fret)| {
                fingering.with_note(string, fret)
            })
    }

    #[test]
    fn with_note_leaves_the_source_untouched() {
        let guitar = Instrument::guitar();
        let partial = Fingering::muted(&guitar).with_note(0, 3);
        let extended = partial.with_note(1, 5);

        assert_eq!(partial.frets(), [3, MUTED, MUTED, MUTED, MUTED, MUTED]);
        assert_eq!(extended.frets(), [3, 5, MUTED, MUTED, MUTED, MUTED]);
    }

    #[test]
    fn span_and_count_helpers() {
        let guitar = Instrument::guitar();
        let c_major = fingering(&guitar, &[MUTED, 3, 2, 0, 1, 0]);

        assert_eq!(c_major.sounding_count(), 5);
        assert_eq!(c_major.max_fret(), 3);
        assert_eq!(c_major.min_fret(), Some(0));
        assert_eq!(Fingering::muted(&guitar).min_fret(), None);
    }

    #[test]
    fn pitch_signature_and_lowest_pitch_class() {
        let guitar = Instrument::guitar();
        let c_major = fingering(&guitar, &[MUTED, 3, 2, 0, 1, 0]);

        assert_eq!(c_major.pitches(), [MUTED, 48, 52, 55, 60, 64]);
        // The lowest sounding note is C3 on the A string.
        assert_eq!(c_major.lowest_pitch_class(), Some(PitchClass::from_semitone(0)));
    }

    #[test]
    fn coverage_is_per_string_subsumption() {
        let guitar = Instrument::guitar();
        let full = fingering(&guitar, &[MUTED, 3, 2, 0, 1, 0]);
        let partial = fingering(&guitar, &[MUTED, 3, 2, 0, MUTED, MUTED]);
        let conflicting = fingering(&guitar, &[MUTED, 3, 2, 1, MUTED, MUTED]);

        assert!(full.covers(&partial));
        assert!(!partial.covers(&full));
        assert!(!full.covers(&conflicting));
        assert!(full.covers(&full));
    }

    #[test]
    fn display_marks_muted_strings() {
        let guitar = Instrument::guitar();
        assert_eq!(fingering(&guitar, &[MUTED, 3, 2, 0, 1, 0]).to_string(), "x 3 2 0 1 0");
    }
}
