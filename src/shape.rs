//! Playability scoring of fret patterns.
//!
//! A fret pattern is normalized to a translation-invariant *shape* by shifting the
//! lowest fretted position down to 0, so a barred grip at the 5th fret compares equal to
//! the matching open-position grip. Shapes are scored against a fixed library of known
//! hand shapes.

use crate::instrument::MUTED;

/// Outcome of a playability comparison: the minimal distance to a known hand shape and
/// the number of fretted notes beyond that shape's minimal required set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlayabilityInfo {
    pub min_cost: u32,
    pub extras: u32,
}

/// Scores the physical difficulty of a fret pattern. Lower is easier.
///
/// The search consumes this as an oracle; substitute your own implementation to rank
/// fingerings by a different notion of difficulty.
pub trait Playability {
    fn score(&self, frets: &[i32]) -> PlayabilityInfo;
}

/// Shifts a fret pattern so its lowest fretted position becomes 0, keeping mutes.
///
/// # Examples
///
/// ```
/// # use fretboard::shape;
/// // A-form barre chord at the 3rd fret reduces to the open A-form shape.
/// assert_eq!(shape::normalize(&[-1, 3, 5, 5, 5, 3]), [-1, 0, 2, 2, 2, 0]);
/// assert_eq!(shape::normalize(&[-1, -1, -1, -1, -1, -1]), [-1; 6]);
/// ```
pub fn normalize(frets: &[i32]) -> Vec<i32> {
    let min_fret = frets.iter().copied().filter(|&fret| fret != MUTED).min();
    match min_fret {
        Some(min_fret) => frets
            .iter()
            .map(|&fret| if fret == MUTED { MUTED } else { fret - min_fret })
            .collect(),
        None => frets.to_vec(),
    }
}

/// The default [`Playability`] oracle: a fixed library of common hand shapes.
pub struct ShapeLibrary {
    shapes: &'static [&'static [i32]],
}

// Normalized grips a practiced player lands without thinking: the open-position forms
// (which double as barre forms after normalization) plus a few partial voicings.
static KNOWN_SHAPES: [&[i32]; 17] = [
    // Six-string forms
    &[0, 2, 2, 1, 0, 0],    // E form
    &[0, 2, 2, 0, 0, 0],    // E minor form
    &[0, 2, 0, 1, 0, 0],    // E7 form
    &[MUTED, 0, 2, 2, 2, 0],    // A form
    &[MUTED, 0, 2, 2, 1, 0],    // A minor form
    &[MUTED, 0, 2, 0, 2, 0],    // A7 form
    &[MUTED, 3, 2, 0, 1, 0],    // C form
    &[3, 2, 0, 0, 0, 3],    // G form
    &[MUTED, MUTED, 0, 2, 3, 2],    // D form
    &[MUTED, MUTED, 0, 2, 3, 1],    // D minor form
    &[0, 2, 2, MUTED, MUTED, MUTED],    // power chord
    &[MUTED, 0, 2, 2, MUTED, MUTED],    // power chord, A string
    &[MUTED, MUTED, 0, 2, 2, 2],    // A-form triad on the treble strings
    // Four-string forms
    &[0, 2, 2, 0],
    &[MUTED, 0, 2, 2],
    &[0, 2, MUTED, MUTED],
    &[0, 2, 2, 2],
];

impl ShapeLibrary {
    fn distance(shape: &[i32], known: &[i32]) -> u32 {
        shape
            .iter()
            .zip(known)
            .map(|(&ours, &theirs)| match (ours == MUTED, theirs == MUTED) {
                (true, true) => 0,
                (true, false) | (false, true) => 2,
                (false, false) => ours.abs_diff(theirs),
            })
            .sum()
    }

    fn fretted_count(shape: &[i32]) -> u32 {
        shape.iter().filter(|&&fret| fret > 0).count() as u32
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self {
            shapes: &KNOWN_SHAPES,
        }
    }
}

impl Playability for ShapeLibrary {
    /// ```
    /// # use fretboard::shape::{Playability, ShapeLibrary};
    /// let library = ShapeLibrary::default();
    /// // An exact E-form barre chord has zero cost at any position.
    /// assert_eq!(library.score(&[0, 2, 2, 1, 0, 0]).min_cost, 0);
    /// assert_eq!(library.score(&[5, 7, 7, 6, 5, 5]).min_cost, 0);
    /// ```
    fn score(&self, frets: &[i32]) -> PlayabilityInfo {
        let shape = normalize(frets);
        self.shapes
            .iter()
            .filter(|known| known.len() == shape.len())
            .map(|known| PlayabilityInfo {
                min_cost: Self::distance(&shape, known),
                extras: Self::fretted_count(&shape).saturating_sub(Self::fretted_count(known)),
            })
            .min_by_key(|info| info.min_cost)
            .unwrap_or_else(|| PlayabilityInfo {
                // No known shape of this string count. Fall back to a spread penalty so
                // compact patterns still rank first.
                min_cost: shape.iter().filter(|&&fret| fret != MUTED).sum::<i32>() as u32,
                extras: 0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scoring_is_translation_invariant() {
        let library = ShapeLibrary::default();
        let open = library.score(&[MUTED, 0, 2, 2, 1, 0]);
        let barred = library.score(&[MUTED, 7, 9, 9, 8, 7]);
        assert_eq!(open, barred);
        assert_eq!(open.min_cost, 0);
    }

    #[test]
    fn near_misses_cost_more_than_exact_matches() {
        let library = ShapeLibrary::default();
        let exact = library.score(&[MUTED, MUTED, 0, 2, 3, 2]);
        let off_by_one = library.score(&[MUTED, MUTED, 0, 2, 3, 3]);
        assert_eq!(exact.min_cost, 0);
        assert!(off_by_one.min_cost > exact.min_cost);
    }

    #[test]
    fn extras_count_additional_fretted_notes() {
        let library = ShapeLibrary::default();
        // Power chord plus one fretted note beyond the matched shape.
        let info = library.score(&[0, 2, 2, MUTED, MUTED, 2]);
        assert!(info.extras >= 1);
    }

    #[test]
    fn bass_patterns_use_four_string_shapes() {
        let library = ShapeLibrary::default();
        assert_eq!(library.score(&[0, 2, 2, 0]).min_cost, 0);
        assert_eq!(library.score(&[5, 7, 7, 5]).min_cost, 0);
    }
}
