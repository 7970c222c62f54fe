//! Scale-degree arithmetic and the catalog of named interval scales.

use crate::pitch::PitchClass;

/// Semitone steps of the diatonic major scale (whole/whole/half/whole/whole/whole/half).
pub const DIATONIC_STEPS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Largest scale degree the degree table can resolve, covering a 13th plus an octave.
pub const MAX_DEGREE: u8 = 16;

/// `DEGREE_TABLE[root][degree - 1]` is the mod-free semitone offset of the given 1-based
/// scale degree above C, starting the diatonic step pattern at `root`. The values are
/// reduced to a pitch class only on lookup.
static DEGREE_TABLE: [[i32; MAX_DEGREE as usize]; 12] = build_degree_table();

const fn build_degree_table() -> [[i32; MAX_DEGREE as usize]; 12] {
    let mut table = [[0; MAX_DEGREE as usize]; 12];
    let mut root = 0;
    while root < table.len() {
        let mut semitones = root as i32;
        table[root][0] = semitones;
        let mut degree = 1;
        while degree < MAX_DEGREE as usize {
            semitones += DIATONIC_STEPS[(degree - 1) % DIATONIC_STEPS.len()] as i32;
            table[root][degree] = semitones;
            degree += 1;
        }
        root += 1;
    }
    table
}

/// Returns the mod-free semitone offset of the 1-based scale `degree` of the major scale
/// rooted at `root`.
///
/// # Panics
///
/// Panics if `degree` is 0 or larger than [`MAX_DEGREE`].
///
/// # Examples
///
/// ```
/// # use fretboard::pitch::PitchClass;
/// # use fretboard::scale;
/// let c = PitchClass::from_semitone(0);
/// assert_eq!(scale::degree_semitones(c, 1), 0);
/// assert_eq!(scale::degree_semitones(c, 5), 7);
/// assert_eq!(scale::degree_semitones(c, 8), 12);
/// assert_eq!(scale::degree_semitones(c, 13), 21);
/// ```
pub fn degree_semitones(root: PitchClass, degree: u8) -> i32 {
    assert!(
        (1..=MAX_DEGREE).contains(&degree),
        "Scale degree must be in 1..={} but was {}",
        MAX_DEGREE,
        degree
    );
    DEGREE_TABLE[root.as_usize()][usize::from(degree) - 1]
}

/// A named sequence of semitone intervals, e.g. the Dorian mode.
#[derive(Copy, Clone, Debug)]
pub struct Scale {
    name: &'static str,
    intervals: &'static [u8],
}

impl Scale {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn intervals(&self) -> &'static [u8] {
        self.intervals
    }

    /// Unfolds the interval pattern into the contained pitch classes, starting at `root`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::pitch::PitchClass;
    /// # use fretboard::scale;
    /// let scale = scale::scale_by_name("Pentatonic").unwrap();
    /// let pitch_classes: Vec<_> = scale
    ///     .pitch_classes(PitchClass::from_semitone(0))
    ///     .map(|pc| pc.semitone())
    ///     .collect();
    /// assert_eq!(pitch_classes, [0, 2, 4, 7, 9]);
    /// ```
    pub fn pitch_classes(&self, root: PitchClass) -> impl Iterator<Item = PitchClass> + '_ {
        self.intervals.iter().scan(i32::from(root.semitone()), |semitones, interval| {
            let current = *semitones;
            *semitones += i32::from(*interval);
            Some(PitchClass::from_semitone(current))
        })
    }
}

static SCALES: [Scale; 20] = [
    scale("Ionian (major)", &[2, 2, 1, 2, 2, 2, 1]),
    scale("Dorian", &[2, 1, 2, 2, 2, 1, 2]),
    scale("Phrygian", &[1, 2, 2, 2, 1, 2, 2]),
    scale("Lydian", &[2, 2, 2, 1, 2, 2, 1]),
    scale("Mixolydian", &[2, 2, 1, 2, 2, 1, 2]),
    scale("Aeolian", &[2, 1, 2, 2, 1, 2, 2]),
    scale("Locrian", &[1, 2, 2, 1, 2, 2, 2]),
    scale("Chromatic", &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
    scale("Adolfos Scale", &[1, 2, 2, 1, 1, 2, 2]),
    scale("Diminished", &[2, 1, 2, 1, 2, 1, 2, 1]),
    scale("Enigmatic", &[1, 3, 2, 2, 2, 1, 1]),
    scale("Harmonic Minor", &[2, 1, 2, 2, 1, 3, 1]),
    scale("Hungarian Minor", &[2, 1, 3, 1, 1, 3, 1]),
    scale("Melodic Minor", &[2, 1, 2, 2, 2, 2, 1]),
    scale("Neapolitan", &[1, 2, 2, 2, 2, 2, 1]),
    scale("Neapolitan Minor", &[1, 2, 2, 2, 1, 3, 1]),
    scale("Pentatonic", &[2, 2, 3, 2, 3]),
    scale("Pentatonic Minor", &[3, 2, 2, 3, 2]),
    scale("Ten Tone", &[1, 2, 1, 1, 1, 1, 2, 1, 1]),
    scale("Whole Tone", &[2, 2, 2, 2, 2, 2]),
];

const fn scale(name: &'static str, intervals: &'static [u8]) -> Scale {
    Scale { name, intervals }
}

pub fn scales() -> &'static [Scale] {
    &SCALES
}

/// Looks up a scale by its exact name. A miss is reported as `None` instead of falling
/// back to a default entry.
pub fn scale_by_name(name: &str) -> Option<&'static Scale> {
    SCALES.iter().find(|scale| scale.name == name)
}
