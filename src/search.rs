//! The fingering search engine: incremental expansion, span pruning, deduplication,
//! subset subsumption and multi-key ranking of candidate fingerings.

use crate::chord::ChordSpelling;
use crate::fingering::Fingering;
use crate::instrument::Instrument;
use crate::pitch::PitchClass;
use crate::shape::{Playability, ShapeLibrary};
use std::collections::HashSet;

pub const DEFAULT_MAX_SPAN: i32 = 4;

/// Search configuration.
#[derive(Copy, Clone, Debug)]
pub struct SearchOptions {
    /// Largest allowed distance in frets between the lowest and highest fretted
    /// position. Non-positive values fall back to [`DEFAULT_MAX_SPAN`].
    pub max_span: i32,

    /// Whether a chord tone may be covered on more than one string or intentionally
    /// omitted. Enables two additional expansion passes over the candidate set.
    pub allow_doubling: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_span: DEFAULT_MAX_SPAN,
            allow_doubling: false,
        }
    }
}

impl SearchOptions {
    fn effective_max_span(self) -> i32 {
        if self.max_span > 0 {
            self.max_span
        } else {
            DEFAULT_MAX_SPAN
        }
    }
}

/// The ranked outcome of a fingering search.
#[derive(Debug)]
pub struct SearchResult<'a> {
    pub instrument: &'a Instrument,
    pub spelling: &'a ChordSpelling,
    pub root: PitchClass,
    /// Easiest fingering first.
    pub fingerings: Vec<Fingering<'a>>,
}

/// Searches fingerings for a chord using the default [`ShapeLibrary`] oracle.
///
/// Never fails for well-formed input: a chord tone with no reachable location simply
/// eliminates all candidates, yielding an empty ranked list.
pub fn find_fingerings<'a>(
    instrument: &'a Instrument,
    spelling: &'a ChordSpelling,
    root: PitchClass,
    options: SearchOptions,
) -> SearchResult<'a> {
    find_fingerings_with(instrument, spelling, root, options, &ShapeLibrary::default())
}

/// Searches fingerings, scoring them with a caller-provided playability oracle.
pub fn find_fingerings_with<'a>(
    instrument: &'a Instrument,
    spelling: &'a ChordSpelling,
    root: PitchClass,
    options: SearchOptions,
    oracle: &impl Playability,
) -> SearchResult<'a> {
    let notes = spelling.pitch_classes(root);
    let max_span = options.effective_max_span();

    let mut candidates = expand_pass(instrument, &notes, Vec::new(), false, max_span);
    if options.allow_doubling {
        // Two more passes over the already-expanded set, giving every chord tone up to
        // three opportunities to attach to additional strings.
        candidates = expand_pass(instrument, &notes, candidates, true, max_span);
        candidates = expand_pass(instrument, &notes, candidates, true, max_span);
    }

    // Collapse candidates that sound identical, keeping the first occurrence.
    let mut seen_signatures = HashSet::new();
    candidates.retain(|candidate| seen_signatures.insert(candidate.pitches()));

    // Rank fuller fingerings first so the subsumption filter keeps only maximal ones.
    candidates.sort_by(|a, b| b.sounding_count().cmp(&a.sounding_count()));

    let mut maximal: Vec<Fingering<'a>> = Vec::new();
    for candidate in candidates {
        if !maximal.iter().any(|kept| kept.covers(&candidate)) {
            maximal.push(candidate);
        }
    }

    let mut fingerings: Vec<Fingering<'a>> = maximal
        .into_iter()
        .map(|candidate| {
            let info = oracle.score(candidate.frets());
            candidate.scored(info.min_cost, info.extras)
        })
        .collect();
    fingerings.sort_by_key(|fingering| {
        (fingering.playability(), fingering.min_fret().unwrap_or(i32::MAX))
    });

    let inversions = spelling.inversion_map(root);
    let fingerings = fingerings
        .into_iter()
        .map(|fingering| {
            let inversion = fingering
                .lowest_pitch_class()
                .and_then(|pitch_class| inversions[pitch_class.as_usize()]);
            fingering.labeled(inversion)
        })
        .collect();

    SearchResult {
        instrument,
        spelling,
        root,
        fingerings,
    }
}

/// Runs one expansion pass: attaches every chord tone, in formula order, to every
/// candidate on every unused string, discarding candidates whose fret span exceeds
/// `max_span`. An empty candidate set is seeded from the first tone's locations. With
/// `doubling` set, the unexpanded candidate survives alongside its expansions,
/// representing a tone covered elsewhere or intentionally omitted.
fn expand_pass<'a>(
    instrument: &'a Instrument,
    notes: &[PitchClass],
    candidates: Vec<Fingering<'a>>,
    doubling: bool,
    max_span: i32,
) -> Vec<Fingering<'a>> {
    let mut current = candidates;
    for &note in notes {
        let locations = instrument.find_locations(note);
        if current.is_empty() {
            current = locations
                .iter()
                .map(|location| Fingering::muted(instrument).with_note(location.string, location.fret))
                .collect();
        } else {
            let mut expanded = Vec::new();
            for candidate in &current {
                if doubling {
                    expanded.push(candidate.clone());
                }
                for location in &locations {
                    if candidate.has_note(location.string) {
                        continue;
                    }
                    let next = candidate.with_note(location.string, location.fret);
                    let min_fret = next.min_fret().unwrap_or(0);
                    if next.max_fret() - min_fret <= max_span {
                        expanded.push(next);
                    }
                }
            }
            current = expanded;
        }
    }
    current
}
