use fretboard::fingering::Fingering;
use serde::Serialize;

/// Cache file entry as the display front ends consume it: `notes[i]` is the fret (or -1
/// for a muted string) assigned to string `i`, lowest string first.
#[derive(Debug, Serialize)]
pub struct FingeringDto {
    pub notes: Vec<i32>,
    pub playability: u32,
    pub extras: u32,
    pub inversion: Option<u8>,
}

impl FingeringDto {
    pub fn from_fingering(fingering: &Fingering<'_>) -> Self {
        Self {
            notes: fingering.frets().to_vec(),
            playability: fingering.playability(),
            extras: fingering.extras(),
            inversion: fingering.inversion(),
        }
    }
}
