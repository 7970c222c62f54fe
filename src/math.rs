/// Returns the flooring integer division and remainder of `numer` and `denom`.
///
/// The remainder is a *positive* number between 0 and `denom-1` with
/// `result.0 * denom + result.1 = numer`. This makes the function suitable for reducing
/// possibly negative semitone differences to a pitch-class residue.
///
/// # Panics
///
/// Panics if `denom == 0` or `denom > i32::MAX as u32`.
///
/// # Examples
///
/// ```
/// # use fretboard::math;
/// // numer is positive
/// assert_eq!(math::floor_div_mod(7, 12), (0, 7));
/// assert_eq!(math::floor_div_mod(12, 12), (1, 0));
/// assert_eq!(math::floor_div_mod(19, 12), (1, 7));
///
/// // numer is negative
/// assert_eq!(math::floor_div_mod(-1, 12), (-1, 11));
/// assert_eq!(math::floor_div_mod(-12, 12), (-1, 0));
/// assert_eq!(math::floor_div_mod(-13, 12), (-2, 11));
///
/// // numer is zero
/// assert_eq!(math::floor_div_mod(0, 12), (0, 0));
/// ```
pub fn floor_div_mod(numer: i32, denom: u32) -> (i32, u32) {
    let denom = i32::try_from(denom).expect("denom out of range");
    (numer.div_euclid(denom), numer.rem_euclid(denom) as u32)
}
