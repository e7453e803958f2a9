//! Cows and bulls scoring.

use serde::Serialize;

use crate::domain::code::FourDigits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub cows: u8,
    pub bulls: u8,
}

impl Score {
    pub fn is_win(&self) -> bool {
        self.bulls as usize == crate::domain::code::CODE_LEN
    }
}

/// Score `guess` against `code`.
///
/// A position matching exactly is a bull. Otherwise, if the guessed digit
/// occurs anywhere in the code it is a cow. Positions are checked
/// independently, so repeated digits in the guess may each count as a cow.
pub fn score(guess: &FourDigits, code: &FourDigits) -> Score {
    let code = code.digits();
    guess
        .digits()
        .iter()
        .enumerate()
        .fold(Score::default(), |mut acc, (i, d)| {
            if code[i] == *d {
                acc.bulls += 1;
            } else if code.contains(d) {
                acc.cows += 1;
            }
            acc
        })
}
