//! Speak-order arrangement once roles are known.

use rand::Rng;
use rand::seq::{SliceRandom, index};
use spy_core::{PlayerId, Role};

/// Move Blanks into the latter half of the speak order.
///
/// If Blanks make up at least half the seats, the other players are shuffled
/// and Blanks appended. Otherwise Blank seats are sampled without replacement
/// from `[n/2, n)` and the rest are filled in shuffled order.
pub fn place_blanks_late<R: Rng + ?Sized>(seats: &[(PlayerId, Role)], rng: &mut R) -> Vec<PlayerId> {
    let n = seats.len();
    let mut blanks: Vec<PlayerId> = seats
        .iter()
        .filter(|(_, r)| *r == Role::Blank)
        .map(|(id, _)| *id)
        .collect();
    let mut others: Vec<PlayerId> = seats
        .iter()
        .filter(|(_, r)| *r != Role::Blank)
        .map(|(id, _)| *id)
        .collect();
    others.shuffle(rng);
    blanks.shuffle(rng);

    if blanks.len() * 2 >= n {
        others.extend(blanks);
        return others;
    }

    let half = n / 2;
    let mut slots: Vec<Option<PlayerId>> = vec![None; n];
    for (offset, blank) in index::sample(rng, n - half, blanks.len())
        .into_iter()
        .zip(blanks)
    {
        slots[half + offset] = Some(blank);
    }
    let mut rest = others.into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| rest.next()))
        .collect()
}
