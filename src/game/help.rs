// Hint generators - pure over an injected rng, never touch ground truth

use std::collections::BTreeMap;

use rand::Rng;

use super::question::AnswerKey;

/// Keys remaining after the fifty-fifty hint: the correct one plus one
/// random wrong one, in letter order.
pub fn fifty_fifty(correct: AnswerKey, rng: &mut impl Rng) -> Vec<AnswerKey> {
    let wrong: Vec<AnswerKey> = AnswerKey::ALL
        .into_iter()
        .filter(|&key| key != correct)
        .collect();
    let mut keys = vec![correct, wrong[rng.gen_range(0..wrong.len())]];
    keys.sort();
    keys
}

/// Vote weights for all four keys. The correct key always holds the
/// maximum, possibly tied, so the hint biases toward truth without giving
/// it away.
pub fn audience_help(correct: AnswerKey, rng: &mut impl Rng) -> BTreeMap<AnswerKey, u32> {
    let correct_votes = rng.gen_range(45..=75);
    AnswerKey::ALL
        .into_iter()
        .map(|key| {
            let votes = if key == correct {
                correct_votes
            } else {
                rng.gen_range(0..=correct_votes)
            };
            (key, votes)
        })
        .collect()
}

/// A random friend's guess. The friend names the correct variant when a
/// uniform roll in `[0, 100)` lands below `confidence`, otherwise a random
/// wrong one.
pub fn friend_call(
    correct: AnswerKey,
    friends: &[String],
    confidence: u32,
    rng: &mut impl Rng,
) -> String {
    let roll: u32 = rng.gen_range(0..100);
    let guess = if roll < confidence {
        correct
    } else {
        let wrong: Vec<AnswerKey> = AnswerKey::ALL
            .into_iter()
            .filter(|&key| key != correct)
            .collect();
        wrong[rng.gen_range(0..wrong.len())]
    };
    let friend = friends
        .get(rng.gen_range(0..friends.len().max(1)))
        .map(String::as_str)
        .unwrap_or("Друг");
    format!("{friend} считает, что это вариант {}", guess.as_uppercase())
}
