use std::collections::HashSet;

use moneyladder::game::help::{audience_help, fifty_fifty, friend_call};
use moneyladder::game::AnswerKey;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn fifty_fifty_always_pairs_correct_with_one_wrong_key() {
    for correct in AnswerKey::ALL {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let keys = fifty_fifty(correct, &mut rng);
            assert_eq!(keys.len(), 2);
            assert!(keys.contains(&correct));
            let other = keys.iter().copied().find(|&key| key != correct);
            assert!(other.is_some());
        }
    }
}

#[test]
fn audience_help_never_outvotes_the_correct_key() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let votes = audience_help(AnswerKey::C, &mut rng);
        let keys: HashSet<AnswerKey> = votes.keys().copied().collect();
        assert_eq!(keys.len(), 4);
        let top = votes[&AnswerKey::C];
        assert!(votes.values().all(|&count| count <= top));
    }
}

#[test]
fn friend_with_full_confidence_always_names_the_correct_variant() {
    let friends = vec!["Default Friend".to_string()];
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let message = friend_call(AnswerKey::B, &friends, 100, &mut rng);
        assert_eq!(message, "Default Friend считает, что это вариант B");
    }
}

#[test]
fn friend_with_zero_confidence_never_names_the_correct_variant() {
    let friends = vec!["Default Friend".to_string()];
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..100 {
        let message = friend_call(AnswerKey::A, &friends, 0, &mut rng);
        assert!(message.starts_with("Default Friend считает, что это вариант "));
        assert!(!message.ends_with('A'));
        let guess = message.chars().last().expect("guess letter");
        assert!(['B', 'C', 'D'].contains(&guess));
    }
}

#[test]
fn friend_persona_comes_from_the_configured_list() {
    let friends = vec![
        "Александр Друзь".to_string(),
        "Максим Поташев".to_string(),
    ];
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let message = friend_call(AnswerKey::D, &friends, 75, &mut rng);
        assert!(
            friends.iter().any(|friend| message.starts_with(friend.as_str())),
            "unexpected persona in {message}"
        );
    }
}
