//! Ranking and edit-distance properties.
//!
//! Tests cover:
//! - Tier precedence (exact > prefix > substring > fuzzy)
//! - First-encountered tie-breaking
//! - Edit distance symmetry, identity and empty-string behaviour (proptest)

use proptest::prelude::*;
use worddeck_core::{best_match, edit_distance, search_hits, Entry, WordList};

fn entries(words: &[&str]) -> Vec<Entry> {
    words.iter().map(|w| Entry::new(*w, "", "")).collect()
}

#[test]
fn test_kitten_sitting() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn test_exact_match_wins_regardless_of_position() {
    let e = entries(&["cat", "cats", "category", "dog"]);
    let m = best_match("cat", &e, 3).unwrap();
    assert_eq!(m.index, 0);
    assert_eq!(m.score, f64::INFINITY);

    let e = entries(&["category", "cats", "dog", "cat"]);
    assert_eq!(best_match("cat", &e, 3).unwrap().index, 3);
}

#[test]
fn test_prefix_tie_goes_to_first() {
    // cats and cars both score 100 + 2/4
    let e = entries(&["cats", "cars", "dog"]);
    assert_eq!(best_match("ca", &e, 3).unwrap().index, 0);
    let e = entries(&["cars", "cats", "dog"]);
    assert_eq!(best_match("ca", &e, 3).unwrap().index, 0);
}

#[test]
fn test_prefix_listing_with_car() {
    // With "car" present, the shorter word has the higher prefix ratio
    let e = entries(&["cats", "car", "dog"]);
    assert_eq!(best_match("ca", &e, 3).unwrap().index, 1);
    let listed: Vec<usize> = search_hits("ca", &e, 50).iter().map(|h| h.index).collect();
    assert_eq!(listed, vec![0, 1]);
}

#[test]
fn test_no_match_beyond_distance() {
    let e = entries(&["cat", "cats", "category", "dog"]);
    assert_eq!(best_match("xyz123", &e, 3), None);
}

#[test]
fn test_fuzzy_tier_only_when_nothing_better() {
    let e = entries(&["hello", "help"]);
    // "helo" is a prefix of neither; hello is 1 edit away, help is 1 edit away
    let m = best_match("helo", &e, 3).unwrap();
    assert_eq!(m.index, 0);
    assert!((m.score - 1.5).abs() < 1e-9);
}

#[test]
fn test_fuzzy_distance_is_configurable() {
    let e = entries(&["lantern"]);
    assert!(best_match("lentarn", &e, 2).is_some());
    assert!(best_match("lentarn", &e, 1).is_none());
}

#[test]
fn test_duplicates_first_wins() {
    let list = WordList::from_words(["echo", "echo"]).unwrap();
    assert_eq!(best_match("echo", list.entries(), 3).unwrap().index, 0);
}

proptest! {
    #[test]
    fn prop_distance_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn prop_distance_identity(a in "\\PC{0,16}") {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn prop_distance_from_empty(b in "\\PC{0,16}") {
        prop_assert_eq!(edit_distance("", &b), b.chars().count());
    }

    #[test]
    fn prop_distance_bounded_by_longer(a in "[a-c]{0,10}", b in "[a-c]{0,10}") {
        let d = edit_distance(&a, &b);
        prop_assert!(d <= a.len().max(b.len()));
        prop_assert!(d >= a.len().abs_diff(b.len()));
    }
}
