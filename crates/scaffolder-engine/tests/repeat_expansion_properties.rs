//! Property-based tests for repeat block expansion
//!
//! A repeat block is emitted once per link of the ancestor chain, root-most
//! link first, each copy rendered for that link's (child, parent) pair.

use proptest::prelude::*;
use scaffolder_engine::directives::{markers, DirectiveProcessor};
use scaffolder_engine::naming::ConceptPair;

const CONCEPTS: &[&str] = &["Team", "Project", "Milestone", "Deliverable", "Task", "Step"];

// Strategy for generating an ancestor chain, nearest first
fn arb_parents() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(CONCEPTS.to_vec(), 1..=CONCEPTS.len()).prop_map(|mut chain| {
        chain.reverse();
        chain.into_iter().map(String::from).collect()
    })
}

fn template(body_lines: usize) -> String {
    let mut lines = vec![markers::START_REPEAT.to_string()];
    for _ in 0..body_lines {
        lines.push("link creative_concept -> tangible_thing".to_string());
    }
    lines.push(format!("  {}", markers::STOP_REPEAT));
    format!("before\n{}\nafter\n", lines.join("\n"))
}

proptest! {
    /// Property: one copy of the block per adjacent ancestor link
    #[test]
    fn prop_repeat_count_matches_chain(
        parents in arb_parents(),
        body_lines in 1usize..4
    ) {
        let pair = ConceptPair::new("Note", &parents[0]);
        let output = DirectiveProcessor::new(pair, parents.clone())
            .process(&template(body_lines))
            .unwrap();

        let links: Vec<&str> = output.lines().filter(|line| line.starts_with("link ")).collect();
        prop_assert_eq!(links.len(), parents.len() * body_lines);
        prop_assert!(output.starts_with("before\n"));
        prop_assert!(output.ends_with("after\n"));
    }

    /// Property: the root-most link comes first and the scaffolded child last
    #[test]
    fn prop_repeat_order_is_root_first(parents in arb_parents()) {
        let pair = ConceptPair::new("Note", &parents[0]);
        let output = DirectiveProcessor::new(pair, parents.clone())
            .process(&template(1))
            .unwrap();
        let links: Vec<&str> = output.lines().filter(|line| line.starts_with("link ")).collect();

        let mut chain: Vec<String> = parents.iter().rev().map(|name| name.to_lowercase()).collect();
        chain.push("note".to_string());
        let expected: Vec<String> = chain
            .windows(2)
            .map(|link| format!("link {} -> {}", link[0], link[1]))
            .collect();
        prop_assert_eq!(links, expected);
    }
}
