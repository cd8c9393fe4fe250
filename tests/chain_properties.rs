//! Cross-module properties and end-to-end scenarios.

use proptest::prelude::*;

use u_chainplan::chain::{ChainSet, MatrixTravel, UnitSpeed};
use u_chainplan::distance::MilliDistanceMatrix;
use u_chainplan::evaluation::ChainEvaluator;
use u_chainplan::models::{Anchor, Link, Location, StandstillRef};
use u_chainplan::verification::ScoreVerifier;

/// Builds a chain set with `num_anchors` anchors and `num_links` links,
/// each link attached to a chain tail chosen by the corresponding index.
fn build_chains(
    num_anchors: usize,
    num_links: usize,
    choices: &[prop::sample::Index],
) -> ChainSet {
    let anchors = (0..num_anchors)
        .map(|a| Anchor::new(a, 1000, Location::new(a, (a * 10) as f64, 0.0)))
        .collect();
    let links = (0..num_links)
        .map(|l| {
            Link::new(
                l,
                Location::new(num_anchors + l, l as f64 + 0.5, 1.0),
                1 + (l as i32 % 5),
            )
        })
        .collect();
    let mut chains = ChainSet::new(anchors, links);

    let mut tails: Vec<StandstillRef> = (0..num_anchors).map(StandstillRef::Anchor).collect();
    for link in 0..num_links {
        let t = choices[link].index(tails.len());
        chains.attach(link, tails[t]);
        tails[t] = StandstillRef::Link(link);
    }
    chains.propagate_all(&UnitSpeed);
    chains
}

fn derived_snapshot(chains: &ChainSet) -> Vec<(usize, i64)> {
    (0..chains.num_links())
        .map(|l| (chains.owning_anchor(l), chains.arrival_millis(l)))
        .collect()
}

proptest! {
    #[test]
    fn milli_distance_symmetric_and_nonnegative(
        x1 in -1000.0..1000.0f64,
        y1 in -1000.0..1000.0f64,
        x2 in -1000.0..1000.0f64,
        y2 in -1000.0..1000.0f64,
    ) {
        let a = Location::new(0, x1, y1);
        let b = Location::new(1, x2, y2);
        prop_assert_eq!(a.milli_distance_to(&b), b.milli_distance_to(&a));
        prop_assert!(a.milli_distance_to(&b) >= 0);
        prop_assert_eq!(a.milli_distance_to(&a), 0);
    }

    #[test]
    fn forward_walk_is_reverse_of_backward_walk(
        num_anchors in 1..4usize,
        num_links in 1..12usize,
        choices in prop::collection::vec(any::<prop::sample::Index>(), 12),
    ) {
        let chains = build_chains(num_anchors, num_links, &choices);
        prop_assert_eq!(chains.verify(), Ok(()));
        for anchor in 0..num_anchors {
            let forward = chains.chain_links(anchor);
            if let Some(&last) = forward.last() {
                let mut backward = chains.backward_links(last);
                backward.reverse();
                prop_assert_eq!(backward, forward.clone());
            }
            for &link in &forward {
                prop_assert_eq!(chains.owning_anchor(link), anchor);
            }
        }
    }

    #[test]
    fn relocate_keeps_every_owner_consistent(
        num_anchors in 1..4usize,
        num_links in 1..12usize,
        choices in prop::collection::vec(any::<prop::sample::Index>(), 12),
        moved in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
    ) {
        let mut chains = build_chains(num_anchors, num_links, &choices);
        let link = moved.index(num_links);
        let anchor = target.index(num_anchors);
        chains.relocate(link, StandstillRef::Anchor(anchor), &UnitSpeed);

        prop_assert_eq!(chains.verify(), Ok(()));
        prop_assert_eq!(chains.owning_anchor(link), anchor);
        prop_assert_eq!(chains.next_link(StandstillRef::Anchor(anchor)), Some(link));
    }

    #[test]
    fn relocate_round_trip_restores_derived_state(
        num_anchors in 1..4usize,
        num_links in 1..12usize,
        choices in prop::collection::vec(any::<prop::sample::Index>(), 12),
        moved in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
    ) {
        let mut chains = build_chains(num_anchors, num_links, &choices);
        let link = moved.index(num_links);
        let anchor = target.index(num_anchors);

        let before_state = derived_snapshot(&chains);
        let before_shape: Vec<Vec<usize>> =
            (0..num_anchors).map(|a| chains.chain_links(a)).collect();
        let original_previous = chains
            .previous_standstill(link)
            .expect("built fully attached");

        chains.relocate(link, StandstillRef::Anchor(anchor), &UnitSpeed);
        chains.relocate(link, original_previous, &UnitSpeed);

        let after_shape: Vec<Vec<usize>> =
            (0..num_anchors).map(|a| chains.chain_links(a)).collect();
        prop_assert_eq!(derived_snapshot(&chains), before_state);
        prop_assert_eq!(after_shape, before_shape);
    }
}

#[test]
fn scenario_relocate_to_chain_head() {
    let anchors = vec![Anchor::new(0, 100, Location::new(0, 0.0, 0.0))];
    let links = vec![
        Link::new(0, Location::new(1, 1.0, 0.0), 10),
        Link::new(1, Location::new(2, 2.0, 0.0), 10),
        Link::new(2, Location::new(3, 3.0, 0.0), 10),
    ];
    let mut chains = ChainSet::new(anchors, links);
    chains.attach(0, StandstillRef::Anchor(0));
    chains.attach(1, StandstillRef::Link(0));
    chains.attach(2, StandstillRef::Link(1));
    chains.propagate_all(&UnitSpeed);

    assert_eq!(chains.milli_distance_to_previous(1), 1000);

    chains.relocate(1, StandstillRef::Anchor(0), &UnitSpeed);

    assert_eq!(chains.next_link(StandstillRef::Anchor(0)), Some(1));
    for link in 0..3 {
        assert_eq!(chains.owning_anchor(link), 0);
    }
    assert_eq!(chains.verify(), Ok(()));
}

#[test]
fn scenario_arrival_times_swap_with_position() {
    // Explicit travel times: every leg between the depot and the two
    // customers takes 1000 milli time units.
    let matrix =
        MilliDistanceMatrix::from_data(3, vec![0, 1000, 1000, 1000, 0, 1000, 1000, 1000, 0])
            .expect("valid");
    let model = MatrixTravel::new(&matrix);

    let anchors = vec![Anchor::new(0, 100, Location::new(0, 0.0, 0.0))];
    let links = vec![
        Link::new(0, Location::new(1, 1.0, 0.0), 10),
        Link::new(1, Location::new(2, 2.0, 0.0), 10),
    ];
    let mut chains = ChainSet::new(anchors, links);
    chains.attach(0, StandstillRef::Anchor(0));
    chains.attach(1, StandstillRef::Link(0));
    chains.propagate_all(&model);

    assert_eq!(chains.arrival_millis(0), 1000);
    assert_eq!(chains.arrival_millis(1), 2000);

    chains.relocate(1, StandstillRef::Anchor(0), &model);

    // Arrival follows position, not identity.
    assert_eq!(chains.arrival_millis(1), 1000);
    assert_eq!(chains.arrival_millis(0), 2000);
    assert_eq!(chains.chain_links(0), vec![1, 0]);
}

#[test]
fn scenario_evaluate_and_verify_weights() {
    let anchors = vec![Anchor::new(0, 15, Location::new(0, 0.0, 0.0))];
    let links = vec![
        Link::new(0, Location::new(1, 1.0, 0.0), 10),
        Link::new(1, Location::new(2, 2.0, 0.0), 10),
    ];
    let mut chains = ChainSet::new(anchors, links);
    chains.attach(0, StandstillRef::Anchor(0));
    chains.attach(1, StandstillRef::Link(0));
    chains.propagate_all(&UnitSpeed);

    let evaluator = ChainEvaluator::new(1, 1).with_package("vehiclerouting");
    let (score, totals) = evaluator.evaluate(&chains);
    assert!(!score.is_feasible());

    let verifier = ScoreVerifier::new(1);
    verifier.assert_hard(Some("vehiclerouting"), "vehicleCapacity", 0, -5, &totals);
    verifier.assert_hard(Some("vehiclerouting"), "arrivalAfterDueTime", 0, 0, &totals);
    verifier.assert_soft(None, "distanceToPreviousStandstill", 0, -2000, &totals);
    verifier.assert_soft(None, "distanceFromLastCustomerToDepot", 0, -2000, &totals);
}
