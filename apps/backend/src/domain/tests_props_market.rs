//! Property tests for the price model and action bookkeeping.

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::actions::PlayerAction;
use crate::domain::game::Game;
use crate::domain::market::{adjust_price, FixedDice, MarketInputs, MarketPressure};
use crate::domain::property::Location;
use crate::domain::roles::Role;
use crate::domain::rules::SHOCK_RANGE;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{new_game, seat};

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Homebuyer),
        Just(Role::Developer),
        Just(Role::Speculator),
        Just(Role::MortgageLender),
        Just(Role::Banker),
    ]
}

fn location_strategy() -> impl Strategy<Value = Location> {
    prop_oneof![
        Just(Location::Suburban),
        Just(Location::Urban),
        Just(Location::Prime),
    ]
}

/// Every owned property appears in its owner's list and nowhere else.
fn assert_ownership_consistent(game: &Game) -> Result<(), TestCaseError> {
    for property in &game.properties {
        for (id, player) in &game.players {
            let listed = player.owns(property.id);
            prop_assert_eq!(listed, property.owner == Some(*id));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the market price stays positive and finite for any inputs.
    #[test]
    fn prop_price_stays_positive(
        price in 0.01f64..10_000.0,
        mortgage_rate in 0.0f64..=100.0,
        players in 0usize..=60,
        speculators in 0usize..=60,
        properties in 0usize..=500,
        debt in 0.0f64..1_000_000.0,
        shock in -SHOCK_RANGE..=SHOCK_RANGE,
    ) {
        let inputs = MarketInputs {
            mortgage_rate,
            players,
            speculators: speculators.min(players),
            properties,
            outstanding_debt: debt,
        };
        let pressure = MarketPressure::from_inputs(&inputs);
        let next = adjust_price(price, pressure.total() + shock);
        prop_assert!(next.is_finite());
        prop_assert!(next > 0.0);
    }

    /// Property: a random mix of builds, buys and sells over several rounds
    /// keeps ownership consistent, and every successful actor leaves the
    /// waiting set until the next round.
    #[test]
    fn prop_actions_keep_ownership_consistent(
        roles in prop::collection::vec(role_strategy(), 1..8),
        moves in prop::collection::vec((any::<prop::sample::Index>(), 0u8..3, location_strategy(), 1u8..=10, 0usize..12), 1..40),
        shock in -SHOCK_RANGE..=SHOCK_RANGE,
    ) {
        let mut game = new_game(50);
        let ids: Vec<Uuid> = roles
            .iter()
            .enumerate()
            .map(|(i, role)| seat(&mut game, &format!("p{i}"), *role))
            .collect();
        let mut dice = FixedDice { shock, pop_roll: 1.0 };

        for (who, kind, location, quality, property_id) in moves {
            let actor = *who.get(&ids);
            let action = match kind {
                0 => PlayerAction::BuildHouse { location, quality },
                1 => PlayerAction::BuyProperty { property_id },
                _ => PlayerAction::SellProperty { property_id },
            };
            let was_waiting = game.is_waiting_on(&actor);
            let result = game.apply_action(actor, &action);
            if result.is_ok() {
                prop_assert!(was_waiting);
                prop_assert!(!game.is_waiting_on(&actor));
            }
            assert_ownership_consistent(&game)?;

            if game.waiting_for_actions.is_empty() {
                game.process_round(&mut dice).unwrap();
                prop_assert_eq!(game.waiting_for_actions.len(), ids.len());
            }
        }
        prop_assert!(game.market_price > 0.0);
    }
}
