//! Property tests for role assignment.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::domain::game::Game;
use crate::domain::roles::{Role, ECONOMIC_ROLES};
use crate::domain::rules::GameRules;
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the pool only shrinks, and no role is dealt more often than
    /// its multiplicity in the pool.
    #[test]
    fn prop_roles_never_exceed_pool_multiplicity(
        max_players in 0usize..=60,
        joins in 0usize..=80,
        moderators in 0usize..=2,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new("PROP01", "pw", GameRules::default().with_max_players(max_players), &mut rng);
        let per_role = max_players / ECONOMIC_ROLES.len();

        for _ in 0..moderators {
            game.add_player(Uuid::new_v4(), "TA", true).unwrap();
        }

        let mut dealt: HashMap<Role, usize> = HashMap::new();
        let mut remaining = game.role_pool().remaining();
        for i in 0..joins {
            if let Ok(role) = game.add_player(Uuid::new_v4(), format!("s{i}"), false) {
                *dealt.entry(role).or_default() += 1;
            }
            let now = game.role_pool().remaining();
            prop_assert!(now <= remaining, "pool grew from {remaining} to {now}");
            remaining = now;
        }

        for role in ECONOMIC_ROLES {
            prop_assert!(dealt.get(&role).copied().unwrap_or(0) <= per_role);
        }
        prop_assert!(!dealt.contains_key(&Role::Moderator));
        prop_assert!(game.players.len() <= max_players.max(moderators));
        prop_assert_eq!(game.waiting_for_actions.len(), dealt.values().sum::<usize>());
    }
}
