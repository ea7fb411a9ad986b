//! Target-scope resolution: which players a rule applies to.

use crate::models::facts::PlayerFacts;
use crate::models::rule::TargetScope;

/// Resolve a rule's target scope to the concrete player set.
pub fn resolve_targets<'a>(
    target: &TargetScope,
    players: &'a [PlayerFacts],
) -> Vec<&'a PlayerFacts> {
    match target {
        TargetScope::AllPlayers => players.iter().collect(),
        TargetScope::ByPosition { positions } => {
            players.iter().filter(|p| positions.contains(&p.position)).collect()
        }
        TargetScope::IndividualPlayer { player_id } => {
            players.iter().filter(|p| p.player_id == *player_id).collect()
        }
    }
}
