//! Named trigger events.
//!
//! The engine never renders or plays sound. Instead every state change a
//! presentation layer may care about is pushed onto the match's event log
//! as a `GameEvent`, which the caller drains after each action.
//!
//! ## Trigger Names
//!
//! Each variant has a stable `name()` (`"unit_deployed"`, `"victory"`, ...)
//! so sound and animation tables can be keyed by string.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId, Position};

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },

    CardDrawn {
        player: PlayerId,
        card: CardId,
    },

    /// A draw was due with an empty deck.
    FatigueDamage {
        player: PlayerId,
        amount: i32,
    },

    /// A unit or fortification entered the board from hand.
    UnitDeployed {
        player: PlayerId,
        entity: EntityId,
        card: CardId,
        position: Position,
    },

    UnitMoved {
        entity: EntityId,
        from: Position,
        to: Position,
    },

    /// An attack landed. `countered` is set when the type-counter
    /// multiplier applied.
    AttackResolved {
        attacker: EntityId,
        target: Option<EntityId>,
        damage: i32,
        countered: bool,
    },

    UnitDestroyed {
        entity: EntityId,
        owner: PlayerId,
        position: Position,
    },

    PlayerDamaged {
        player: PlayerId,
        amount: i32,
        remaining: i32,
    },

    TacticPlayed {
        player: PlayerId,
        card: CardId,
        target: Option<Position>,
    },

    TurnEnded {
        player: PlayerId,
    },

    Victory {
        player: PlayerId,
    },

    Defeat {
        player: PlayerId,
    },
}

impl GameEvent {
    /// Stable trigger name used by presentation layers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::CardDrawn { .. } => "card_drawn",
            GameEvent::FatigueDamage { .. } => "fatigue_damage",
            GameEvent::UnitDeployed { .. } => "unit_deployed",
            GameEvent::UnitMoved { .. } => "unit_moved",
            GameEvent::AttackResolved { .. } => "attack_resolved",
            GameEvent::UnitDestroyed { .. } => "unit_destroyed",
            GameEvent::PlayerDamaged { .. } => "player_damaged",
            GameEvent::TacticPlayed { .. } => "tactic_played",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::Victory { .. } => "victory",
            GameEvent::Defeat { .. } => "defeat",
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_names() {
        let deployed = GameEvent::UnitDeployed {
            player: PlayerId::new(0),
            entity: EntityId(3),
            card: CardId::new(7),
            position: Position::new(4, 1),
        };
        assert_eq!(deployed.name(), "unit_deployed");
        assert_eq!(GameEvent::Victory { player: PlayerId::new(1) }.to_string(), "victory");
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::AttackResolved {
            attacker: EntityId(1),
            target: Some(EntityId(2)),
            damage: 6,
            countered: true,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
