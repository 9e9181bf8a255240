//! Campaign levels.
//!
//! A `CampaignLevel` changes how a match starts: starting resources, the
//! opponent's deck, and special rules such as a pre-placed board or an
//! alternative win condition. The campaign player is always player 0.

use serde::{Deserialize, Serialize};

use super::objective::CampaignObjective;
use crate::board::Occupant;
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{GameState, MatchConfig, PlayerId, Position};

/// The side the campaign is played from.
pub const CAMPAIGN_PLAYER: PlayerId = PlayerId::new(0);

/// One card placed on the board before the first turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub card: CardId,
    pub position: Position,
    pub owner: PlayerId,
}

/// A level-specific rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialRule {
    /// Units and fortifications on the board at the start. Placement is not
    /// limited to deployment zones.
    StartingBoard(Vec<Placement>),
    /// Extra cards in a player's opening hand.
    BonusCards { player: PlayerId, cards: Vec<CardId> },
    /// First-turn mana for one player.
    ModifiedStartingMana { player: PlayerId, mana: i32 },
    /// Extra win or loss condition checked at the end of every turn.
    CustomObjective(CampaignObjective),
}

/// Level descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignLevel {
    pub name: String,
    pub starting_mana: i32,
    pub starting_health: i32,
    pub opponent_deck: Vec<CardId>,
    #[serde(default)]
    pub special_rules: Vec<SpecialRule>,
}

impl CampaignLevel {
    #[must_use]
    pub fn new(name: impl Into<String>, starting_mana: i32, starting_health: i32, opponent_deck: Vec<CardId>) -> Self {
        Self {
            name: name.into(),
            starting_mana,
            starting_health,
            opponent_deck,
            special_rules: Vec::new(),
        }
    }

    /// Add a special rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: SpecialRule) -> Self {
        self.special_rules.push(rule);
        self
    }

    /// Apply the level's starting values to a base configuration.
    #[must_use]
    pub fn configure(&self, config: MatchConfig) -> MatchConfig {
        config
            .with_starting_mana(self.starting_mana)
            .with_starting_health(self.starting_health)
    }

    /// Objectives declared by `CustomObjective` rules.
    pub fn objectives(&self) -> impl Iterator<Item = &CampaignObjective> {
        self.special_rules.iter().filter_map(|rule| match rule {
            SpecialRule::CustomObjective(objective) => Some(objective),
            _ => None,
        })
    }

    /// Apply board, hand and mana rules to a freshly created match, before
    /// the opening draw.
    ///
    /// Placements referring to unknown or non-deployable cards, or to
    /// unavailable cells, are skipped with a warning.
    pub fn prepare(&self, state: &mut GameState, catalog: &CardCatalog) {
        for rule in &self.special_rules {
            match rule {
                SpecialRule::StartingBoard(placements) => {
                    for placement in placements {
                        place_starting_card(state, catalog, placement);
                    }
                }
                SpecialRule::BonusCards { player, cards } => {
                    for &card in cards {
                        if catalog.contains(card) {
                            state.player_mut(*player).add_to_hand(card);
                        } else {
                            tracing::warn!(%card, level = %self.name, "bonus card missing from the catalog");
                        }
                    }
                }
                SpecialRule::ModifiedStartingMana { player, mana } => {
                    state.player_mut(*player).set_starting_mana(*mana);
                }
                SpecialRule::CustomObjective(_) => {}
            }
        }
    }
}

fn place_starting_card(state: &mut GameState, catalog: &CardCatalog, placement: &Placement) {
    let occupant: Occupant = match catalog.get(placement.card) {
        Some(Card::Unit(unit)) => unit.clone().into(),
        Some(Card::Fortification(fort)) => fort.clone().into(),
        Some(Card::Tactic(_)) | None => {
            tracing::warn!(card = %placement.card, "starting board card is not a deployable catalog card");
            return;
        }
    };
    if state.board.put_occupant(occupant, placement.position, placement.owner).is_none() {
        tracing::warn!(position = %placement.position, "starting board cell unavailable");
    }
}
