//! Data-driven actor definitions.

use crate::config::GameConfig;
use crate::state::{
    Ability, Behavior, EntityKind, EntitySpec, RegistryError, StatBlock, StatusInfliction,
};

/// Stat table entry describing one kind of actor (player, enemy, boss, NPC).
///
/// Bosses are ordinary templates with bigger numbers and extra abilities; the
/// only special treatment is the configurable `boss_stat_percent` applied in
/// [`ActorTemplate::to_spec`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub kind: EntityKind,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Behavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<Ability>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Option<StatusInfliction>,
}

impl ActorTemplate {
    pub fn new(kind: EntityKind, stats: StatBlock) -> Self {
        Self {
            kind,
            stats,
            behavior: EntitySpec::new(kind, stats).behavior,
            abilities: Vec::new(),
            on_hit: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Spawn parameters for this template.
    pub fn to_spec(
        &self,
        template_id: u16,
        config: &GameConfig,
    ) -> Result<EntitySpec, RegistryError> {
        if self.abilities.len() > GameConfig::MAX_ABILITIES {
            return Err(RegistryError::TooManyAbilities(self.abilities.len()));
        }
        let stats = match self.kind {
            EntityKind::Boss => self.stats.scaled(config.boss_stat_percent),
            _ => self.stats,
        };
        let mut spec = EntitySpec::new(self.kind, stats)
            .with_behavior(self.behavior)
            .with_template(template_id);
        for ability in &self.abilities {
            spec = spec.with_ability(*ability)?;
        }
        spec.on_hit = self.on_hit;
        Ok(spec)
    }
}
