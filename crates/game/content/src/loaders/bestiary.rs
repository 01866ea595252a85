//! Actor stat table loader.

use std::path::Path;

use game_core::{ActorTemplate, EntityKind, GameConfig};

use crate::loaders::{LoadResult, read_file};

/// Named actor templates. A template's id is its position in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bestiary {
    entries: Vec<(String, ActorTemplate)>,
}

impl Bestiary {
    pub fn new(entries: Vec<(String, ActorTemplate)>) -> Self {
        Self { entries }
    }

    /// Template id and definition for `name`.
    pub fn get(&self, name: &str) -> Option<(u16, &ActorTemplate)> {
        self.entries
            .iter()
            .position(|(entry, _)| entry == name)
            .map(|index| (index as u16, &self.entries[index].1))
    }

    /// Name of the template with the given id.
    pub fn name_of(&self, template_id: u16) -> Option<&str> {
        self.entries
            .get(usize::from(template_id))
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActorTemplate)> {
        self.entries
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader for the bestiary.
///
/// RON format: `Vec<(String, ActorTemplate)>`.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in bestiary {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<Bestiary> {
        let entries: Vec<(String, ActorTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        anyhow::ensure!(
            entries.len() <= usize::from(u16::MAX),
            "too many templates ({})",
            entries.len()
        );
        for (index, (name, template)) in entries.iter().enumerate() {
            anyhow::ensure!(
                entries[..index].iter().all(|(other, _)| other != name),
                "duplicate template '{}'",
                name
            );
            validate(name, template)?;
        }

        Ok(Bestiary::new(entries))
    }
}

fn validate(name: &str, template: &ActorTemplate) -> LoadResult<()> {
    anyhow::ensure!(
        template.stats.max_health > 0,
        "template '{}' needs positive max_health",
        name
    );
    anyhow::ensure!(
        template.kind != EntityKind::Projectile,
        "template '{}' cannot be a projectile",
        name
    );
    if template.kind.acts_in_real_time() {
        anyhow::ensure!(
            template.stats.action_interval > 0,
            "template '{}' needs a positive action_interval",
            name
        );
    }
    anyhow::ensure!(
        template.abilities.len() <= GameConfig::MAX_ABILITIES,
        "template '{}' has {} abilities, at most {} fit",
        name,
        template.abilities.len(),
        GameConfig::MAX_ABILITIES
    );
    for ability in &template.abilities {
        anyhow::ensure!(
            ability.chance_percent <= 100,
            "template '{}' has an ability chance above 100",
            name
        );
        anyhow::ensure!(
            ability.speed > 0,
            "template '{}' has an ability with non-positive speed {}",
            name,
            ability.speed
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use game_core::{Behavior, ProjectilePattern};

    use super::*;

    const SAMPLE: &str = r#"[
        ("orc", (kind: Enemy, stats: (attack: 3, defense: 0, max_health: 10, action_interval: 1000))),
        ("archer", (
            kind: Enemy,
            stats: (attack: 4, defense: 0, max_health: 8, action_interval: 1000),
            behavior: Ranged(retreat_distance: 2),
            abilities: [(trigger_range: 6, cooldown: 2, chance_percent: 100, power_percent: 100,
                         speed: 10, projectile_range: 6, pattern: Aimed)],
        )),
    ]"#;

    #[test]
    fn parses_templates_with_defaults() {
        let bestiary = BestiaryLoader::parse(SAMPLE).unwrap();

        let (id, orc) = bestiary.get("orc").unwrap();
        assert_eq!(id, 0);
        assert_eq!(orc.behavior, Behavior::Melee);
        assert!(orc.abilities.is_empty());

        let (id, archer) = bestiary.get("archer").unwrap();
        assert_eq!(bestiary.name_of(id), Some("archer"));
        assert_eq!(archer.behavior, Behavior::Ranged { retreat_distance: 2 });
        assert_eq!(archer.abilities[0].pattern, ProjectilePattern::Aimed);
    }

    #[test]
    fn rejects_zero_interval_for_real_time_actors() {
        let bad = r#"[("statue", (kind: Enemy, stats: (attack: 1, defense: 0, max_health: 5, action_interval: 0)))]"#;
        assert!(BestiaryLoader::parse(bad).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        let dup = r#"[
            ("orc", (kind: Enemy, stats: (attack: 3, defense: 0, max_health: 10, action_interval: 1000))),
            ("orc", (kind: Enemy, stats: (attack: 3, defense: 0, max_health: 10, action_interval: 1000))),
        ]"#;
        assert!(BestiaryLoader::parse(dup).is_err());
    }

    fn caster(abilities: &[(i32, &str)]) -> String {
        let abilities: Vec<String> = abilities
            .iter()
            .map(|(speed, pattern)| {
                format!(
                    "(trigger_range: 6, cooldown: 2, chance_percent: 50, power_percent: 100, \
                     speed: {speed}, projectile_range: 6, pattern: {pattern})"
                )
            })
            .collect();
        format!(
            "[(\"caster\", (kind: Boss, stats: (attack: 4, defense: 0, max_health: 8, \
             action_interval: 1000), abilities: [{}]))]",
            abilities.join(", ")
        )
    }

    #[test]
    fn rejects_stalled_ability_projectiles() {
        assert!(BestiaryLoader::parse(&caster(&[(10, "Ring")])).is_ok());

        let err = BestiaryLoader::parse(&caster(&[(0, "Ring")])).unwrap_err();
        assert!(err.to_string().contains("non-positive speed 0"));
        assert!(BestiaryLoader::parse(&caster(&[(-4, "Aimed")])).is_err());
    }

    #[test]
    fn rejects_more_abilities_than_slots() {
        let full = vec![(10, "Cross"); GameConfig::MAX_ABILITIES];
        assert!(BestiaryLoader::parse(&caster(&full)).is_ok());

        let overfull = vec![(10, "Cross"); GameConfig::MAX_ABILITIES + 1];
        let err = BestiaryLoader::parse(&caster(&overfull)).unwrap_err();
        assert!(err.to_string().contains("abilities, at most"));
    }
}
