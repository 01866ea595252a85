//! Consumable effect table loader.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{ConsumableCatalog, ConsumableKind, EffectDescriptor};

use crate::loaders::{LoadResult, read_file};

/// Loads consumable effects as overrides on top of the stock catalog.
///
/// RON format: a map from consumable kind to effect descriptor; kinds not
/// listed keep their default effect.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> LoadResult<ConsumableCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in catalog {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<ConsumableCatalog> {
        let overrides: BTreeMap<ConsumableKind, EffectDescriptor> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse consumable RON: {}", e))?;

        let mut catalog = ConsumableCatalog::default();
        for (kind, effect) in overrides {
            if let EffectDescriptor::Projectile(spec) = effect {
                anyhow::ensure!(spec.speed > 0, "{} projectile speed must be positive", kind);
            }
            catalog.insert(kind, effect);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use game_core::StatusEffectKind;

    use super::*;

    #[test]
    fn overrides_merge_with_defaults() {
        let catalog = CatalogLoader::parse(
            "{ StrengthPotion: Buff(status: Strengthened, magnitude: 5, duration: 3000) }",
        )
        .unwrap();

        assert_eq!(
            catalog.get(ConsumableKind::StrengthPotion),
            Some(&EffectDescriptor::Buff {
                status: StatusEffectKind::Strengthened,
                magnitude: 5,
                duration: 3_000,
            })
        );
        assert_eq!(
            catalog.get(ConsumableKind::IceBomb),
            ConsumableCatalog::default().get(ConsumableKind::IceBomb)
        );
    }

    #[test]
    fn shipped_overrides_match_the_stock_table() {
        let shipped = CatalogLoader::load(std::path::Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/consumables.ron"
        )))
        .unwrap();

        assert_eq!(shipped, ConsumableCatalog::default());
        assert_eq!(
            shipped.get(ConsumableKind::LightningScroll),
            Some(&EffectDescriptor::Bolt {
                amount: 20,
                range: 5,
            })
        );
    }

    #[test]
    fn stalled_projectiles_are_rejected() {
        let bad = "{ ArrowScroll: Projectile((power: 8, speed: 0, range: 10, pattern: Aimed)) }";
        assert!(CatalogLoader::parse(bad).is_err());
    }
}
