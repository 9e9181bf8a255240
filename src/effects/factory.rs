//! Effect factory.
//!
//! Card data describes tactic effects with a flat descriptor:
//!
//! ```text
//! { "effect_type": "AREA_DAMAGE", "effect_value": 2, "radius": 1 }
//! ```
//!
//! The factory maps the `effect_type` discriminator to a constructor.
//! Additional constructors can be registered at startup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::tactic::TacticEffect;
use crate::core::CatalogError;

const DEFAULT_RADIUS: usize = 1;
const DEFAULT_DURATION: u32 = 1;

/// Flat, data-driven description of one effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    pub effect_type: String,
    #[serde(default)]
    pub effect_value: i32,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub radius: Option<usize>,
}

impl EffectDescriptor {
    #[must_use]
    pub fn new(effect_type: impl Into<String>, effect_value: i32) -> Self {
        Self {
            effect_type: effect_type.into(),
            effect_value,
            duration: None,
            radius: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// Constructor registered under a discriminator.
pub type EffectConstructor = fn(&EffectDescriptor) -> TacticEffect;

/// Discriminator table for building effects from descriptors.
#[derive(Clone, Debug)]
pub struct EffectFactory {
    constructors: FxHashMap<String, EffectConstructor>,
}

impl Default for EffectFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectFactory {
    /// Create a factory with the built-in effect types registered.
    #[must_use]
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register("AREA_DAMAGE", |d| TacticEffect::AreaDamage {
            amount: d.effect_value,
            radius: d.radius.unwrap_or(DEFAULT_RADIUS),
        });
        factory.register("AREA_HEAL", |d| TacticEffect::AreaHeal {
            amount: d.effect_value,
            radius: d.radius.unwrap_or(DEFAULT_RADIUS),
        });
        factory.register("ATTACK_BUFF", |d| TacticEffect::AttackBuff {
            amount: d.effect_value,
            duration: d.duration.unwrap_or(DEFAULT_DURATION),
            radius: d.radius.unwrap_or(DEFAULT_RADIUS),
        });
        factory.register("WEAKEN", |_| TacticEffect::Weaken);
        factory.register("PETRIFY", |d| TacticEffect::Petrify {
            min_health: (d.effect_value > 0).then_some(d.effect_value),
        });
        factory
    }

    /// Create a factory with no constructors.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: FxHashMap::default(),
        }
    }

    /// Register (or replace) a constructor.
    pub fn register(&mut self, effect_type: impl Into<String>, constructor: EffectConstructor) {
        self.constructors.insert(effect_type.into(), constructor);
    }

    #[must_use]
    pub fn supports(&self, effect_type: &str) -> bool {
        self.constructors.contains_key(effect_type)
    }

    /// Build one effect.
    pub fn build(&self, descriptor: &EffectDescriptor) -> Result<TacticEffect, CatalogError> {
        let constructor = self
            .constructors
            .get(descriptor.effect_type.as_str())
            .ok_or_else(|| CatalogError::UnknownEffectType(descriptor.effect_type.clone()))?;
        Ok(constructor(descriptor))
    }

    /// Build a compound effect from several descriptors.
    ///
    /// A single descriptor yields the plain effect rather than a one-part
    /// compound.
    pub fn build_compound(&self, descriptors: &[EffectDescriptor]) -> Result<TacticEffect, CatalogError> {
        let mut parts = descriptors
            .iter()
            .map(|d| self.build(d))
            .collect::<Result<Vec<_>, _>>()?;
        if parts.len() == 1 {
            return Ok(parts.remove(0));
        }
        Ok(TacticEffect::Compound(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        let factory = EffectFactory::new();

        let damage = factory.build(&EffectDescriptor::new("AREA_DAMAGE", 2)).unwrap();
        assert_eq!(damage, TacticEffect::AreaDamage { amount: 2, radius: 1 });

        let buff = factory
            .build(&EffectDescriptor::new("ATTACK_BUFF", 1).with_duration(3).with_radius(2))
            .unwrap();
        assert_eq!(buff, TacticEffect::AttackBuff { amount: 1, duration: 3, radius: 2 });

        let petrify = factory.build(&EffectDescriptor::new("PETRIFY", 0)).unwrap();
        assert_eq!(petrify, TacticEffect::Petrify { min_health: None });
    }

    #[test]
    fn test_unknown_type() {
        let factory = EffectFactory::new();
        let err = factory.build(&EffectDescriptor::new("METEOR", 9)).unwrap_err();
        assert_eq!(err, CatalogError::UnknownEffectType("METEOR".to_string()));
    }

    #[test]
    fn test_custom_constructor() {
        let mut factory = EffectFactory::empty();
        assert!(!factory.supports("WEAKEN"));

        factory.register("CURSE", |_| TacticEffect::Weaken);
        assert_eq!(factory.build(&EffectDescriptor::new("CURSE", 0)).unwrap(), TacticEffect::Weaken);
    }

    #[test]
    fn test_build_compound() {
        let factory = EffectFactory::new();
        let effect = factory
            .build_compound(&[EffectDescriptor::new("WEAKEN", 0), EffectDescriptor::new("AREA_DAMAGE", 1)])
            .unwrap();

        assert_eq!(
            effect,
            TacticEffect::Compound(vec![
                TacticEffect::Weaken,
                TacticEffect::AreaDamage { amount: 1, radius: 1 },
            ])
        );
    }

    #[test]
    fn test_descriptor_from_json() {
        let descriptor: EffectDescriptor =
            serde_json::from_str(r#"{"effect_type":"AREA_HEAL","effect_value":3}"#).unwrap();
        assert_eq!(descriptor.radius, None);

        let effect = EffectFactory::new().build(&descriptor).unwrap();
        assert_eq!(effect, TacticEffect::AreaHeal { amount: 3, radius: 1 });
    }
}
