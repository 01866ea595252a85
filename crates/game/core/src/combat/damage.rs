//! Damage arithmetic.

/// Damage dealt by `attack` against `defense`: `max(0, attack - defense)`.
pub fn calculate_damage(attack: i32, defense: i32) -> u32 {
    let raw = i64::from(attack) - i64::from(defense);
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

/// Scales an attack value by `percent`, never below zero.
pub fn scale_attack(attack: i32, percent: u32) -> i32 {
    (i64::from(attack.max(0)) * i64::from(percent) / 100).min(i64::from(i32::MAX)) as i32
}
