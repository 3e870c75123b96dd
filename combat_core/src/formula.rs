//! Combat formulas
//!
//! All math is integer. Ability power is carried in tenths (1.8 -> 18) so
//! level scaling and damage floor exactly, without float drift.

/// Ability power in tenths after level scaling.
///
/// `floor(power * (1 + (level - 1) * scaling%) * 10)`
pub fn scaled_power_tenths(power: f64, level: u32, scaling_percent: i32) -> i64 {
    let base_tenths = (power * 10.0).round() as i64;
    let levels = i64::from(level.max(1) - 1);
    (base_tenths * (100 + i64::from(scaling_percent) * levels)).div_euclid(100)
}

/// Attack damage:
/// `max(1, floor(attack * power - defense * (100 - pen)% / 2))`
pub fn attack_damage(attack: i32, power_tenths: i64, defense: i32, penetration: i32) -> i32 {
    let penetration = i64::from(penetration.clamp(0, 100));
    let offense = i64::from(attack) * power_tenths * 20;
    let mitigation = i64::from(defense) * (100 - penetration);
    clamp_i32(((offense - mitigation).div_euclid(200)).max(1))
}

/// Crit damage: `floor(damage * (base + bonus) / 100)`
pub fn crit_damage(damage: i32, base_percent: i32, bonus_percent: i32) -> i32 {
    let multiplier = i64::from(base_percent + bonus_percent).max(0);
    clamp_i32((i64::from(damage) * multiplier).div_euclid(100))
}

/// Monster damage: `max(1, floor(attack - reduction - defense * multiplier / 2))`
pub fn monster_damage(attack: i32, attack_reduction: i32, defense: i32, defense_multiplier: i32) -> i32 {
    let offense = 2 * i64::from(attack - attack_reduction);
    let mitigation = i64::from(defense) * i64::from(defense_multiplier);
    clamp_i32(((offense - mitigation).div_euclid(2)).max(1))
}

/// `floor(value * percent / 100)`
pub fn percent_of(value: i32, percent: i32) -> i32 {
    clamp_i32((i64::from(value) * i64::from(percent)).div_euclid(100))
}

/// Speed after a slow: `floor(speed * (100 - slow) / 100)`
pub fn slowed_speed(speed: i32, slow_percent: i32) -> i32 {
    let slow = slow_percent.clamp(0, 100);
    percent_of(speed, 100 - slow)
}

/// Heal amount of a heal ability: whole HP of the scaled power
pub fn heal_amount(power_tenths: i64) -> i32 {
    clamp_i32(power_tenths.div_euclid(10))
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
