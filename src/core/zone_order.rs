//! Einfüge-Reihenfolge eines Sensors in eine Sensor-Zone.
//!
//! Die Zonen-Rotation wird auf eines von vier Quadranten-Bändern abgebildet,
//! das eine (ggf. vorzeichen-umgekehrte) X- oder Y-Koordinate als Sortier-
//! schlüssel festlegt. Verglichen werden rohe Koordinaten, nicht die Distanz
//! entlang der rotierten Zonenachse; nahe den Bandgrenzen ist das eine
//! bekannte Näherung.

use glam::Vec2;

use super::geometry::{closest_point_on_segment, normalize_degrees};

/// Lage des Ablagepunkts relativ zu den vorhandenen Mitgliedern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Zone ist leer
    Only,
    /// Vor allen Mitgliedern
    Before,
    /// Zwischen zwei Mitgliedern
    Between,
    /// Hinter allen Mitgliedern
    After,
}

/// Quadranten-Band der Zonen-Rotation (0–45/315–360, 45–135, 135–225, 225–315).
pub fn quadrant_band(rotation_deg: i32) -> usize {
    let d = normalize_degrees(rotation_deg as f32, 360.0);
    if !(45.0..315.0).contains(&d) {
        0
    } else if d < 135.0 {
        1
    } else if d < 225.0 {
        2
    } else {
        3
    }
}

/// Sortierschlüssel eines Punkts für das Band der Zonen-Rotation.
pub fn order_key(p: Vec2, rotation_deg: i32) -> f32 {
    match quadrant_band(rotation_deg) {
        0 => p.x,
        1 => p.y,
        2 => -p.x,
        _ => -p.y,
    }
}

/// Klassifiziert den Ablagepunkt gegenüber 0, 1 oder 2 vorhandenen Mitgliedern.
pub fn classify(drop: Vec2, rotation_deg: i32, members: &[Vec2]) -> Placement {
    let key = |p: Vec2| order_key(p, rotation_deg);
    match members {
        [] => Placement::Only,
        [single] => {
            if key(drop) < key(*single) {
                Placement::Before
            } else {
                Placement::After
            }
        }
        [first, .., last] => {
            let projected = closest_point_on_segment(*first, *last, drop);
            if key(projected) <= key(*first) {
                Placement::Before
            } else if key(projected) >= key(*last) {
                Placement::After
            } else {
                Placement::Between
            }
        }
    }
}

/// Einfüge-Index für einen Ablagepunkt (0 ..= members.len()).
pub fn insertion_index(drop: Vec2, rotation_deg: i32, members: &[Vec2]) -> usize {
    match classify(drop, rotation_deg, members) {
        Placement::Only | Placement::Before => 0,
        Placement::Between => 1,
        Placement::After => members.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_zone_inserts_directly() {
        assert_eq!(insertion_index(Vec2::new(5.0, 5.0), 0, &[]), 0);
        assert_eq!(classify(Vec2::ZERO, 0, &[]), Placement::Only);
    }

    #[test]
    fn single_member_compares_by_band_axis() {
        let m = [Vec2::new(100.0, 100.0)];
        assert_eq!(insertion_index(Vec2::new(150.0, 0.0), 0, &m), 1);
        assert_eq!(insertion_index(Vec2::new(50.0, 0.0), 0, &m), 0);
        // 90°: Y-Achse entscheidet
        assert_eq!(insertion_index(Vec2::new(50.0, 150.0), 90, &m), 1);
        // 180°: X umgekehrt
        assert_eq!(insertion_index(Vec2::new(150.0, 0.0), 180, &m), 0);
        // 270°: Y umgekehrt
        assert_eq!(insertion_index(Vec2::new(0.0, 150.0), 270, &m), 0);
    }

    #[test]
    fn two_members_before_between_after() {
        let m = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
        assert_eq!(classify(Vec2::new(-20.0, 10.0), 0, &m), Placement::Before);
        assert_eq!(classify(Vec2::new(40.0, -10.0), 0, &m), Placement::Between);
        assert_eq!(classify(Vec2::new(130.0, 5.0), 0, &m), Placement::After);
        assert_eq!(insertion_index(Vec2::new(40.0, -10.0), 0, &m), 1);
        assert_eq!(insertion_index(Vec2::new(130.0, 5.0), 0, &m), 2);
    }

    #[test]
    fn bands_wrap_around() {
        assert_eq!(quadrant_band(0), 0);
        assert_eq!(quadrant_band(44), 0);
        assert_eq!(quadrant_band(45), 1);
        assert_eq!(quadrant_band(134), 1);
        assert_eq!(quadrant_band(135), 2);
        assert_eq!(quadrant_band(225), 3);
        assert_eq!(quadrant_band(315), 0);
        assert_eq!(quadrant_band(-30), 0);
    }
}
