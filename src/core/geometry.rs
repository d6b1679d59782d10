//! Rein-mathematische Geometrie-Funktionen: Rotation, Polygon-Tests, Winkel-Snapping.
//!
//! Alle Winkel sind in Grad angegeben und laufen im Uhrzeigersinn
//! (Bildschirm-Koordinaten, Y zeigt nach unten).

use glam::Vec2;

/// Achsenparallele Box aus Minimum- und Maximum-Ecke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Ecke mit den kleinsten Koordinaten
    pub min: Vec2,
    /// Ecke mit den größten Koordinaten
    pub max: Vec2,
}

impl Aabb {
    /// Erstellt eine Box aus zwei beliebigen Diagonal-Punkten.
    pub fn from_diagonal(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// Bestimmt das Oktanten-Band eines Winkels (0..=3) für die Ecken-Umbenennung.
///
/// Die Grenzen sind symmetrisch gewählt, damit `band(θ) + band(-θ) ≡ 0 (mod 4)` gilt:
/// 45° und 315° bleiben ohne Verschiebung, 135° und 225° gehören zu Band 2.
pub fn octant_band(angle_deg: f32) -> usize {
    let d = normalize_degrees(angle_deg, 360.0);
    if d <= 45.0 || d >= 315.0 {
        0
    } else if d < 135.0 {
        1
    } else if d <= 225.0 {
        2
    } else {
        3
    }
}

/// Rotiert einen Punkt um `center` (positiver Winkel = im Uhrzeigersinn auf dem Bildschirm).
pub fn rotate_point(point: Vec2, angle_deg: f32, center: Vec2) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let d = point - center;
    center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Rotiert eine Punktmenge um `center`.
///
/// Bei genau vier Punkten (Rechteck in der Reihenfolge UL, UR, LR, LL) werden die
/// Ecken vorher zyklisch um das Oktanten-Band verschoben, damit die Labels der
/// jeweils nächstgelegenen Original-Ecke folgen.
pub fn rotate(points: &[Vec2], angle_deg: f32, center: Vec2) -> Vec<Vec2> {
    let shift = if points.len() == 4 {
        octant_band(angle_deg)
    } else {
        0
    };
    let n = points.len();
    (0..n)
        .map(|i| rotate_point(points[(i + shift) % n], angle_deg, center))
        .collect()
}

/// Liefert die vier Ecken eines Rechtecks (UL, UR, LR, LL) um ein Zentrum.
pub fn rect_corners(center: Vec2, size: Vec2) -> [Vec2; 4] {
    let h = size * 0.5;
    [
        Vec2::new(center.x - h.x, center.y - h.y),
        Vec2::new(center.x + h.x, center.y - h.y),
        Vec2::new(center.x + h.x, center.y + h.y),
        Vec2::new(center.x - h.x, center.y + h.y),
    ]
}

/// Prüft ob ein Punkt innerhalb eines Polygons liegt (Ray-Casting, Paritäts-Test).
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];

    for &current in polygon {
        let crosses = (current.y > point.y) != (previous.y > point.y);
        if crosses {
            let x_at_y = (previous.x - current.x) * (point.y - current.y)
                / (previous.y - current.y)
                + current.x;
            if point.x < x_at_y {
                inside = !inside;
            }
        }
        previous = current;
    }

    inside
}

/// Prüft zwei Boxen auf Überlappung.
///
/// Wahr, außer eine Min-Ecke liegt auf einer Achse jenseits der Max-Ecke der anderen Box.
pub fn boxes_overlap(a: Aabb, b: Aabb) -> bool {
    !(a.min.x > b.max.x || b.min.x > a.max.x || a.min.y > b.max.y || b.min.y > a.max.y)
}

/// Projektionsparameter `t` von `p` auf die Gerade `a→b` (nicht geklemmt).
///
/// Bei Segmentlänge 0 wird 0 zurückgegeben.
pub fn segment_param(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return 0.0;
    }
    (p - a).dot(ab) / len_sq
}

/// Nächster Punkt auf dem Segment `a→b` zu `p`. Ein Segment der Länge 0 liefert `a`.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let t = segment_param(a, b, p).clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Rastet einen Winkel auf das nächste Vielfache von `step` ein.
pub fn snap_angle(deg: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return deg;
    }
    (deg / step).round() * step
}

/// Normalisiert einen Wert in das Intervall `[0, modulus)`.
pub fn normalize_degrees(x: f32, modulus: f32) -> f32 {
    let r = x.rem_euclid(modulus);
    // rem_euclid kann bei sehr kleinen negativen Werten exakt `modulus` liefern
    if r >= modulus {
        0.0
    } else {
        r
    }
}

/// Winkel des Zeigers relativ zu einem Zentrum, so dass ein Griff direkt über
/// dem Zentrum 0° ergibt, eingerastet auf `step` und auf `[0, 360)` normalisiert.
pub fn handle_angle(center: Vec2, pointer: Vec2, step: f32) -> i32 {
    let d = pointer - center;
    let raw = d.y.atan2(d.x).to_degrees() + 90.0;
    normalize_degrees(snap_angle(raw, step), 360.0).round() as i32 % 360
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_rect() -> Vec<Vec2> {
        rect_corners(Vec2::new(10.0, 20.0), Vec2::new(56.0, 30.0)).to_vec()
    }

    #[test]
    fn rotate_and_back_restores_points_for_all_angles() {
        let rect = unit_rect();
        let center = Vec2::new(10.0, 20.0);
        for deg in 0..360 {
            let theta = deg as f32;
            let there = rotate(&rect, theta, center);
            let back = rotate(&there, -theta, center);
            for (orig, restored) in rect.iter().zip(back.iter()) {
                assert_relative_eq!(orig.x, restored.x, epsilon = 1e-3);
                assert_relative_eq!(orig.y, restored.y, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn rotate_relabels_corners_by_octant() {
        let rect = unit_rect();
        let center = Vec2::new(10.0, 20.0);
        let rotated = rotate(&rect, 90.0, center);
        // UL-Label folgt nach 90° der ursprünglichen UR-Ecke
        let expected = rotate_point(rect[1], 90.0, center);
        assert_relative_eq!(rotated[0].x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(rotated[0].y, expected.y, epsilon = 1e-4);
    }

    #[test]
    fn rotate_leaves_non_rectangles_unlabeled() {
        let pts = vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        let rotated = rotate(&pts, 90.0, Vec2::ZERO);
        assert_relative_eq!(rotated[0].x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(rotated[0].y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn octant_bands_are_symmetric() {
        for deg in 0..360 {
            let d = deg as f32;
            assert_eq!((octant_band(d) + octant_band(-d)) % 4, 0, "Winkel {deg}");
        }
        assert_eq!(octant_band(0.0), 0);
        assert_eq!(octant_band(90.0), 1);
        assert_eq!(octant_band(180.0), 2);
        assert_eq!(octant_band(270.0), 3);
    }

    #[test]
    fn point_in_polygon_square() {
        let square = rect_corners(Vec2::ZERO, Vec2::splat(10.0));
        assert!(point_in_polygon(Vec2::new(1.0, 1.0), &square));
        assert!(!point_in_polygon(Vec2::new(6.0, 0.0), &square));
        assert!(!point_in_polygon(Vec2::ZERO, &square[..2]));
    }

    #[test]
    fn boxes_overlap_and_separate() {
        let a = Aabb::from_diagonal(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_diagonal(Vec2::splat(5.0), Vec2::splat(15.0));
        let c = Aabb::from_diagonal(Vec2::new(11.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(boxes_overlap(a, b));
        assert!(!boxes_overlap(a, c));
        // Berührende Kanten zählen als Überlappung
        let d = Aabb::from_diagonal(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(boxes_overlap(a, d));
    }

    #[test]
    fn closest_point_projects_and_clamps() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(closest_point_on_segment(a, b, Vec2::new(4.0, 3.0)), Vec2::new(4.0, 0.0));
        assert_eq!(closest_point_on_segment(a, b, Vec2::new(-4.0, 3.0)), a);
        assert_eq!(closest_point_on_segment(a, b, Vec2::new(14.0, 3.0)), b);
        assert_eq!(closest_point_on_segment(a, a, Vec2::new(4.0, 3.0)), a);
    }

    #[test]
    fn snap_and_normalize() {
        assert_relative_eq!(snap_angle(47.4, 5.0), 45.0);
        assert_relative_eq!(snap_angle(47.6, 5.0), 50.0);
        assert_relative_eq!(normalize_degrees(-5.0, 360.0), 355.0);
        assert_relative_eq!(normalize_degrees(725.0, 360.0), 5.0);
        assert_relative_eq!(normalize_degrees(360.0, 360.0), 0.0);
        assert!(normalize_degrees(-1e-9, 360.0) < 360.0);
    }

    #[test]
    fn handle_angle_above_is_zero_and_right_is_ninety() {
        let c = Vec2::new(100.0, 100.0);
        assert_eq!(handle_angle(c, Vec2::new(100.0, 50.0), 5.0), 0);
        assert_eq!(handle_angle(c, Vec2::new(150.0, 100.0), 5.0), 90);
        assert_eq!(handle_angle(c, Vec2::new(100.0, 150.0), 5.0), 180);
        assert_eq!(handle_angle(c, Vec2::new(50.0, 100.0), 5.0), 270);
        // 2° neben der Senkrechten rastet auf 0 ein
        assert_eq!(handle_angle(c, Vec2::new(101.5, 50.0), 5.0), 0);
    }
}
