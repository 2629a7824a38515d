// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Distance-scan to point-cloud conversion.
//!
//! A [`DistanceScan`] holds a flat sample array tagged with a [`ScanFormat`]
//! and a [`ScanUnit`]. Cartesian points, the 3D bounding box, and the
//! best-fit display plane are derived caches, rebuilt lazily after any
//! sample or format change.

use serde::Serialize;

use crate::core::{Point2, Rect, Result, VizError};

/// Sample layout of a scan's raw value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanFormat {
    /// One value per sample: a distance along a uniform angular sweep.
    Distance,
    /// Two values per sample: `(angle, distance)`.
    Polar2d,
    /// Three values per sample: `(polar angle, azimuth, distance)`.
    Polar3d,
    /// Two values per sample: `(x, y)`.
    Cartesian2d,
    /// Three values per sample: `(x, y, z)`.
    Cartesian3d,
}

impl ScanFormat {
    /// Values consumed per sample.
    pub fn components(&self) -> usize {
        match self {
            ScanFormat::Distance => 1,
            ScanFormat::Polar2d | ScanFormat::Cartesian2d => 2,
            ScanFormat::Polar3d | ScanFormat::Cartesian3d => 3,
        }
    }
}

/// Physical unit of distance values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanUnit {
    Millimeter,
    Centimeter,
    Meter,
}

impl ScanUnit {
    /// Conversion factor to meters.
    pub fn to_meters(&self) -> f64 {
        match self {
            ScanUnit::Millimeter => 1e-3,
            ScanUnit::Centimeter => 1e-2,
            ScanUnit::Meter => 1.0,
        }
    }
}

/// 2D display plane chosen for a 3D point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewPlane {
    Xy,
    Xz,
    Yz,
}

/// A point of the derived Cartesian cloud, always 3D (Z zero-filled for
/// planar scans).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

/// Derived state, rebuilt as a unit.
struct ScanCache {
    points: Vec<Point3>,
    min: [f64; 3],
    max: [f64; 3],
    plane: ViewPlane,
}

/// A distance scan with lazily derived Cartesian points and bounds.
pub struct DistanceScan {
    format: ScanFormat,
    unit: ScanUnit,
    samples: Vec<f64>,
    cache: Option<ScanCache>,
}

impl DistanceScan {
    pub fn new(format: ScanFormat, unit: ScanUnit) -> Self {
        DistanceScan {
            format,
            unit,
            samples: Vec::new(),
            cache: None,
        }
    }

    pub fn format(&self) -> ScanFormat {
        self.format
    }

    pub fn unit(&self) -> ScanUnit {
        self.unit
    }

    /// Raw sample values, `components()` per point.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Replace the raw samples. Fails when the value count is not a multiple
    /// of the format's component count; the previous samples are kept.
    pub fn set_samples(&mut self, samples: Vec<f64>) -> Result<()> {
        if samples.len() % self.format.components() != 0 {
            return Err(VizError::sample_count_mismatch(
                samples.len(),
                self.format.components(),
            ));
        }
        self.samples = samples;
        self.cache = None;
        Ok(())
    }

    /// Change the sample layout. Fails when the existing samples do not
    /// divide evenly into the new format.
    pub fn set_format(&mut self, format: ScanFormat) -> Result<()> {
        if self.samples.len() % format.components() != 0 {
            return Err(VizError::sample_count_mismatch(
                self.samples.len(),
                format.components(),
            ));
        }
        self.format = format;
        self.cache = None;
        Ok(())
    }

    pub fn set_unit(&mut self, unit: ScanUnit) {
        self.unit = unit;
        self.cache = None;
    }

    /// Number of points in the scan.
    pub fn len(&self) -> usize {
        self.samples.len() / self.format.components()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Derived Cartesian points in meters.
    pub fn cartesian_points(&mut self) -> &[Point3] {
        &self.ensure_cache().points
    }

    /// Best-fit 2D display plane for the cloud.
    pub fn view_plane(&mut self) -> ViewPlane {
        self.ensure_cache().plane
    }

    /// Axis-aligned bounds projected onto the chosen display plane.
    pub fn display_bounds(&mut self) -> Rect {
        let cache = self.ensure_cache();
        if cache.points.is_empty() {
            return Rect::empty();
        }
        let (a, b) = plane_axes(cache.plane);
        Rect::new(
            cache.min[a],
            cache.min[b],
            cache.max[a] - cache.min[a],
            cache.max[b] - cache.min[b],
        )
    }

    /// Points projected onto the chosen display plane.
    pub fn display_points(&mut self) -> Vec<Point2> {
        let cache = self.ensure_cache();
        let (a, b) = plane_axes(cache.plane);
        cache
            .points
            .iter()
            .map(|p| {
                let v = [p.x, p.y, p.z];
                Point2::new(v[a], v[b])
            })
            .collect()
    }

    fn ensure_cache(&mut self) -> &ScanCache {
        let (format, unit) = (self.format, self.unit);
        let samples = &self.samples;
        self.cache
            .get_or_insert_with(|| build_cache(format, unit, samples))
    }
}

fn plane_axes(plane: ViewPlane) -> (usize, usize) {
    match plane {
        ViewPlane::Xy => (0, 1),
        ViewPlane::Xz => (0, 2),
        ViewPlane::Yz => (1, 2),
    }
}

fn build_cache(format: ScanFormat, unit: ScanUnit, samples: &[f64]) -> ScanCache {
    let scale = unit.to_meters();
    let components = format.components();
    let count = samples.len() / components;
    let mut points = Vec::with_capacity(count);
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];

    for (i, sample) in samples.chunks_exact(components).enumerate() {
        let p = match format {
            ScanFormat::Distance => {
                // uniform sweep -90..+90 degrees, single sample straight ahead
                let angle = if count > 1 {
                    -std::f64::consts::FRAC_PI_2
                        + std::f64::consts::PI * i as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                let d = sample[0] * scale;
                Point3::new(d * angle.sin(), d * angle.cos(), 0.0)
            }
            ScanFormat::Polar2d => {
                let (angle, d) = (sample[0], sample[1] * scale);
                Point3::new(d * angle.sin(), d * angle.cos(), 0.0)
            }
            ScanFormat::Polar3d => {
                let (polar, azimuth, d) = (sample[0], sample[1], sample[2] * scale);
                Point3::new(
                    d * polar.sin() * azimuth.cos(),
                    d * polar.sin() * azimuth.sin(),
                    d * polar.cos(),
                )
            }
            ScanFormat::Cartesian2d => Point3::new(sample[0] * scale, sample[1] * scale, 0.0),
            ScanFormat::Cartesian3d => {
                Point3::new(sample[0] * scale, sample[1] * scale, sample[2] * scale)
            }
        };
        for (axis, v) in [p.x, p.y, p.z].into_iter().enumerate() {
            min[axis] = min[axis].min(v);
            max[axis] = max[axis].max(v);
        }
        points.push(p);
    }

    let plane = if points.is_empty() {
        ViewPlane::Xy
    } else {
        choose_plane(&min, &max)
    };
    ScanCache {
        points,
        min,
        max,
        plane,
    }
}

/// Pick the display plane: when one axis extent dominates both others by at
/// least 10x, use the plane spanned by the two largest extents, otherwise XY.
fn choose_plane(min: &[f64; 3], max: &[f64; 3]) -> ViewPlane {
    let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let dominant = (0..3).find(|&i| {
        let others = [extent[(i + 1) % 3], extent[(i + 2) % 3]];
        extent[i] >= 10.0 * others[0] && extent[i] >= 10.0 * others[1]
    });
    let Some(i) = dominant else {
        return ViewPlane::Xy;
    };
    let (j, k) = ((i + 1) % 3, (i + 2) % 3);
    let second = if extent[j] >= extent[k] { j } else { k };
    match (i.min(second), i.max(second)) {
        (0, 1) => ViewPlane::Xy,
        (0, 2) => ViewPlane::Xz,
        _ => ViewPlane::Yz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicircle_from_uniform_distances() {
        let mut scan = DistanceScan::new(ScanFormat::Distance, ScanUnit::Meter);
        scan.set_samples(vec![1.0, 1.0, 1.0]).unwrap();
        let pts = scan.cartesian_points().to_vec();
        assert_eq!(pts.len(), 3);
        assert!((pts[0].x + 1.0).abs() < 1e-12 && pts[0].y.abs() < 1e-12);
        assert!(pts[1].x.abs() < 1e-12 && (pts[1].y - 1.0).abs() < 1e-12);
        assert!((pts[2].x - 1.0).abs() < 1e-12 && pts[2].y.abs() < 1e-12);

        let bounds = scan.display_bounds();
        assert!((bounds.x + 1.0).abs() < 1e-12);
        assert!(bounds.y.abs() < 1e-12);
        assert!((bounds.width - 2.0).abs() < 1e-12);
        assert!((bounds.height - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_points_straight_ahead() {
        let mut scan = DistanceScan::new(ScanFormat::Distance, ScanUnit::Meter);
        scan.set_samples(vec![2.0]).unwrap();
        let p = scan.cartesian_points()[0];
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_scaling() {
        let mut scan = DistanceScan::new(ScanFormat::Distance, ScanUnit::Millimeter);
        scan.set_samples(vec![1500.0]).unwrap();
        assert!((scan.cartesian_points()[0].y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_cartesian_zero_fills_z() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian2d, ScanUnit::Meter);
        scan.set_samples(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let pts = scan.cartesian_points();
        assert_eq!(pts[0], Point3::new(1.0, 2.0, 0.0));
        assert_eq!(pts[1], Point3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_polar3d_spherical_conversion() {
        let mut scan = DistanceScan::new(ScanFormat::Polar3d, ScanUnit::Meter);
        // polar pi/2, azimuth 0, distance 2 -> along +X
        scan.set_samples(vec![std::f64::consts::FRAC_PI_2, 0.0, 2.0])
            .unwrap();
        let p = scan.cartesian_points()[0];
        assert!((p.x - 2.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_sample_count_mismatch_rejected() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian3d, ScanUnit::Meter);
        assert!(scan.set_samples(vec![1.0, 2.0]).is_err());
        assert!(scan.samples().is_empty());
    }

    #[test]
    fn test_format_change_invalidates_cache() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian2d, ScanUnit::Meter);
        scan.set_samples(vec![3.0, 4.0]).unwrap();
        assert_eq!(scan.cartesian_points()[0], Point3::new(3.0, 4.0, 0.0));
        scan.set_format(ScanFormat::Polar2d).unwrap();
        // (angle=3, distance=4) now
        let p = scan.cartesian_points()[0];
        assert!((p.x - 4.0 * 3.0f64.sin()).abs() < 1e-12);
        assert!((p.y - 4.0 * 3.0f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_plane_defaults_to_xy() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian3d, ScanUnit::Meter);
        scan.set_samples(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(scan.view_plane(), ViewPlane::Xy);
    }

    #[test]
    fn test_dominant_z_selects_plane_of_two_largest() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian3d, ScanUnit::Meter);
        // z spans 100, x spans 2, y spans 1 -> XZ
        scan.set_samples(vec![0.0, 0.0, 0.0, 2.0, 1.0, 100.0]).unwrap();
        assert_eq!(scan.view_plane(), ViewPlane::Xz);
    }

    #[test]
    fn test_dominant_x_with_larger_z_selects_xz() {
        let mut scan = DistanceScan::new(ScanFormat::Cartesian3d, ScanUnit::Meter);
        // x spans 100, y spans 1, z spans 5 -> plane of x and z
        scan.set_samples(vec![0.0, 0.0, 0.0, 100.0, 1.0, 5.0]).unwrap();
        assert_eq!(scan.view_plane(), ViewPlane::Xz);
    }

    #[test]
    fn test_empty_scan_bounds() {
        let mut scan = DistanceScan::new(ScanFormat::Distance, ScanUnit::Meter);
        assert!(scan.display_bounds().is_empty());
        assert!(scan.cartesian_points().is_empty());
    }
}
