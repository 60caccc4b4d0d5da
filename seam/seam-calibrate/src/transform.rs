//! The closed candidate tables: axis remaps and origin policies.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis permutation/reflection between two authoring conventions.
///
/// Point sets drawn in a Y-up viewer frame land in a Z-up model frame
/// under one of two remaps, depending on which way the viewer's depth
/// axis was oriented. Together with [`Identity`](Self::Identity) these
/// form the whole search space; calibration is a table lookup, not a
/// solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisRemap {
    /// Leave coordinates untouched.
    #[default]
    Identity,
    /// Y-up to Z-up: `(x, y, z) -> (x, -z, y)`.
    YUpToZUp,
    /// Y-up to Z-up, mirrored depth: `(x, y, z) -> (x, z, -y)`.
    YUpToZUpNeg,
}

impl AxisRemap {
    /// All remaps, in deterministic search order.
    pub const ALL: [Self; 3] = [Self::Identity, Self::YUpToZUp, Self::YUpToZUpNeg];

    /// Apply the remap to a point.
    #[inline]
    #[must_use]
    pub fn apply(self, p: &Point3<f64>) -> Point3<f64> {
        match self {
            Self::Identity => *p,
            Self::YUpToZUp => Point3::new(p.x, -p.z, p.y),
            Self::YUpToZUpNeg => Point3::new(p.x, p.z, -p.y),
        }
    }
}

/// How the point set's origin relates to the model's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OriginPolicy {
    /// Points are already in the model's frame.
    #[default]
    AsIs,
    /// Points are relative to the model's bounding-box centre and are
    /// translated by it.
    ModelBboxCenter,
}

impl OriginPolicy {
    /// All policies, in deterministic search order.
    pub const ALL: [Self; 2] = [Self::AsIs, Self::ModelBboxCenter];

    /// Apply the policy to a point.
    #[inline]
    #[must_use]
    pub fn apply(self, p: &Point3<f64>, bbox_center: &Point3<f64>) -> Point3<f64> {
        match self {
            Self::AsIs => *p,
            Self::ModelBboxCenter => p + Vector3::from(bbox_center.coords),
        }
    }
}

/// Request-side axis mode: pinned remap or automatic search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisSpec {
    /// Search all remaps.
    #[default]
    Auto,
    /// Pin to [`AxisRemap::Identity`].
    Identity,
    /// Pin to [`AxisRemap::YUpToZUp`].
    YUpToZUp,
    /// Pin to [`AxisRemap::YUpToZUpNeg`].
    YUpToZUpNeg,
}

impl AxisSpec {
    /// The remaps this mode searches over.
    #[must_use]
    pub fn candidates(self) -> &'static [AxisRemap] {
        match self {
            Self::Auto => &AxisRemap::ALL,
            Self::Identity => &[AxisRemap::Identity],
            Self::YUpToZUp => &[AxisRemap::YUpToZUp],
            Self::YUpToZUpNeg => &[AxisRemap::YUpToZUpNeg],
        }
    }
}

/// Request-side origin mode: pinned policy or automatic search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OriginSpec {
    /// Search all policies.
    #[default]
    Auto,
    /// Pin to [`OriginPolicy::AsIs`].
    AsIs,
    /// Pin to [`OriginPolicy::ModelBboxCenter`].
    ModelBboxCenter,
}

impl OriginSpec {
    /// The policies this mode searches over.
    #[must_use]
    pub fn candidates(self) -> &'static [OriginPolicy] {
        match self {
            Self::Auto => &OriginPolicy::ALL,
            Self::AsIs => &[OriginPolicy::AsIs],
            Self::ModelBboxCenter => &[OriginPolicy::ModelBboxCenter],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaps_are_involutions_up_to_sign() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisRemap::Identity.apply(&p), p);
        assert_eq!(AxisRemap::YUpToZUp.apply(&p), Point3::new(1.0, -3.0, 2.0));
        assert_eq!(AxisRemap::YUpToZUpNeg.apply(&p), Point3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn origin_policy_translation() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let center = Point3::new(10.0, 0.0, -10.0);
        assert_eq!(OriginPolicy::AsIs.apply(&p, &center), p);
        assert_eq!(
            OriginPolicy::ModelBboxCenter.apply(&p, &center),
            Point3::new(11.0, 1.0, -9.0)
        );
    }

    #[test]
    fn pinned_specs_search_one_candidate() {
        assert_eq!(AxisSpec::Auto.candidates().len(), 3);
        assert_eq!(AxisSpec::YUpToZUp.candidates(), &[AxisRemap::YUpToZUp]);
        assert_eq!(OriginSpec::Auto.candidates().len(), 2);
        assert_eq!(OriginSpec::AsIs.candidates(), &[OriginPolicy::AsIs]);
    }
}
