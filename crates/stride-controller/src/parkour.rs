//! Deterministic parkour proximity probe.

use glam::Vec3;

use crate::collaborators::ParkourQuery;

/// Object tags that make something a parkour target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkourTag {
    Vault,
    DeepJump,
    Slide,
    Reach,
    Pole,
}

/// A world object the probe can see, approximated by a bounding sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkourObject {
    pub center: Vec3,
    pub extent: f32,
    /// Layer index, 0..32.
    pub layer: u8,
    pub tag: Option<ParkourTag>,
}

impl ParkourObject {
    /// A tagged object on layer 0.
    #[must_use]
    pub fn tagged(tag: ParkourTag, center: Vec3, extent: f32) -> Self {
        Self {
            center,
            extent,
            layer: 0,
            tag: Some(tag),
        }
    }

    #[must_use]
    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    fn in_mask(&self, layer_mask: u32) -> bool {
        1u32.checked_shl(u32::from(self.layer))
            .is_some_and(|bit| layer_mask & bit != 0)
    }

    fn overlaps(&self, position: Vec3, radius: f32) -> bool {
        self.center.distance(position) <= radius + self.extent
    }
}

/// Sphere-overlap query over a fixed list of objects.
#[derive(Debug, Clone, Default)]
pub struct ParkourProximityProbe {
    objects: Vec<ParkourObject>,
}

impl ParkourProximityProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: ParkourObject) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    #[must_use]
    pub fn objects(&self) -> &[ParkourObject] {
        &self.objects
    }
}

impl FromIterator<ParkourObject> for ParkourProximityProbe {
    fn from_iter<I: IntoIterator<Item = ParkourObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl ParkourQuery for ParkourProximityProbe {
    fn query_nearby(&self, position: Vec3, radius: f32, layer_mask: u32) -> bool {
        self.objects.iter().any(|o| {
            o.tag.is_some() && o.in_mask(layer_mask) && o.overlaps(position, radius)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_with(object: ParkourObject) -> ParkourProximityProbe {
        std::iter::once(object).collect()
    }

    #[test]
    fn test_object_in_range_is_found() {
        let probe = probe_with(ParkourObject::tagged(
            ParkourTag::Vault,
            Vec3::new(0.0, 0.0, 4.0),
            0.5,
        ));
        assert!(probe.query_nearby(Vec3::ZERO, 5.0, u32::MAX));
        assert!(!probe.query_nearby(Vec3::new(0.0, 0.0, -2.0), 5.0, u32::MAX));
    }

    #[test]
    fn test_extent_counts_toward_overlap() {
        let probe = probe_with(ParkourObject::tagged(
            ParkourTag::Pole,
            Vec3::new(6.0, 0.0, 0.0),
            1.0,
        ));
        assert!(probe.query_nearby(Vec3::ZERO, 5.0, u32::MAX));
        assert!(!probe.query_nearby(Vec3::ZERO, 4.5, u32::MAX));
    }

    #[test]
    fn test_untagged_object_ignored() {
        let probe = probe_with(ParkourObject {
            center: Vec3::ZERO,
            extent: 1.0,
            layer: 0,
            tag: None,
        });
        assert!(!probe.query_nearby(Vec3::ZERO, 5.0, u32::MAX));
    }

    #[test]
    fn test_layer_mask_filters() {
        let probe = probe_with(
            ParkourObject::tagged(ParkourTag::Slide, Vec3::ZERO, 1.0).on_layer(3),
        );
        assert!(probe.query_nearby(Vec3::ZERO, 1.0, 1 << 3));
        assert!(!probe.query_nearby(Vec3::ZERO, 1.0, 1 << 2));
        assert!(!probe.query_nearby(Vec3::ZERO, 1.0, 0));
    }

    #[test]
    fn test_out_of_range_layer_never_matches() {
        let probe = probe_with(
            ParkourObject::tagged(ParkourTag::Reach, Vec3::ZERO, 1.0).on_layer(40),
        );
        assert!(!probe.query_nearby(Vec3::ZERO, 1.0, u32::MAX));
    }
}
