//! Feature store with R-tree spatial lookup
//!
//! Features keep insertion order. Those with a geographic envelope are also
//! indexed by (longitude, latitude) for point picks and box queries.

use indexmap::IndexMap;
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};

use crate::config::BuildOptions;
use crate::error::Result;

use super::Feature;

/// R-tree entry pointing back at a feature by id
#[derive(Clone, Debug, PartialEq)]
struct IndexedFeature {
    id: String,
    bounds: AABB<[f64; 2]>,
}

impl IndexedFeature {
    fn for_feature(id: &str, feature: &Feature) -> Option<Self> {
        let (min, max) = feature.envelope()?;
        Some(Self {
            id: id.to_string(),
            bounds: AABB::from_corners(min, max),
        })
    }
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

impl rstar::PointDistance for IndexedFeature {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.bounds.distance_2(point)
    }
}

#[derive(Debug, Default)]
pub struct FeatureIndex {
    features: IndexMap<String, Feature>,
    tree: RTree<IndexedFeature>,
}

impl FeatureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Insert under `id`, returning any feature it replaces
    pub fn insert(&mut self, id: impl Into<String>, feature: Feature) -> Option<Feature> {
        let id = id.into();
        let previous = self.remove(&id);
        if let Some(entry) = IndexedFeature::for_feature(&id, &feature) {
            self.tree.insert(entry);
        }
        self.features.insert(id, feature);
        previous
    }

    pub fn remove(&mut self, id: &str) -> Option<Feature> {
        let feature = self.features.shift_remove(id)?;
        if let Some(entry) = IndexedFeature::for_feature(id, &feature) {
            self.tree.remove(&entry);
        }
        Some(feature)
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Edit a feature in place; its spatial entry is refreshed afterwards
    /// whether or not the edit succeeds
    pub fn update<F>(&mut self, id: &str, edit: F) -> Option<Result<()>>
    where
        F: FnOnce(&mut Feature) -> Result<()>,
    {
        let feature = self.features.get_mut(id)?;
        if let Some(entry) = IndexedFeature::for_feature(id, feature) {
            self.tree.remove(&entry);
        }
        let result = edit(feature);
        if let Some(entry) = IndexedFeature::for_feature(id, feature) {
            self.tree.insert(entry);
        }
        Some(result)
    }

    /// Features in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.features.iter().map(|(id, f)| (id.as_str(), f))
    }

    /// Features whose envelope contains the point, in insertion order
    pub fn locate_at(&self, longitude: f64, latitude: f64) -> Vec<&Feature> {
        let point = [longitude, latitude];
        let hits: Vec<&str> = self
            .tree
            .locate_all_at_point(&point)
            .map(|entry| entry.id.as_str())
            .collect();
        self.collect_ordered(&hits)
    }

    /// Features whose envelope intersects the box, in insertion order
    pub fn query_envelope(&self, min: [f64; 2], max: [f64; 2]) -> Vec<&Feature> {
        let query = AABB::from_corners(min, max);
        let hits: Vec<&str> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.id.as_str())
            .collect();
        self.collect_ordered(&hits)
    }

    fn collect_ordered(&self, ids: &[&str]) -> Vec<&Feature> {
        let mut indexed: Vec<(usize, &Feature)> = ids
            .iter()
            .filter_map(|id| self.features.get_full(*id).map(|(i, _, f)| (i, f)))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, f)| f).collect()
    }

    /// Rebuild every feature with new options in parallel
    ///
    /// Stops at the first failure; features rebuilt before it keep their new
    /// geometry.
    pub fn rebuild_all(&mut self, options: BuildOptions) -> Result<()> {
        let start = std::time::Instant::now();
        let features: Vec<&mut Feature> = self.features.values_mut().collect();
        let count = features.len();
        features
            .into_par_iter()
            .try_for_each(|feature| feature.rebuild(options))?;
        log::debug!(
            "rebuilt {} features in {:.2}ms",
            count,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeoLocation, PositionPrecision};
    use crate::model::{FeatureArgs, ProvidesGeometry};

    fn square_feature(id: &str, lon: f64, lat: f64, size: f64) -> Feature {
        let args = FeatureArgs {
            vertices: Some(vec![
                GeoLocation::new(lat, lon, 0.0),
                GeoLocation::new(lat, lon + size, 0.0),
                GeoLocation::new(lat + size, lon + size, 0.0),
                GeoLocation::new(lat + size, lon, 0.0),
            ]),
            ..Default::default()
        };
        Feature::new(id, args, BuildOptions::default()).unwrap()
    }

    fn sample_index() -> FeatureIndex {
        let mut index = FeatureIndex::new();
        index.insert("west", square_feature("west", 0.0, 0.0, 2.0));
        index.insert("east", square_feature("east", 10.0, 0.0, 2.0));
        index.insert("overlap", square_feature("overlap", 1.0, 1.0, 2.0));
        index
    }

    #[test]
    fn test_locate_at_point() {
        let index = sample_index();
        let ids: Vec<&str> = index.locate_at(1.5, 1.5).into_iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["west", "overlap"]);
        assert!(index.locate_at(5.0, 5.0).is_empty());
    }

    #[test]
    fn test_query_envelope() {
        let index = sample_index();
        let ids: Vec<&str> = index.query_envelope([9.0, -1.0], [20.0, 1.0]).into_iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["east"]);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut index = sample_index();
        let previous = index.insert("west", square_feature("west", 50.0, 50.0, 1.0));
        assert!(previous.is_some());
        assert_eq!(index.len(), 3);
        assert!(index.locate_at(0.5, 0.5).is_empty());
        assert_eq!(index.locate_at(50.5, 50.5).len(), 1);

        assert!(index.remove("west").is_some());
        assert!(index.locate_at(50.5, 50.5).is_empty());
        assert!(index.remove("west").is_none());
    }

    #[test]
    fn test_update_refreshes_envelope() {
        let mut index = sample_index();
        let moved = vec![
            GeoLocation::new(30.0, 30.0, 0.0),
            GeoLocation::new(30.0, 31.0, 0.0),
            GeoLocation::new(31.0, 31.0, 0.0),
        ];
        index
            .update("east", |f| match f.footprint_mut() {
                Some(p) => p.set_vertices(moved),
                None => Ok(()),
            })
            .unwrap()
            .unwrap();
        assert!(index.locate_at(11.0, 1.0).is_empty());
        assert_eq!(index.locate_at(30.9, 30.1).len(), 1);
    }

    #[test]
    fn test_rebuild_all_applies_options() {
        let mut index = sample_index();
        index
            .rebuild_all(BuildOptions::default().with_precision(PositionPrecision::Float32))
            .unwrap();
        for (_, feature) in index.iter() {
            let geometry = feature.geometry().unwrap();
            assert_eq!(geometry.positions.precision(), PositionPrecision::Float32);
        }
    }
}
