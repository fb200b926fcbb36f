use crate::cell::GeohashCell;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use rayon::prelude::*;
use serde_json::Value;

/// Trait for converting collections of [`GeohashCell`]s to GeoJSON.
///
/// Implemented for `[GeohashCell]` and `Vec<GeohashCell>`.
pub trait GeohashCellsToGeoJson {
    /// One Polygon feature per cell, keyed by hash, with `geohash` and `precision` properties.
    fn to_feature_collection(&self) -> FeatureCollection;
    /// Serialized form of [`to_feature_collection`](Self::to_feature_collection).
    fn to_geojson_string(&self) -> String;
}

fn cell_feature(cell: &GeohashCell) -> Feature {
    let polygon = cell.to_polygon();
    let b = &cell.bounds;

    let mut properties = JsonObject::new();
    properties.insert("geohash".to_string(), Value::from(cell.hash.as_str()));
    properties.insert("precision".to_string(), Value::from(cell.precision()));

    Feature {
        bbox: Some(vec![b.west, b.south, b.east, b.north]),
        geometry: Some(geojson::Geometry::from(&polygon)),
        id: Some(Id::String(cell.hash.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

impl GeohashCellsToGeoJson for [GeohashCell] {
    fn to_feature_collection(&self) -> FeatureCollection {
        let features: Vec<Feature> = self.par_iter().map(cell_feature).collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn to_geojson_string(&self) -> String {
        self.to_feature_collection().to_string()
    }
}

impl GeohashCellsToGeoJson for Vec<GeohashCell> {
    fn to_feature_collection(&self) -> FeatureCollection {
        self.as_slice().to_feature_collection()
    }

    fn to_geojson_string(&self) -> String {
        self.as_slice().to_geojson_string()
    }
}
