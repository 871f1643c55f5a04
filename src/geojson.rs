//! GeoJSON object factory for plugging into a generic JSON decoder.
//!
//! A decoder that turns JSON text into key/value maps can be handed an
//! [`ObjectFactory`] to upgrade those maps into domain values as it goes.
//! [`GeoJsonFactory`] is the factory for [RFC 7946] GeoJSON: it recognizes
//! the seven geometry types plus `Feature` and `FeatureCollection`, keeps
//! coordinates in the `[longitude, latitude]` order the format mandates,
//! and degrades unrecognized or malformed objects to the plain map rather
//! than failing the surrounding document.
//!
//! [RFC 7946]: https://datatracker.ietf.org/doc/html/rfc7946

use crate::error::Error;
use crate::location::Location;
use serde_json::{Map, Value};

/// Builds a domain value from one decoded JSON object.
///
/// Generic JSON decoders depend on this seam alone, so they can stay
/// ignorant of GIS types while still producing them.
pub trait ObjectFactory {
    type Output;

    fn from_object(&self, object: Map<String, Value>) -> Self::Output;
}

/// One coordinate pair, in GeoJSON's `[longitude, latitude]` axis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    fn from_value(value: &Value) -> Option<Self> {
        let array = value.as_array()?;
        Some(Self {
            longitude: array.first()?.as_f64()?,
            latitude: array.get(1)?.as_f64()?,
        })
    }

    /// Converts to a [`Location`], validating the ranges on the way.
    pub fn to_location(&self) -> Result<Location, Error> {
        Location::dd(self.latitude, self.longitude)
    }
}

/// A `bbox` member: south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Position,
    pub max: Position,
}

impl BoundingBox {
    fn from_value(value: &Value) -> Option<Self> {
        let array = value.as_array()?;
        if array.len() != 4 {
            return None;
        }
        let corner = |lon: &Value, lat: &Value| {
            Some(Position {
                longitude: lon.as_f64()?,
                latitude: lat.as_f64()?,
            })
        };
        Some(Self {
            min: corner(&array[0], &array[1])?,
            max: corner(&array[2], &array[3])?,
        })
    }
}

/// One of the seven GeoJSON geometry types.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
}

/// A GeoJSON feature: optional geometry plus free-form properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Map<String, Value>,
    pub bbox: Option<BoundingBox>,
    pub id: Option<Value>,
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub bbox: Option<BoundingBox>,
}

/// What [`GeoJsonFactory`] built from a decoded object.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoValue {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    /// The object carried no usable `type`; the map passes through
    /// untouched.
    Other(Map<String, Value>),
}

/// The GeoJSON [`ObjectFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonFactory;

impl ObjectFactory for GeoJsonFactory {
    type Output = GeoValue;

    fn from_object(&self, object: Map<String, Value>) -> GeoValue {
        build(object)
    }
}

fn build(object: Map<String, Value>) -> GeoValue {
    let Some(type_name) = object.get("type").and_then(Value::as_str).map(str::to_owned) else {
        tracing::warn!("object carries no type; passing it through as a plain map");
        return GeoValue::Other(object);
    };
    let built = match type_name.as_str() {
        "Feature" => feature_from(&object).map(GeoValue::Feature),
        "FeatureCollection" => collection_from(&object).map(GeoValue::FeatureCollection),
        "Point" | "LineString" | "Polygon" | "MultiPoint" | "MultiLineString" | "MultiPolygon"
        | "GeometryCollection" => geometry_from(&object).map(GeoValue::Geometry),
        other => {
            tracing::warn!(
                geojson_type = other,
                "unrecognized type; passing the object through as a plain map"
            );
            return GeoValue::Other(object);
        }
    };
    built.unwrap_or_else(|| {
        tracing::warn!(
            geojson_type = %type_name,
            "malformed object; passing it through as a plain map"
        );
        GeoValue::Other(object)
    })
}

fn positions(value: &Value) -> Option<Vec<Position>> {
    value.as_array()?.iter().map(Position::from_value).collect()
}

fn lines(value: &Value) -> Option<Vec<Vec<Position>>> {
    value.as_array()?.iter().map(positions).collect()
}

fn polygons(value: &Value) -> Option<Vec<Vec<Vec<Position>>>> {
    value.as_array()?.iter().map(lines).collect()
}

fn geometry_from(object: &Map<String, Value>) -> Option<Geometry> {
    let type_name = object.get("type")?.as_str()?;
    if type_name == "GeometryCollection" {
        let members = object.get("geometries")?.as_array()?;
        return members
            .iter()
            .map(|member| member.as_object().and_then(geometry_from))
            .collect::<Option<Vec<_>>>()
            .map(Geometry::GeometryCollection);
    }
    let coordinates = object.get("coordinates")?;
    match type_name {
        "Point" => Position::from_value(coordinates).map(Geometry::Point),
        "LineString" => positions(coordinates).map(Geometry::LineString),
        "Polygon" => lines(coordinates).map(Geometry::Polygon),
        "MultiPoint" => positions(coordinates).map(Geometry::MultiPoint),
        "MultiLineString" => lines(coordinates).map(Geometry::MultiLineString),
        "MultiPolygon" => polygons(coordinates).map(Geometry::MultiPolygon),
        _ => None,
    }
}

fn bbox_from(object: &Map<String, Value>) -> Option<Option<BoundingBox>> {
    match object.get("bbox") {
        None | Some(Value::Null) => Some(None),
        Some(value) => BoundingBox::from_value(value).map(Some),
    }
}

fn feature_from(object: &Map<String, Value>) -> Option<Feature> {
    let geometry = match object.get("geometry") {
        None | Some(Value::Null) => None,
        Some(value) => Some(geometry_from(value.as_object()?)?),
    };
    let properties = match object.get("properties") {
        None | Some(Value::Null) => Map::new(),
        Some(value) => value.as_object()?.clone(),
    };
    Some(Feature {
        geometry,
        properties,
        bbox: bbox_from(object)?,
        id: object.get("id").cloned(),
    })
}

fn collection_from(object: &Map<String, Value>) -> Option<FeatureCollection> {
    let features = object
        .get("features")?
        .as_array()?
        .iter()
        .map(|member| member.as_object().and_then(feature_from))
        .collect::<Option<Vec<_>>>()?;
    Some(FeatureCollection {
        features,
        bbox: bbox_from(object)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn built(value: Value) -> GeoValue {
        GeoJsonFactory.from_object(object(value))
    }

    #[test]
    fn point_keeps_longitude_first() {
        let GeoValue::Geometry(Geometry::Point(position)) = built(json!({
            "type": "Point",
            "coordinates": [139.6917, 35.6895],
        })) else {
            panic!("expected a point");
        };
        assert_eq!(position.longitude, 139.6917);
        assert_eq!(position.latitude, 35.6895);

        let location = position.to_location().unwrap();
        assert_abs_diff_eq!(location.to_dd().latitude, 35.6895);
    }

    #[test]
    fn line_string_and_polygon_nesting() {
        let GeoValue::Geometry(Geometry::LineString(points)) = built(json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0], [1.0, 1.0], [2.0, 0.5]],
        })) else {
            panic!("expected a line string");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].latitude, 0.5);

        let GeoValue::Geometry(Geometry::Polygon(rings)) = built(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]],
        })) else {
            panic!("expected a polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
    }

    #[test]
    fn multi_geometries_and_collections() {
        let GeoValue::Geometry(Geometry::MultiPolygon(polygons)) = built(json!({
            "type": "MultiPolygon",
            "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]],
        })) else {
            panic!("expected a multi-polygon");
        };
        assert_eq!(polygons[0][0].len(), 4);

        let GeoValue::Geometry(Geometry::GeometryCollection(members)) = built(json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [1.0, 2.0] },
                { "type": "MultiPoint", "coordinates": [[3.0, 4.0]] },
            ],
        })) else {
            panic!("expected a geometry collection");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0], Geometry::Point(Position { longitude: 1.0, latitude: 2.0 }));
    }

    #[test]
    fn feature_with_properties_bbox_and_id() {
        let GeoValue::Feature(feature) = built(json!({
            "type": "Feature",
            "id": 7,
            "bbox": [-10.0, -5.0, 10.0, 5.0],
            "geometry": { "type": "Point", "coordinates": [2.3522, 48.8567] },
            "properties": { "name": "Paris" },
        })) else {
            panic!("expected a feature");
        };
        assert_eq!(feature.id, Some(json!(7)));
        assert_eq!(feature.properties["name"], json!("Paris"));
        let bbox = feature.bbox.unwrap();
        assert_eq!(bbox.min.longitude, -10.0);
        assert_eq!(bbox.max.latitude, 5.0);
        assert!(matches!(feature.geometry, Some(Geometry::Point(_))));
    }

    #[test]
    fn feature_without_geometry_is_fine() {
        let GeoValue::Feature(feature) = built(json!({
            "type": "Feature",
            "geometry": null,
            "properties": null,
        })) else {
            panic!("expected a feature");
        };
        assert_eq!(feature.geometry, None);
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn feature_collection_recurses() {
        let GeoValue::FeatureCollection(collection) = built(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 51.0] },
                    "properties": {},
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": { "kind": "empty" },
                },
            ],
        })) else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.features.len(), 2);
        assert!(collection.features[1].geometry.is_none());
    }

    #[test]
    fn unrecognized_and_malformed_objects_pass_through() {
        for value in [
            json!({ "name": "no type here" }),
            json!({ "type": "Widget", "coordinates": [1.0, 2.0] }),
            json!({ "type": "Point", "coordinates": "not an array" }),
            json!({ "type": "LineString", "coordinates": [[0.0, 0.0], ["x", 1.0]] }),
            json!({ "type": "Feature", "bbox": [1.0, 2.0, 3.0] }),
        ] {
            let original = object(value);
            let GeoValue::Other(map) = built(Value::Object(original.clone())) else {
                panic!("{original:?} should pass through");
            };
            assert_eq!(map, original);
        }
    }
}
