//! Serialized Earth Engine expression graphs.
//!
//! The REST API evaluates a graph of `ValueNode`s: constants, function invocations and
//! references into the `values` table. Every graph built here is a tree, so it is sent as a
//! single root value under key `"0"`.

use fcheck_domain::geometry::CoordinateRing;
use serde::Serialize;
use serde_json::{Map, Value, json};

const ROOT_KEY: &str = "0";

/// A single node of an expression graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Node(Value);

impl Node {
    /// A literal value. Non-finite floats encode as `null`.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self(json!({ "constantValue": value.into() }))
    }

    /// A call to an algorithm of the Earth Engine catalog, e.g. `Image.load`.
    pub fn invoke<'a>(function: &str, arguments: impl IntoIterator<Item = (&'a str, Self)>) -> Self {
        let arguments: Map<String, Value> =
            arguments.into_iter().map(|(name, node)| (name.to_owned(), node.0)).collect();

        Self(json!({
            "functionInvocationValue": {
                "functionName": function,
                "arguments": arguments,
            }
        }))
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Request body of `value:compute` for a graph rooted at `root`.
#[must_use]
pub fn compute_body(root: Node) -> Value {
    json!({
        "expression": {
            "values": { ROOT_KEY: root.0 },
            "result": ROOT_KEY,
        }
    })
}

/// A polygon geometry, built once per request and shared by every computation on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    node: Node,
}

impl Polygon {
    /// Single-ring polygon with GeoJSON ordering `[x, y]`, passed through as given.
    #[must_use]
    pub fn from_ring(ring: &CoordinateRing) -> Self {
        let points: Vec<Value> =
            ring.points().iter().map(|&[x, y]| Value::from(vec![x, y])).collect();
        let node = Node::invoke(
            "GeometryConstructors.Polygon",
            [("coordinates", Node::constant(vec![Value::from(points)]))],
        );
        Self { node }
    }

    pub(crate) fn node(&self) -> Node {
        self.node.clone()
    }
}

/// `image.select([band])` of a stored asset.
pub(crate) fn band(dataset: &str, band: &str) -> Node {
    let image = Node::invoke("Image.load", [("id", Node::constant(dataset))]);
    Node::invoke("Image.select", [("input", image), ("bandSelectors", Node::constant(vec![band]))])
}

/// Most frequent pixel value of `band` inside the polygon.
pub(crate) fn mode_of_band(
    image: Node,
    band: &str,
    region: &Polygon,
    scale: f64,
    max_pixels: u64,
) -> Node {
    let reduced = Node::invoke(
        "Image.reduceRegion",
        [
            ("image", image),
            ("reducer", Node::invoke("Reducer.mode", std::iter::empty())),
            ("geometry", region.node()),
            ("scale", Node::constant(scale)),
            ("maxPixels", Node::constant(max_pixels)),
        ],
    );

    Node::invoke("Dictionary.get", [("dictionary", reduced), ("key", Node::constant(band))])
}

/// Geodesic area of the polygon in square meters.
pub(crate) fn area(region: &Polygon) -> Node {
    Node::invoke("Geometry.area", [("geometry", region.node()), ("maxError", Node::constant(1))])
}
