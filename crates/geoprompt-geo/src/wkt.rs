//! Well-Known Text decoding.
//!
//! Text first goes through the strict `wkt` parser. When that rejects it, a
//! lenient reader walks the parenthesized structure and keeps going past
//! damaged ordinates, which come out as `NaN` in place.

use ::wkt::TryFromWkt;

use crate::models::{from_geo_geometry, Geometry};

/// Shapes the codec recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WktShape {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

impl WktShape {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "POINT" => Some(WktShape::Point),
            "LINESTRING" => Some(WktShape::LineString),
            "POLYGON" => Some(WktShape::Polygon),
            "MULTIPOLYGON" => Some(WktShape::MultiPolygon),
            _ => None,
        }
    }
}

/// Parse WKT into a canonical geometry.
///
/// Returns `None` for unknown shapes, empty input, and shapes without any
/// coordinates. MULTIPOLYGON keeps every part and ring.
pub fn parse_wkt(text: &str) -> Option<Geometry> {
    let text = text.trim();
    let keyword_end = text.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(text.len());
    let shape = WktShape::from_keyword(&text[..keyword_end])?;

    let geometry = match parse_strict(text) {
        Some(geometry) => geometry,
        None => {
            tracing::debug!(shape = ?shape, "strict WKT parse failed, reading leniently");
            parse_lenient(shape, &text[keyword_end..])?
        }
    };

    if geometry.positions().is_empty() {
        return None;
    }
    Some(geometry)
}

fn parse_strict(text: &str) -> Option<Geometry> {
    let parsed = geo::Geometry::<f64>::try_from_wkt_str(text).ok()?;
    from_geo_geometry(&parsed)
}

/// Parenthesized WKT body: a coordinate pair's raw text, or a nested list
#[derive(Debug, PartialEq)]
enum Node {
    Pair(String),
    List(Vec<Node>),
}

fn flush_pair(buffer: &mut String, list: &mut Vec<Node>) {
    let pair = buffer.trim();
    if !pair.is_empty() {
        list.push(Node::Pair(pair.to_string()));
    }
    buffer.clear();
}

/// Build the nesting tree of the first balanced group in `body`.
fn parse_nesting(body: &str) -> Option<Node> {
    let mut stack: Vec<Vec<Node>> = Vec::new();
    let mut buffer = String::new();

    for ch in body.chars() {
        match ch {
            '(' => stack.push(Vec::new()),
            ')' => {
                let mut list = stack.pop()?;
                flush_pair(&mut buffer, &mut list);
                let node = Node::List(list);
                match stack.last_mut() {
                    Some(parent) => parent.push(node),
                    None => return Some(node),
                }
            }
            ',' => {
                let list = stack.last_mut()?;
                flush_pair(&mut buffer, list);
            }
            _ if !stack.is_empty() => buffer.push(ch),
            _ => {}
        }
    }

    None
}

/// First two whitespace-separated tokens; anything non-numeric becomes NaN.
fn lenient_pair(text: &str) -> [f64; 2] {
    let mut tokens = text.split_whitespace().map(|t| t.parse::<f64>().unwrap_or(f64::NAN));
    let x = tokens.next().unwrap_or(f64::NAN);
    let y = tokens.next().unwrap_or(f64::NAN);
    [x, y]
}

fn pairs(node: &Node) -> Option<Vec<[f64; 2]>> {
    match node {
        Node::List(items) => items
            .iter()
            .map(|item| match item {
                Node::Pair(text) => Some(lenient_pair(text)),
                Node::List(_) => None,
            })
            .collect(),
        Node::Pair(_) => None,
    }
}

fn rings(node: &Node) -> Option<Vec<Vec<[f64; 2]>>> {
    match node {
        Node::List(items) => items.iter().map(pairs).collect(),
        Node::Pair(_) => None,
    }
}

fn polygons(node: &Node) -> Option<Vec<Vec<Vec<[f64; 2]>>>> {
    match node {
        Node::List(items) => items.iter().map(rings).collect(),
        Node::Pair(_) => None,
    }
}

fn parse_lenient(shape: WktShape, body: &str) -> Option<Geometry> {
    let root = parse_nesting(body)?;

    let geometry = match shape {
        WktShape::Point => {
            let coordinates = pairs(&root)?.into_iter().next()?;
            Geometry::Point { coordinates }
        }
        WktShape::LineString => Geometry::LineString { coordinates: pairs(&root)? },
        WktShape::Polygon => Geometry::Polygon { coordinates: rings(&root)? },
        WktShape::MultiPolygon => Geometry::MultiPolygon { coordinates: polygons(&root)? },
    };
    Some(geometry)
}
