//! Defines primitives for size and spacing.
use crate::parsers;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use std::ops::Add;
use verso_types::Flow;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    /// Resolves against `base`. `Auto` has no fixed value.
    pub fn resolve(&self, base: f32) -> Option<f32> {
        match self {
            Dimension::Pt(v) => Some(*v),
            Dimension::Percent(p) => Some(base * p / 100.0),
            Dimension::Auto => None,
        }
    }
}

/// Physical edge sizes (margin, border or padding) of a box.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn x(value: f32) -> Self {
        Self {
            top: 0f32,
            right: value,
            bottom: 0f32,
            left: value,
        }
    }

    pub fn y(value: f32) -> Self {
        Self {
            top: value,
            right: 0f32,
            bottom: value,
            left: 0f32,
        }
    }

    /// Builds edges from CSS shorthand values (1, 2, 3 or 4 of them).
    pub fn from_values(values: &[f32]) -> Result<Self, String> {
        match *values {
            [v] => Ok(Edges::all(v)),
            [y, x] => Ok(Edges {
                top: y,
                right: x,
                bottom: y,
                left: x,
            }),
            [top, x, bottom] => Ok(Edges {
                top,
                right: x,
                bottom,
                left: x,
            }),
            [top, right, bottom, left] => Ok(Edges {
                top,
                right,
                bottom,
                left,
            }),
            _ => Err(format!(
                "Invalid edge shorthand: expected 1 to 4 values, got {}",
                values.len()
            )),
        }
    }

    pub fn before(&self, flow: Flow) -> f32 {
        match flow {
            Flow::HorizontalTb => self.top,
            Flow::VerticalRl => self.right,
            Flow::VerticalLr => self.left,
        }
    }

    pub fn after(&self, flow: Flow) -> f32 {
        match flow {
            Flow::HorizontalTb => self.bottom,
            Flow::VerticalRl => self.left,
            Flow::VerticalLr => self.right,
        }
    }

    pub fn start(&self, flow: Flow) -> f32 {
        if flow.is_vertical() { self.top } else { self.left }
    }

    pub fn end(&self, flow: Flow) -> f32 {
        if flow.is_vertical() { self.bottom } else { self.right }
    }

    /// The same edges with the inline-start side removed.
    pub fn without_start(mut self, flow: Flow) -> Self {
        if flow.is_vertical() {
            self.top = 0.0;
        } else {
            self.left = 0.0;
        }
        self
    }

    /// The same edges with the inline-end side removed.
    pub fn without_end(mut self, flow: Flow) -> Self {
        if flow.is_vertical() {
            self.bottom = 0.0;
        } else {
            self.right = 0.0;
        }
        self
    }

    /// Total edge size along the block axis.
    pub fn extent(&self, flow: Flow) -> f32 {
        self.before(flow) + self.after(flow)
    }

    /// Total edge size along the inline axis.
    pub fn measure(&self, flow: Flow) -> f32 {
        self.start(flow) + self.end(flow)
    }
}

impl Add for Edges {
    type Output = Edges;

    fn add(self, rhs: Edges) -> Edges {
        Edges {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

impl<'de> Deserialize<'de> for Edges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EdgesVisitor;
        impl<'de> de::Visitor<'de> for EdgesVisitor {
            type Value = Edges;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a string like '10pt' or '10pt 20pt', or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Edges, E>
            where
                E: de::Error,
            {
                parsers::parse_edges(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Edges, E>
            where
                E: de::Error,
            {
                Ok(Edges::all(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Edges, E>
            where
                E: de::Error,
            {
                Ok(Edges::all(value as f32))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Edges, E>
            where
                E: de::Error,
            {
                Ok(Edges::all(value as f32))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Edges, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut edges = Edges::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => edges.top = map.next_value()?,
                        "right" => edges.right = map.next_value()?,
                        "bottom" => edges.bottom = map.next_value()?,
                        "left" => edges.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(edges)
            }
        }
        deserializer.deserialize_any(EdgesVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_the_flow() {
        let edges = Edges {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        assert_eq!(edges.extent(Flow::HorizontalTb), 4.0);
        assert_eq!(edges.measure(Flow::HorizontalTb), 6.0);
        assert_eq!(edges.before(Flow::VerticalRl), 2.0);
        assert_eq!(edges.extent(Flow::VerticalRl), 6.0);
        assert_eq!(edges.measure(Flow::VerticalLr), 4.0);
    }

    #[test]
    fn inline_sides_can_be_dropped() {
        let edges = Edges::all(5.0);
        let marker = edges.without_end(Flow::HorizontalTb);
        assert_eq!((marker.left, marker.right), (5.0, 0.0));
        assert_eq!(marker.extent(Flow::HorizontalTb), 10.0);
        let body = edges.without_start(Flow::VerticalRl);
        assert_eq!((body.top, body.bottom), (0.0, 5.0));
    }

    #[test]
    fn edges_deserialize_from_shorthand_and_map() {
        let short: Edges = serde_json::from_str("\"10pt 5\"").unwrap();
        assert_eq!(short, Edges::y(10.0) + Edges::x(5.0));

        let map: Edges = serde_json::from_str(r#"{"top": 2, "left": 3}"#).unwrap();
        assert_eq!(map.top, 2.0);
        assert_eq!(map.left, 3.0);
        assert_eq!(map.bottom, 0.0);

        let number: Edges = serde_json::from_str("4").unwrap();
        assert_eq!(number, Edges::all(4.0));
    }

    #[test]
    fn page_size_accepts_names_and_maps() {
        let named: PageSize = serde_json::from_str("\"letter\"").unwrap();
        assert_eq!(named, PageSize::Letter);
        let custom: PageSize = serde_json::from_str(r#"{"width": 200, "height": 100}"#).unwrap();
        assert_eq!(custom.dimensions_pt(), (200.0, 100.0));
    }

    #[test]
    fn percent_dimension_resolves_against_base() {
        assert_eq!(Dimension::Percent(25.0).resolve(200.0), Some(50.0));
        assert_eq!(Dimension::Auto.resolve(200.0), None);
    }
}
