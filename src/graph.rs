//! Complete, undirected distance graph over labelled cities.
//!
//! Cities are addressed by label at the public boundary and by dense index
//! (declaration order) internally. Each unordered pair is stored once, in a
//! triangular array keyed by [`Edge`].

use crate::error::AcoError;
use std::collections::HashMap;

/// An unordered pair of distinct city indices, stored canonically
/// (`lo < hi`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    lo: usize,
    hi: usize,
}

impl Edge {
    /// Canonicalizes `{a, b}`. Returns `None` for a self pair.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The two endpoints, smaller index first.
    pub fn endpoints(self) -> (usize, usize) {
        (self.lo, self.hi)
    }

    /// Position of this edge in a triangular array.
    pub(crate) fn slot(self) -> usize {
        self.hi * (self.hi - 1) / 2 + self.lo
    }
}

/// Number of edges in a complete graph on `n` cities.
pub(crate) fn edge_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Immutable store of pairwise distances over a complete graph.
///
/// # Examples
///
/// ```
/// use u_antcolony::graph::DistanceGraph;
///
/// let graph = DistanceGraph::from_pairs([
///     (("A", "B"), 10.0),
///     (("A", "C"), 15.0),
///     (("B", "C"), 35.0),
/// ])
/// .unwrap();
///
/// assert_eq!(graph.city_count(), 3);
/// assert_eq!(graph.distance("C", "A").unwrap(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceGraph {
    cities: Vec<String>,
    index: HashMap<String, usize>,
    distances: Vec<f64>,
}

impl DistanceGraph {
    /// Builds a graph over an explicit city list.
    ///
    /// Every unordered pair of distinct cities must have exactly one
    /// positive, finite distance. A pair supplied twice keeps the last value.
    pub fn new<C, I, S>(cities: C, distances: I) -> Result<Self, AcoError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        I: IntoIterator<Item = ((S, S), f64)>,
        S: AsRef<str>,
    {
        let cities: Vec<String> = cities.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(cities.len());
        for (i, label) in cities.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(AcoError::DuplicateCity(label.clone()));
            }
        }
        if cities.len() < 2 {
            return Err(AcoError::TooFewCities {
                found: cities.len(),
            });
        }

        let n = cities.len();
        let mut table = vec![f64::NAN; edge_count(n)];
        let mut filled = vec![false; edge_count(n)];

        for ((a, b), distance) in distances {
            let (a, b): (&str, &str) = (a.as_ref(), b.as_ref());
            let ia = *index
                .get(a)
                .ok_or_else(|| AcoError::UnknownCity(a.to_string()))?;
            let ib = *index
                .get(b)
                .ok_or_else(|| AcoError::UnknownCity(b.to_string()))?;
            let edge = Edge::new(ia, ib).ok_or_else(|| AcoError::UnknownEdge {
                a: a.to_string(),
                b: b.to_string(),
            })?;
            if !(distance.is_finite() && distance > 0.0) {
                return Err(AcoError::InvalidDistance {
                    a: a.to_string(),
                    b: b.to_string(),
                    distance,
                });
            }
            table[edge.slot()] = distance;
            filled[edge.slot()] = true;
        }

        for hi in 1..n {
            for lo in 0..hi {
                if !filled[Edge { lo, hi }.slot()] {
                    return Err(AcoError::IncompleteGraph {
                        a: cities[lo].clone(),
                        b: cities[hi].clone(),
                    });
                }
            }
        }

        Ok(Self {
            cities,
            index,
            distances: table,
        })
    }

    /// Builds a graph whose city set is every label mentioned in
    /// `distances`, in first-seen order.
    pub fn from_pairs<I, S>(distances: I) -> Result<Self, AcoError>
    where
        I: IntoIterator<Item = ((S, S), f64)>,
        S: AsRef<str>,
    {
        let entries: Vec<((S, S), f64)> = distances.into_iter().collect();
        let mut cities: Vec<String> = Vec::new();
        for ((a, b), _) in &entries {
            let pair: [&str; 2] = [a.as_ref(), b.as_ref()];
            for label in pair {
                if !cities.iter().any(|c| c == label) {
                    cities.push(label.to_string());
                }
            }
        }
        Self::new(cities, entries)
    }

    /// Builds a Euclidean graph from labelled planar points.
    ///
    /// Two cities at the same position yield a zero distance, which is
    /// rejected as [`AcoError::InvalidDistance`].
    pub fn from_coordinates<I, S>(points: I) -> Result<Self, AcoError>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        let points: Vec<(String, (f64, f64))> =
            points.into_iter().map(|(s, p)| (s.into(), p)).collect();
        let mut entries = Vec::with_capacity(edge_count(points.len()));
        for (i, (a, (xa, ya))) in points.iter().enumerate() {
            for (b, (xb, yb)) in &points[i + 1..] {
                let d = (xa - xb).hypot(ya - yb);
                entries.push(((a.as_str(), b.as_str()), d));
            }
        }
        Self::new(points.iter().map(|(s, _)| s.clone()), entries)
    }

    /// Distance between two cities by label, in either argument order.
    pub fn distance(&self, a: &str, b: &str) -> Result<f64, AcoError> {
        let unknown = || AcoError::UnknownEdge {
            a: a.to_string(),
            b: b.to_string(),
        };
        let ia = self.index_of(a).ok_or_else(unknown)?;
        let ib = self.index_of(b).ok_or_else(unknown)?;
        let edge = Edge::new(ia, ib).ok_or_else(unknown)?;
        Ok(self.edge_distance(edge))
    }

    /// Distance between two cities by index, in either argument order.
    pub fn distance_between(&self, i: usize, j: usize) -> Result<f64, AcoError> {
        let n = self.cities.len();
        match Edge::new(i, j) {
            Some(edge) if edge.hi < n => Ok(self.edge_distance(edge)),
            _ => Err(AcoError::UnknownEdge {
                a: self.label(i).map_or_else(|| i.to_string(), str::to_string),
                b: self.label(j).map_or_else(|| j.to_string(), str::to_string),
            }),
        }
    }

    /// Distance of an edge known to lie inside this graph.
    #[inline]
    pub(crate) fn edge_distance(&self, edge: Edge) -> f64 {
        self.distances[edge.slot()]
    }

    /// Length of the closed tour visiting `path` in order and returning
    /// to the first city.
    pub fn tour_length(&self, path: &[usize]) -> Result<f64, AcoError> {
        let mut total = 0.0;
        for (k, &from) in path.iter().enumerate() {
            let to = path[(k + 1) % path.len()];
            total += self.distance_between(from, to)?;
        }
        Ok(total)
    }

    /// Number of cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// City labels in index order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Label of the city at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.cities.get(index).map(String::as_str)
    }

    /// Index of the city labelled `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Every edge of the complete graph, in storage order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (1..self.cities.len()).flat_map(|hi| (0..hi).map(move |lo| Edge { lo, hi }))
    }
}
