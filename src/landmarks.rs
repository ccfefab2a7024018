//! Landmark stars: drawn after everything else and kept locatable when
//! zoomed out.
//!
//! Landmarks are matched by exact name. The set is supplied by the caller so
//! planning does not depend on any particular catalog's content.

use crate::Rgb;

/// One landmark and the marker drawn for it while labels are suppressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub name: String,
    /// Radius of the forced marker circle, in pixels. The label is offset
    /// by the same amount to the lower right.
    pub marker_radius: u32,
    /// Marker and label color. `None` uses the star's primary color.
    pub marker_color: Option<Rgb>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, marker_radius: u32, marker_color: Option<Rgb>) -> Self {
        Self {
            name: name.into(),
            marker_radius,
            marker_color,
        }
    }
}

/// Ordered, name-keyed set of landmarks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    /// Empty set: no star is treated specially.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference set: the galactic core, the home system and Treus-8.
    pub fn reference() -> Self {
        [
            Landmark::new("Sol", 2, Some(Rgb::WHITE)),
            Landmark::new("Treus-8", 2, Some(Rgb::WHITE)),
            Landmark::new("Galactic Core", 3, None),
        ]
        .into_iter()
        .collect()
    }

    /// Landmarks with the default marker (radius 2, white) for each name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|n| Landmark::new(n, 2, Some(Rgb::WHITE)))
            .collect()
    }

    /// Add a landmark, replacing any existing entry with the same name.
    pub fn insert(&mut self, landmark: Landmark) {
        match self.landmarks.iter_mut().find(|l| l.name == landmark.name) {
            Some(existing) => *existing = landmark,
            None => self.landmarks.push(landmark),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }
}

impl FromIterator<Landmark> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = Landmark>>(iter: T) -> Self {
        let mut set = Self::empty();
        for landmark in iter {
            set.insert(landmark);
        }
        set
    }
}
