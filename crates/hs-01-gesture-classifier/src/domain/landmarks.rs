//! Validated set of 21 landmarks for one hand.

use shared_types::{Landmark, LandmarkMap, LANDMARK_COUNT, MIDDLE_MCP, WRIST};
use std::ops::Index;

use crate::error::ClassifierError;

/// Landmarks of one detected hand in one frame.
///
/// Always holds exactly [`LANDMARK_COUNT`] points; construction from
/// untrusted input goes through [`HandLandmarks::from_slice`].
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks([Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(landmarks)
    }

    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self, ClassifierError> {
        let array: [Landmark; LANDMARK_COUNT] =
            landmarks
                .try_into()
                .map_err(|_| ClassifierError::WrongLandmarkCount {
                    expected: LANDMARK_COUNT,
                    found: landmarks.len(),
                })?;
        Ok(Self(array))
    }

    pub fn wrist(&self) -> &Landmark {
        &self.0[WRIST]
    }

    pub fn middle_base(&self) -> &Landmark {
        &self.0[MIDDLE_MCP]
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.0
    }

    /// Index-keyed form used on the wire.
    pub fn to_map(&self) -> LandmarkMap {
        self.0.iter().copied().enumerate().collect()
    }
}

impl Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = ClassifierError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        Self::from_slice(&landmarks)
    }
}
