//! Decoding of centroid scan data into touches.
//!
//! In centroid mode a Trill sensor reports a fixed number of touch slots. Each
//! slot holds a position and a size; an unoccupied slot carries a position of
//! `-1`. The decoders here turn a block of already deserialized samples into
//! the list of occupied slots, in slot order.

use heapless::Vec;

use crate::model::Geometry;

/// The largest number of touch slots any Trill sensor reports.
pub const MAX_TOUCHES: usize = 5;

/// Position value marking an unoccupied slot.
pub const NO_TOUCH: i16 = -1;

/// A touch on a one-directional sensor (Bar, Ring, Craft, Flex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch1D {
    /// Position along the sensing axis.
    pub position: i16,
    /// Size of the touch.
    pub size: i16,
}

/// A touch on a two-directional sensor (Square, Hex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch2D {
    /// Horizontal position.
    pub x: i16,
    /// Vertical position.
    pub y: i16,
    /// Horizontal size.
    pub x_size: i16,
    /// Vertical size.
    pub y_size: i16,
}

/// The scan data did not have the shape the slot layout requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The number of samples does not match the number of slots.
    Length {
        /// Samples required by the layout.
        expected: usize,
        /// Samples supplied.
        actual: usize,
    },
    /// More slots were requested than a touch set can hold.
    SlotCount(usize),
}

/// The touches decoded from one centroid scan, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Touches {
    /// Touches of a one-directional sensor.
    OneAxis(Vec<Touch1D, MAX_TOUCHES>),
    /// Touches of a two-directional sensor.
    TwoAxis(Vec<Touch2D, MAX_TOUCHES>),
}

impl Touches {
    /// The geometry the touches were decoded for.
    pub fn geometry(&self) -> Geometry {
        match self {
            Self::OneAxis(_) => Geometry::OneAxis,
            Self::TwoAxis(_) => Geometry::TwoAxis,
        }
    }

    /// Number of touches.
    pub fn len(&self) -> usize {
        match self {
            Self::OneAxis(touches) => touches.len(),
            Self::TwoAxis(touches) => touches.len(),
        }
    }

    /// Returns `true` if no slot was occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One-directional touches, or `None` for a two-directional set.
    pub fn as_1d(&self) -> Option<&[Touch1D]> {
        match self {
            Self::OneAxis(touches) => Some(touches),
            Self::TwoAxis(_) => None,
        }
    }

    /// Two-directional touches, or `None` for a one-directional set.
    pub fn as_2d(&self) -> Option<&[Touch2D]> {
        match self {
            Self::OneAxis(_) => None,
            Self::TwoAxis(touches) => Some(touches),
        }
    }

    /// The one-directional touch at `index`, if there is one.
    pub fn touch_1d(&self, index: usize) -> Option<Touch1D> {
        self.as_1d().and_then(|touches| touches.get(index).copied())
    }

    /// The two-directional touch at `index`, if there is one.
    pub fn touch_2d(&self, index: usize) -> Option<Touch2D> {
        self.as_2d().and_then(|touches| touches.get(index).copied())
    }
}

/// Number of samples a centroid scan carries for the given geometry.
pub fn centroid_len(geometry: Geometry, max_touches: usize) -> usize {
    match geometry {
        Geometry::OneAxis => 2 * max_touches,
        Geometry::TwoAxis => 4 * max_touches,
    }
}

fn check_layout(
    data: &[i16],
    geometry: Geometry,
    max_touches: usize,
) -> Result<(), LayoutError> {
    if max_touches > MAX_TOUCHES {
        return Err(LayoutError::SlotCount(max_touches));
    }
    let expected = centroid_len(geometry, max_touches);
    if data.len() != expected {
        return Err(LayoutError::Length {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Decodes one-directional centroid data laid out as `[positions, sizes]`.
pub fn decode_1d(
    data: &[i16],
    max_touches: usize,
) -> Result<Vec<Touch1D, MAX_TOUCHES>, LayoutError> {
    check_layout(data, Geometry::OneAxis, max_touches)?;
    let (positions, sizes) = data.split_at(max_touches);

    let mut touches = Vec::new();
    for i in 0..max_touches {
        // Slots are not guaranteed to be front-packed, so every slot is visited.
        if positions[i] != NO_TOUCH {
            touches
                .push(Touch1D {
                    position: positions[i],
                    size: sizes[i],
                })
                .map_err(|_| LayoutError::SlotCount(max_touches))?;
        }
    }
    Ok(touches)
}

/// Decodes two-directional centroid data laid out as
/// `[v_positions, v_sizes, h_positions, h_sizes]`.
///
/// A slot counts as occupied when its vertical position is not `-1`. The
/// horizontal position is not checked; the firmware reports occupancy once
/// per slot, through the vertical block.
pub fn decode_2d(
    data: &[i16],
    max_touches: usize,
) -> Result<Vec<Touch2D, MAX_TOUCHES>, LayoutError> {
    check_layout(data, Geometry::TwoAxis, max_touches)?;
    let (vertical, horizontal) = data.split_at(2 * max_touches);
    let (v_positions, v_sizes) = vertical.split_at(max_touches);
    let (h_positions, h_sizes) = horizontal.split_at(max_touches);

    let mut touches = Vec::new();
    for i in 0..max_touches {
        if v_positions[i] != NO_TOUCH {
            touches
                .push(Touch2D {
                    x: h_positions[i],
                    y: v_positions[i],
                    x_size: h_sizes[i],
                    y_size: v_sizes[i],
                })
                .map_err(|_| LayoutError::SlotCount(max_touches))?;
        }
    }
    Ok(touches)
}

/// Decodes centroid data for a sensor of the given geometry.
pub fn decode(
    geometry: Geometry,
    max_touches: usize,
    data: &[i16],
) -> Result<Touches, LayoutError> {
    match geometry {
        Geometry::OneAxis => decode_1d(data, max_touches).map(Touches::OneAxis),
        Geometry::TwoAxis => decode_2d(data, max_touches).map(Touches::TwoAxis),
    }
}
