//! Flat GPU-ready buffers
//!
//! Positions are stored as x, y, z runs in the encoding picked by
//! `PositionPrecision`. Indices are stored as u32 runs of three in
//! winding order. Both serialize to base64 for compact JSON transmission.

use base64::{engine::general_purpose, Engine as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::types::Point3;

/// Numeric encoding of the position buffer
///
/// `Uint16` reproduces the legacy packed layout: fractional parts are
/// truncated toward zero and values saturate to `0..=65535` (NaN becomes 0).
/// It is lossy for any real geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionPrecision {
    #[default]
    Float64,
    Float32,
    Uint16,
}

impl PositionPrecision {
    /// Size in bytes of one coordinate component
    pub fn component_size(self) -> usize {
        match self {
            PositionPrecision::Float64 => 8,
            PositionPrecision::Float32 => 4,
            PositionPrecision::Uint16 => 2,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            PositionPrecision::Float64 => 0,
            PositionPrecision::Float32 => 1,
            PositionPrecision::Uint16 => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PositionPrecision::Float64),
            1 => Some(PositionPrecision::Float32),
            2 => Some(PositionPrecision::Uint16),
            _ => None,
        }
    }
}

/// Backing storage of a position buffer
#[derive(Debug, Clone, PartialEq)]
pub enum PositionData {
    Float64(Vec<f64>),
    Float32(Vec<f32>),
    Uint16(Vec<u16>),
}

/// Flat position buffer: `[x0, y0, z0, x1, y1, z1, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct PositionBuffer {
    data: PositionData,
}

impl Default for PositionBuffer {
    fn default() -> Self {
        Self::empty(PositionPrecision::Float64)
    }
}

impl PositionBuffer {
    pub fn empty(precision: PositionPrecision) -> Self {
        let data = match precision {
            PositionPrecision::Float64 => PositionData::Float64(Vec::new()),
            PositionPrecision::Float32 => PositionData::Float32(Vec::new()),
            PositionPrecision::Uint16 => PositionData::Uint16(Vec::new()),
        };
        Self { data }
    }

    /// Wrap already-flattened data. Returns `None` if the length is not a
    /// multiple of 3.
    pub fn from_data(data: PositionData) -> Option<Self> {
        let len = match &data {
            PositionData::Float64(v) => v.len(),
            PositionData::Float32(v) => v.len(),
            PositionData::Uint16(v) => v.len(),
        };
        if len % 3 != 0 {
            return None;
        }
        Some(Self { data })
    }

    /// Caller guarantees the length is a multiple of 3
    pub(crate) fn from_data_unchecked(data: PositionData) -> Self {
        debug_assert!(match &data {
            PositionData::Float64(v) => v.len() % 3 == 0,
            PositionData::Float32(v) => v.len() % 3 == 0,
            PositionData::Uint16(v) => v.len() % 3 == 0,
        });
        Self { data }
    }

    pub fn precision(&self) -> PositionPrecision {
        match &self.data {
            PositionData::Float64(_) => PositionPrecision::Float64,
            PositionData::Float32(_) => PositionPrecision::Float32,
            PositionData::Uint16(_) => PositionPrecision::Uint16,
        }
    }

    pub fn data(&self) -> &PositionData {
        &self.data
    }

    /// Number of scalar components (3 per vertex)
    pub fn len(&self) -> usize {
        match &self.data {
            PositionData::Float64(v) => v.len(),
            PositionData::Float32(v) => v.len(),
            PositionData::Uint16(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vertex_count(&self) -> usize {
        self.len() / 3
    }

    /// Scalar component `i` widened to f64
    pub fn component(&self, i: usize) -> Option<f64> {
        match &self.data {
            PositionData::Float64(v) => v.get(i).copied(),
            PositionData::Float32(v) => v.get(i).map(|&c| c as f64),
            PositionData::Uint16(v) => v.get(i).map(|&c| c as f64),
        }
    }

    /// Vertex `i` as decoded from the buffer
    pub fn point(&self, i: usize) -> Option<Point3> {
        if i >= self.vertex_count() {
            return None;
        }
        let base = i * 3;
        Some(Point3::new(
            self.component(base)?,
            self.component(base + 1)?,
            self.component(base + 2)?,
        ))
    }

    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        (0..self.vertex_count()).filter_map(move |i| self.point(i))
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match &self.data {
            PositionData::Float64(v) => v.clone(),
            PositionData::Float32(v) => v.iter().map(|&c| c as f64).collect(),
            PositionData::Uint16(v) => v.iter().map(|&c| c as f64).collect(),
        }
    }

    /// Raw little-endian bytes in the native component width
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * self.precision().component_size());
        match &self.data {
            PositionData::Float64(v) => v.iter().for_each(|c| bytes.extend_from_slice(&c.to_le_bytes())),
            PositionData::Float32(v) => v.iter().for_each(|c| bytes.extend_from_slice(&c.to_le_bytes())),
            PositionData::Uint16(v) => v.iter().for_each(|c| bytes.extend_from_slice(&c.to_le_bytes())),
        }
        bytes
    }
}

impl Serialize for PositionBuffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PositionBuffer", 3)?;
        state.serialize_field("precision", &self.precision())?;
        state.serialize_field("vertexCount", &self.vertex_count())?;
        state.serialize_field("data", &general_purpose::STANDARD.encode(self.to_le_bytes()))?;
        state.end()
    }
}

/// Flat index buffer: `[a0, b0, c0, a1, b1, c1, ...]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexBuffer(Vec<u32>);

impl IndexBuffer {
    /// Wrap an already-validated index list. Returns `None` unless the
    /// length is a multiple of 3.
    pub fn from_vec(indices: Vec<u32>) -> Option<Self> {
        if indices.len() % 3 != 0 {
            return None;
        }
        Some(IndexBuffer(indices))
    }

    pub(crate) fn from_vec_unchecked(indices: Vec<u32>) -> Self {
        IndexBuffer(indices)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.0.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.0.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Largest referenced vertex index
    pub fn max_index(&self) -> Option<u32> {
        self.0.iter().copied().max()
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() * 4);
        for idx in &self.0 {
            bytes.extend_from_slice(&idx.to_le_bytes());
        }
        bytes
    }
}

impl Serialize for IndexBuffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("IndexBuffer", 2)?;
        state.serialize_field("indexCount", &self.len())?;
        state.serialize_field("data", &general_purpose::STANDARD.encode(self.to_le_bytes()))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_buffer_point_access() {
        let buffer = PositionBuffer::from_data(PositionData::Float64(vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
        ]))
        .unwrap();
        assert_eq!(buffer.vertex_count(), 2);
        assert_eq!(buffer.point(1), Some(Point3::new(4.0, 5.0, 6.0)));
        assert_eq!(buffer.point(2), None);
    }

    #[test]
    fn test_position_buffer_rejects_partial_vertex() {
        assert!(PositionBuffer::from_data(PositionData::Float32(vec![1.0, 2.0])).is_none());
    }

    #[test]
    fn test_native_byte_width() {
        let buffer = PositionBuffer::from_data(PositionData::Uint16(vec![1, 2, 3])).unwrap();
        assert_eq!(buffer.to_le_bytes(), vec![1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn test_index_buffer_serialization() {
        let indices = IndexBuffer::from_vec(vec![0, 1, 2]).unwrap();
        let json = serde_json::to_string(&indices).unwrap();
        assert!(json.contains("indexCount"));
        assert!(json.contains("\"AAAAAAEAAAACAAAA\""));
    }
}
