//! Binary serialization for geometry descriptors
//!
//! Packs a descriptor into one little-endian blob for zero-copy upload.
//! Format: [header][bounds?][positions][padding][indices]
//! Header: "ATLSMESH" magic, version(u32), precision(u8), has_bounds(u8),
//!         reserved(u16), vertex_count(u32), index_count(u32)
//! Bounds: center x, y, z and radius as f64
//! Positions: 3 * vertex_count components in the buffer's native width
//! Padding keeps the index array 4-byte aligned for Uint32Array views

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{GeometryError, Result};

use super::bounds::{BoundingSphere, BoundingVolume};
use super::buffers::{IndexBuffer, PositionBuffer, PositionData, PositionPrecision};
use super::descriptor::{GeometryDescriptor, PrimitiveType};
use super::types::Point3;

pub const MESH_MAGIC: [u8; 8] = *b"ATLSMESH";
pub const MESH_VERSION: u32 = 1;

fn decode_err(e: std::io::Error) -> GeometryError {
    GeometryError::Decode(e.to_string())
}

impl GeometryDescriptor {
    pub fn to_bytes(&self) -> Vec<u8> {
        let precision = self.positions.precision();
        let sphere = self.bounding_volume.sphere();
        let mut buffer = Vec::with_capacity(
            32 + self.positions.len() * precision.component_size() + self.indices.len() * 4,
        );

        buffer.extend_from_slice(&MESH_MAGIC);
        buffer.extend_from_slice(&MESH_VERSION.to_le_bytes());
        buffer.push(precision.tag());
        buffer.push(u8::from(sphere.is_some()));
        buffer.extend_from_slice(&0u16.to_le_bytes());
        buffer.extend_from_slice(&(self.positions.vertex_count() as u32).to_le_bytes());
        buffer.extend_from_slice(&(self.indices.len() as u32).to_le_bytes());

        if let Some(s) = sphere {
            for v in [s.center.x, s.center.y, s.center.z, s.radius] {
                buffer.extend_from_slice(&v.to_le_bytes());
            }
        }

        buffer.extend_from_slice(&self.positions.to_le_bytes());
        let padding = (4 - (buffer.len() % 4)) % 4;
        buffer.resize(buffer.len() + padding, 0);

        buffer.extend_from_slice(&self.indices.to_le_bytes());
        buffer
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let mut magic = [0u8; 8];
        cursor.read_exact(&mut magic).map_err(decode_err)?;
        if magic != MESH_MAGIC {
            return Err(GeometryError::Decode("bad magic".to_string()));
        }
        let version = cursor.read_u32::<LittleEndian>().map_err(decode_err)?;
        if version != MESH_VERSION {
            return Err(GeometryError::Decode(format!("unsupported version {}", version)));
        }
        let tag = cursor.read_u8().map_err(decode_err)?;
        let precision = PositionPrecision::from_tag(tag)
            .ok_or_else(|| GeometryError::Decode(format!("unknown precision tag {}", tag)))?;
        let has_bounds = cursor.read_u8().map_err(decode_err)? != 0;
        let _reserved = cursor.read_u16::<LittleEndian>().map_err(decode_err)?;
        let vertex_count = cursor.read_u32::<LittleEndian>().map_err(decode_err)? as usize;
        let index_count = cursor.read_u32::<LittleEndian>().map_err(decode_err)? as usize;
        if index_count % 3 != 0 {
            return Err(GeometryError::Decode(format!(
                "index count {} is not a multiple of 3",
                index_count
            )));
        }

        // Reject counts that cannot fit in the remaining input before allocating
        let remaining = bytes.len().saturating_sub(cursor.position() as usize);
        let needed = vertex_count
            .checked_mul(3 * precision.component_size())
            .and_then(|p| index_count.checked_mul(4).and_then(|i| p.checked_add(i)))
            .ok_or_else(|| GeometryError::Decode("counts overflow".to_string()))?;
        if needed > remaining {
            return Err(GeometryError::Decode("truncated geometry".to_string()));
        }

        let bounding_volume = if has_bounds {
            let mut v = [0f64; 4];
            cursor.read_f64_into::<LittleEndian>(&mut v).map_err(decode_err)?;
            BoundingVolume::Sphere(BoundingSphere {
                center: Point3::new(v[0], v[1], v[2]),
                radius: v[3],
            })
        } else {
            BoundingVolume::Empty
        };

        let components = vertex_count * 3;
        let data = match precision {
            PositionPrecision::Float64 => {
                let mut v = vec![0f64; components];
                cursor.read_f64_into::<LittleEndian>(&mut v).map_err(decode_err)?;
                PositionData::Float64(v)
            }
            PositionPrecision::Float32 => {
                let mut v = vec![0f32; components];
                cursor.read_f32_into::<LittleEndian>(&mut v).map_err(decode_err)?;
                PositionData::Float32(v)
            }
            PositionPrecision::Uint16 => {
                let mut v = vec![0u16; components];
                cursor.read_u16_into::<LittleEndian>(&mut v).map_err(decode_err)?;
                PositionData::Uint16(v)
            }
        };
        let positions = PositionBuffer::from_data(data)
            .ok_or_else(|| GeometryError::Decode("partial vertex".to_string()))?;

        let padding = (4 - (cursor.position() as usize % 4)) % 4;
        cursor.set_position(cursor.position() + padding as u64);

        let mut raw_indices = vec![0u32; index_count];
        cursor.read_u32_into::<LittleEndian>(&mut raw_indices).map_err(decode_err)?;
        if let Some(&bad) = raw_indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::Decode(format!(
                "index {} out of range for vertex count {}",
                bad, vertex_count
            )));
        }
        let indices = IndexBuffer::from_vec(raw_indices)
            .ok_or_else(|| GeometryError::Decode("partial triangle".to_string()))?;

        Ok(GeometryDescriptor {
            positions,
            indices,
            primitive_type: PrimitiveType::Triangles,
            bounding_volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildOptions;
    use crate::geometry::{MeshBuilder, Triangle};

    fn sample(precision: PositionPrecision) -> GeometryDescriptor {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        MeshBuilder::new(BuildOptions::default().with_precision(precision))
            .build(&points, &[Triangle::new(0, 1, 2)])
            .unwrap()
    }

    #[test]
    fn test_header_layout() {
        let bytes = sample(PositionPrecision::Float32).to_bytes();
        assert_eq!(&bytes[0..8], b"ATLSMESH");
        assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
        assert_eq!(bytes[12], 1); // float32
        assert_eq!(bytes[13], 1); // bounds present
        assert_eq!(&bytes[16..20], &3u32.to_le_bytes());
        assert_eq!(&bytes[20..24], &3u32.to_le_bytes());
        // header + sphere + 9 f32 + 3 u32
        assert_eq!(bytes.len(), 24 + 32 + 36 + 12);
    }

    #[test]
    fn test_uint16_positions_are_padded() {
        let bytes = sample(PositionPrecision::Uint16).to_bytes();
        // 9 u16 = 18 bytes, padded to 20
        assert_eq!(bytes.len(), 24 + 32 + 20 + 12);
        let decoded = GeometryDescriptor::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, sample(PositionPrecision::Uint16));
    }

    #[test]
    fn test_bounds_written_after_header() {
        let descriptor = sample(PositionPrecision::Float64);
        let sphere = descriptor.bounding_volume.sphere().unwrap();
        let bytes = descriptor.to_bytes();
        assert_eq!(&bytes[14..16], &[0, 0]);
        assert_eq!(&bytes[24..32], &sphere.center.x.to_le_bytes());
        assert_eq!(&bytes[48..56], &sphere.radius.to_le_bytes());
    }

    #[test]
    fn test_empty_descriptor_round_trip() {
        let empty = GeometryDescriptor::default();
        let decoded = GeometryDescriptor::from_bytes(&empty.to_bytes()).unwrap();
        assert_eq!(decoded, empty);
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bytes = sample(PositionPrecision::Float64).to_bytes();
        let err = GeometryDescriptor::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, GeometryError::Decode(_)));

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(GeometryDescriptor::from_bytes(&bad_magic).is_err());
    }
}
