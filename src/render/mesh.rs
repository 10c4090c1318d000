use crate::core::vertex::Vertex;

/// Two triangles sharing the v0-v1 diagonal.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 3, 1];
/// Two triangles sharing the v2-v3 diagonal.
const QUAD_INDICES_FLIPPED: [u32; 6] = [0, 3, 2, 3, 1, 2];

pub fn add_quad(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>, quad: [Vertex; 4], flipped: bool) {
    let base_idx = vertices.len() as u32;
    vertices.extend_from_slice(&quad);
    let order = if flipped {
        &QUAD_INDICES_FLIPPED
    } else {
        &QUAD_INDICES
    };
    indices.extend(order.iter().map(|i| base_idx + i));
}

/// Vertex and index buffers drawn with one blend state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshStream {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshStream {
    pub fn add_quad(&mut self, quad: [Vertex; 4], flipped: bool) {
        add_quad(&mut self.vertices, &mut self.indices, quad, flipped);
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Geometry of one chunk, split by blend state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub opaque: MeshStream,
    pub transparent: MeshStream,
}

impl ChunkMesh {
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.opaque.vertices.len() + self.transparent.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.opaque.indices.len() + self.transparent.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Vertex; 4] {
        [Vertex::new([0.0; 3], 0, 3, 0, 1); 4]
    }

    #[test]
    fn test_indices_offset_by_existing_vertices() {
        let mut stream = MeshStream::default();
        stream.add_quad(quad(), false);
        stream.add_quad(quad(), true);
        assert_eq!(stream.quad_count(), 2);
        assert_eq!(&stream.indices[..6], &[0, 1, 2, 0, 3, 1]);
        assert_eq!(&stream.indices[6..], &[4, 7, 6, 7, 5, 6]);
    }
}
