//! Mesh representation for 3D geometry
//!
//! Provides the vertex and mesh data structures handed to the host renderer,
//! plus the sphere primitive and the normal-inversion transform used to view
//! equirectangular video from inside the sphere.

use crate::foundation::math::constants;

/// 3D vertex data structure for rendering
///
/// Represents a single vertex with position, normal, and texture coordinate
/// data. The `#[repr(C)]` attribute ensures consistent memory layout for
/// GPU buffer uploads by the host renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle index list for one submesh
///
/// Indices come in groups of three, one group per triangle. A mesh carries
/// one submesh per material slot; the sphere primitive uses a single one.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh {
    /// Triangle indices into the parent mesh's vertex list
    pub indices: Vec<u32>,
}

impl SubMesh {
    /// Create a submesh from a triangle index list
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Number of triangles in this submesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// 3D mesh containing vertices and per-submesh triangle indices
///
/// The primary geometry container handed to the host renderer. Backend
/// agnostic by design: no GPU types leak into this structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle index lists, one per submesh
    pub submeshes: Vec<SubMesh>,
}

impl Mesh {
    /// Create a new mesh from vertices and submeshes
    pub fn new(vertices: Vec<Vertex>, submeshes: Vec<SubMesh>) -> Self {
        Self { vertices, submeshes }
    }

    /// Create a mesh with a single submesh
    pub fn with_submesh(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self::new(vertices, vec![SubMesh::new(indices)])
    }

    /// Total triangle count across all submeshes
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(SubMesh::triangle_count).sum()
    }

    /// Create a UV sphere with equirectangular texture coordinates
    ///
    /// Generates an outward-facing sphere centered at the origin. Vertices
    /// are laid out in `stacks + 1` latitude rings of `sectors + 1` vertices
    /// each; the extra column duplicates the seam so texture coordinates can
    /// wrap cleanly from `u = 1.0` back to `u = 0.0`.
    ///
    /// # Coordinate System
    /// Right-handed with Y-up: the `v = 1.0` texture row maps to the north
    /// pole (`+Y`), `v = 0.0` to the south pole, matching equirectangular
    /// video layouts.
    ///
    /// # Arguments
    /// * `radius` - Sphere radius in local units (must be > 0)
    /// * `sectors` - Longitude divisions (minimum 3)
    /// * `stacks` - Latitude divisions (minimum 2)
    ///
    /// # Panics
    /// Panics if the tessellation parameters are below the minimums or the
    /// radius is not positive.
    pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive");
        assert!(sectors >= 3, "sphere needs at least 3 sectors");
        assert!(stacks >= 2, "sphere needs at least 2 stacks");

        let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
        let inv_radius = 1.0 / radius;

        for i in 0..=stacks {
            // Latitude from +90 degrees (north pole) down to -90 degrees
            let stack_angle = constants::PI / 2.0 - (i as f32) * constants::PI / (stacks as f32);
            let ring_radius = radius * stack_angle.cos();
            let y = radius * stack_angle.sin();

            for j in 0..=sectors {
                let sector_angle = (j as f32) * constants::TAU / (sectors as f32);
                let x = ring_radius * sector_angle.cos();
                let z = ring_radius * sector_angle.sin();

                vertices.push(Vertex::new(
                    [x, y, z],
                    [x * inv_radius, y * inv_radius, z * inv_radius],
                    [
                        (j as f32) / (sectors as f32),
                        1.0 - (i as f32) / (stacks as f32),
                    ],
                ));
            }
        }

        // Two triangles per quad, except at the poles where the quads
        // degenerate into single triangles.
        let mut indices = Vec::with_capacity((sectors * (stacks - 1) * 6) as usize);
        for i in 0..stacks {
            let ring_start = i * (sectors + 1);
            let next_ring_start = ring_start + sectors + 1;

            for j in 0..sectors {
                let k1 = ring_start + j;
                let k2 = next_ring_start + j;

                if i != 0 {
                    indices.extend_from_slice(&[k1, k2, k1 + 1]);
                }
                if i != stacks - 1 {
                    indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
                }
            }
        }

        Self::with_submesh(vertices, indices)
    }

    /// Invert the mesh so its faces render from the inside
    ///
    /// Negates every vertex normal and swaps the first two indices of every
    /// triangle in every submesh, reversing the winding order without
    /// altering vertex positions. A camera placed at the center of an
    /// inverted sphere sees its interior surface.
    ///
    /// Self-inverse: applying the transform twice restores the mesh exactly.
    pub fn invert_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = [-vertex.normal[0], -vertex.normal[1], -vertex.normal[2]];
        }

        for submesh in &mut self.submeshes {
            for triangle in submesh.indices.chunks_exact_mut(3) {
                triangle.swap(0, 1);
            }
        }
    }
}
