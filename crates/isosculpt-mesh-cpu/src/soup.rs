use isosculpt_geom::{Aabb, Vec3};

use crate::color::{HeightRange, height_color};

/// Unindexed triangles with one flat normal per vertex. Length is always a multiple of 3.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TriangleSoup {
    pub pos: Vec<Vec3>,
    pub norm: Vec<Vec3>,
}

impl TriangleSoup {
    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
    }

    /// Pre-reserve capacity for approximately `n_tris` triangles.
    #[inline]
    pub fn reserve_tris(&mut self, n_tris: usize) {
        self.pos.reserve(n_tris * 3);
        self.norm.reserve(n_tris * 3);
    }

    /// Appends one triangle; its face normal is `normalize((b - a) x (c - a))`.
    pub fn push_tri(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let n = (b - a).cross(c - a).normalized();
        self.pos.extend_from_slice(&[a, b, c]);
        self.norm.extend_from_slice(&[n, n, n]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn tri_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.pos.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.pos)
    }
}

/// Extracted surface as handed to the host: soup plus per-vertex height colors.
#[derive(Default, Clone, Debug)]
pub struct SurfaceMesh {
    pub soup: TriangleSoup,
    pub col: Vec<[f32; 4]>,
    pub height_range: HeightRange,
}

impl SurfaceMesh {
    pub fn from_soup(soup: TriangleSoup) -> Self {
        let mut mesh = Self {
            soup,
            ..Self::default()
        };
        mesh.recolor();
        mesh
    }

    /// Recomputes the height range and colors after `soup` changed, reusing
    /// the color buffer.
    pub fn recolor(&mut self) {
        self.height_range = HeightRange::of_points(&self.soup.pos);
        let range = self.height_range;
        self.col.clear();
        self.col
            .extend(self.soup.pos.iter().map(|p| height_color(&range, p.y)));
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.soup.pos
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.soup.norm
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.col
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.soup.vertex_count()
    }

    /// Sequential index buffer `0..n` for hosts that require indexed meshes.
    pub fn indices(&self) -> Vec<u32> {
        (0..self.soup.vertex_count() as u32).collect()
    }

    /// Interleaved `[x, y, z]` floats for upload.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.soup.pos.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn normals_flat(&self) -> Vec<f32> {
        self.soup.norm.iter().flat_map(|n| n.to_array()).collect()
    }
}
