use std::time::Instant;

use isosculpt_geom::Vec3;
use isosculpt_volume::{CubeSample, DensityVolume};

use crate::constants::{INITIAL_TRI_CAPACITY, INTERP_EPSILON};
use crate::soup::TriangleSoup;
use crate::tables::{EDGE_CORNERS, EDGE_TABLE, triangles};

/// Counters from one full-volume extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub cells: usize,
    pub active_cells: usize,
    pub triangles: usize,
}

/// 8-bit configuration: bit `i` set when corner `i` lies below `iso`.
#[inline]
pub fn cube_config(val: &[f32; 8], iso: f32) -> u8 {
    let mut config = 0u8;
    for (i, v) in val.iter().enumerate() {
        if *v < iso {
            config |= 1 << i;
        }
    }
    config
}

/// Point where the surface crosses the edge `p1 -> p2`.
///
/// Snaps to `p1` or `p2` when either corner sits on the iso level, and to `p1`
/// when the two densities are too close to divide by.
#[inline]
pub fn interpolate_edge(iso: f32, p1: Vec3, p2: Vec3, v1: f32, v2: f32) -> Vec3 {
    if (iso - v1).abs() < INTERP_EPSILON {
        return p1;
    }
    if (iso - v2).abs() < INTERP_EPSILON {
        return p2;
    }
    if (v1 - v2).abs() < INTERP_EPSILON {
        return p1;
    }
    let t = ((iso - v1) / (v2 - v1)).clamp(0.0, 1.0);
    p1.lerp(p2, t)
}

/// Triangulates one cube into `out`; returns the number of triangles appended.
pub fn polygonise_cube(cube: &CubeSample, iso: f32, out: &mut TriangleSoup) -> usize {
    let config = cube_config(&cube.val, iso);
    let edges = EDGE_TABLE[config as usize];
    if edges == 0 {
        return 0;
    }

    let mut points = [Vec3::ZERO; 12];
    for (e, [a, b]) in EDGE_CORNERS.iter().enumerate() {
        if edges & (1 << e) != 0 {
            points[e] = interpolate_edge(iso, cube.pos[*a], cube.pos[*b], cube.val[*a], cube.val[*b]);
        }
    }

    let mut emitted = 0;
    for [e0, e1, e2] in triangles(config) {
        out.push_tri(points[e0], points[e1], points[e2]);
        emitted += 1;
    }
    emitted
}

/// Rebuilds `out` from every cell of `vol` (x outer, y middle, z inner).
pub fn extract_into(vol: &DensityVolume, iso: f32, out: &mut TriangleSoup) -> ExtractStats {
    let start = Instant::now();
    out.clear_keep_capacity();
    let [cx, cy, cz] = vol.cells();
    let mut stats = ExtractStats::default();
    for x in 0..cx {
        for y in 0..cy {
            for z in 0..cz {
                let cube = vol.cube(x, y, z);
                let n = polygonise_cube(&cube, iso, out);
                stats.cells += 1;
                if n > 0 {
                    stats.active_cells += 1;
                    stats.triangles += n;
                }
            }
        }
    }
    log::debug!(
        "extracted {} tris from {}/{} active cells in {:.2} ms",
        stats.triangles,
        stats.active_cells,
        stats.cells,
        start.elapsed().as_secs_f32() * 1000.0
    );
    stats
}

pub fn extract_with_stats(vol: &DensityVolume, iso: f32) -> (TriangleSoup, ExtractStats) {
    let mut soup = TriangleSoup::default();
    soup.reserve_tris(INITIAL_TRI_CAPACITY);
    let stats = extract_into(vol, iso, &mut soup);
    (soup, stats)
}

/// Full Marching Cubes triangle soup for `vol` at `iso`.
pub fn extract(vol: &DensityVolume, iso: f32) -> TriangleSoup {
    extract_with_stats(vol, iso).0
}
