use nalgebra::{Point2, Point3, Vector3};

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Vertex data for a flat ring lying in the XZ plane, centered on the origin.
pub struct AnnulusData {
    pub coords: Vec<Point3<f32>>,
    pub faces: Vec<Point3<u16>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Point2<f32>>,
}

/// Builds a ring between two radii. The radii can come in either order.
///
/// Vertices alternate inner, outer around the circle, with the first pair
/// repeated at the end so the seam closes. Normals point at the center, so a
/// light placed there lights the whole ring evenly.
pub fn annulus(inner_radius: f32, outer_radius: f32, segments: usize) -> AnnulusData {
    let circle = |r: f32| {
        path_iter_parametric(
            move |theta: f32| Point3::new(r * theta.cos(), 0.0, r * theta.sin()),
            0.0,
            std::f32::consts::TAU,
            segments,
        )
    };

    let mut coords = Vec::with_capacity(2 * (segments + 1));
    for (inner, outer) in circle(inner_radius).zip(circle(outer_radius)) {
        coords.push(inner);
        coords.push(outer);
    }

    let mut faces = Vec::with_capacity(2 * segments);
    for i in 0..segments {
        let a = (2 * i) as u16;
        faces.push(Point3::new(a, a + 1, a + 3));
        faces.push(Point3::new(a, a + 3, a + 2));
    }

    let normals = coords.iter().map(|p| -p.coords.normalize()).collect();
    let uvs = (0..=segments)
        .flat_map(|i| {
            let u = i as f32 / segments as f32;
            [Point2::new(u, 0.0), Point2::new(u, 1.0)]
        })
        .collect();

    AnnulusData {
        coords,
        faces,
        normals,
        uvs,
    }
}
