/// Even-odd ray-casting point-in-polygon test against a closed ring.
///
/// `ring` must repeat its first point as the last one. A horizontal ray is
/// cast from the point toward +x and crossings are counted; an odd count
/// means the point is inside. Points exactly on an edge may land on either
/// side, which is acceptable for per-pixel clipping.
pub fn point_in_ring(ring: &[[f64; 2]], point: [f64; 2]) -> bool {
    let mut inside = false;

    for edge in ring.windows(2) {
        let [x1, y1] = edge[0];
        let [x2, y2] = edge[1];

        // half-open on y so shared vertices are counted once
        if (y1 > point[1]) != (y2 > point[1]) {
            let x_cross = x1 + (point[1] - y1) * (x2 - x1) / (y2 - y1);
            if point[0] < x_cross {
                inside = !inside;
            }
        }
    }

    inside
}
