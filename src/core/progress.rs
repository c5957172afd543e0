use crate::domain::model::{RouteProgress, RoutePoint};
use geoutils::Location;

/// Great-circle distance between two route vertices in meters.
pub fn edge_length(from: &RoutePoint, to: &RoutePoint) -> f64 {
    Location::new(from.lat, from.lng)
        .haversine_distance_to(&Location::new(to.lat, to.lng))
        .meters()
}

/// Distance from the start of the route to every vertex. `result[0]` is always 0.
pub fn cumulative_distances(route: &[RoutePoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(route.len());
    let mut total = 0.0;

    if !route.is_empty() {
        distances.push(total);
    }
    for pair in route.windows(2) {
        total += edge_length(&pair[0], &pair[1]);
        distances.push(total);
    }

    distances
}

/// Number of leading vertices reached after swimming `swum_meters`.
pub fn swum_prefix_len(route: &[RoutePoint], swum_meters: f64) -> usize {
    prefix_len_from_cumulative(&cumulative_distances(route), swum_meters)
}

fn prefix_len_from_cumulative(cumulative: &[f64], swum_meters: f64) -> usize {
    if cumulative.is_empty() {
        return 0;
    }
    let reached = clamp_distance(swum_meters);
    // prefix sums are sorted, the first vertex is always reached
    cumulative.partition_point(|d| *d <= reached).max(1)
}

fn clamp_distance(meters: f64) -> f64 {
    if meters.is_nan() || meters < 0.0 {
        0.0
    } else {
        meters
    }
}

pub fn compute_progress(route: &[RoutePoint], swum_meters: f64) -> RouteProgress {
    let cumulative = cumulative_distances(route);
    let swum_vertices = prefix_len_from_cumulative(&cumulative, swum_meters);
    let route_meters = cumulative.last().copied().unwrap_or(0.0);
    let swum = clamp_distance(swum_meters);

    let completion = if route_meters > 0.0 {
        (swum / route_meters).min(1.0)
    } else {
        0.0
    };

    tracing::debug!(
        "Route progress: {}/{} vertices, {:.1}m of {:.1}m",
        swum_vertices,
        route.len(),
        swum,
        route_meters
    );

    RouteProgress {
        swum: route[..swum_vertices].to_vec(),
        swum_vertices,
        total_vertices: route.len(),
        route_meters,
        swum_meters: swum,
        remaining_meters: (route_meters - swum).max(0.0),
        completion,
    }
}
