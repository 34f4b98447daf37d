//! Example: planar and constrained triangulation of a random point set
//!
//! Set `RUST_LOG=debug` to see the per-run summaries.

use delaunay_kernel::generation::{grid_points_2d, random_points_2d};
use delaunay_kernel::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== 2D Triangulation Demo ===\n");

    let config = TriangulationConfigBuilder::new()
        .epsilon(1e-10)?
        .super_margin(20.0)?
        .build()?;

    let bounds = (Point2D::new(0.0, 0.0), Point2D::new(100.0, 60.0));
    let points = random_points_2d(500, bounds, 42);
    println!("Points: {}", points.len());

    let triangles = triangulate_with_config(&points, &config);
    let area: f64 = triangles.iter().map(Triangle::area).sum();
    let hull = convex_hull_2d(&points);
    println!("Triangles: {}", triangles.len());
    println!("  Area: {:.3} (hull {:.3}, {} hull vertices)", area, polygon_area(&hull), hull.len());

    let mesh = index_triangles(&triangles);
    mesh.validate()?;
    println!("  Buffers: {} vertices, {} indices", mesh.vertex_count(), mesh.indices.len());

    // Constrained: a diagonal and a vertical wall across a grid
    println!("\nConstrained grid:");
    let grid = grid_points_2d(8, 8, 1.0);
    let constraints = [
        Constraint::new(Point2D::new(0.0, 0.0), Point2D::new(7.0, 3.0)),
        Constraint::new(Point2D::new(3.5, 4.0), Point2D::new(3.5, 7.0)),
    ];
    let constrained = triangulate_constrained_with_config(&grid, &constraints, &config);
    for c in &constraints {
        let present = constrained.iter().any(|t| t.has_edge(&c.edge(), config.vertex_tolerance));
        println!("  {:?} -> {:?}: edge present = {}", c.start, c.end, present);
    }
    println!("  Triangles: {}", constrained.len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
