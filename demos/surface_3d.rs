//! Example: tetrahedralize a point cloud and extract its hull surface

use delaunay_kernel::generation::random_points_3d;
use delaunay_kernel::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== 3D Surface Demo ===\n");

    // Widely spaced input; normalization keeps the predicates well scaled
    let bounds = (Point3D::new(-5e4, -5e4, 0.0), Point3D::new(5e4, 5e4, 2e4));
    let points = random_points_3d(300, bounds, 7);
    let normalization = Normalization::from_points(&points).unwrap_or_else(Normalization::identity);
    println!("Points: {}", points.len());
    println!("  Normalization scale: {:.1}", normalization.scale());

    let tetrahedra = triangulate3d(&points);
    let volume: f64 = tetrahedra.iter().map(Tetrahedron::volume).sum();
    println!("Tetrahedra: {}", tetrahedra.len());
    println!("  Volume: {:.3e}", volume);

    let faces = extract_surface_faces(&tetrahedra);
    let surface = index_surface(&faces);
    surface.validate()?;
    println!("Surface: {} faces", faces.len());
    println!("  Buffers: {} vertices, {} triangles", surface.vertex_count(), surface.triangle_count());

    // Memory estimate for f32 upload
    let mem = (surface.positions_f32().len() * 12 + surface.indices.len() * 4) as f32 / 1024.0;
    println!("  GPU upload: {:.1} KB", mem);

    let full = index_tetrahedra(&tetrahedra);
    println!("All faces: {} triangles", full.triangle_count());

    println!("\n=== Demo Complete ===");
    Ok(())
}
