use nalgebra::Vector3;
use reliefmesh::{Mesh, TempFolder, Triangle};
use std::fs;

fn sample_mesh() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.push(Triangle::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(5.0, 10.0, 0.0),
    ));
    mesh.push(Triangle::with_normal(
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(5.0, 10.0, 0.0),
        Vector3::new(10.0, 0.0, 0.0),
    ));
    mesh.push(Triangle::new(
        Vector3::new(0.25, -1.5, 3.75),
        Vector3::new(10.0, 0.0, 0.125),
        Vector3::new(5.0, 10.0, 2.5),
    ));
    mesh
}

#[test]
fn test_stl_save_and_load() {
    let mesh_original = sample_mesh();

    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let output_path = tmp.path().join("test_roundtrip.stl");
    mesh_original
        .save_stl(&output_path)
        .expect("Failed to save STL");

    let mesh_loaded = Mesh::load_stl(&output_path).expect("Failed to load STL");

    assert_eq!(
        mesh_loaded.triangle_count(),
        mesh_original.triangle_count(),
        "Triangle count mismatch"
    );

    // All coordinates are exactly representable in f32, so the round
    // trip is bit-exact: vertices and stored normals alike
    for (loaded, original) in mesh_loaded
        .triangles()
        .iter()
        .zip(mesh_original.triangles())
    {
        assert_eq!(loaded.v1, original.v1);
        assert_eq!(loaded.v2, original.v2);
        assert_eq!(loaded.v3, original.v3);
        assert_eq!(loaded.normal, original.normal);
    }
}

#[test]
fn test_stl_file_size_is_exact() {
    let mesh = sample_mesh();

    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let output_path = tmp.path().join("test_size.stl");
    mesh.save_stl(&output_path).expect("Failed to save STL");

    let metadata = fs::metadata(&output_path).expect("Failed to read file metadata");
    let expected_size = 84 + 50 * mesh.triangle_count();
    assert_eq!(
        metadata.len(),
        expected_size as u64,
        "STL file size mismatch: expected {}, got {}",
        expected_size,
        metadata.len()
    );
}

#[test]
fn test_stl_header_and_count_layout() {
    let mesh = sample_mesh();

    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let output_path = tmp.path().join("test_layout.stl");
    mesh.save_stl(&output_path).expect("Failed to save STL");

    let bytes = fs::read(&output_path).expect("Failed to read file");
    assert!(bytes.len() >= 84);

    // Header is ASCII, zero-padded to exactly 80 bytes
    assert!(bytes[..80].iter().all(|b| b.is_ascii()));

    // Little-endian u32 triangle count at offset 80
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
    assert_eq!(count as usize, mesh.triangle_count());

    // Each record ends with a zero attribute byte count
    for i in 0..mesh.triangle_count() {
        let attr_offset = 84 + 50 * i + 48;
        assert_eq!(&bytes[attr_offset..attr_offset + 2], &[0, 0]);
    }
}

#[test]
fn test_first_record_matches_triangle() {
    let mesh = sample_mesh();
    let tri = mesh.triangles()[0];

    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let output_path = tmp.path().join("test_record.stl");
    mesh.save_stl(&output_path).expect("Failed to save STL");

    let bytes = fs::read(&output_path).expect("Failed to read file");
    let f32_at = |offset: usize| {
        f32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };

    // Record order: normal, v1, v2, v3
    assert_eq!(f32_at(84), tri.normal.x);
    assert_eq!(f32_at(88), tri.normal.y);
    assert_eq!(f32_at(92), tri.normal.z);
    assert_eq!(f32_at(96), tri.v1.x);
    assert_eq!(f32_at(100), tri.v1.y);
    assert_eq!(f32_at(104), tri.v1.z);
    assert_eq!(f32_at(120), tri.v3.x);
    assert_eq!(f32_at(128), tri.v3.z);
}
