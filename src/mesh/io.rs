//! STL file I/O support for Mesh

use super::Mesh;
use crate::{Error, Result, Triangle};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Tool signature placed in the 80-byte binary header, zero-padded.
const HEADER_TEXT: &str = "Binary STL - reliefmesh image relief export";

/// Save mesh to binary STL file
///
/// Layout is the de facto standard: 80-byte header, little-endian u32
/// triangle count, then per triangle the normal and three vertices as
/// little-endian f32 plus a zero attribute-byte-count, 50 bytes each.
/// Slicers depend on this byte-for-byte, so any deviation is a bug.
pub(super) fn save_binary<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        Error::FileSave(format!("Unable to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    let mut header = [0u8; 80];
    let text = HEADER_TEXT.as_bytes();
    let len = text.len().min(80);
    header[..len].copy_from_slice(&text[..len]);
    writer.write_all(&header)?;

    let triangle_count = mesh.triangle_count() as u32;
    writer.write_all(&triangle_count.to_le_bytes())?;

    for tri in mesh.triangles() {
        write_vec3(&mut writer, tri.normal)?;
        write_vec3(&mut writer, tri.v1)?;
        write_vec3(&mut writer, tri.v2)?;
        write_vec3(&mut writer, tri.v3)?;
        // Attribute byte count (unused)
        writer.write_all(&[0u8, 0u8])?;
    }

    writer.flush()?;
    Ok(())
}

/// Save mesh to ASCII STL file
///
/// Numeric fields use scientific notation, which round-trips f32 exactly.
pub(super) fn save_ascii<P: AsRef<Path>>(mesh: &Mesh, path: P, name: &str) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        Error::FileSave(format!("Unable to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "solid {}", name)?;
    for tri in mesh.triangles() {
        writeln!(
            writer,
            "  facet normal {:e} {:e} {:e}",
            tri.normal.x, tri.normal.y, tri.normal.z
        )?;
        writeln!(writer, "    outer loop")?;
        writeln!(writer, "      vertex {:e} {:e} {:e}", tri.v1.x, tri.v1.y, tri.v1.z)?;
        writeln!(writer, "      vertex {:e} {:e} {:e}", tri.v2.x, tri.v2.y, tri.v2.z)?;
        writeln!(writer, "      vertex {:e} {:e} {:e}", tri.v3.x, tri.v3.y, tri.v3.z)?;
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;

    writer.flush()?;
    Ok(())
}

/// Load mesh from binary STL file
///
/// Normals are kept as read so a save/load cycle is bit-exact.
pub(super) fn load_binary<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::FileLoad(format!("Unable to open {}: {}", path.display(), e))
    })?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 80];
    reader.read_exact(&mut header)?;

    // Detect ASCII STL files (not supported by this reader)
    let header_str = String::from_utf8_lossy(&header);
    if header_str.trim_start().to_lowercase().starts_with("solid") {
        let peek = reader.fill_buf()?;
        let peek_str = String::from_utf8_lossy(peek).to_lowercase();
        if peek_str.contains("vertex") {
            return Err(Error::FileLoad(
                "ASCII STL loading is not supported".to_string(),
            ));
        }
    }

    let mut count_bytes = [0u8; 4];
    reader.read_exact(&mut count_bytes)?;
    let triangle_count = u32::from_le_bytes(count_bytes);

    let mut mesh = Mesh::with_capacity(triangle_count as usize);
    for _ in 0..triangle_count {
        let normal = read_vec3(&mut reader)?;
        let v1 = read_vec3(&mut reader)?;
        let v2 = read_vec3(&mut reader)?;
        let v3 = read_vec3(&mut reader)?;

        let mut attr = [0u8; 2];
        reader.read_exact(&mut attr)?;

        mesh.push(Triangle::with_normal(normal, v1, v2, v3));
    }

    Ok(mesh)
}

fn write_vec3<W: Write>(writer: &mut W, v: Vector3<f32>) -> Result<()> {
    writer.write_all(&v.x.to_le_bytes())?;
    writer.write_all(&v.y.to_le_bytes())?;
    writer.write_all(&v.z.to_le_bytes())?;
    Ok(())
}

fn read_vec3<R: Read>(reader: &mut R) -> Result<Vector3<f32>> {
    let mut bytes = [0u8; 4];
    let mut component = |reader: &mut R| -> Result<f32> {
        reader.read_exact(&mut bytes)?;
        Ok(f32::from_le_bytes(bytes))
    };
    let x = component(reader)?;
    let y = component(reader)?;
    let z = component(reader)?;
    Ok(Vector3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TempFolder;
    use std::fs;

    fn sample_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ));
        mesh
    }

    #[test]
    fn test_binary_file_size() {
        let tmp = TempFolder::new().expect("temp folder");
        let path = tmp.path().join("one.stl");
        sample_mesh().save_stl(&path).expect("save");

        let len = fs::metadata(&path).expect("metadata").len();
        assert_eq!(len, 84 + 50);
    }

    #[test]
    fn test_empty_mesh_writes_valid_file() {
        let tmp = TempFolder::new().expect("temp folder");
        let path = tmp.path().join("empty.stl");
        Mesh::new().save_stl(&path).expect("save");

        assert_eq!(fs::metadata(&path).expect("metadata").len(), 84);

        let loaded = Mesh::load_stl(&path).expect("load");
        assert_eq!(loaded.triangle_count(), 0);
    }

    #[test]
    fn test_ascii_structure() {
        let tmp = TempFolder::new().expect("temp folder");
        let path = tmp.path().join("one.stl");
        sample_mesh().save_stl_ascii(&path, "model").expect("save");

        let text = fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("solid model\n"));
        assert!(text.ends_with("endsolid model\n"));
        assert_eq!(text.matches("facet normal").count(), 1);
        assert_eq!(text.matches("vertex").count(), 3);
        assert_eq!(text.matches("outer loop").count(), 1);
        assert_eq!(text.matches("endfacet").count(), 1);
    }

    #[test]
    fn test_ascii_load_is_rejected() {
        let tmp = TempFolder::new().expect("temp folder");
        let path = tmp.path().join("ascii.stl");
        sample_mesh().save_stl_ascii(&path, "model").expect("save");

        assert!(Mesh::load_stl(&path).is_err());
    }
}
